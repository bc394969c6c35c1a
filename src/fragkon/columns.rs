//! Column layout of the fragmentation-context table.
//!
//! Every output row is `CpGID`, `SeqContext`, then one block of
//! [`WINDOW_LEN`] columns per [`FieldGroup`], in [`FieldGroup::ALL`] order.
//! Header and row generation both walk the same table so they cannot drift
//! apart.

use crate::pileup::PositionRecord;
use std::fmt;

/// Rows taken before the C of the CpG.
pub const FLANK_BEFORE: usize = 5;
/// Rows taken after the C of the CpG, the G included.
pub const FLANK_AFTER: usize = 6;
pub const WINDOW_LEN: usize = FLANK_BEFORE + 1 + FLANK_AFTER;

/// Header labels of the window offsets. The CpG itself is labelled by base.
pub const WINDOW_LABELS: [&str; WINDOW_LEN] =
    ["1", "2", "3", "4", "5", "C", "G", "8", "9", "10", "11", "12"];

pub const ID_COLUMNS: [&str; 2] = ["CpGID", "SeqContext"];

pub const COLUMN_COUNT: usize = ID_COLUMNS.len() + WINDOW_LEN * FieldGroup::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup {
    ForStart,
    ForEnd,
    RevStart,
    RevEnd,
    ForStartN,
    ForEndN,
    RevStartN,
    RevEndN,
    Coverage,
}

impl FieldGroup {
    pub const ALL: [FieldGroup; 9] = [
        FieldGroup::ForStart,
        FieldGroup::ForEnd,
        FieldGroup::RevStart,
        FieldGroup::RevEnd,
        FieldGroup::ForStartN,
        FieldGroup::ForEndN,
        FieldGroup::RevStartN,
        FieldGroup::RevEndN,
        FieldGroup::Coverage,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            FieldGroup::ForStart => "forStart",
            FieldGroup::ForEnd => "forEnd",
            FieldGroup::RevStart => "revStart",
            FieldGroup::RevEnd => "revEnd",
            FieldGroup::ForStartN => "forStartN",
            FieldGroup::ForEndN => "forEndN",
            FieldGroup::RevStartN => "revStartN",
            FieldGroup::RevEndN => "revEndN",
            FieldGroup::Coverage => "Coverage",
        }
    }

    pub fn value(&self, record: &PositionRecord) -> FieldValue {
        let termini = &record.termini;
        match self {
            FieldGroup::ForStart => FieldValue::Count(termini.for_starts),
            FieldGroup::ForEnd => FieldValue::Count(termini.for_ends),
            FieldGroup::RevStart => FieldValue::Count(termini.rev_starts),
            FieldGroup::RevEnd => FieldValue::Count(termini.rev_ends),
            FieldGroup::ForStartN => FieldValue::Fraction(record.fractions()[0]),
            FieldGroup::ForEndN => FieldValue::Fraction(record.fractions()[1]),
            FieldGroup::RevStartN => FieldValue::Fraction(record.fractions()[2]),
            FieldGroup::RevEndN => FieldValue::Fraction(record.fractions()[3]),
            FieldGroup::Coverage => FieldValue::Coverage(record.coverage),
        }
    }
}

/// A single per-position output cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Count(u32),
    /// `None` is the undefined fraction of an uncovered position.
    Fraction(Option<f64>),
    Coverage(u32),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug formatting of f64 keeps the trailing ".0" on whole numbers
        match self {
            FieldValue::Count(count) => write!(f, "{}", count),
            FieldValue::Fraction(Some(fraction)) => write!(f, "{:?}", fraction),
            FieldValue::Fraction(None) => f.write_str("nan"),
            FieldValue::Coverage(coverage) => write!(f, "{:?}", *coverage as f64),
        }
    }
}

pub fn header() -> Vec<String> {
    let mut columns: Vec<String> = ID_COLUMNS.iter().map(|c| c.to_string()).collect();
    for group in FieldGroup::ALL {
        columns.extend(
            WINDOW_LABELS
                .iter()
                .map(|label| format!("{}{}", group.prefix(), label)),
        );
    }
    columns
}
