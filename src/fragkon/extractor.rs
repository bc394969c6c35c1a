use super::columns::{FieldGroup, FieldValue, FLANK_BEFORE, WINDOW_LEN};
use crate::pileup::PositionRecord;

/// Why a detected CpG site produced no output row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than five rows precede the C.
    BeforeStart,
    /// Fewer than six rows follow the C.
    PastEnd,
    /// The window's first and last positions are not 11 bp apart.
    CoordinateGap,
    /// The window spans more than one chromosome.
    ContigBoundary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub detected: u64,
    pub emitted: u64,
    pub before_start: u64,
    pub past_end: u64,
    pub coordinate_gap: u64,
    pub contig_boundary: u64,
}

impl ExtractionStats {
    pub fn skipped(&self) -> u64 {
        self.detected - self.emitted
    }

    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::BeforeStart => self.before_start += 1,
            SkipReason::PastEnd => self.past_end += 1,
            SkipReason::CoordinateGap => self.coordinate_gap += 1,
            SkipReason::ContigBoundary => self.contig_boundary += 1,
        }
    }
}

/// True when the row at `index` is the C of a CpG dinucleotide.
pub fn is_cpg_at(table: &[PositionRecord], index: usize) -> bool {
    match (table.get(index), table.get(index + 1)) {
        (Some(current), Some(next)) => current.is_base(b'C') && next.is_base(b'G'),
        _ => false,
    }
}

/// Row indices of every CpG C, in table order.
pub fn cpg_indices(table: &[PositionRecord]) -> impl Iterator<Item = usize> + '_ {
    table
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].is_base(b'C') && pair[1].is_base(b'G'))
        .map(|(index, _)| index)
}

/// Twelve contiguous positions centered on a CpG.
#[derive(Debug, Clone, Copy)]
pub struct CpGWindow<'a> {
    records: &'a [PositionRecord],
}

impl<'a> CpGWindow<'a> {
    /// Slices and validates the window around the CpG whose C sits at
    /// `index`. Does not check that `index` actually is a CpG.
    pub fn around(table: &'a [PositionRecord], index: usize) -> Result<Self, SkipReason> {
        let start = index
            .checked_sub(FLANK_BEFORE)
            .ok_or(SkipReason::BeforeStart)?;
        let records = table
            .get(start..start + WINDOW_LEN)
            .ok_or(SkipReason::PastEnd)?;

        let first = &records[0];
        let last = &records[WINDOW_LEN - 1];
        if last.position.checked_sub(first.position) != Some(WINDOW_LEN as u64 - 1) {
            return Err(SkipReason::CoordinateGap);
        }
        if records.iter().any(|r| r.chrom != first.chrom) {
            return Err(SkipReason::ContigBoundary);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &'a [PositionRecord] {
        self.records
    }

    /// The row holding the C of the CpG.
    pub fn cpg(&self) -> &'a PositionRecord {
        &self.records[FLANK_BEFORE]
    }

    pub fn cpg_id(&self) -> String {
        let cpg = self.cpg();
        format!("{}_{}", cpg.chrom, cpg.position)
    }

    pub fn seq_context(&self) -> String {
        self.records
            .iter()
            .map(|r| r.base.to_ascii_uppercase() as char)
            .collect()
    }

    /// Per-position cells in output column order: each field group in turn,
    /// each spanning all twelve window offsets.
    pub fn values(&self) -> impl Iterator<Item = FieldValue> + 'a {
        let records = self.records;
        FieldGroup::ALL
            .into_iter()
            .flat_map(move |group| records.iter().map(move |r| group.value(r)))
    }

    /// The complete output row, identifier columns included.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = Vec::with_capacity(super::columns::COLUMN_COUNT);
        row.push(self.cpg_id());
        row.push(self.seq_context());
        row.extend(self.values().map(|v| v.to_string()));
        row
    }
}

/// Walks a position-ordered table and yields every CpG window that passes
/// validation, counting the sites it has to skip.
pub struct WindowExtractor<'a> {
    table: &'a [PositionRecord],
    next_index: usize,
    stats: ExtractionStats,
}

impl<'a> WindowExtractor<'a> {
    pub fn new(table: &'a [PositionRecord]) -> Self {
        Self {
            table,
            next_index: 0,
            stats: ExtractionStats::default(),
        }
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }
}

impl<'a> Iterator for WindowExtractor<'a> {
    type Item = CpGWindow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_index + 1 < self.table.len() {
            let index = self.next_index;
            self.next_index += 1;
            if !is_cpg_at(self.table, index) {
                continue;
            }

            self.stats.detected += 1;
            match CpGWindow::around(self.table, index) {
                Ok(window) => {
                    self.stats.emitted += 1;
                    return Some(window);
                }
                Err(reason) => self.stats.record_skip(reason),
            }
        }
        None
    }
}
