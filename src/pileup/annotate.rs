use super::reader::RawPileupRow;
use super::termini::TerminiCounts;
use std::sync::Arc;

/// One annotated pileup position. The read and quality strings are dropped
/// once the termini have been counted.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRecord {
    pub chrom: Arc<str>,
    pub position: u64,
    pub base: u8,
    pub coverage: u32,
    pub termini: TerminiCounts,
}

impl PositionRecord {
    /// Termini counts over coverage, ordered forward start, forward end,
    /// reverse start, reverse end.
    pub fn fractions(&self) -> [Option<f64>; 4] {
        self.termini.normalized(self.coverage)
    }

    pub fn is_base(&self, base: u8) -> bool {
        self.base.eq_ignore_ascii_case(&base)
    }
}

/// Turns raw rows into `PositionRecord`s, sharing one chromosome name
/// allocation between consecutive rows of the same chromosome.
#[derive(Debug, Default)]
pub struct Annotator {
    current_chrom: Option<Arc<str>>,
    max_termini: TerminiCounts,
    max_coverage: u32,
}

impl Annotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotate(&mut self, row: &RawPileupRow) -> PositionRecord {
        let chrom = match &self.current_chrom {
            Some(chrom) if **chrom == *row.chrom => Arc::clone(chrom),
            _ => {
                let chrom: Arc<str> = Arc::from(row.chrom.as_str());
                self.current_chrom = Some(Arc::clone(&chrom));
                chrom
            }
        };

        let termini = TerminiCounts::from_pileup(row.reads.as_bytes());
        self.max_termini = self.max_termini.max(&termini);
        self.max_coverage = self.max_coverage.max(row.coverage);

        PositionRecord {
            chrom,
            position: row.position,
            base: row.base,
            coverage: row.coverage,
            termini,
        }
    }

    /// Column-wise maxima of the termini counts seen so far.
    pub fn max_termini(&self) -> TerminiCounts {
        self.max_termini
    }

    pub fn max_coverage(&self) -> u32 {
        self.max_coverage
    }
}
