//! CpG fragmentation contexts: per-CpG windows of read-termini counts,
//! termini fractions and coverage, flattened into one wide row per site.

pub mod columns;
pub mod extractor;
pub mod options;
pub mod writer;

pub use extractor::{cpg_indices, CpGWindow, ExtractionStats, SkipReason, WindowExtractor};
pub use options::FragKonOptions;
pub use writer::FragKonWriter;
