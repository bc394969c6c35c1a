//! Pileup input: reading raw mpileup rows and annotating them with
//! strand-specific read-termini counts.

pub mod annotate;
pub mod reader;
pub mod termini;

pub use annotate::{Annotator, PositionRecord};
pub use reader::{PileupReader, RawPileupRow};
pub use termini::TerminiCounts;
