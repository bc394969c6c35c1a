pub mod cli;
pub mod commands;
pub mod error;
pub mod fragkon;
pub mod pileup;
pub(crate) mod utils;

pub use error::{FragKonError, Result};
