use crate::error::{FragKonError, Result};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "output.csv";

#[derive(Clone, Debug)]
pub struct FragKonOptions {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FragKonOptions {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(FragKonError::MissingInput);
        }
        Ok(())
    }
}
