use super::columns;
use super::extractor::CpGWindow;
use crate::error::{FragKonError, Result};
use csv::{QuoteStyle, WriterBuilder};
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Tab-separated fragmentation-context table. The header is written on
/// creation, so an input without usable CpGs still yields a valid table.
pub struct FragKonWriter<W: Write> {
    inner: csv::Writer<W>,
    path: PathBuf,
    cell: String,
    rows_written: u64,
}

impl FragKonWriter<BufWriter<File>> {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| FragKonError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(BufWriter::with_capacity(1 << 20, file), path)
    }
}

impl<W: Write> FragKonWriter<W> {
    pub fn new(inner: W, path: &Path) -> Result<Self> {
        let inner = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Necessary)
            .from_writer(inner);
        let mut writer = Self {
            inner,
            path: path.to_path_buf(),
            cell: String::with_capacity(32),
            rows_written: 0,
        };
        writer
            .inner
            .write_record(columns::header())
            .map_err(|source| writer.write_error(source))?;
        Ok(writer)
    }

    pub fn write_window(&mut self, window: &CpGWindow) -> Result<()> {
        self.write_cell(&window.cpg_id())?;
        self.write_cell(&window.seq_context())?;
        for value in window.values() {
            self.cell.clear();
            // Formatting into a String cannot fail
            let _ = write!(self.cell, "{}", value);
            let result = self.inner.write_field(self.cell.as_bytes());
            result.map_err(|source| self.write_error(source))?;
        }
        self.inner
            .write_record(None::<&[u8]>)
            .map_err(|source| self.write_error(source))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flushes buffered rows and hands back the underlying writer.
    pub fn finish(self) -> Result<W> {
        let path = self.path;
        self.inner.into_inner().map_err(|e| FragKonError::Write {
            path,
            source: csv::Error::from(e.into_error()),
        })
    }

    fn write_cell(&mut self, cell: &str) -> Result<()> {
        self.inner
            .write_field(cell)
            .map_err(|source| self.write_error(source))
    }

    fn write_error(&self, source: csv::Error) -> FragKonError {
        FragKonError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragkon::extractor::WindowExtractor;
    use crate::pileup::{PositionRecord, TerminiCounts};
    use std::sync::Arc;

    fn record(chrom: &Arc<str>, position: u64, base: u8, coverage: u32) -> PositionRecord {
        PositionRecord {
            chrom: Arc::clone(chrom),
            position,
            base,
            coverage,
            termini: TerminiCounts {
                for_starts: 1,
                for_ends: 0,
                rev_starts: 2,
                rev_ends: 0,
            },
        }
    }

    fn written(table: &[PositionRecord]) -> String {
        let mut writer = FragKonWriter::new(Vec::new(), Path::new("memory.tsv")).unwrap();
        for window in WindowExtractor::new(table) {
            writer.write_window(&window).unwrap();
        }
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_header_only_when_no_windows() {
        let out = written(&[]);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("CpGID\tSeqContext\tforStart1\t"));
        assert!(lines[0].ends_with("\tCoverage11\tCoverage12"));
    }

    #[test]
    fn test_rows_match_header_width() {
        let chrom: Arc<str> = Arc::from("chr7");
        let table: Vec<_> = "ttacgatcgatcgaagg"
            .bytes()
            .enumerate()
            .map(|(i, base)| record(&chrom, 1000 + i as u64, base, ((i + 1) % 3) as u32 * 2))
            .collect();

        let out = written(&table);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines.len() > 1);
        for line in &lines {
            assert_eq!(line.split('\t').count(), columns::COLUMN_COUNT);
        }

        let fields: Vec<&str> = lines[1].split('\t').collect();
        assert_eq!(fields[0], "chr7_1007");
        assert_eq!(fields[1], "ACGATCGATCGA");
        // coverage of 0 leaves the fraction undefined, 2 gives 1/2
        assert_eq!(fields[2 + 4 * 12], "nan");
        assert_eq!(fields[2 + 4 * 12 + 1], "0.5");
        assert_eq!(fields[2 + 6 * 12 + 1], "1.0");
        assert_eq!(fields[2 + 8 * 12], "0.0");
        assert_eq!(fields[2 + 8 * 12 + 2], "4.0");
    }
}
