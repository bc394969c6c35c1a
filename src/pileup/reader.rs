use crate::error::{FragKonError, Result};
use csv::{ReaderBuilder, StringRecord};
use niffler::get_reader;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

const PILEUP_COLUMNS: usize = 6;

/// The fields of one mpileup line that annotation needs. The base quality
/// column is checked for presence but not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPileupRow {
    pub chrom: String,
    pub position: u64,
    pub base: u8,
    pub coverage: u32,
    pub reads: String,
}

impl RawPileupRow {
    fn from_record(record: &StringRecord, line: u64) -> Result<Self> {
        if record.len() != PILEUP_COLUMNS {
            return Err(FragKonError::FieldCount {
                line,
                expected: PILEUP_COLUMNS,
                actual: record.len(),
            });
        }

        let invalid = |field: &'static str, value: &str| FragKonError::InvalidField {
            line,
            field,
            value: value.to_string(),
        };

        let position = record[1]
            .parse::<u64>()
            .map_err(|_| invalid("position", &record[1]))?;
        let base = match record[2].as_bytes() {
            [base] => *base,
            _ => return Err(invalid("reference base", &record[2])),
        };
        let coverage = record[3]
            .parse::<u32>()
            .map_err(|_| invalid("coverage", &record[3]))?;

        Ok(Self {
            chrom: record[0].to_string(),
            position,
            base,
            coverage,
            reads: record[4].to_string(),
        })
    }
}

/// Streams single-sample mpileup rows from a tab-separated source.
pub struct PileupReader<R: Read> {
    inner: csv::Reader<R>,
    record: StringRecord,
    path: PathBuf,
}

impl PileupReader<Box<dyn Read>> {
    /// Opens a pileup file, decompressing it if needed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| FragKonError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let (inner, _compression) =
            get_reader(Box::new(file)).map_err(|source| FragKonError::Decompress {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(inner, path))
    }
}

impl<R: Read> PileupReader<R> {
    pub fn new(inner: R, path: &Path) -> Self {
        // MAPQ bytes in the read column may be '"', so quoting stays off
        let inner = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .buffer_capacity(1 << 20)
            .from_reader(inner);
        Self {
            inner,
            record: StringRecord::new(),
            path: path.to_path_buf(),
        }
    }

    fn read_row(&mut self) -> Result<Option<RawPileupRow>> {
        let has_record = self
            .inner
            .read_record(&mut self.record)
            .map_err(|source| FragKonError::Read {
                path: self.path.clone(),
                source,
            })?;
        if !has_record {
            return Ok(None);
        }
        let line = self.record.position().map_or(0, |p| p.line());
        RawPileupRow::from_record(&self.record, line).map(Some)
    }
}

impl<R: Read> Iterator for PileupReader<R> {
    type Item = Result<RawPileupRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_row().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(data: &str) -> Result<Vec<RawPileupRow>> {
        PileupReader::new(Cursor::new(data.as_bytes().to_vec()), Path::new("test.pileup"))
            .collect()
    }

    #[test]
    fn test_reads_rows() {
        let rows = read_all("chr1\t100\tC\t3\t^\".,$\tIII\nchr1\t101\tg\t0\t*\t*\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].chrom, "chr1");
        assert_eq!(rows[0].position, 100);
        assert_eq!(rows[0].base, b'C');
        assert_eq!(rows[0].coverage, 3);
        assert_eq!(rows[0].reads, "^\".,$");
        assert_eq!(rows[1].base, b'g');
        assert_eq!(rows[1].coverage, 0);
    }

    #[test]
    fn test_wrong_field_count_names_line() {
        let err = read_all("chr1\t1\tA\t1\t.\tI\nchr1\t2\tA\t1\t.\n").unwrap_err();
        match err {
            FragKonError::FieldCount {
                line,
                expected,
                actual,
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, 6);
                assert_eq!(actual, 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_numeric_coverage() {
        let err = read_all("chr1\t1\tA\tmany\t.\tI\n").unwrap_err();
        assert!(matches!(
            err,
            FragKonError::InvalidField {
                line: 1,
                field: "coverage",
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_position() {
        let err = read_all("chr1\t1.5\tA\t1\t.\tI\n").unwrap_err();
        assert!(matches!(
            err,
            FragKonError::InvalidField {
                field: "position",
                ..
            }
        ));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_multi_character_base() {
        let err = read_all("chr1\t1\tAC\t1\t.\tI\n").unwrap_err();
        assert!(matches!(
            err,
            FragKonError::InvalidField {
                field: "reference base",
                ..
            }
        ));
    }
}
