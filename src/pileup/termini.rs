//! Read-termini counting over mpileup read strings.
//!
//! In the mpileup read column a read start is written as `^` followed by the
//! mapping quality byte and then the base call, and a read end is the base
//! call followed by `$`. A base matching the reference is `.` on the forward
//! strand and `,` on the reverse strand. Only reference-matching calls are
//! counted as termini.

const READ_START: u8 = b'^';
const READ_END: u8 = b'$';
const FORWARD_MATCH: u8 = b'.';
const REVERSE_MATCH: u8 = b',';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TerminiCounts {
    pub for_starts: u32,
    pub for_ends: u32,
    pub rev_starts: u32,
    pub rev_ends: u32,
}

impl TerminiCounts {
    pub fn from_pileup(reads: &[u8]) -> Self {
        Self {
            for_starts: count_starts(reads, FORWARD_MATCH),
            for_ends: count_ends(reads, FORWARD_MATCH),
            rev_starts: count_starts(reads, REVERSE_MATCH),
            rev_ends: count_ends(reads, REVERSE_MATCH),
        }
    }

    /// Each count divided by `coverage`, in field order. `None` when the
    /// position has no coverage.
    pub fn normalized(&self, coverage: u32) -> [Option<f64>; 4] {
        let norm = |count: u32| {
            if coverage == 0 {
                None
            } else {
                Some(count as f64 / coverage as f64)
            }
        };
        [
            norm(self.for_starts),
            norm(self.for_ends),
            norm(self.rev_starts),
            norm(self.rev_ends),
        ]
    }

    pub fn max(&self, other: &Self) -> Self {
        Self {
            for_starts: self.for_starts.max(other.for_starts),
            for_ends: self.for_ends.max(other.for_ends),
            rev_starts: self.rev_starts.max(other.rev_starts),
            rev_ends: self.rev_ends.max(other.rev_ends),
        }
    }
}

/// Non-overlapping, left-to-right count of `^<any byte><strand>`.
fn count_starts(reads: &[u8], strand: u8) -> u32 {
    let mut count = 0;
    let mut i = 0;
    while i + 2 < reads.len() {
        if reads[i] == READ_START && reads[i + 2] == strand {
            count += 1;
            i += 3;
        } else {
            i += 1;
        }
    }
    count
}

/// Count of `<strand>$`. The two bytes differ so matches cannot overlap.
fn count_ends(reads: &[u8], strand: u8) -> u32 {
    reads
        .windows(2)
        .filter(|w| w[0] == strand && w[1] == READ_END)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_starts() {
        let counts = TerminiCounts::from_pileup(b"^5.^5.a,,.");
        assert_eq!(counts.for_starts, 2);
        assert_eq!(counts.rev_starts, 0);
        assert_eq!(counts.for_ends, 0);
        assert_eq!(counts.rev_ends, 0);
    }

    #[test]
    fn test_all_four_patterns() {
        let counts = TerminiCounts::from_pileup(b"^I,.$,$,$^!.A.");
        assert_eq!(counts.for_starts, 1);
        assert_eq!(counts.for_ends, 1);
        assert_eq!(counts.rev_starts, 1);
        assert_eq!(counts.rev_ends, 2);
    }

    #[test]
    fn test_mapping_quality_byte_can_be_a_marker() {
        // MAPQ bytes are arbitrary printable ASCII, including '.', ',' and '^'
        assert_eq!(count_starts(b"^..", FORWARD_MATCH), 1);
        assert_eq!(count_starts(b"^,,", REVERSE_MATCH), 1);
        // "^^.." matches once at offset 0; the scan resumes past the match
        assert_eq!(count_starts(b"^^..", FORWARD_MATCH), 1);
    }

    #[test]
    fn test_mismatches_are_not_termini() {
        let counts = TerminiCounts::from_pileup(b"^5A^5aT$t$");
        assert_eq!(counts, TerminiCounts::default());
    }

    #[test]
    fn test_truncated_start_marker() {
        assert_eq!(count_starts(b"^5", FORWARD_MATCH), 0);
        assert_eq!(count_starts(b"", FORWARD_MATCH), 0);
        assert_eq!(count_ends(b"$", FORWARD_MATCH), 0);
    }

    #[test]
    fn test_normalized() {
        let counts = TerminiCounts {
            for_starts: 2,
            for_ends: 1,
            rev_starts: 0,
            rev_ends: 4,
        };
        assert_eq!(
            counts.normalized(4),
            [Some(0.5), Some(0.25), Some(0.0), Some(1.0)]
        );
        assert_eq!(counts.normalized(0), [None; 4]);
    }
}
