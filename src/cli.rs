use crate::fragkon::options::DEFAULT_OUTPUT;
use clap::Parser;

/// Get fragmentation contexts for every CpG in an mpileup file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Pileup file (plain or compressed)
    #[arg(short = 'i', long = "input", default_value = "")]
    pub input: String,

    /// Name for output file
    #[arg(short = 'o', long = "outfile", default_value = DEFAULT_OUTPUT)]
    pub outfile: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["fragkon"]);
        assert_eq!(args.input, "");
        assert_eq!(args.outfile, "output.csv");
    }

    #[test]
    fn test_short_and_long_flags() {
        let args = Args::parse_from(["fragkon", "-i", "sample.pileup", "--outfile", "ctx.tsv"]);
        assert_eq!(args.input, "sample.pileup");
        assert_eq!(args.outfile, "ctx.tsv");
    }
}
