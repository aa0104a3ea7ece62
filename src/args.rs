use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Emit running percentile statistics for repeat political donors")]
pub struct Args {
    /// Input itcont files, directories of them, or .7z archives (processed in order)
    #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// File holding the percentile (integer in [0, 100]) on its first line
    #[arg(short = 'p', long = "percentile-file", required_unless_present = "percentile")]
    pub percentile_file: Option<PathBuf>,

    /// Percentile to use instead of reading --percentile-file
    #[arg(long = "percentile", value_parser = clap::value_parser!(i64).range(0..=100))]
    pub percentile: Option<i64>,

    /// Output file for repeat donor lines
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Append to the output file instead of truncating it
    #[arg(long = "append")]
    pub append: bool,

    /// Print a summary table of the run
    #[arg(long = "summary")]
    pub summary: bool,

    /// Write run counters as JSON to this path (optional)
    #[arg(long = "stats-json")]
    pub stats_json: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "donation_analytics",
            "-i",
            "a.txt",
            "b.txt",
            "-p",
            "percentile.txt",
            "-o",
            "out.txt",
            "--summary",
        ])
        .unwrap();
        assert_eq!(args.inputs, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(args.percentile_file, Some(PathBuf::from("percentile.txt")));
        assert!(args.summary);
        assert!(!args.append);

        let args =
            Args::try_parse_from(["donation_analytics", "-i", "a.txt", "--percentile", "30", "-o", "o"])
                .unwrap();
        assert_eq!(args.percentile, Some(30));

        assert!(Args::try_parse_from(["donation_analytics", "-i", "a.txt", "-o", "o"]).is_err());
        assert!(Args::try_parse_from([
            "donation_analytics",
            "-i",
            "a.txt",
            "--percentile",
            "101",
            "-o",
            "o"
        ])
        .is_err());
    }
}
