use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The pocketscan developers",
    version,
    about = "pocketscan - Geometric detection and druggability ranking of protein binding sites.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect candidate binding sites and rank them by druggability.
    Detect(DetectArgs),
    /// Print chain, residue and composition descriptors of a structure as JSON.
    Summarize(SummarizeArgs),
}

/// Where the input structure comes from. Exactly one source must be given.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputSource {
    /// Path to a PDB file.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// PDB accession code to download from RCSB (e.g., 1HSG).
    #[arg(long, value_name = "ID")]
    pub pdb_id: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of sites.
    #[default]
    Json,
    /// One CSV row per site.
    Csv,
    /// Human-readable table.
    Table,
}

/// Arguments for the `detect` subcommand.
#[derive(Args, Debug)]
pub struct DetectArgs {
    #[command(flatten)]
    pub source: InputSource,

    /// Path to a detection configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write results to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format for the ranked sites.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Seed for the randomized sampling steps, overriding the config file.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,

    /// Override the primary acceptance threshold from the config file.
    #[arg(short, long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S cavity.max-distance=7.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `summarize` subcommand.
#[derive(Args, Debug)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub source: InputSource,

    /// Write the summary to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_accepts_a_local_file() {
        let cli = Cli::parse_from(["pocketscan", "detect", "-i", "protein.pdb", "--seed", "3"]);
        let Commands::Detect(args) = cli.command else {
            panic!("Expected 'detect' subcommand");
        };
        assert_eq!(args.source.input, Some(PathBuf::from("protein.pdb")));
        assert_eq!(args.source.pdb_id, None);
        assert_eq!(args.seed, Some(3));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn detect_parses_format_and_set_values() {
        let cli = Cli::parse_from([
            "pocketscan",
            "-vv",
            "detect",
            "--pdb-id",
            "1hsg",
            "--format",
            "csv",
            "-S",
            "ranking.threshold=0.5",
            "-S",
            "seed=9",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Detect(args) = cli.command else {
            panic!("Expected 'detect' subcommand");
        };
        assert_eq!(args.source.pdb_id.as_deref(), Some("1hsg"));
        assert_eq!(args.format, OutputFormat::Csv);
        assert_eq!(args.set_values, vec!["ranking.threshold=0.5", "seed=9"]);
    }

    #[test]
    fn input_sources_are_mutually_exclusive_and_required() {
        assert!(
            Cli::try_parse_from(["pocketscan", "detect", "-i", "a.pdb", "--pdb-id", "1ABC"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["pocketscan", "summarize"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["pocketscan", "-q", "-v", "summarize", "-i", "a.pdb"]);
        assert!(result.is_err());
    }
}
