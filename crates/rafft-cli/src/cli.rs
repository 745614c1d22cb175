use clap::{Args, Parser, Subcommand};
use rafft::core::encoding::EncodingScheme;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "RAFFT CLI - RNA secondary structure prediction by correlation-guided stem search.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to fold multi-record inputs.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the secondary structure of one or more sequences.
    Fold(FoldArgs),
    /// Print the block-to-block connectivity of a saved fold trajectory.
    Paths(PathsArgs),
}

/// Arguments for the `fold` subcommand.
#[derive(Args, Debug)]
pub struct FoldArgs {
    // --- Input ---
    #[command(flatten)]
    pub input: SequenceInput,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Search Overrides ---
    /// Minimum number of pairs in a committed stem.
    #[arg(long = "min-stem", value_name = "INT")]
    pub min_stem_length: Option<usize>,

    /// Minimum number of unpaired positions closed by a pair.
    #[arg(long = "min-loop", value_name = "INT")]
    pub min_loop_size: Option<usize>,

    #[command(flatten)]
    pub pseudoknots: PseudoknotToggle,

    /// Number of top-ranked correlation offsets inspected per step.
    #[arg(short = 'n', long = "shortlist", value_name = "INT", conflicts_with = "exhaustive")]
    pub shortlist_size: Option<usize>,

    /// Inspect every offset instead of a shortlist.
    #[arg(long)]
    pub exhaustive: bool,

    /// Constant added to the overlap length when normalizing correlations.
    #[arg(long = "pad", value_name = "FLOAT")]
    pub padding: Option<f64>,

    // --- Encoding Overrides ---
    /// Weight of G-C pairs.
    #[arg(long = "gc", value_name = "FLOAT")]
    pub gc_weight: Option<f64>,

    /// Weight of A-U pairs.
    #[arg(long = "au", value_name = "FLOAT")]
    pub au_weight: Option<f64>,

    /// Weight of G-U pairs.
    #[arg(long = "gu", value_name = "FLOAT")]
    pub gu_weight: Option<f64>,

    /// Strand encoding: 'nucleotide' or 'stacking'.
    #[arg(long, value_name = "SCHEME")]
    pub scheme: Option<EncodingScheme>,

    // --- Energy ---
    /// TOML file overriding the stacking energy parameters.
    #[arg(long, value_name = "PATH")]
    pub energy_params: Option<PathBuf>,

    /// Do not evaluate energies of predicted structures.
    #[arg(long)]
    pub no_energy: bool,

    // --- Outputs ---
    #[command(flatten)]
    pub target: TargetInput,

    /// Write the fold trajectory in batch format to this path.
    #[arg(long, value_name = "PATH")]
    pub trajectory: Option<PathBuf>,

    /// Write a CSV comparison against the target structures to this path.
    #[arg(long, value_name = "PATH", requires = "target_source")]
    pub report: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.min-stem-length=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Where the sequences come from.
#[derive(Args, Debug, Clone, Default)]
#[group(required = false, multiple = false)]
pub struct SequenceInput {
    /// Sequence given inline.
    #[arg(short, long, value_name = "SEQ")]
    pub sequence: Option<String>,

    /// FASTA-style file with one or more records.
    #[arg(short = 'f', long = "seq-file", value_name = "PATH")]
    pub seq_file: Option<PathBuf>,
}

/// Mutually exclusive flags for pseudoknot mode.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct PseudoknotToggle {
    /// Allow crossing stems by merging segments after each split.
    #[arg(long = "pk")]
    pub pseudoknots: bool,
    /// Force nested structures, overriding the config file.
    #[arg(long = "no-pk")]
    pub no_pseudoknots: bool,
}

/// Reference structures to compare predictions against.
#[derive(Args, Debug, Clone, Default)]
#[group(id = "target_source", required = false, multiple = false)]
pub struct TargetInput {
    /// Target structure in dot-bracket notation.
    #[arg(long, value_name = "STRUCTURE")]
    pub target: Option<String>,

    /// File with one target structure record per input sequence.
    #[arg(long, value_name = "PATH")]
    pub target_file: Option<PathBuf>,
}

/// Arguments for the `paths` subcommand.
#[derive(Args, Debug)]
pub struct PathsArgs {
    /// Trajectory file in batch format.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,
}
