//! Command-line parsing for the efficiency lookup tool.
//!
//! Argument parsing and command dispatch stay separate from the table code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "effmap", version, about = "Binned tau efficiency lookup tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every configured efficiency source with its axes and binning.
    Describe(ConfigArgs),
    /// Look up every source for candidates read from a CSV file.
    Lookup(LookupArgs),
    /// Look up synthetic candidates and report how they spread over the bins.
    Scan(ScanArgs),
}

/// Config selection shared by all commands.
#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    /// Source config JSON (defaults to $TAU_EFFMAP_CONFIG).
    #[arg(short = 'c', long, value_name = "JSON")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct LookupArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Candidate CSV with `pt`, `eta`, `width` (and optional `id`) columns.
    #[arg(long, value_name = "CSV")]
    pub candidates: PathBuf,

    /// Maximum rows printed to the terminal.
    #[arg(long, default_value_t = 50)]
    pub rows: usize,

    /// Export every lookup to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ScanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Number of synthetic candidates.
    #[arg(short = 'n', long, default_value_t = 10_000)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Minimum generated pt.
    #[arg(long, default_value_t = 15.0)]
    pub pt_min: f64,

    /// Mean of the exponential pt tail above `pt_min`.
    #[arg(long, default_value_t = 25.0)]
    pub pt_scale: f64,

    /// Generated |eta| limit.
    #[arg(long, default_value_t = 2.5)]
    pub eta_max: f64,

    /// Most-populated bins listed per source.
    #[arg(long, default_value_t = 5)]
    pub top: usize,
}
