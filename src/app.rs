//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - builds the efficiency tables from config
//! - runs lookups and prints reports
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, ConfigArgs, LookupArgs, ScanArgs};
use crate::data::SampleConfig;
use crate::error::AppError;
use crate::io::config::resolve_config_path;

pub mod pipeline;

/// Entry point for the `effmap` binary.
pub fn run() -> Result<(), AppError> {
    init_logging();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Describe(args) => handle_describe(args),
        Command::Lookup(args) => handle_lookup(args),
        Command::Scan(args) => handle_scan(args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings and errors).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load(args: &ConfigArgs) -> Result<pipeline::LoadedRegistry, AppError> {
    let path = resolve_config_path(args.config.as_deref())?;
    info!(config = %path.display(), "loading efficiency sources");
    pipeline::load_registry(&path)
}

fn handle_describe(args: ConfigArgs) -> Result<(), AppError> {
    let loaded = load(&args)?;
    println!("Grid file: {}", loaded.config.filename.display());
    println!("{}", crate::report::format_registry_summary(&loaded.registry));
    Ok(())
}

fn handle_lookup(args: LookupArgs) -> Result<(), AppError> {
    let loaded = load(&args.config)?;
    let out = pipeline::run_lookup(&loaded.registry, &args.candidates)?;

    println!(
        "Candidates: {} read, {} used, {} skipped",
        out.ingest.rows_read,
        out.ingest.candidates.len(),
        out.ingest.row_errors.len()
    );
    println!(
        "{}",
        crate::report::format_lookup_table(&out.ingest.candidates, &loaded.registry, &out.results, args.rows)
    );

    if let Some(path) = &args.export {
        crate::io::export::write_lookup_csv(path, &out.ingest.candidates, &loaded.registry, &out.results)?;
        info!(path = %path.display(), "wrote lookup export");
    }

    Ok(())
}

fn handle_scan(args: ScanArgs) -> Result<(), AppError> {
    let loaded = load(&args.config)?;
    let sample = SampleConfig {
        count: args.count,
        seed: args.seed,
        pt_min: args.pt_min,
        pt_scale: args.pt_scale,
        eta_max: args.eta_max,
        ..SampleConfig::default()
    };
    let occupancies = pipeline::run_scan(&loaded.registry, &sample, args.top)?;

    println!("Scan: {} synthetic candidates (seed {})", sample.count, sample.seed);
    println!("{}", crate::report::format_scan_summary(&occupancies));
    Ok(())
}
