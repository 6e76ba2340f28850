//! Shared workflow used by the CLI commands:
//! config -> grid store -> registry -> lookups.
//!
//! Commands only decide what to print.

use std::path::Path;

use crate::data::{SampleConfig, generate_candidates};
use crate::domain::{LookupResult, TauCandidate};
use crate::error::AppError;
use crate::io::config::EffMapConfig;
use crate::io::ingest::{IngestedCandidates, load_candidates};
use crate::io::store::JsonGridStore;
use crate::report::{SourceOccupancy, summarize_occupancy};
use crate::table::TableRegistry;

/// A config and the registry built from it.
#[derive(Debug, Clone)]
pub struct LoadedRegistry {
    pub config: EffMapConfig,
    pub registry: TableRegistry,
}

/// Load the config, open its grid document and build every table.
pub fn load_registry(config_path: &Path) -> Result<LoadedRegistry, AppError> {
    let config = EffMapConfig::load(config_path)?;
    // The store is dropped once the tables have copied their grids.
    let store = JsonGridStore::open(&config.filename)?;
    let registry = TableRegistry::build(&config.sources, &store)?;
    Ok(LoadedRegistry { config, registry })
}

/// Outputs of `effmap lookup`.
#[derive(Debug, Clone)]
pub struct LookupOutput {
    pub ingest: IngestedCandidates,
    /// `results[i][s]`: candidate `i`, source `s`.
    pub results: Vec<Vec<LookupResult>>,
}

pub fn run_lookup(registry: &TableRegistry, candidates_csv: &Path) -> Result<LookupOutput, AppError> {
    let ingest = load_candidates(candidates_csv)?;
    let results = lookup_candidates(registry, &ingest.candidates);
    Ok(LookupOutput { ingest, results })
}

/// Every source for every candidate.
pub fn lookup_candidates(registry: &TableRegistry, candidates: &[TauCandidate]) -> Vec<Vec<LookupResult>> {
    candidates.iter().map(|c| registry.lookup_all(c)).collect()
}

/// Generate a sample and summarise per-source bin occupancy.
pub fn run_scan(registry: &TableRegistry, sample: &SampleConfig, top_n: usize) -> Result<Vec<SourceOccupancy>, AppError> {
    let candidates = generate_candidates(sample)?;
    Ok(scan_candidates(registry, &candidates, top_n))
}

pub fn scan_candidates(registry: &TableRegistry, candidates: &[TauCandidate], top_n: usize) -> Vec<SourceOccupancy> {
    registry
        .iter()
        .enumerate()
        .map(|(index, table)| {
            let results = registry.lookup_batch(index, candidates);
            summarize_occupancy(table, &results, top_n)
        })
        .collect()
}
