//! Reporting utilities: bin occupancy summaries and formatted terminal output.

pub mod format;

pub use format::*;

use std::collections::HashMap;

use crate::domain::LookupResult;
use crate::table::EfficiencyTable;

/// How a batch of lookups spread over one table's bins.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOccupancy {
    pub source: String,
    pub lookups: usize,
    pub distinct_bins: usize,
    /// Lookups that landed in a bin with any under/overflow axis.
    pub flow_lookups: usize,
    /// Mean looked-up value (0 for an empty batch).
    pub mean_value: f64,
    /// Most-hit bins as `(bin_index, count)`, highest count first, ties by bin.
    pub top_bins: Vec<(usize, usize)>,
}

impl SourceOccupancy {
    pub fn flow_fraction(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.flow_lookups as f64 / self.lookups as f64
        }
    }
}

/// Summarise `results` (all produced by `table`).
pub fn summarize_occupancy(table: &EfficiencyTable, results: &[LookupResult], top_n: usize) -> SourceOccupancy {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    let mut flow_lookups = 0usize;
    let mut sum = 0.0;

    for r in results {
        *counts.entry(r.bin_index).or_insert(0) += 1;
        if table.grid().is_flow(r.bin_index) {
            flow_lookups += 1;
        }
        sum += r.value;
    }

    let mut top_bins: Vec<(usize, usize)> = counts.iter().map(|(&bin, &n)| (bin, n)).collect();
    top_bins.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    top_bins.truncate(top_n);

    SourceOccupancy {
        source: table.name().to_string(),
        lookups: results.len(),
        distinct_bins: counts.len(),
        flow_lookups,
        mean_value: if results.is_empty() { 0.0 } else { sum / results.len() as f64 },
        top_bins,
    }
}
