//! Bin edges and binary-search bin lookup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EdgeError;

/// One of the three table axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(s)
    }
}

/// Strictly increasing, finite bin edges.
///
/// `N = edges.len() - 1` in-range bins, plus underflow (`0`) and overflow
/// (`N + 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct AxisEdges {
    edges: Vec<f64>,
}

impl AxisEdges {
    /// Validate and wrap an explicit edge sequence (variable-width binning).
    pub fn new(edges: Vec<f64>) -> Result<Self, EdgeError> {
        if edges.len() < 2 {
            return Err(EdgeError::TooFew(edges.len()));
        }
        for (index, &value) in edges.iter().enumerate() {
            if !value.is_finite() {
                return Err(EdgeError::NonFinite { index, value });
            }
            if index > 0 {
                let previous = edges[index - 1];
                if value <= previous {
                    return Err(EdgeError::NotIncreasing {
                        index,
                        value,
                        previous,
                    });
                }
            }
        }
        Ok(Self { edges })
    }

    /// Fixed-width binning: `bins` equal bins spanning `[min, max)`.
    pub fn uniform(bins: usize, min: f64, max: f64) -> Result<Self, EdgeError> {
        if bins == 0 || !(min.is_finite() && max.is_finite() && max > min) {
            return Err(EdgeError::BadUniform { bins, min, max });
        }
        let width = (max - min) / bins as f64;
        let mut edges: Vec<f64> = (0..bins).map(|i| min + width * i as f64).collect();
        // Pin the last edge exactly so `v == max` is overflow regardless of rounding.
        edges.push(max);
        Self::new(edges)
    }

    /// Number of in-range bins.
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Number of bins including underflow and overflow.
    pub fn n_bins_with_flows(&self) -> usize {
        self.edges.len() + 1
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Lower edge of the first in-range bin.
    pub fn low(&self) -> f64 {
        self.edges[0]
    }

    /// Upper edge of the last in-range bin.
    pub fn high(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Bin index for `v` (see module docs for the numbering).
    pub fn find_bin(&self, v: f64) -> usize {
        find_bin(&self.edges, v)
    }

    /// Centre of in-range bin `bin` (`1..=N`), or `None` for flow bins.
    pub fn bin_center(&self, bin: usize) -> Option<f64> {
        if bin == 0 || bin > self.n_bins() {
            return None;
        }
        Some(0.5 * (self.edges[bin - 1] + self.edges[bin]))
    }

    /// True for the underflow and overflow bins.
    pub fn is_flow_bin(&self, bin: usize) -> bool {
        bin == 0 || bin > self.n_bins()
    }
}

/// Locate `v` in `edges` (length `N + 1`, strictly increasing).
///
/// Returns `0` below the first edge, `N + 1` at or above the last edge (NaN
/// included), otherwise the `i` with `edges[i-1] <= v < edges[i]`.
/// `edges` must hold at least two entries, as `AxisEdges` guarantees.
pub(crate) fn find_bin(edges: &[f64], v: f64) -> usize {
    let n = edges.len() - 1;
    if v < edges[0] {
        return 0;
    }
    if !(v < edges[n]) {
        return n + 1;
    }
    // Count of edges <= v; in range this is exactly the bin number.
    edges.partition_point(|&e| e <= v)
}
