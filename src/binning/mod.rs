//! Axis binning: edge sequences and bin search.
//!
//! Bin numbering follows the usual histogram convention:
//!
//! - bin `0` is the underflow bin (`v < edges[0]`)
//! - bins `1..=N` are the in-range bins, half-open `[low, high)`
//! - bin `N + 1` is the overflow bin (`v >= edges[N]`, and NaN)

pub mod axis;

pub use axis::*;
