//! Synthetic candidate generation for scanning tables without input files.

pub mod sample;

pub use sample::*;
