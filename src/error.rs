//! Error types.
//!
//! Two layers:
//!
//! - library errors (`TableError`, `EdgeError`) raised while building lookup tables
//! - `AppError`, the binary-facing error that carries a process exit code
//!
//! Table construction is strict: every `TableError` aborts the build. Lookups
//! themselves never fail.

use thiserror::Error;

use crate::binning::Axis;
use crate::io::store::StoreError;

/// Exit code for usage, configuration and input problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for lookup-table construction failures.
pub const EXIT_BUILD: u8 = 3;
/// Exit code for runtime / output failures.
pub const EXIT_RUNTIME: u8 = 4;

/// Invalid bin-edge sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EdgeError {
    #[error("an axis needs at least 2 edges, got {0}")]
    TooFew(usize),

    #[error("edge {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },

    #[error("edges must be strictly increasing: edge {index} ({value}) <= previous ({previous})")]
    NotIncreasing {
        index: usize,
        value: f64,
        previous: f64,
    },

    #[error("uniform axis needs bins > 0 and finite min < max (bins={bins}, min={min}, max={max})")]
    BadUniform { bins: usize, min: f64, max: f64 },
}

/// Failure to construct an efficiency table or registry.
#[derive(Debug, Error)]
pub enum TableError {
    /// An axis variable name is not one of `pt`, `eta`, `width`.
    #[error("efficiency source '{source_name}': unknown {axis}-axis variable '{var_name}' (expected pt, eta or width)")]
    NameResolution {
        source_name: String,
        axis: Axis,
        var_name: String,
    },

    /// The store has no grid at the requested location.
    #[error("efficiency source '{source_name}': no grid found at location '{location}'")]
    SourceNotFound {
        source_name: String,
        location: String,
    },

    /// Edge counts and stored cell counts disagree.
    #[error("efficiency source '{source_name}': dimension mismatch: {detail}")]
    DimensionMismatch { source_name: String, detail: String },

    /// An axis has an unusable edge sequence.
    #[error("efficiency source '{source_name}': invalid {axis}-axis binning: {reason}")]
    InvalidEdges {
        source_name: String,
        axis: Axis,
        #[source]
        reason: EdgeError,
    },

    /// Two sources share the same name.
    #[error("duplicate efficiency source name '{0}'")]
    DuplicateSource(String),

    /// The store failed for reasons other than a missing grid.
    #[error("efficiency source '{source_name}': {reason}")]
    Storage {
        source_name: String,
        #[source]
        reason: StoreError,
    },
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        AppError::new(EXIT_BUILD, err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::new(EXIT_BUILD, err.to_string())
    }
}
