//! Input/output helpers.
//!
//! - grid storage (`store`)
//! - source configuration (`config`)
//! - candidate CSV ingest (`ingest`)
//! - lookup result export (`export`)

pub mod config;
pub mod export;
pub mod ingest;
pub mod store;

pub use config::*;
pub use export::*;
pub use ingest::*;
pub use store::*;
