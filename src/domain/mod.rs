//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - the candidate interface (`Kinematics`) and the variable enum (`KineVar`)
//! - declarative source specs (`SourceSpec`, `AxisVarSpec`)
//! - lookup outputs (`LookupResult`, `BinCoord`)

pub mod types;

pub use types::*;
