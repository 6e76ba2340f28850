//! Binned efficiency tables.
//!
//! - `grid`: immutable 3-D cell storage and the store payload (`GridData`)
//! - `efficiency`: one table bound to kinematic variables
//! - `registry`: the ordered, named collection built from config

pub mod efficiency;
pub mod grid;
pub mod registry;

pub use efficiency::*;
pub use grid::*;
pub use registry::*;
