//! `tau-effmap` library crate.
//!
//! Binned 3-D efficiency lookup tables for tau candidates: each table maps
//! `(pt, eta, width)` coordinates to a stored efficiency, its uncertainty and
//! the global bin it came from.
//!
//! The binary (`effmap`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - tables can be embedded directly in other analysis code

pub mod app;
pub mod binning;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod table;
