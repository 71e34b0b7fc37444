//! CLI command implementations

pub mod best;
pub mod completions;
pub mod config;
pub mod hops;
