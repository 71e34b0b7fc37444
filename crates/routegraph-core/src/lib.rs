//! Routegraph Core - In-memory graph and path traversal
//!
//! This crate provides an arena-backed directed graph whose nodes carry
//! arbitrary data, value-resolved paths over that graph, and two traversals:
//! a breadth-first shortest-hop search and a best-path accumulator driven by
//! a pluggable comparison strategy.

pub mod error;
pub mod graph;
pub mod limits;
pub mod path;
pub mod queue;
pub mod strategy;
pub mod traversal;

pub use error::{Error, Result};
pub use graph::{Edge, EdgeStore, Graph, Node, NodeId, NodeKind};
pub use limits::TraversalLimits;
pub use path::Path;
pub use queue::WorkQueue;
pub use strategy::{from_fn, Choice, FewestHops, MaxTotalWeight, MinTotalWeight, PathStrategy};
pub use traversal::{
    optimal_paths, optimal_paths_by, optimal_paths_with, shortest_hop_path, OptimalPaths,
    TraversalEngine, TraversalStats,
};
