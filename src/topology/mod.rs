//! Top-level module for network topology.
//!
//! This module provides the structural graph of one network phenotype:
//! - Dense node ids and the three link types
//! - Adjacency indices and the [`TopologyGraph`] that keeps them consistent
//! - Depth-first topological ordering and invariant validation
//! - Plain-data snapshots for external serializers
//!
//! Most users will interact with [`TopologyGraph`] only.

pub mod _debug_invariants;
pub mod adjacency;
pub mod cache;
pub mod graph;
pub mod link;
pub mod node;
pub mod order;
pub mod snapshot;
pub mod validation;

pub use cache::InvalidateCache;
pub use graph::TopologyGraph;
pub use link::LinkType;
pub use node::NodeId;
pub use snapshot::TopologySnapshot;

#[cfg(test)]
mod tests;
