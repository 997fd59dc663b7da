#![cfg_attr(docsrs, feature(doc_cfg))]
//! # phenome-topology
//!
//! phenome-topology maintains the connectivity of a NEAT-style evolving
//! neural network. Networks are mutated by adding and removing nodes and
//! links; this crate owns the structural graph, decides which mutations are
//! legal, and derives the order in which nodes must be evaluated.
//!
//! ## Features
//! - Dense, gap-free node ids (`0..N`) that are compacted on every deletion
//! - Forward links that always form a DAG, Recurrent links that may close
//!   cycles, and a derived reverse index for O(in-degree) fan-in queries
//! - Legality queries (`is_allowed`, `is_eraseable`, `forms_cycle`) that
//!   never mutate the graph
//! - Deterministic, stack-safe topological ordering, cached until the next
//!   mutation
//! - Exhaustive invariant validation in debug builds or with the
//!   `strict-invariants` feature
//!
//! ## Usage
//! ```rust
//! use phenome_topology::prelude::*;
//!
//! let mut g = TopologyGraph::with_nodes(2);
//! let (input, output) = (NodeId::new(0), NodeId::new(1));
//! g.add_link(LinkType::Forward, input, output).unwrap();
//! let hidden = g.split_link(input, output).unwrap();
//! assert_eq!(g.evaluation_order().unwrap(), &[input, hidden, output]);
//! ```
//!
//! ## Determinism
//!
//! Neighbour sets iterate in ascending id order and the ordering search
//! visits roots in id order, so the same graph always yields the same order.
//!
//! ## Logging
//! The crate logs through the [`log`] facade: rejected mutations at `debug`,
//! accepted mutations and cycle verdicts at `trace`. Install any `log`
//! backend to see them.

pub mod debug_invariants;
pub mod topology;
pub mod topology_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::topology::cache::InvalidateCache;
    pub use crate::topology::graph::TopologyGraph;
    pub use crate::topology::link::LinkType;
    pub use crate::topology::node::NodeId;
    pub use crate::topology::snapshot::TopologySnapshot;
    pub use crate::topology_error::{Rejection, TopologyError};
}
