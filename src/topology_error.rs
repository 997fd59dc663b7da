//! TopologyError: unified error type for phenome-topology public APIs
//!
//! Every mutating operation either applies completely or returns one of these
//! errors with the graph left untouched.

use crate::topology::link::LinkType;
use crate::topology::node::NodeId;
use thiserror::Error;

/// Why a mutation was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The link already exists in the index for its type.
    #[error("{kind} link {src} -> {tgt} already exists")]
    DuplicateLink {
        kind: LinkType,
        src: NodeId,
        tgt: NodeId,
    },
    /// Adding the Forward link would close a cycle (self-loops included).
    #[error("forward link {src} -> {tgt} would form a cycle")]
    FormsCycle { src: NodeId, tgt: NodeId },
    /// The node id is outside `[0, len)`.
    #[error("node {id} does not exist (graph has {len} nodes)")]
    UnknownNode { id: NodeId, len: usize },
    /// The link type is a derived index and cannot be mutated directly.
    #[error("{0} links are derived and cannot be mutated directly")]
    DerivedLinkType(LinkType),
    /// A graph of this many nodes cannot be addressed by `NodeId`.
    #[error("{count} nodes exceed the node id range")]
    TooManyNodes { count: usize },
    /// The link an operation needs to rewrite is not present.
    #[error("{kind} link {src} -> {tgt} does not exist")]
    MissingLink {
        kind: LinkType,
        src: NodeId,
        tgt: NodeId,
    },
}

/// Unified error type for topology operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A mutation that would violate a structural invariant was requested.
    #[error("illegal mutation: {0}")]
    IllegalMutation(#[from] Rejection),
    /// The Forward links contain a cycle; no evaluation order exists.
    #[error("forward links do not form a DAG")]
    NotADag,
    /// An internal consistency check failed.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl TopologyError {
    /// Returns the rejection reason if this is an [`TopologyError::IllegalMutation`].
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            TopologyError::IllegalMutation(r) => Some(*r),
            _ => None,
        }
    }
}
