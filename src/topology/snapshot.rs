//! Plain-data snapshot of a [`TopologyGraph`].
//!
//! A snapshot holds the node count and the Forward and Recurrent links in
//! ascending order. The ForwardReverse index is derived and never stored.
//! Loading always goes back through [`TopologyGraph::add_link`], so a
//! tampered or hand-written snapshot cannot smuggle in a cycle, a duplicate
//! a dangling id or
//! a node count outside the id range.

use super::graph::TopologyGraph;
use super::link::LinkType;
use super::node::NodeId;
use crate::topology_error::TopologyError;
use serde::{Deserialize, Serialize};

/// Serializable connectivity of one network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologySnapshot {
    pub node_count: usize,
    #[serde(default)]
    pub forward: Vec<(NodeId, NodeId)>,
    #[serde(default)]
    pub recurrent: Vec<(NodeId, NodeId)>,
}

impl TopologyGraph {
    /// Captures the graph's connectivity.
    pub fn snapshot(&self) -> TopologySnapshot {
        TopologySnapshot {
            node_count: self.node_count(),
            forward: self.links(LinkType::Forward).collect(),
            recurrent: self.links(LinkType::Recurrent).collect(),
        }
    }
}

impl TryFrom<TopologySnapshot> for TopologyGraph {
    type Error = TopologyError;

    /// Rebuilds a graph link by link.
    ///
    /// # Errors
    /// [`Rejection::TooManyNodes`](crate::topology_error::Rejection::TooManyNodes)
    /// for an unaddressable node count, otherwise the first link `add_link`
    /// rejects.
    fn try_from(snap: TopologySnapshot) -> Result<Self, Self::Error> {
        let g = TopologyGraph::from_links(snap.node_count, snap.forward, snap.recurrent)?;
        crate::debug_invariants!(
            crate::debug_invariants::DebugInvariants::validate_invariants(&g),
            "snapshot load"
        );
        Ok(g)
    }
}

impl TryFrom<&TopologySnapshot> for TopologyGraph {
    type Error = TopologyError;

    fn try_from(snap: &TopologySnapshot) -> Result<Self, Self::Error> {
        TopologyGraph::try_from(snap.clone())
    }
}
