//! Structural invariant checks for [`TopologyGraph`].
//!
//! The checks are exhaustive (they rescan every index) and are meant for
//! debug builds, the `strict-invariants` feature, and tests.

use super::graph::TopologyGraph;
use super::link::LinkType;
use super::order::{depth_first_order, is_valid_order};
use crate::debug_invariants::DebugInvariants;
use crate::topology_error::TopologyError;

fn violation(msg: String) -> TopologyError {
    TopologyError::InvariantViolation(msg)
}

/// Every index has one row per node and only references ids in range.
fn check_id_density(g: &TopologyGraph) -> Result<(), TopologyError> {
    let n = g.node_count();
    for kind in LinkType::ALL {
        let idx = g.raw_index(kind);
        if idx.len() != n {
            return Err(violation(format!(
                "{kind} index has {} rows for {n} nodes",
                idx.len()
            )));
        }
        if let Some((src, tgt)) = idx.iter_links().find(|(_, tgt)| tgt.index() >= n) {
            return Err(violation(format!(
                "{kind} link {src} -> {tgt} references a node outside 0..{n}"
            )));
        }
    }
    Ok(())
}

/// `ForwardReverse[t]` contains `s` iff `Forward[s]` contains `t`.
fn check_reverse_mirror(g: &TopologyGraph) -> Result<(), TopologyError> {
    let forward = g.raw_index(LinkType::Forward);
    let reverse = g.raw_index(LinkType::ForwardReverse);
    if let Some((s, t)) = forward.iter_links().find(|&(s, t)| !reverse.contains(t, s)) {
        return Err(violation(format!("forward link {s} -> {t} has no reverse entry")));
    }
    if let Some((t, s)) = reverse.iter_links().find(|&(t, s)| !forward.contains(s, t)) {
        return Err(violation(format!(
            "reverse entry {t} <- {s} has no forward link"
        )));
    }
    Ok(())
}

fn check_no_forward_self_loops(g: &TopologyGraph) -> Result<(), TopologyError> {
    match g.links(LinkType::Forward).find(|(s, t)| s == t) {
        Some((s, _)) => Err(violation(format!("forward self-loop on {s}"))),
        None => Ok(()),
    }
}

fn check_acyclic(g: &TopologyGraph) -> Result<(), TopologyError> {
    depth_first_order(g.raw_index(LinkType::Forward), g.node_count(), None, false)
        .map(drop)
        .map_err(|_| violation("forward links contain a cycle".to_string()))
}

fn check_cached_order(g: &TopologyGraph) -> Result<(), TopologyError> {
    match g.cached_order() {
        Some(order) if !is_valid_order(g.raw_index(LinkType::Forward), g.node_count(), order) => {
            Err(violation("cached evaluation order is stale".to_string()))
        }
        _ => Ok(()),
    }
}

impl DebugInvariants for TopologyGraph {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "TopologyGraph");
    }

    /// Checks, in order: id density, the ForwardReverse mirror, absence of
    /// Forward self-loops, Forward acyclicity and the cached order.
    ///
    /// Parallel links cannot be represented by the set-based indices, so
    /// they need no separate check.
    fn validate_invariants(&self) -> Result<(), TopologyError> {
        check_id_density(self)?;
        check_reverse_mirror(self)?;
        check_no_forward_self_loops(self)?;
        check_acyclic(self)?;
        check_cached_order(self)
    }
}
