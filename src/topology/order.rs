//! Topological ordering of the Forward links.
//!
//! Depth-first search with three-state marking, driven by an explicit stack so
//! that long chains cannot overflow the call stack. Nodes are emitted
//! post-order (after all of their successors) and the list is reversed once at
//! the end.
//!
//! ## Complexity
//! - Time: **O(|V| + |E|)**
//! - Space: **O(|V|)** for marks and the traversal stack.

use super::adjacency::{AdjacencyIndex, Neighbors};
use super::node::NodeId;
use crate::topology_error::TopologyError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Successors of one node: its Forward row plus, optionally, the speculative
/// link being tested.
type Successors<'a> = std::iter::Chain<Neighbors<'a>, std::option::IntoIter<NodeId>>;

fn successors(
    forward: &AdjacencyIndex,
    node: NodeId,
    speculative: Option<(NodeId, NodeId)>,
) -> Successors<'_> {
    let extra = speculative.and_then(|(src, tgt)| (src == node).then_some(tgt));
    forward.row(node).chain(extra)
}

/// Runs the ordering DFS over `forward` for `node_count` nodes.
///
/// `speculative` is treated as an additional Forward link for the duration of
/// the search, without touching the index. With `commit = false` only the
/// acyclicity verdict is computed and the returned vector is empty.
///
/// # Errors
/// [`TopologyError::NotADag`] when a back edge is found. No partial order is
/// returned.
pub(crate) fn depth_first_order(
    forward: &AdjacencyIndex,
    node_count: usize,
    speculative: Option<(NodeId, NodeId)>,
    commit: bool,
) -> Result<Vec<NodeId>, TopologyError> {
    let mut marks = vec![Mark::Unvisited; node_count];
    let mut order = Vec::with_capacity(if commit { node_count } else { 0 });
    let mut stack: Vec<(NodeId, Successors<'_>)> = Vec::new();

    for root in 0..node_count {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        // node_count never exceeds the NodeId range
        let root = NodeId::new(root as u32);
        marks[root.index()] = Mark::InProgress;
        stack.push((root, successors(forward, root, speculative)));

        while let Some((node, iter)) = stack.last_mut() {
            let node = *node;
            match iter.next() {
                Some(next) => match marks[next.index()] {
                    Mark::Done => {}
                    Mark::InProgress => {
                        log::trace!("back edge {node} -> {next}: forward links are cyclic");
                        return Err(TopologyError::NotADag);
                    }
                    Mark::Unvisited => {
                        marks[next.index()] = Mark::InProgress;
                        stack.push((next, successors(forward, next, speculative)));
                    }
                },
                None => {
                    marks[node.index()] = Mark::Done;
                    if commit {
                        order.push(node);
                    }
                    stack.pop();
                }
            }
        }
    }

    order.reverse();
    Ok(order)
}

/// `true` if every Forward link `src -> tgt` places `src` before `tgt` in
/// `order` and `order` is a permutation of `0..node_count`.
pub fn is_valid_order(forward: &AdjacencyIndex, node_count: usize, order: &[NodeId]) -> bool {
    if order.len() != node_count {
        return false;
    }
    let mut position = vec![usize::MAX; node_count];
    for (pos, node) in order.iter().enumerate() {
        match position.get_mut(node.index()) {
            Some(slot) if *slot == usize::MAX => *slot = pos,
            _ => return false,
        }
    }
    forward
        .iter_links()
        .all(|(src, tgt)| position[src.index()] < position[tgt.index()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nid(raw: u32) -> NodeId {
        NodeId::new(raw)
    }

    fn index(n: usize, links: &[(u32, u32)]) -> AdjacencyIndex {
        let mut idx = AdjacencyIndex::with_rows(n);
        for &(s, t) in links {
            idx.insert(nid(s), nid(t));
        }
        idx
    }

    #[test]
    fn empty_graph_has_empty_order() {
        let idx = AdjacencyIndex::default();
        assert_eq!(depth_first_order(&idx, 0, None, true).unwrap(), vec![]);
    }

    #[test]
    fn isolated_nodes_come_out_in_descending_id_order() {
        // each root is its own finished subtree; reversal puts the last first
        let idx = index(3, &[]);
        let order = depth_first_order(&idx, 3, None, true).unwrap();
        assert_eq!(order, vec![nid(2), nid(1), nid(0)]);
    }

    #[test]
    fn diamond_is_ordered_deterministically() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let idx = index(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        let order = depth_first_order(&idx, 4, None, true).unwrap();
        // post-order from 0: 3, 1, 2, 0 -> reversed
        assert_eq!(order, vec![nid(0), nid(2), nid(1), nid(3)]);
        assert!(is_valid_order(&idx, 4, &order));
    }

    #[test]
    fn later_roots_precede_earlier_subtrees() {
        // 2 -> 0 : root 0 is finished first, then 2 is appended after it
        let idx = index(3, &[(2, 0)]);
        let order = depth_first_order(&idx, 3, None, true).unwrap();
        assert_eq!(order, vec![nid(2), nid(1), nid(0)]);
        assert!(is_valid_order(&idx, 3, &order));
    }

    #[test]
    fn cycle_is_not_a_dag() {
        let idx = index(3, &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(
            depth_first_order(&idx, 3, None, true),
            Err(TopologyError::NotADag)
        );
        assert_eq!(
            depth_first_order(&idx, 3, None, false),
            Err(TopologyError::NotADag)
        );
    }

    #[test]
    fn probe_returns_no_order() {
        let idx = index(2, &[(0, 1)]);
        assert_eq!(depth_first_order(&idx, 2, None, false).unwrap(), vec![]);
    }

    #[test]
    fn speculative_link_participates_in_search() {
        let idx = index(3, &[(0, 1), (1, 2)]);
        assert!(depth_first_order(&idx, 3, Some((nid(2), nid(0))), false).is_err());
        assert!(depth_first_order(&idx, 3, Some((nid(0), nid(2))), false).is_ok());
        assert!(depth_first_order(&idx, 3, Some((nid(1), nid(1))), false).is_err());
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let n = 200_000u32;
        let links: Vec<_> = (0..n - 1).map(|i| (i, i + 1)).collect();
        let idx = index(n as usize, &links);
        let order = depth_first_order(&idx, n as usize, None, true).unwrap();
        assert_eq!(order.first(), Some(&nid(0)));
        assert_eq!(order.last(), Some(&nid(n - 1)));
    }

    #[test]
    fn is_valid_order_rejects_non_permutations() {
        let idx = index(2, &[(0, 1)]);
        assert!(!is_valid_order(&idx, 2, &[nid(1), nid(0)]));
        assert!(!is_valid_order(&idx, 2, &[nid(0), nid(0)]));
        assert!(!is_valid_order(&idx, 2, &[nid(0)]));
        assert!(!is_valid_order(&idx, 2, &[nid(0), nid(5)]));
    }
}
