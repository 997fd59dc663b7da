//! The structural graph of one network phenotype.
//!
//! [`TopologyGraph`] owns the dense node-id space and three adjacency indices:
//! Forward links (always a DAG), Recurrent links (cycles allowed) and the
//! derived ForwardReverse index (`target -> sources`) that mirrors Forward.
//! Mutations are checked before anything is touched, so a rejected call never
//! leaves a partially applied change behind.

use super::adjacency::{AdjacencyIndex, Neighbors};
use super::cache::InvalidateCache;
use super::link::LinkType;
use super::node::NodeId;
use super::order::depth_first_order;
use crate::topology::_debug_invariants::debug_invariants;
use crate::topology_error::{Rejection, TopologyError};
use once_cell::sync::OnceCell;

/// Connectivity of a single network phenotype.
///
/// # Example
/// ```rust
/// use phenome_topology::topology::graph::TopologyGraph;
/// use phenome_topology::topology::link::LinkType;
/// use phenome_topology::topology::node::NodeId;
///
/// let mut g = TopologyGraph::with_nodes(3);
/// let (a, b, c) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));
/// g.add_link(LinkType::Forward, a, b).unwrap();
/// g.add_link(LinkType::Forward, b, c).unwrap();
/// assert!(!g.is_allowed(LinkType::Forward, c, a));
/// assert!(g.is_allowed(LinkType::Recurrent, c, a));
/// assert_eq!(g.topological_order(true).unwrap(), vec![a, b, c]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TopologyGraph {
    node_count: usize,
    forward: AdjacencyIndex,
    recurrent: AdjacencyIndex,
    forward_reverse: AdjacencyIndex,
    /// Evaluation order, valid until the next structural mutation.
    order: OnceCell<Vec<NodeId>>,
}

impl PartialEq for TopologyGraph {
    /// Structural equality; the order cache is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.node_count == other.node_count
            && self.forward == other.forward
            && self.recurrent == other.recurrent
            && self.forward_reverse == other.forward_reverse
    }
}

impl Eq for TopologyGraph {}

impl TopologyGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph seeded with `n` unconnected nodes `0..n`, typically
    /// the input and output nodes of a fresh network.
    ///
    /// # Panics
    /// If `n` nodes cannot be addressed by [`NodeId`]; use
    /// [`from_links`](Self::from_links) for untrusted counts.
    pub fn with_nodes(n: usize) -> Self {
        assert!(NodeId::addresses(n), "{n} nodes exceed the node id range");
        Self {
            node_count: n,
            forward: AdjacencyIndex::with_rows(n),
            recurrent: AdjacencyIndex::with_rows(n),
            forward_reverse: AdjacencyIndex::with_rows(n),
            order: OnceCell::new(),
        }
    }

    /// Bulk-loads a graph through [`add_link`](Self::add_link), so every
    /// invariant is checked exactly as for incremental construction.
    ///
    /// # Errors
    /// [`Rejection::TooManyNodes`] if `n` does not fit the id range; otherwise
    /// the first rejected link aborts the load.
    pub fn from_links(
        n: usize,
        forward: impl IntoIterator<Item = (NodeId, NodeId)>,
        recurrent: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Self, TopologyError> {
        if !NodeId::addresses(n) {
            let r = Rejection::TooManyNodes { count: n };
            log::debug!("from_links rejected: {r}");
            return Err(r.into());
        }
        let mut g = Self::with_nodes(n);
        for (src, tgt) in forward {
            g.add_link(LinkType::Forward, src, tgt)?;
        }
        for (src, tgt) in recurrent {
            g.add_link(LinkType::Recurrent, src, tgt)?;
        }
        Ok(g)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        id.index() < self.node_count
    }

    /// All node ids, `0..node_count`.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + '_ {
        // node_count never exceeds the NodeId range
        (0..self.node_count).map(|i| NodeId::new(i as u32))
    }

    #[inline]
    fn index(&self, kind: LinkType) -> &AdjacencyIndex {
        match kind {
            LinkType::Forward => &self.forward,
            LinkType::Recurrent => &self.recurrent,
            LinkType::ForwardReverse => &self.forward_reverse,
        }
    }

    /// Neighbours of `node` in the index for `kind`, ascending.
    ///
    /// For `ForwardReverse` these are the Forward sources feeding `node`.
    pub fn get(&self, kind: LinkType, node: NodeId) -> Neighbors<'_> {
        self.index(kind).row(node)
    }

    /// `true` if `src -> tgt` is stored in the index for `kind`.
    #[inline]
    pub fn exists(&self, kind: LinkType, src: NodeId, tgt: NodeId) -> bool {
        self.index(kind).contains(src, tgt)
    }

    /// Number of links in the index for `kind`.
    pub fn link_count(&self, kind: LinkType) -> usize {
        self.index(kind).link_count()
    }

    /// Every `(src, tgt)` pair of `kind`, ordered by source then target.
    pub fn links(&self, kind: LinkType) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.index(kind).iter_links()
    }

    /// Forward fan-in of `node`.
    #[inline]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.forward_reverse.degree(node)
    }

    /// Forward fan-out of `node`.
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.forward.degree(node)
    }

    /// `true` if a non-empty path of Forward links leads from `src` to `tgt`.
    pub fn reaches(&self, src: NodeId, tgt: NodeId) -> bool {
        if !self.contains_node(src) || !self.contains_node(tgt) {
            return false;
        }
        let mut seen = vec![false; self.node_count];
        let mut stack: Vec<NodeId> = self.forward.row(src).collect();
        while let Some(n) = stack.pop() {
            if n == tgt {
                return true;
            }
            if !std::mem::replace(&mut seen[n.index()], true) {
                stack.extend(self.forward.row(n));
            }
        }
        false
    }

    // ---------------------------------------------------------------------
    // Legality checks
    // ---------------------------------------------------------------------

    fn check_node(&self, id: NodeId) -> Result<(), Rejection> {
        if self.contains_node(id) {
            Ok(())
        } else {
            Err(Rejection::UnknownNode {
                id,
                len: self.node_count,
            })
        }
    }

    fn check_mutable(kind: LinkType) -> Result<(), Rejection> {
        if kind.is_derived() {
            Err(Rejection::DerivedLinkType(kind))
        } else {
            Ok(())
        }
    }

    /// Full legality check for `add_link`; `Ok` means the link can be added.
    fn check_addition(&self, kind: LinkType, src: NodeId, tgt: NodeId) -> Result<(), Rejection> {
        Self::check_mutable(kind)?;
        self.check_node(src)?;
        self.check_node(tgt)?;
        if self.exists(kind, src, tgt) {
            return Err(Rejection::DuplicateLink { kind, src, tgt });
        }
        if kind == LinkType::Forward && self.forms_cycle(src, tgt) {
            return Err(Rejection::FormsCycle { src, tgt });
        }
        Ok(())
    }

    /// `true` if `add_link(kind, src, tgt)` would be accepted.
    ///
    /// - Forward: the link is absent and would not close a cycle.
    /// - Recurrent: the link is absent (self-loops allowed).
    /// - ForwardReverse: never; it is a derived index.
    pub fn is_allowed(&self, kind: LinkType, src: NodeId, tgt: NodeId) -> bool {
        self.check_addition(kind, src, tgt).is_ok()
    }

    /// `true` if erasing the link keeps the network's Forward connectivity.
    ///
    /// - Forward: the link exists, `src` keeps at least one other outgoing
    ///   Forward link and `tgt` keeps at least one other incoming one.
    /// - Recurrent: the link exists.
    /// - ForwardReverse: never.
    pub fn is_eraseable(&self, kind: LinkType, src: NodeId, tgt: NodeId) -> bool {
        match kind {
            LinkType::Forward => {
                self.exists(kind, src, tgt) && self.out_degree(src) > 1 && self.in_degree(tgt) > 1
            }
            LinkType::Recurrent => self.exists(kind, src, tgt),
            LinkType::ForwardReverse => false,
        }
    }

    /// `true` if adding the Forward link `src -> tgt` would make the Forward
    /// links cyclic.
    ///
    /// The candidate link is overlaid on the ordering search without being
    /// inserted, so this is a pure query. A self-loop always forms a cycle;
    /// a link touching an unknown node never does.
    pub fn forms_cycle(&self, src: NodeId, tgt: NodeId) -> bool {
        if !self.contains_node(src) || !self.contains_node(tgt) {
            return false;
        }
        if src == tgt {
            return true;
        }
        depth_first_order(&self.forward, self.node_count, Some((src, tgt)), false).is_err()
    }

    // ---------------------------------------------------------------------
    // Ordering
    // ---------------------------------------------------------------------

    /// Topological order of all nodes with respect to Forward links.
    ///
    /// With `commit = true` the full order is returned and cached until the
    /// next mutation. With `commit = false` the search only checks
    /// acyclicity: the returned vector is empty and the cache is untouched.
    ///
    /// # Errors
    /// [`TopologyError::NotADag`] if the Forward links contain a cycle. This
    /// is a query outcome (the network cannot be evaluated), not a fault.
    pub fn topological_order(&self, commit: bool) -> Result<Vec<NodeId>, TopologyError> {
        if commit {
            self.evaluation_order().map(<[NodeId]>::to_vec)
        } else if self.order.get().is_some() {
            Ok(Vec::new())
        } else {
            depth_first_order(&self.forward, self.node_count, None, false)
        }
    }

    /// Borrowing variant of `topological_order(true)`.
    pub fn evaluation_order(&self) -> Result<&[NodeId], TopologyError> {
        self.order
            .get_or_try_init(|| depth_first_order(&self.forward, self.node_count, None, true))
            .map(Vec::as_slice)
    }

    /// `true` if an evaluation order is currently cached.
    #[inline]
    pub fn has_cached_order(&self) -> bool {
        self.order.get().is_some()
    }

    // ---------------------------------------------------------------------
    // Mutation
    // ---------------------------------------------------------------------

    /// Appends a node with the next contiguous id and no links.
    ///
    /// # Panics
    /// If the graph already holds `u32::MAX + 1` nodes; the id space cannot
    /// grow further and continuing would break id density.
    pub fn insert_node(&mut self) -> NodeId {
        let Ok(id) = NodeId::try_from(self.node_count) else {
            panic!("node id space exhausted at {} nodes", self.node_count);
        };
        self.node_count += 1;
        self.forward.push_row();
        self.recurrent.push_row();
        self.forward_reverse.push_row();
        self.invalidate_cache();
        log::trace!("insert_node -> {id}");
        debug_invariants!(self);
        id
    }

    /// Removes `id` with every link touching it, then renumbers all higher
    /// ids down by one in every index.
    ///
    /// # Errors
    /// [`Rejection::UnknownNode`] if `id` is out of range; nothing changes.
    pub fn erase_node(&mut self, id: NodeId) -> Result<(), TopologyError> {
        self.check_node(id).inspect_err(|r| log::debug!("erase_node rejected: {r}"))?;
        let dropped_forward = self.forward.erase_and_compact(id);
        let dropped_recurrent = self.recurrent.erase_and_compact(id);
        self.forward_reverse.erase_and_compact(id);
        self.node_count -= 1;
        self.invalidate_cache();
        log::trace!(
            "erase_node {id}: dropped {dropped_forward} forward and \
             {dropped_recurrent} recurrent links, {} nodes remain",
            self.node_count
        );
        debug_invariants!(self);
        Ok(())
    }

    /// Adds `src -> tgt` to the index for `kind`; Forward links are mirrored
    /// into ForwardReverse in the same step.
    ///
    /// # Errors
    /// [`TopologyError::IllegalMutation`] for a duplicate link, a Forward
    /// link that would close a cycle, an unknown node, or a derived link
    /// type. The graph is unchanged on error.
    pub fn add_link(
        &mut self,
        kind: LinkType,
        src: NodeId,
        tgt: NodeId,
    ) -> Result<(), TopologyError> {
        self.check_addition(kind, src, tgt)
            .inspect_err(|r| log::debug!("add_link rejected: {r}"))?;
        match kind {
            LinkType::Forward => {
                self.forward.insert(src, tgt);
                self.forward_reverse.insert(tgt, src);
            }
            LinkType::Recurrent => {
                self.recurrent.insert(src, tgt);
            }
            LinkType::ForwardReverse => return Err(Rejection::DerivedLinkType(kind).into()),
        }
        self.invalidate_cache();
        log::trace!("add_link {kind} {src} -> {tgt}");
        debug_invariants!(self);
        Ok(())
    }

    /// Removes `src -> tgt` from the index for `kind` (and its mirror for
    /// Forward).
    ///
    /// Returns `Ok(false)` when the link does not exist; the graph, including
    /// its cached order, is then left exactly as it was. Connectivity rules
    /// are not enforced here; check [`is_eraseable`](Self::is_eraseable)
    /// first when they matter.
    ///
    /// # Errors
    /// [`TopologyError::IllegalMutation`] for an unknown node or a derived
    /// link type.
    pub fn erase_link(
        &mut self,
        kind: LinkType,
        src: NodeId,
        tgt: NodeId,
    ) -> Result<bool, TopologyError> {
        let checked = Self::check_mutable(kind)
            .and_then(|()| self.check_node(src))
            .and_then(|()| self.check_node(tgt));
        checked.inspect_err(|r| log::debug!("erase_link rejected: {r}"))?;

        let removed = match kind {
            LinkType::Forward => {
                let removed = self.forward.remove(src, tgt);
                if removed {
                    self.forward_reverse.remove(tgt, src);
                }
                removed
            }
            LinkType::Recurrent => self.recurrent.remove(src, tgt),
            LinkType::ForwardReverse => return Err(Rejection::DerivedLinkType(kind).into()),
        };
        if removed {
            self.invalidate_cache();
            log::trace!("erase_link {kind} {src} -> {tgt}");
            debug_invariants!(self);
        }
        Ok(removed)
    }

    /// Splits the Forward link `src -> tgt` by a new node `n`, leaving
    /// `src -> n -> tgt`. Returns the new node's id.
    ///
    /// Since `src -> tgt` was acyclic, the two replacement links never form a
    /// cycle.
    ///
    /// # Errors
    /// [`Rejection::MissingLink`] if `src -> tgt` is not a Forward link; the
    /// graph is unchanged.
    pub fn split_link(&mut self, src: NodeId, tgt: NodeId) -> Result<NodeId, TopologyError> {
        if !self.exists(LinkType::Forward, src, tgt) {
            let r = Rejection::MissingLink {
                kind: LinkType::Forward,
                src,
                tgt,
            };
            log::debug!("split_link rejected: {r}");
            return Err(r.into());
        }
        let mid = self.insert_node();
        self.forward.remove(src, tgt);
        self.forward_reverse.remove(tgt, src);
        self.forward.insert(src, mid);
        self.forward_reverse.insert(mid, src);
        self.forward.insert(mid, tgt);
        self.forward_reverse.insert(tgt, mid);
        self.invalidate_cache();
        log::trace!("split_link {src} -> {tgt} via {mid}");
        debug_invariants!(self);
        Ok(mid)
    }

    /// Raw access to one index, for invariant checks.
    pub(crate) fn raw_index(&self, kind: LinkType) -> &AdjacencyIndex {
        self.index(kind)
    }

    pub(crate) fn cached_order(&self) -> Option<&[NodeId]> {
        self.order.get().map(Vec::as_slice)
    }
}

impl InvalidateCache for TopologyGraph {
    #[inline]
    fn invalidate_cache(&mut self) {
        self.order.take();
    }
}
