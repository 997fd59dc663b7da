//! Dense adjacency index: one neighbour set per node id.
//!
//! Rows are addressed by [`NodeId::index`], so the row vector always has
//! exactly one entry per node. Neighbour sets are `BTreeSet`s, giving
//! ascending iteration order and therefore deterministic traversals.

use super::node::NodeId;
use std::collections::BTreeSet;

/// Iterator over the neighbours stored in one row.
pub type Neighbors<'a> = std::iter::Copied<std::collections::btree_set::Iter<'a, NodeId>>;

/// One adjacency index (`node -> set of neighbours`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjacencyIndex {
    rows: Vec<BTreeSet<NodeId>>,
}

impl AdjacencyIndex {
    /// Creates an index with `len` empty rows.
    pub fn with_rows(len: usize) -> Self {
        Self {
            rows: vec![BTreeSet::new(); len],
        }
    }

    /// Number of rows (equals the graph's node count).
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Appends one empty row.
    #[inline]
    pub fn push_row(&mut self) {
        self.rows.push(BTreeSet::new());
    }

    /// Inserts `to` into the row of `from`. Returns `false` if already present.
    ///
    /// Callers guarantee `from` is in range.
    #[inline]
    pub fn insert(&mut self, from: NodeId, to: NodeId) -> bool {
        self.rows[from.index()].insert(to)
    }

    /// Removes `to` from the row of `from`. Returns `false` if absent.
    #[inline]
    pub fn remove(&mut self, from: NodeId, to: NodeId) -> bool {
        self.rows
            .get_mut(from.index())
            .is_some_and(|row| row.remove(&to))
    }

    #[inline]
    pub fn contains(&self, from: NodeId, to: NodeId) -> bool {
        self.rows
            .get(from.index())
            .is_some_and(|row| row.contains(&to))
    }

    /// Neighbours of `from` in ascending order; empty for out-of-range ids.
    pub fn row(&self, from: NodeId) -> Neighbors<'_> {
        const EMPTY: &BTreeSet<NodeId> = &BTreeSet::new();
        self.rows.get(from.index()).unwrap_or(EMPTY).iter().copied()
    }

    /// Size of the row of `from`.
    #[inline]
    pub fn degree(&self, from: NodeId) -> usize {
        self.rows.get(from.index()).map_or(0, BTreeSet::len)
    }

    /// Total number of stored links.
    pub fn link_count(&self) -> usize {
        self.rows.iter().map(BTreeSet::len).sum()
    }

    /// All `(from, to)` pairs, ordered by `from` then `to`.
    pub fn iter_links(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            // rows.len() never exceeds the NodeId range
            let from = NodeId::new(i as u32);
            row.iter().map(move |&to| (from, to))
        })
    }

    /// Drops the row of `erased`, removes it from every other row, and shifts
    /// every reference above it down by one.
    ///
    /// The new rows are built on the side and swapped in, so the index is
    /// never observable half-renumbered. Returns the number of links removed.
    pub fn erase_and_compact(&mut self, erased: NodeId) -> usize {
        let before = self.link_count();
        let rows: Vec<BTreeSet<NodeId>> = self
            .rows
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != erased.index())
            .map(|(_, row)| {
                row.iter()
                    .filter_map(|&to| to.shifted_past(erased))
                    .collect()
            })
            .collect();
        self.rows = rows;
        before - self.link_count()
    }
}
