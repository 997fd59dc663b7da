//! `NodeId`: the dense identifier of a node inside one phenome graph.
//!
//! Node ids are plain zero-based integers that always form the contiguous
//! range `[0, N)`. They are **not** stable handles: erasing node `k` shifts
//! every id above `k` down by one. External storage (weights, activations)
//! is laid out by the same dense index, which is why the id space is kept
//! gap-free.

use std::fmt;

/// Dense node identifier.
///
/// # Memory layout
/// `repr(transparent)` over `u32`, so slices of `NodeId` can be handed to
/// numeric code that expects plain indices.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a `NodeId` from its raw value.
    ///
    /// # Example
    /// ```rust
    /// use phenome_topology::topology::node::NodeId;
    /// let n = NodeId::new(3);
    /// assert_eq!(n.get(), 3);
    /// assert_eq!(n.index(), 3usize);
    /// ```
    #[inline]
    pub const fn new(raw: u32) -> Self {
        NodeId(raw)
    }

    /// Returns the raw `u32` value.
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the id as a `usize`, suitable for indexing dense storage.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// `true` if a graph of `count` nodes can be addressed, i.e. every id in
    /// `0..count` fits in a `NodeId`.
    #[inline]
    pub fn addresses(count: usize) -> bool {
        count == 0 || NodeId::try_from(count - 1).is_ok()
    }

    /// Id of the node that takes this node's place once `erased` is removed.
    ///
    /// Returns `None` when `self == erased`.
    #[inline]
    pub(crate) fn shifted_past(self, erased: NodeId) -> Option<NodeId> {
        match self.0.cmp(&erased.0) {
            std::cmp::Ordering::Less => Some(self),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(NodeId(self.0 - 1)),
        }
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(raw: u32) -> Self {
        NodeId(raw)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl TryFrom<usize> for NodeId {
    type Error = std::num::TryFromIntError;

    #[inline]
    fn try_from(raw: usize) -> Result<Self, Self::Error> {
        u32::try_from(raw).map(NodeId)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeId").field(&self.0).finish()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
