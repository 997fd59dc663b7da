//! Link types of a phenome graph.

use std::fmt;

/// The three adjacency indices a [`TopologyGraph`](crate::topology::graph::TopologyGraph)
/// maintains.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum LinkType {
    /// Feed-forward connection. The set of Forward links is always a DAG.
    Forward,
    /// Connection allowed to close a cycle; evaluated against the previous
    /// step's state.
    Recurrent,
    /// Reverse index of Forward links (`target -> sources`).
    ///
    /// Derived: it is updated together with `Forward` and can never be
    /// mutated on its own.
    ForwardReverse,
}

impl LinkType {
    /// Every link type, in index order.
    pub const ALL: [LinkType; 3] = [
        LinkType::Forward,
        LinkType::Recurrent,
        LinkType::ForwardReverse,
    ];

    /// Link types a caller may add or erase directly.
    pub const MUTABLE: [LinkType; 2] = [LinkType::Forward, LinkType::Recurrent];

    /// `true` for index types maintained as a mirror of another index.
    #[inline]
    pub const fn is_derived(self) -> bool {
        matches!(self, LinkType::ForwardReverse)
    }

    /// Short tag used in logs and `Display` (`F`, `R`, `S`).
    #[inline]
    pub const fn tag(self) -> char {
        match self {
            LinkType::Forward => 'F',
            LinkType::Recurrent => 'R',
            LinkType::ForwardReverse => 'S',
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
