//! Identity and classification types shared by every layer.
//!
//! - NodeId / EdgeId: generational arena handles issued by the store
//! - EdgeKind: the relationship kinds the social layer uses
//! - Direction: which side of a directed edge a query follows

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a node in the graph store.
///
/// A handle is an arena slot index plus the generation the slot had when the
/// node was created. Once a node is deleted its slot may be reused, but the
/// generation moves on, so a stale handle never aliases a newer node.
///
/// Equality and hashing are structural: two handles are the same node
/// exactly when both index and generation match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Build a handle from its raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot index.
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation at creation time.
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}v{}", self.index, self.generation)
    }
}

/// Handle to an edge in the graph store. Same generational scheme as [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    index: u32,
    generation: u32,
}

impl EdgeId {
    /// Build a handle from its raw parts.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Arena slot index.
    #[inline]
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Slot generation at creation time.
    #[inline]
    pub const fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}v{}", self.index, self.generation)
    }
}

/// Relationship kinds stored in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EdgeKind {
    /// Friendship between two persons. Stored directed, read undirected.
    Friend,
    /// Person → most recent status update.
    Status,
    /// Status update → the update posted before it.
    Next,
    /// Reference node → registered person.
    Person,
}

impl EdgeKind {
    /// Upper-case label used in logs and error messages.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Friend => "FRIEND",
            EdgeKind::Status => "STATUS",
            EdgeKind::Next => "NEXT",
            EdgeKind::Person => "PERSON",
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction for edge lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Follow outgoing edges (src → dst).
    Outgoing,
    /// Follow incoming edges (dst → src).
    Incoming,
    /// Follow edges regardless of which end created them.
    Both,
}

impl Direction {
    /// Whether outgoing edges are included.
    #[inline]
    pub const fn includes_outgoing(&self) -> bool {
        matches!(self, Direction::Outgoing | Direction::Both)
    }

    /// Whether incoming edges are included.
    #[inline]
    pub const fn includes_incoming(&self) -> bool {
        matches!(self, Direction::Incoming | Direction::Both)
    }
}

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Current wall-clock time as a [`Timestamp`].
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}
