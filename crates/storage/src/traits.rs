//! The graph store contract.
//!
//! The social layer only ever talks to storage through these traits:
//! - [`GraphRead`]: edge and property lookups
//! - [`GraphWrite`]: node/edge creation and deletion, property writes
//! - [`GraphStore`]: a shareable store that runs atomic units of work
//!
//! Reads against a [`GraphStore`] are individually consistent but carry no
//! cross-call guarantee. Reads made through the handle passed to
//! [`GraphStore::run_atomic`] see the unit of work's own writes.

use std::sync::Arc;

use socnet_core::{Direction, EdgeId, EdgeKind, NodeId, SocnetError, SocnetResult, Value};

/// An edge as seen by a reader: handle, endpoints, and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeRef {
    /// Edge handle.
    pub id: EdgeId,
    /// Node the edge was created from.
    pub src: NodeId,
    /// Node the edge points to.
    pub dst: NodeId,
    /// Relationship kind.
    pub kind: EdgeKind,
}

impl EdgeRef {
    /// The endpoint opposite `node`, or `None` if `node` is not an endpoint.
    #[inline]
    pub fn other_endpoint(&self, node: NodeId) -> Option<NodeId> {
        if self.src == node {
            Some(self.dst)
        } else if self.dst == node {
            Some(self.src)
        } else {
            None
        }
    }

    /// Whether the edge joins `a` and `b`, in either direction.
    #[inline]
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.src == a && self.dst == b) || (self.src == b && self.dst == a)
    }
}

/// Read half of the store contract.
pub trait GraphRead {
    /// The store's root node. Always present and never deletable.
    fn reference_node(&self) -> NodeId;

    /// Whether `node` refers to a live node.
    fn contains_node(&self, node: NodeId) -> bool;

    /// Edges of `kind` touching `node` in `direction`.
    ///
    /// Outgoing edges come first, then incoming ones, each in creation order.
    /// A node that does not exist has no edges.
    fn edges_of(
        &self,
        node: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> SocnetResult<Vec<EdgeRef>>;

    /// Read a property. `Ok(None)` when the key is unset.
    ///
    /// # Errors
    ///
    /// `NodeNotFound` if `node` is not live.
    fn get_property(&self, node: NodeId, key: &str) -> SocnetResult<Option<Value>>;

    /// The only edge of `kind` in `direction`, if any.
    ///
    /// # Errors
    ///
    /// `StoreFailure` if more than one such edge exists.
    fn single_edge(
        &self,
        node: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> SocnetResult<Option<EdgeRef>> {
        let mut edges = self.edges_of(node, kind, direction)?;
        match edges.len() {
            0 => Ok(None),
            1 => Ok(edges.pop()),
            n => Err(SocnetError::store_failure(format!(
                "expected at most one {} edge on {}, found {}",
                kind, node, n
            ))),
        }
    }
}

impl<T: GraphRead + ?Sized> GraphRead for &T {
    fn reference_node(&self) -> NodeId {
        (**self).reference_node()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        (**self).contains_node(node)
    }

    fn edges_of(
        &self,
        node: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> SocnetResult<Vec<EdgeRef>> {
        (**self).edges_of(node, kind, direction)
    }

    fn get_property(&self, node: NodeId, key: &str) -> SocnetResult<Option<Value>> {
        (**self).get_property(node, key)
    }
}

impl<T: GraphRead + ?Sized> GraphRead for Arc<T> {
    fn reference_node(&self) -> NodeId {
        (**self).reference_node()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        (**self).contains_node(node)
    }

    fn edges_of(
        &self,
        node: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> SocnetResult<Vec<EdgeRef>> {
        (**self).edges_of(node, kind, direction)
    }

    fn get_property(&self, node: NodeId, key: &str) -> SocnetResult<Option<Value>> {
        (**self).get_property(node, key)
    }
}

/// Write half of the store contract. Only available inside a unit of work.
pub trait GraphWrite: GraphRead {
    /// Create an empty node.
    fn create_node(&mut self) -> SocnetResult<NodeId>;

    /// Delete a node together with every edge touching it.
    ///
    /// # Errors
    ///
    /// `NodeNotFound` for a stale handle, `InvalidInput` for the reference node.
    fn delete_node(&mut self, node: NodeId) -> SocnetResult<()>;

    /// Create a directed edge `src → dst`.
    ///
    /// # Errors
    ///
    /// `NodeNotFound` if either endpoint is missing, `InvalidInput` for a
    /// self-loop.
    fn create_edge(&mut self, src: NodeId, dst: NodeId, kind: EdgeKind) -> SocnetResult<EdgeId>;

    /// Delete an edge.
    fn delete_edge(&mut self, edge: EdgeId) -> SocnetResult<()>;

    /// Set (or overwrite) a property.
    fn set_property(&mut self, node: NodeId, key: &str, value: Value) -> SocnetResult<()>;
}

/// A shareable store that executes atomic units of work.
pub trait GraphStore: GraphRead + Send + Sync {
    /// Handle passed to a unit of work.
    type Txn<'a>: GraphWrite
    where
        Self: 'a;

    /// Run `work` atomically.
    ///
    /// If `work` returns `Ok`, all of its writes become visible together. If
    /// it returns `Err` (or panics), none of them do, and the error is handed
    /// back unchanged. No retries are attempted.
    fn run_atomic<'s, T, F>(&'s self, work: F) -> SocnetResult<T>
    where
        F: FnOnce(&mut Self::Txn<'s>) -> SocnetResult<T>;
}
