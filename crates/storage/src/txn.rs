//! Units of work against the in-memory store.
//!
//! A [`MemoryTxn`] owns the store's write lock for its whole lifetime and logs
//! an undo record for every write. Committing discards the log. Dropping an
//! uncommitted transaction (error return or panic) replays the log in reverse,
//! restoring the exact prior state, adjacency order included, before the lock
//! is released.

use parking_lot::RwLockWriteGuard;

use socnet_core::{Direction, EdgeId, EdgeKind, NodeId, SocnetError, SocnetResult, Value};

use crate::state::{EdgeRecord, EdgeSlots, GraphState, NodeRecord};
use crate::traits::{EdgeRef, GraphRead, GraphWrite};

/// One reversible write.
#[derive(Debug)]
enum UndoOp {
    NodeCreated(NodeId),
    NodeDeleted(NodeId, NodeRecord),
    EdgeCreated(EdgeId),
    EdgeDeleted(EdgeId, EdgeRecord, EdgeSlots),
    PropertySet {
        node: NodeId,
        key: String,
        previous: Option<Value>,
    },
}

/// An open unit of work.
pub struct MemoryTxn<'a> {
    state: RwLockWriteGuard<'a, GraphState>,
    undo: Vec<UndoOp>,
    committed: bool,
}

impl<'a> MemoryTxn<'a> {
    pub(crate) fn new(state: RwLockWriteGuard<'a, GraphState>) -> Self {
        Self {
            state,
            undo: Vec::new(),
            committed: false,
        }
    }

    /// Number of writes recorded so far.
    pub fn write_count(&self) -> usize {
        self.undo.len()
    }

    /// Keep every write. Returns the number of writes applied.
    pub(crate) fn commit(mut self) -> usize {
        self.committed = true;
        std::mem::take(&mut self.undo).len()
    }

    fn rollback(&mut self) {
        while let Some(op) = self.undo.pop() {
            match op {
                UndoOp::NodeCreated(id) => self.state.discard_node(id),
                UndoOp::NodeDeleted(id, rec) => self.state.restore_node(id, rec),
                UndoOp::EdgeCreated(id) => {
                    // Created in this transaction, so it is still live.
                    let _ = self.state.remove_edge(id);
                }
                UndoOp::EdgeDeleted(id, rec, slots) => self.state.restore_edge(id, rec, slots),
                UndoOp::PropertySet {
                    node,
                    key,
                    previous,
                } => self.state.restore_property(node, &key, previous),
            }
        }
    }
}

impl Drop for MemoryTxn<'_> {
    fn drop(&mut self) {
        if !self.committed && !self.undo.is_empty() {
            tracing::debug!(target: "socnet::store", writes = self.undo.len(), "rolling back unit of work");
            self.rollback();
        }
    }
}

impl GraphRead for MemoryTxn<'_> {
    fn reference_node(&self) -> NodeId {
        self.state.reference_node()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.state.contains_node(node)
    }

    fn edges_of(
        &self,
        node: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> SocnetResult<Vec<EdgeRef>> {
        Ok(self.state.edges_of(node, kind, direction))
    }

    fn get_property(&self, node: NodeId, key: &str) -> SocnetResult<Option<Value>> {
        self.state.get_property(node, key)
    }
}

impl GraphWrite for MemoryTxn<'_> {
    fn create_node(&mut self) -> SocnetResult<NodeId> {
        let id = self.state.create_node();
        self.undo.push(UndoOp::NodeCreated(id));
        Ok(id)
    }

    fn delete_node(&mut self, node: NodeId) -> SocnetResult<()> {
        if node == self.state.reference_node() {
            // Surface the refusal before touching any edge.
            return self.state.remove_bare_node(node).map(|_| ());
        }
        if !self.state.contains_node(node) {
            return Err(SocnetError::NodeNotFound(node));
        }
        for edge in self.state.incident_edges(node) {
            self.delete_edge(edge)?;
        }
        let rec = self.state.remove_bare_node(node)?;
        self.undo.push(UndoOp::NodeDeleted(node, rec));
        Ok(())
    }

    fn create_edge(&mut self, src: NodeId, dst: NodeId, kind: EdgeKind) -> SocnetResult<EdgeId> {
        let id = self.state.create_edge(src, dst, kind)?;
        self.undo.push(UndoOp::EdgeCreated(id));
        Ok(id)
    }

    fn delete_edge(&mut self, edge: EdgeId) -> SocnetResult<()> {
        let (rec, slots) = self.state.remove_edge(edge)?;
        self.undo.push(UndoOp::EdgeDeleted(edge, rec, slots));
        Ok(())
    }

    fn set_property(&mut self, node: NodeId, key: &str, value: Value) -> SocnetResult<()> {
        let previous = self.state.set_property(node, key, value)?;
        self.undo.push(UndoOp::PropertySet {
            node,
            key: key.to_string(),
            previous,
        });
        Ok(())
    }
}
