//! In-memory graph store.
//!
//! # Design
//!
//! - Arena: nodes and edges live in generational arenas, addressed by handle
//! - RwLock: readers share the lock per call, a unit of work holds it exclusively
//! - Undo log: aborted units of work are rolled back before the lock is released
//!
//! # Thread Safety
//!
//! `MemoryGraphStore` is `Send + Sync`; share it behind an `Arc`.
//! - Each read call observes a committed state
//! - Units of work are serialized against each other and against readers
//! - A traversal spanning several read calls may observe different states

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use socnet_core::{Direction, EdgeKind, NodeId, SocnetResult, Value};

use crate::state::GraphState;
use crate::traits::{EdgeRef, GraphRead, GraphStore};
use crate::txn::MemoryTxn;

/// Graph store held entirely in memory.
pub struct MemoryGraphStore {
    state: RwLock<GraphState>,
    /// Number of committed units of work
    version: AtomicU64,
}

impl MemoryGraphStore {
    /// Create a store holding only the reference node.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(GraphState::new()),
            version: AtomicU64::new(0),
        }
    }

    /// Number of committed units of work so far.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Live node count, reference node included.
    pub fn node_count(&self) -> usize {
        self.state.read().node_count()
    }

    /// Live edge count across all kinds.
    pub fn edge_count(&self) -> usize {
        self.state.read().edge_count()
    }
}

impl Default for MemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryGraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("MemoryGraphStore")
            .field("nodes", &state.node_count())
            .field("edges", &state.edge_count())
            .field("version", &self.version())
            .finish()
    }
}

impl GraphRead for MemoryGraphStore {
    fn reference_node(&self) -> NodeId {
        self.state.read().reference_node()
    }

    fn contains_node(&self, node: NodeId) -> bool {
        self.state.read().contains_node(node)
    }

    fn edges_of(
        &self,
        node: NodeId,
        kind: EdgeKind,
        direction: Direction,
    ) -> SocnetResult<Vec<EdgeRef>> {
        Ok(self.state.read().edges_of(node, kind, direction))
    }

    fn get_property(&self, node: NodeId, key: &str) -> SocnetResult<Option<Value>> {
        self.state.read().get_property(node, key)
    }
}

impl GraphStore for MemoryGraphStore {
    type Txn<'a> = MemoryTxn<'a>;

    fn run_atomic<'s, T, F>(&'s self, work: F) -> SocnetResult<T>
    where
        F: FnOnce(&mut Self::Txn<'s>) -> SocnetResult<T>,
    {
        let mut txn = MemoryTxn::new(self.state.write());
        match work(&mut txn) {
            Ok(value) => {
                let writes = txn.commit();
                let version = self.version.fetch_add(1, Ordering::AcqRel) + 1;
                tracing::trace!(target: "socnet::store", version, writes, "unit of work committed");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(target: "socnet::store", error = %e, writes = txn.write_count(), "unit of work aborted");
                drop(txn);
                Err(e)
            }
        }
    }
}
