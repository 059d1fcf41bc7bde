//! Arena-backed graph state with per-node adjacency lists.
//!
//! Every node keeps its outgoing and incoming edge handles, so edge lookups are
//! O(degree) with no scan over the whole edge set. Adjacency lists keep
//! creation order; removal preserves the order of the remaining entries.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use socnet_core::{Direction, EdgeId, EdgeKind, NodeId, SocnetError, SocnetResult, Value};

use crate::arena::Arena;
use crate::traits::EdgeRef;

/// Inline capacity for adjacency lists before spilling to the heap.
const INLINE_EDGES: usize = 4;

type EdgeList = SmallVec<[EdgeId; INLINE_EDGES]>;

/// A stored node.
#[derive(Debug, Clone, Default)]
pub(crate) struct NodeRecord {
    pub(crate) properties: FxHashMap<String, Value>,
    pub(crate) outgoing: EdgeList,
    pub(crate) incoming: EdgeList,
}

/// A stored edge.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeRecord {
    pub(crate) src: NodeId,
    pub(crate) dst: NodeId,
    pub(crate) kind: EdgeKind,
}

/// Where a deleted edge sat in its endpoints' adjacency lists.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeSlots {
    pub(crate) src_pos: usize,
    pub(crate) dst_pos: usize,
}

/// The whole graph.
#[derive(Debug)]
pub(crate) struct GraphState {
    nodes: Arena<NodeRecord>,
    edges: Arena<EdgeRecord>,
    reference: NodeId,
}

impl GraphState {
    /// Create a graph holding only the reference node.
    pub(crate) fn new() -> Self {
        let mut nodes = Arena::new();
        let (index, generation) = nodes.insert(NodeRecord::default());
        Self {
            nodes,
            edges: Arena::new(),
            reference: NodeId::new(index, generation),
        }
    }

    pub(crate) fn reference_node(&self) -> NodeId {
        self.reference
    }

    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn contains_node(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    #[inline]
    fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.nodes.get(id.index(), id.generation())
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeRecord> {
        self.nodes.get_mut(id.index(), id.generation())
    }

    #[inline]
    fn edge(&self, id: EdgeId) -> Option<&EdgeRecord> {
        self.edges.get(id.index(), id.generation())
    }

    fn edge_ref(&self, id: EdgeId) -> Option<EdgeRef> {
        self.edge(id).map(|rec| EdgeRef {
            id,
            src: rec.src,
            dst: rec.dst,
            kind: rec.kind,
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub(crate) fn edges_of(&self, node: NodeId, kind: EdgeKind, direction: Direction) -> Vec<EdgeRef> {
        let Some(rec) = self.node(node) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if direction.includes_outgoing() {
            out.extend(
                rec.outgoing
                    .iter()
                    .filter_map(|&e| self.edge_ref(e))
                    .filter(|e| e.kind == kind),
            );
        }
        if direction.includes_incoming() {
            out.extend(
                rec.incoming
                    .iter()
                    .filter_map(|&e| self.edge_ref(e))
                    .filter(|e| e.kind == kind),
            );
        }
        out
    }

    pub(crate) fn get_property(&self, node: NodeId, key: &str) -> SocnetResult<Option<Value>> {
        let rec = self.node(node).ok_or(SocnetError::NodeNotFound(node))?;
        Ok(rec.properties.get(key).cloned())
    }

    /// Every edge touching `node`, outgoing first.
    pub(crate) fn incident_edges(&self, node: NodeId) -> Vec<EdgeId> {
        match self.node(node) {
            Some(rec) => rec.outgoing.iter().chain(rec.incoming.iter()).copied().collect(),
            None => Vec::new(),
        }
    }

    // =========================================================================
    // Writes (each returns what its undo needs)
    // =========================================================================

    pub(crate) fn create_node(&mut self) -> NodeId {
        let (index, generation) = self.nodes.insert(NodeRecord::default());
        NodeId::new(index, generation)
    }

    /// Remove a node that has no edges left.
    pub(crate) fn remove_bare_node(&mut self, node: NodeId) -> SocnetResult<NodeRecord> {
        if node == self.reference {
            return Err(SocnetError::invalid_input("the reference node cannot be deleted"));
        }
        let rec = self.node(node).ok_or(SocnetError::NodeNotFound(node))?;
        if !rec.outgoing.is_empty() || !rec.incoming.is_empty() {
            return Err(SocnetError::store_failure(format!(
                "node {} still has edges",
                node
            )));
        }
        self.nodes
            .remove(node.index(), node.generation())
            .ok_or(SocnetError::NodeNotFound(node))
    }

    pub(crate) fn restore_node(&mut self, node: NodeId, rec: NodeRecord) {
        self.nodes.restore(node.index(), node.generation(), rec);
    }

    /// Undo a `create_node`.
    pub(crate) fn discard_node(&mut self, node: NodeId) {
        self.nodes.remove(node.index(), node.generation());
    }

    pub(crate) fn create_edge(&mut self, src: NodeId, dst: NodeId, kind: EdgeKind) -> SocnetResult<EdgeId> {
        if src == dst {
            return Err(SocnetError::invalid_input(format!(
                "self-loop {} edge on {}",
                kind, src
            )));
        }
        if !self.contains_node(src) {
            return Err(SocnetError::NodeNotFound(src));
        }
        if !self.contains_node(dst) {
            return Err(SocnetError::NodeNotFound(dst));
        }
        let (index, generation) = self.edges.insert(EdgeRecord { src, dst, kind });
        let id = EdgeId::new(index, generation);
        if let Some(rec) = self.node_mut(src) {
            rec.outgoing.push(id);
        }
        if let Some(rec) = self.node_mut(dst) {
            rec.incoming.push(id);
        }
        Ok(id)
    }

    pub(crate) fn remove_edge(&mut self, id: EdgeId) -> SocnetResult<(EdgeRecord, EdgeSlots)> {
        let rec = *self.edge(id).ok_or(SocnetError::EdgeNotFound(id))?;
        let src_pos = self
            .node_mut(rec.src)
            .and_then(|n| take_from(&mut n.outgoing, id))
            .unwrap_or(0);
        let dst_pos = self
            .node_mut(rec.dst)
            .and_then(|n| take_from(&mut n.incoming, id))
            .unwrap_or(0);
        self.edges.remove(id.index(), id.generation());
        Ok((rec, EdgeSlots { src_pos, dst_pos }))
    }

    pub(crate) fn restore_edge(&mut self, id: EdgeId, rec: EdgeRecord, slots: EdgeSlots) {
        self.edges.restore(id.index(), id.generation(), rec);
        if let Some(n) = self.node_mut(rec.src) {
            let pos = slots.src_pos.min(n.outgoing.len());
            n.outgoing.insert(pos, id);
        }
        if let Some(n) = self.node_mut(rec.dst) {
            let pos = slots.dst_pos.min(n.incoming.len());
            n.incoming.insert(pos, id);
        }
    }

    pub(crate) fn set_property(&mut self, node: NodeId, key: &str, value: Value) -> SocnetResult<Option<Value>> {
        let rec = self.node_mut(node).ok_or(SocnetError::NodeNotFound(node))?;
        Ok(rec.properties.insert(key.to_string(), value))
    }

    pub(crate) fn restore_property(&mut self, node: NodeId, key: &str, previous: Option<Value>) {
        if let Some(rec) = self.node_mut(node) {
            match previous {
                Some(value) => {
                    rec.properties.insert(key.to_string(), value);
                }
                None => {
                    rec.properties.remove(key);
                }
            }
        }
    }
}

/// Remove `id` from `list`, keeping order. Returns its former position.
fn take_from(list: &mut EdgeList, id: EdgeId) -> Option<usize> {
    let pos = list.iter().position(|&e| e == id)?;
    list.remove(pos);
    Some(pos)
}
