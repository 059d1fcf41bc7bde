//! Status update chains.
//!
//! Each person has at most one outgoing STATUS edge, pointing at the newest
//! status node. Each status node has at most one outgoing NEXT edge, pointing
//! at the status it replaced:
//!
//! ```text
//! person -STATUS-> s3 -NEXT-> s2 -NEXT-> s1
//! ```
//!
//! Posting swaps the head: the STATUS edge moves to the new node and the new
//! node links to the old head. Status nodes are never modified afterwards.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::iter::FusedIterator;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use socnet_core::{Direction, EdgeKind, NodeId, SocnetError, SocnetResult, Timestamp, Value};
use socnet_storage::{GraphRead, GraphStore, GraphWrite};

use super::person::Person;
use super::schema::{read_int, read_string, STATUS_CREATED_AT, STATUS_TEXT};
use super::traversal::FriendsWithinDepth;
use super::SocialGraph;

/// Head of `person`'s chain, if any.
pub fn current_status<R: GraphRead + ?Sized>(
    reader: &R,
    person: NodeId,
) -> SocnetResult<Option<NodeId>> {
    Ok(reader
        .single_edge(person, EdgeKind::Status, Direction::Outgoing)?
        .map(|edge| edge.dst))
}

/// The status that `status` replaced, if any.
pub fn previous_status<R: GraphRead + ?Sized>(
    reader: &R,
    status: NodeId,
) -> SocnetResult<Option<NodeId>> {
    Ok(reader
        .single_edge(status, EdgeKind::Next, Direction::Outgoing)?
        .map(|edge| edge.dst))
}

/// Push a new status onto `person`'s chain. Call inside a unit of work.
pub fn prepend_status<W: GraphWrite + ?Sized>(
    txn: &mut W,
    person: NodeId,
    text: &str,
    created_at: Timestamp,
) -> SocnetResult<NodeId> {
    if !txn.contains_node(person) {
        return Err(SocnetError::NodeNotFound(person));
    }
    let old_head = txn.single_edge(person, EdgeKind::Status, Direction::Outgoing)?;

    let status = txn.create_node()?;
    txn.set_property(status, STATUS_TEXT, Value::from(text))?;
    txn.set_property(status, STATUS_CREATED_AT, Value::Int(created_at))?;

    if let Some(edge) = old_head {
        txn.delete_edge(edge.id)?;
        txn.create_edge(status, edge.dst, EdgeKind::Next)?;
    }
    txn.create_edge(person, status, EdgeKind::Status)?;
    Ok(status)
}

enum Cursor {
    Head(NodeId),
    At(NodeId),
    Done,
}

/// Lazy walk over one person's status nodes, newest first.
///
/// The head is read on the first call to `next`, not at construction.
pub struct StatusChain<R> {
    reader: R,
    cursor: Cursor,
}

impl<R: GraphRead> StatusChain<R> {
    /// Walk `person`'s chain.
    pub fn new(reader: R, person: NodeId) -> Self {
        Self {
            reader,
            cursor: Cursor::Head(person),
        }
    }
}

impl<R: GraphRead> Iterator for StatusChain<R> {
    type Item = SocnetResult<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        let step = match self.cursor {
            Cursor::Head(person) => current_status(&self.reader, person),
            Cursor::At(status) => previous_status(&self.reader, status),
            Cursor::Done => return None,
        };
        match step {
            Ok(Some(node)) => {
                self.cursor = Cursor::At(node);
                Some(Ok(node))
            }
            Ok(None) => {
                self.cursor = Cursor::Done;
                None
            }
            Err(e) => {
                self.cursor = Cursor::Done;
                Some(Err(e))
            }
        }
    }
}

impl<R: GraphRead> FusedIterator for StatusChain<R> {}

/// View of one status node.
pub struct StatusUpdate<S> {
    graph: SocialGraph<S>,
    node: NodeId,
}

impl<S> Clone for StatusUpdate<S> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            node: self.node,
        }
    }
}

impl<S: GraphStore> StatusUpdate<S> {
    pub(crate) fn new(graph: SocialGraph<S>, node: NodeId) -> Self {
        Self { graph, node }
    }

    /// Underlying node.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Status text.
    pub fn text(&self) -> SocnetResult<String> {
        read_string(self.graph.store().as_ref(), self.node, STATUS_TEXT)
    }

    /// Creation time in epoch millis.
    pub fn created_at(&self) -> SocnetResult<Timestamp> {
        read_int(self.graph.store().as_ref(), self.node, STATUS_CREATED_AT)
    }

    /// The status this one replaced.
    pub fn previous(&self) -> SocnetResult<Option<StatusUpdate<S>>> {
        Ok(previous_status(self.graph.store().as_ref(), self.node)?
            .map(|node| StatusUpdate::new(self.graph.clone(), node)))
    }

    /// The person who posted this status.
    ///
    /// Walks NEXT edges back to the chain head, then follows the STATUS edge
    /// to its owner. `None` for a detached status node.
    pub fn author(&self) -> SocnetResult<Option<Person<S>>> {
        let store = self.graph.store().as_ref();
        let mut seen = FxHashSet::default();
        let mut cur = self.node;
        while let Some(edge) = store.single_edge(cur, EdgeKind::Next, Direction::Incoming)? {
            if !seen.insert(cur) {
                return Err(SocnetError::store_failure(format!(
                    "status chain through {} is cyclic",
                    cur
                )));
            }
            cur = edge.src;
        }
        Ok(store
            .single_edge(cur, EdgeKind::Status, Direction::Incoming)?
            .map(|edge| Person::new(self.graph.clone(), edge.src)))
    }
}

impl<S> PartialEq for StatusUpdate<S> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.graph.same_store(&other.graph)
    }
}

impl<S> Eq for StatusUpdate<S> {}

impl<S> std::fmt::Debug for StatusUpdate<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusUpdate").field("node", &self.node).finish()
    }
}

/// A person's status history, newest first.
pub struct History<S> {
    graph: SocialGraph<S>,
    chain: StatusChain<Arc<S>>,
}

impl<S: GraphStore> History<S> {
    pub(crate) fn new(graph: SocialGraph<S>, person: NodeId) -> Self {
        let chain = StatusChain::new(Arc::clone(graph.store()), person);
        Self { graph, chain }
    }
}

impl<S: GraphStore> Iterator for History<S> {
    type Item = SocnetResult<StatusUpdate<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.chain.next()?;
        Some(node.map(|node| StatusUpdate::new(self.graph.clone(), node)))
    }
}

impl<S: GraphStore> FusedIterator for History<S> {}

struct FeedEntry {
    created_at: Timestamp,
    source: usize,
    node: NodeId,
}

// Max-heap: newest first, then lowest source index.
impl Ord for FeedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for FeedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FeedEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FeedEntry {}

/// Merged status feed of a person's friends.
///
/// A lazy k-way merge over every friend's chain: newest `created_at` first,
/// ties broken by friend discovery order. Within one friend the chain order
/// is kept. Friends are resolved on the first call to `next`.
pub struct FriendFeed<S> {
    graph: SocialGraph<S>,
    person: NodeId,
    sources: Vec<StatusChain<Arc<S>>>,
    heap: BinaryHeap<FeedEntry>,
    started: bool,
    failed: bool,
}

impl<S: GraphStore> FriendFeed<S> {
    pub(crate) fn new(graph: SocialGraph<S>, person: NodeId) -> Self {
        Self {
            graph,
            person,
            sources: Vec::new(),
            heap: BinaryHeap::new(),
            started: false,
            failed: false,
        }
    }

    fn prime(&mut self) -> SocnetResult<()> {
        let store = self.graph.store();
        for step in FriendsWithinDepth::new(Arc::clone(store), self.person, 1) {
            let friend = step?.node;
            self.sources.push(StatusChain::new(Arc::clone(store), friend));
        }
        for source in 0..self.sources.len() {
            self.advance(source)?;
        }
        Ok(())
    }

    fn advance(&mut self, source: usize) -> SocnetResult<()> {
        if let Some(node) = self.sources[source].next().transpose()? {
            let created_at = read_int(self.graph.store().as_ref(), node, STATUS_CREATED_AT)?;
            self.heap.push(FeedEntry {
                created_at,
                source,
                node,
            });
        }
        Ok(())
    }
}

impl<S: GraphStore> Iterator for FriendFeed<S> {
    type Item = SocnetResult<StatusUpdate<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if !self.started {
            self.started = true;
            if let Err(e) = self.prime() {
                self.failed = true;
                return Some(Err(e));
            }
        }
        let entry = self.heap.pop()?;
        if let Err(e) = self.advance(entry.source) {
            self.failed = true;
            return Some(Err(e));
        }
        Some(Ok(StatusUpdate::new(self.graph.clone(), entry.node)))
    }
}

impl<S: GraphStore> FusedIterator for FriendFeed<S> {}
