//! Person: an identity view over a graph node.
//!
//! A `Person` is a store handle plus a node id. Two persons are equal when
//! they wrap the same node of the same store; the name plays no part.

use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::sync::Arc;

use socnet_core::{now_millis, EdgeKind, NodeId, SocnetError, SocnetResult, Timestamp};
use socnet_storage::{GraphStore, GraphWrite};

use super::friendship::find_friendship_edge;
use super::path::{PathCounter, PathFinder};
use super::recommend::Recommender;
use super::schema::{read_string, validate_status_text, PERSON_NAME};
use super::status::{self, FriendFeed, History, StatusUpdate};
use super::traversal::{FriendsWithinDepth, TraversalStep};
use super::SocialGraph;

/// A person in the social graph.
pub struct Person<S> {
    graph: SocialGraph<S>,
    node: NodeId,
}

impl<S> Clone for Person<S> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph.clone(),
            node: self.node,
        }
    }
}

impl<S: GraphStore> Person<S> {
    pub(crate) fn new(graph: SocialGraph<S>, node: NodeId) -> Self {
        Self { graph, node }
    }

    /// Underlying node.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The graph this person belongs to.
    #[inline]
    pub fn graph(&self) -> &SocialGraph<S> {
        &self.graph
    }

    fn store(&self) -> &S {
        self.graph.store().as_ref()
    }

    fn check_same_graph(&self, other: &Person<S>) -> SocnetResult<()> {
        if self.graph.same_store(&other.graph) {
            Ok(())
        } else {
            Err(SocnetError::invalid_input(format!(
                "{} and {} belong to different stores",
                self, other
            )))
        }
    }

    /// Display name.
    pub fn name(&self) -> SocnetResult<String> {
        read_string(self.store(), self.node, PERSON_NAME)
    }

    // =========================================================================
    // Friendship
    // =========================================================================

    /// Befriend `other`. Idempotent; befriending oneself does nothing.
    pub fn add_friend(&self, other: &Person<S>) -> SocnetResult<()> {
        self.check_same_graph(other)?;
        if self.node == other.node {
            return Ok(());
        }
        let (me, them) = (self.node, other.node);
        let created = self.graph.store().run_atomic(|txn| {
            if find_friendship_edge(&*txn, me, them)?.is_some() {
                return Ok(false);
            }
            txn.create_edge(me, them, EdgeKind::Friend)?;
            Ok(true)
        })?;
        tracing::debug!(target: "socnet::social", person = %me, friend = %them, created, "add_friend");
        Ok(())
    }

    /// End the friendship with `other`. A no-op when not friends or when
    /// `other` is this person.
    pub fn remove_friend(&self, other: &Person<S>) -> SocnetResult<()> {
        self.check_same_graph(other)?;
        if self.node == other.node {
            return Ok(());
        }
        let (me, them) = (self.node, other.node);
        let removed = self.graph.store().run_atomic(|txn| {
            match find_friendship_edge(&*txn, me, them)? {
                Some(edge) => {
                    txn.delete_edge(edge.id)?;
                    Ok(true)
                }
                None => Ok(false),
            }
        })?;
        tracing::debug!(target: "socnet::social", person = %me, friend = %them, removed, "remove_friend");
        Ok(())
    }

    /// Whether a FRIEND edge joins this person and `other`.
    pub fn is_friend_of(&self, other: &Person<S>) -> SocnetResult<bool> {
        if !self.graph.same_store(&other.graph) || self.node == other.node {
            return Ok(false);
        }
        Ok(find_friendship_edge(self.store(), self.node, other.node)?.is_some())
    }

    /// Direct friends.
    pub fn friends(&self) -> People<S> {
        People::new(self.graph.clone(), self.node, 1, None)
    }

    /// Friends and friends of friends.
    pub fn friends_of_friends(&self) -> People<S> {
        People::new(self.graph.clone(), self.node, 2, None)
    }

    /// Everyone within `depth` hops, in discovery order.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `depth` exceeds `max_traversal_depth`.
    pub fn friends_within_depth(&self, depth: usize) -> SocnetResult<People<S>> {
        self.check_depth(depth)?;
        Ok(People::new(self.graph.clone(), self.node, depth, None))
    }

    /// Everyone whose shortest distance is exactly `depth` hops.
    pub fn friends_at_depth(&self, depth: usize) -> SocnetResult<People<S>> {
        self.check_depth(depth)?;
        Ok(People::new(self.graph.clone(), self.node, depth, Some(depth)))
    }

    /// Number of direct friends.
    pub fn friend_count(&self) -> SocnetResult<usize> {
        self.friends().try_fold(0, |n, friend| friend.map(|_| n + 1))
    }

    fn check_depth(&self, depth: usize) -> SocnetResult<()> {
        let max = self.graph.config().max_traversal_depth;
        if depth > max {
            return Err(SocnetError::invalid_input(format!(
                "depth {} exceeds max_traversal_depth {}",
                depth, max
            )));
        }
        Ok(())
    }

    // =========================================================================
    // Paths and recommendations
    // =========================================================================

    /// Shortest chain of friendships to `other`, both ends included.
    ///
    /// Empty when `other` is farther than `max_depth` hops. Any bound is
    /// accepted; `max_traversal_depth` only limits the neighbourhood queries.
    pub fn shortest_path_to(&self, other: &Person<S>, max_depth: usize) -> SocnetResult<Vec<Person<S>>> {
        self.check_same_graph(other)?;
        let path = PathFinder::new(max_depth).find(self.store(), self.node, other.node)?;
        Ok(path
            .into_iter()
            .map(|node| Person::new(self.graph.clone(), node))
            .collect())
    }

    /// Number of simple paths of at most `max_length` hops to `other`.
    ///
    /// Any bound is accepted. Paths are simple, so no counted path is longer
    /// than the number of persons.
    pub fn count_paths_to(&self, other: &Person<S>, max_length: usize) -> SocnetResult<usize> {
        self.check_same_graph(other)?;
        PathCounter::new(max_length).count(self.store(), self.node, other.node)
    }

    /// Up to `k` friends-of-friends, best connected first.
    pub fn friend_recommendations(&self, k: usize) -> SocnetResult<Vec<Person<S>>> {
        let recommender = Recommender::new(self.graph.config().recommendation_path_length);
        let ranked = recommender.recommend(self.store(), self.node, k)?;
        Ok(ranked
            .into_iter()
            .map(|candidate| Person::new(self.graph.clone(), candidate.node))
            .collect())
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Latest status, if any.
    pub fn current_status(&self) -> SocnetResult<Option<StatusUpdate<S>>> {
        Ok(status::current_status(self.store(), self.node)?
            .map(|node| StatusUpdate::new(self.graph.clone(), node)))
    }

    /// Post a status stamped with the current time.
    pub fn add_status(&self, text: &str) -> SocnetResult<StatusUpdate<S>> {
        self.add_status_at(text, now_millis())
    }

    /// Post a status with an explicit creation time.
    pub fn add_status_at(&self, text: &str, created_at: Timestamp) -> SocnetResult<StatusUpdate<S>> {
        validate_status_text(text, self.graph.config().max_status_len)?;
        let person = self.node;
        let node = self
            .graph
            .store()
            .run_atomic(|txn| status::prepend_status(txn, person, text, created_at))?;
        tracing::debug!(target: "socnet::social", person = %person, status = %node, created_at, "add_status");
        Ok(StatusUpdate::new(self.graph.clone(), node))
    }

    /// Every status this person posted, newest first.
    pub fn full_history(&self) -> History<S> {
        History::new(self.graph.clone(), self.node)
    }

    /// Friends' statuses merged newest first.
    pub fn friend_statuses(&self) -> FriendFeed<S> {
        FriendFeed::new(self.graph.clone(), self.node)
    }
}

impl<S> PartialEq for Person<S> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.graph.same_store(&other.graph)
    }
}

impl<S> Eq for Person<S> {}

impl<S> Hash for Person<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl<S> std::fmt::Debug for Person<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Person").field("node", &self.node).finish()
    }
}

impl<S> std::fmt::Display for Person<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Person[{}]", self.node)
    }
}

/// Lazy sequence of persons reached by a friendship traversal.
pub struct People<S> {
    graph: SocialGraph<S>,
    steps: FriendsWithinDepth<Arc<S>>,
    exact_depth: Option<usize>,
}

impl<S: GraphStore> People<S> {
    fn new(graph: SocialGraph<S>, start: NodeId, depth: usize, exact_depth: Option<usize>) -> Self {
        let steps = FriendsWithinDepth::new(Arc::clone(graph.store()), start, depth);
        Self {
            graph,
            steps,
            exact_depth,
        }
    }

    /// Yield raw traversal steps (node and depth) instead of persons.
    pub fn steps(self) -> impl Iterator<Item = SocnetResult<TraversalStep>> {
        let exact = self.exact_depth;
        self.steps
            .filter(move |step| match (step, exact) {
                (Ok(step), Some(d)) => step.depth == d,
                _ => true,
            })
    }
}

impl<S: GraphStore> Iterator for People<S> {
    type Item = SocnetResult<Person<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.steps.next()? {
                Ok(step) => {
                    if self.exact_depth.map_or(true, |d| step.depth == d) {
                        return Some(Ok(Person::new(self.graph.clone(), step.node)));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

impl<S: GraphStore> FusedIterator for People<S> {}
