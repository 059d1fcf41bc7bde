//! Social graph layer.
//!
//! Persons, friendships and status chains on top of any [`GraphStore`].
//! Nodes and edges live in the store; everything here is a thin view holding
//! a shared store handle plus a node id.
//!
//! Mutations (`add_friend`, `remove_friend`, `add_status`, repository writes)
//! each run as one atomic unit of work. Reads are lazy and go straight to the
//! store, one call per hop.

pub mod friendship;
pub mod path;
pub mod person;
pub mod recommend;
mod repository;
pub mod schema;
pub mod status;
pub mod traversal;

use std::sync::Arc;

use socnet_core::{NodeId, SocnetConfig, SocnetError, SocnetResult};
use socnet_storage::{GraphRead, GraphStore, MemoryGraphStore};

pub use person::{People, Person};
pub use status::{FriendFeed, History, StatusUpdate};
pub use traversal::TraversalStep;

/// Entry point to the social layer.
///
/// Cheap to clone: clones share the store and the configuration.
pub struct SocialGraph<S> {
    store: Arc<S>,
    config: Arc<SocnetConfig>,
}

impl<S> Clone for SocialGraph<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> std::fmt::Debug for SocialGraph<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SocialGraph")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S> SocialGraph<S> {
    /// The underlying store.
    #[inline]
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &SocnetConfig {
        &self.config
    }

    /// Whether both handles point at the same store.
    #[inline]
    pub fn same_store(&self, other: &SocialGraph<S>) -> bool {
        Arc::ptr_eq(&self.store, &other.store)
    }
}

impl<S: GraphStore> SocialGraph<S> {
    /// Wrap a store with the default configuration.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            config: Arc::new(SocnetConfig::default()),
        }
    }

    /// Wrap a store with an explicit configuration.
    pub fn with_config(store: Arc<S>, config: SocnetConfig) -> SocnetResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config: Arc::new(config),
        })
    }

    /// View an existing node as a person.
    ///
    /// # Errors
    ///
    /// `NodeNotFound` if `node` is not live.
    pub fn person(&self, node: NodeId) -> SocnetResult<Person<S>> {
        if !self.store.contains_node(node) {
            return Err(SocnetError::NodeNotFound(node));
        }
        Ok(Person::new(self.clone(), node))
    }
}

impl SocialGraph<MemoryGraphStore> {
    /// A social graph over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryGraphStore::new()))
    }
}
