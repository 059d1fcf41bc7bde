//! socnet: a social graph with bounded relationship queries
//!
//! Persons connected by friendships, each holding a chain of status updates,
//! plus the queries that run over them: friend and friend-of-friend
//! exploration, shortest connection path, recommendations and status feeds.
//!
//! ```
//! use socnet::SocialGraph;
//!
//! let graph = SocialGraph::in_memory();
//! let ada = graph.create_person("ada").unwrap();
//! let bob = graph.create_person("bob").unwrap();
//! ada.add_friend(&bob).unwrap();
//! ada.add_status("hello").unwrap();
//!
//! assert_eq!(bob.friend_count().unwrap(), 1);
//! let feed: Vec<_> = bob.friend_statuses().map(|s| s.unwrap().text().unwrap()).collect();
//! assert_eq!(feed, vec!["hello"]);
//! ```

#![warn(missing_docs)]

pub use socnet_core::{
    now_millis, Direction, EdgeId, EdgeKind, NodeId, SocnetConfig, SocnetError, SocnetResult,
    Timestamp, Value,
};
pub use socnet_engine::{
    FriendFeed, FriendsWithinDepth, History, PathCounter, PathFinder, People, Person,
    RankedCandidate, Recommender, SocialGraph, StatusUpdate, TraversalStep,
};
pub use socnet_storage::{EdgeRef, GraphRead, GraphStore, GraphWrite, MemoryGraphStore};

/// Default config file name.
pub use socnet_core::config::CONFIG_FILE_NAME;
