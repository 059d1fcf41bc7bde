//! Social query engine for socnet
//!
//! Persons, friendships and status chains over any store implementing the
//! `socnet-storage` contract, plus the algorithms that answer relationship
//! queries:
//! - bounded breadth-first friend exploration
//! - shortest friendship path
//! - bounded path counting and friend recommendations
//! - status history and merged friend feeds

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod social;

pub use social::path::{PathCounter, PathFinder};
pub use social::recommend::{RankedCandidate, Recommender};
pub use social::traversal::FriendsWithinDepth;
pub use social::{
    FriendFeed, History, People, Person, SocialGraph, StatusUpdate, TraversalStep,
};
