//! Core types for socnet
//!
//! This crate defines the vocabulary every other layer speaks:
//! - NodeId / EdgeId: generational handles into the graph store
//! - EdgeKind / Direction: relationship classification
//! - Value: scalar node properties
//! - SocnetError / SocnetResult: the shared error type
//! - SocnetConfig: runtime configuration loaded from TOML

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod types;
pub mod value;

pub use config::SocnetConfig;
pub use error::{SocnetError, SocnetResult};
pub use types::{now_millis, Direction, EdgeId, EdgeKind, NodeId, Timestamp};
pub use value::Value;
