//! Storage layer for socnet
//!
//! This crate defines the graph store contract the social layer depends on,
//! and ships an in-memory implementation of it:
//! - traits: GraphRead / GraphWrite / GraphStore
//! - arena: generational slot allocator for nodes and edges
//! - memory: MemoryGraphStore, RwLock-guarded arena state
//! - txn: MemoryTxn, the undo-logged unit of work

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod arena;
pub mod memory;
mod state;
pub mod traits;
pub mod txn;

pub use memory::MemoryGraphStore;
pub use traits::{EdgeRef, GraphRead, GraphStore, GraphWrite};
pub use txn::MemoryTxn;
