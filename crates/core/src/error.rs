//! Error type shared by the store and the social layer.
//!
//! "Nothing found" is never an error: traversals over absent relations return
//! empty sequences. Errors are reserved for stale handles, rejected input,
//! malformed properties, and store-level faults.

use thiserror::Error;

use crate::types::{EdgeId, NodeId};

/// Result alias used throughout socnet.
pub type SocnetResult<T> = std::result::Result<T, SocnetError>;

/// Every failure a socnet operation can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SocnetError {
    /// The node handle does not refer to a live node.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// The edge handle does not refer to a live edge.
    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),

    /// An argument was rejected before touching the store.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input
        reason: String,
    },

    /// A property exists but holds a value of the wrong type.
    #[error("property '{key}' on {node} has type {actual}, expected {expected}")]
    TypeMismatch {
        /// Node carrying the property
        node: NodeId,
        /// Property key
        key: String,
        /// Type the caller needed
        expected: &'static str,
        /// Type actually stored
        actual: &'static str,
    },

    /// A required property is absent.
    #[error("property '{key}' missing on {node}")]
    MissingProperty {
        /// Node that should carry the property
        node: NodeId,
        /// Property key
        key: String,
    },

    /// A person with this name is already registered.
    #[error("person '{0}' already exists")]
    DuplicatePerson(String),

    /// The store could not complete the request.
    #[error("store failure: {reason}")]
    StoreFailure {
        /// Store-provided description
        reason: String,
    },
}

impl SocnetError {
    /// Build an [`SocnetError::InvalidInput`].
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        SocnetError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Build an [`SocnetError::TypeMismatch`].
    pub fn type_mismatch(
        node: NodeId,
        key: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        SocnetError::TypeMismatch {
            node,
            key: key.into(),
            expected,
            actual,
        }
    }

    /// Build an [`SocnetError::MissingProperty`].
    pub fn missing_property(node: NodeId, key: impl Into<String>) -> Self {
        SocnetError::MissingProperty {
            node,
            key: key.into(),
        }
    }

    /// Build an [`SocnetError::StoreFailure`].
    pub fn store_failure(reason: impl Into<String>) -> Self {
        SocnetError::StoreFailure {
            reason: reason.into(),
        }
    }

    /// True for errors caused by a handle that no longer resolves.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SocnetError::NodeNotFound(_) | SocnetError::EdgeNotFound(_)
        )
    }
}
