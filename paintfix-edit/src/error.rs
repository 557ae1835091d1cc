//! Error types for paintfix-edit.
//!
//! Host write failures are isolated: the dispatcher records them on the node
//! result and moves on. Only a node that cannot be read at all aborts its own
//! update.

use paintfix_types::{Attribute, NodeKind, NodePath};
use thiserror::Error;

/// A single write rejected by the document host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostWriteError {
    #[error("node {0} not found")]
    NodeNotFound(NodePath),

    #[error("{kind} nodes do not carry {attribute}")]
    Unsupported { kind: NodeKind, attribute: Attribute },

    #[error("text range {start}..{end} is outside 0..{len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("host rejected write: {0}")]
    Rejected(String),
}

/// The top-level error type for paintfix-edit operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// The node vanished from the host between selection and mutation.
    #[error("node {0} not found")]
    NodeNotFound(NodePath),

    /// A host write failed; later writes of the same attribute were skipped.
    #[error("{kind} write to {attribute} of {path} failed: {source}")]
    Write {
        path: NodePath,
        attribute: Attribute,
        kind: &'static str,
        #[source]
        source: HostWriteError,
    },
}

impl EditError {
    /// Returns true if the failure is confined to one attribute of one node.
    pub fn is_isolated(&self) -> bool {
        matches!(self, EditError::Write { .. })
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
