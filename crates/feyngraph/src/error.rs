//! Error types for feyngraph operations.
//!
//! The taxonomy mirrors how the facade reports failures to the presentation
//! layer: lookups of absent ids, validation rejections, and internal
//! invariant violations. Rejections are ordinary outcomes the UI reports to
//! the user; a [`GraphError::Invariant`] signals a defect and is worth
//! logging loudly.

use thiserror::Error;

use feyngraph_core::identifier::{LineId, VertexId};

/// A type alias for `Result<T, GraphError>`.
pub type Result<T> = std::result::Result<T, GraphError>;

/// The main error type for feyngraph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A referenced vertex id is not present in the diagram.
    #[error("vertex {0} does not exist")]
    VertexNotFound(VertexId),

    /// A referenced line id is not present in the diagram.
    #[error("line {0} does not exist")]
    LineNotFound(LineId),

    /// The intent failed validation and was not applied.
    #[error("{0}")]
    Rejected(#[from] Rejection),

    /// Internal consistency check failed. The offending operation was
    /// aborted with prior state untouched; the store and integrity layer
    /// have diverged and the condition should be reported as a bug.
    #[error("invariant violation: {0}")]
    Invariant(String),
}

impl GraphError {
    /// Whether this error is an ordinary validation rejection (as opposed to
    /// a missing id or an internal defect).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Reasons an intent can be rejected by validation.
///
/// A rejected intent is a no-op: no history entry is created and no change
/// notification fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A line endpoint references a vertex that is not in the diagram.
    #[error("line endpoint {0} does not exist")]
    DanglingEndpoint(VertexId),

    /// Both endpoints reference the same vertex and the policy forbids it.
    #[error("self-loop on vertex {0} is disallowed by policy")]
    SelfLoopDisallowed(VertexId),

    /// A line between these vertices already exists and the policy forbids
    /// parallel lines.
    #[error("parallel line between {0} and {1} is disallowed by policy")]
    ParallelLineDisallowed(VertexId, VertexId),

    /// Undo was requested with no applied command in the history.
    #[error("nothing to undo")]
    NothingToUndo,

    /// Redo was requested with no undone command ahead of the cursor.
    #[error("nothing to redo")]
    NothingToRedo,
}
