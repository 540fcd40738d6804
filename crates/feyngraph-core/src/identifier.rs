//! Typed identifiers for diagram elements.
//!
//! This module provides the [`VertexId`] and [`LineId`] newtypes and the
//! [`IdRegistry`] that issues them. Identifiers are monotonically increasing
//! and unique for the lifetime of a diagram: an id is never handed out twice,
//! even after the element it named has been deleted. Stale references held by
//! a command history therefore stay unambiguous across undo and redo.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a vertex within one diagram.
///
/// Displays as `v<N>` and serializes as its numeric value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct VertexId(u64);

impl VertexId {
    /// Creates a vertex id from its raw numeric value.
    ///
    /// Normally ids come out of an [`IdRegistry`]; this constructor exists for
    /// deserialization and tests.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value of this id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Identifier of a line within one diagram.
///
/// Displays as `l<N>` and serializes as its numeric value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct LineId(u64);

impl LineId {
    /// Creates a line id from its raw numeric value.
    ///
    /// Normally ids come out of an [`IdRegistry`]; this constructor exists for
    /// deserialization and tests.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value of this id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "l{}", self.0)
    }
}

/// Issues unique identifiers for vertices and lines.
///
/// The registry keeps one counter per element class. Counters only ever move
/// forward, so deleting an element does not make its id available again.
/// Saturation is not a practical concern at diagram sizes.
///
/// # Examples
///
/// ```
/// use feyngraph_core::identifier::IdRegistry;
///
/// let mut registry = IdRegistry::new();
/// let a = registry.next_vertex_id();
/// let b = registry.next_vertex_id();
/// assert_ne!(a, b);
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    next_vertex: u64,
    next_line: u64,
}

impl IdRegistry {
    /// Creates a registry with both counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh vertex id, advancing the vertex counter.
    pub fn next_vertex_id(&mut self) -> VertexId {
        let id = VertexId(self.next_vertex);
        self.next_vertex += 1;
        id
    }

    /// Returns a fresh line id, advancing the line counter.
    pub fn next_line_id(&mut self) -> LineId {
        let id = LineId(self.next_line);
        self.next_line += 1;
        id
    }

    /// Advances the vertex counter past `id` if it is not already beyond it.
    ///
    /// Used when loading a serialized diagram: ids that were in use before the
    /// save must never be issued again afterwards.
    pub fn bump_past_vertex(&mut self, id: VertexId) {
        self.next_vertex = self.next_vertex.max(id.0 + 1);
    }

    /// Advances the line counter past `id` if it is not already beyond it.
    pub fn bump_past_line(&mut self, id: LineId) {
        self.next_line = self.next_line.max(id.0 + 1);
    }
}
