//! Point-in-time structural views of a diagram.
//!
//! A [`Snapshot`] is the serialization contract of the core: a plain
//! structural representation of every vertex and line, sufficient to
//! reconstruct the diagram without its command history. Rendering and list
//! collaborators consume snapshots as read-only data; persistence
//! collaborators encode them with any serde format.

use serde::{Deserialize, Serialize};

use feyngraph_core::element::{Line, Vertex};

/// An immutable copy of a diagram's elements, in ascending id order.
///
/// Snapshots are not live views: they share nothing with the diagram they
/// came from. Two snapshots compare equal exactly when the diagrams' element
/// states were equal, which is what the undo/redo tests lean on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    vertices: Vec<Vertex>,
    #[serde(default)]
    lines: Vec<Line>,
}

impl Snapshot {
    /// Assembles a snapshot from element copies.
    pub fn new(vertices: Vec<Vertex>, lines: Vec<Line>) -> Self {
        Self { vertices, lines }
    }

    /// Borrow the vertices, in ascending id order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Borrow the lines, in ascending id order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether the snapshot contains no elements at all.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.lines.is_empty()
    }
}
