//! The element store: authoritative ownership of vertices and lines.
//!
//! This module provides [`ElementStore`], the single authoritative mapping
//! from identifiers to element records, together with the derived incidence
//! index `lines_by_vertex` used for O(1) cascade lookup when a vertex is
//! deleted.
//!
//! # Architecture
//!
//! - Primary maps are `BTreeMap`s keyed by id. Ids are issued monotonically,
//!   so ascending id order is creation order, and unlike raw insertion order
//!   it survives undo/redo: a reverted deletion puts the element back in the
//!   same place. Snapshots and list widgets see a stable ordering.
//! - The incidence index is maintained in the same call as every primary-map
//!   mutation. Each method validates everything it needs before touching any
//!   map, so a call either applies completely or not at all.
//! - The store executes already-validated effects. Diagram-level rules
//!   (self-loop policy, cascade planning) live in the integrity layer;
//!   violations that reach the store anyway are reported as
//!   [`GraphError::Invariant`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use feyngraph_core::{
    element::{Line, Vertex},
    identifier::{LineId, VertexId},
};

use crate::error::{GraphError, Result};

/// Authoritative storage for one diagram's vertices and lines.
///
/// All mutation goes through the diagram facade and its command stack; the
/// store itself knows nothing about history or notification.
#[derive(Debug, Clone, Default)]
pub(crate) struct ElementStore {
    vertices: BTreeMap<VertexId, Vertex>,
    lines: BTreeMap<LineId, Line>,
    lines_by_vertex: HashMap<VertexId, BTreeSet<LineId>>,
}

impl ElementStore {
    /// Creates an empty store.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the vertex with the given id.
    pub(crate) fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.vertices.get(&id).ok_or(GraphError::VertexNotFound(id))
    }

    /// Returns the line with the given id.
    pub(crate) fn line(&self, id: LineId) -> Result<&Line> {
        self.lines.get(&id).ok_or(GraphError::LineNotFound(id))
    }

    /// Checks whether a vertex with the given id exists.
    pub(crate) fn contains_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Checks whether a line with the given id exists.
    pub(crate) fn contains_line(&self, id: LineId) -> bool {
        self.lines.contains_key(&id)
    }

    /// Iterates over all vertices in ascending id order (creation order).
    pub(crate) fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Iterates over all lines in ascending id order (creation order).
    pub(crate) fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    /// Returns the total number of vertices.
    pub(crate) fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the total number of lines.
    pub(crate) fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Iterates over the ids of lines incident to the given vertex, in
    /// ascending id order. Empty for unknown vertices.
    pub(crate) fn incident_lines(&self, id: VertexId) -> impl Iterator<Item = LineId> + '_ {
        self.lines_by_vertex
            .get(&id)
            .into_iter()
            .flatten()
            .copied()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Inserts a vertex.
    ///
    /// Ids come out of the registry exactly once, so a duplicate id means the
    /// caller has diverged from the registry.
    pub(crate) fn insert_vertex(&mut self, vertex: Vertex) -> Result<()> {
        let id = vertex.id();
        if self.vertices.contains_key(&id) {
            return Err(GraphError::Invariant(format!(
                "vertex {id} inserted twice"
            )));
        }
        self.vertices.insert(id, vertex);
        Ok(())
    }

    /// Removes a vertex and returns its record.
    ///
    /// The vertex must have no incident lines left: cascade removal is
    /// planned by the integrity layer and executed line-by-line first.
    pub(crate) fn remove_vertex(&mut self, id: VertexId) -> Result<Vertex> {
        if !self.vertices.contains_key(&id) {
            return Err(GraphError::VertexNotFound(id));
        }
        if self.incident_lines(id).next().is_some() {
            return Err(GraphError::Invariant(format!(
                "vertex {id} removed while lines are still attached"
            )));
        }
        self.lines_by_vertex.remove(&id);
        let vertex = self.vertices.remove(&id).expect("presence checked above");
        Ok(vertex)
    }

    /// Replaces a vertex record, returning the previous one.
    ///
    /// The id is immutable, so the incidence index is unaffected.
    pub(crate) fn replace_vertex(&mut self, vertex: Vertex) -> Result<Vertex> {
        let id = vertex.id();
        match self.vertices.get_mut(&id) {
            Some(slot) => Ok(std::mem::replace(slot, vertex)),
            None => Err(GraphError::VertexNotFound(id)),
        }
    }

    /// Inserts a line and indexes it under both endpoints.
    ///
    /// Endpoints are re-checked here even though the integrity layer has
    /// already validated them: a dangling endpoint in the store would corrupt
    /// every later cascade.
    pub(crate) fn insert_line(&mut self, line: Line) -> Result<()> {
        let id = line.id();
        if self.lines.contains_key(&id) {
            return Err(GraphError::Invariant(format!("line {id} inserted twice")));
        }
        for endpoint in [line.start(), line.end()] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(GraphError::Invariant(format!(
                    "line {id} references missing vertex {endpoint}"
                )));
            }
        }

        self.index_line(&line);
        self.lines.insert(id, line);
        Ok(())
    }

    /// Removes a line and unindexes it, returning its record.
    pub(crate) fn remove_line(&mut self, id: LineId) -> Result<Line> {
        let line = self.lines.remove(&id).ok_or(GraphError::LineNotFound(id))?;
        self.unindex_line(&line);
        Ok(line)
    }

    /// Replaces a line record, returning the previous one.
    ///
    /// Endpoints may differ from the stored record (reconnect); the incidence
    /// index follows. New endpoints are checked before anything is mutated.
    pub(crate) fn replace_line(&mut self, line: Line) -> Result<Line> {
        let id = line.id();
        if !self.lines.contains_key(&id) {
            return Err(GraphError::LineNotFound(id));
        }
        for endpoint in [line.start(), line.end()] {
            if !self.vertices.contains_key(&endpoint) {
                return Err(GraphError::Invariant(format!(
                    "line {id} reconnected to missing vertex {endpoint}"
                )));
            }
        }

        let (start, end) = (line.start(), line.end());
        let previous = self
            .lines
            .insert(id, line)
            .expect("presence checked above");
        self.unindex_line(&previous);
        self.lines_by_vertex.entry(start).or_default().insert(id);
        self.lines_by_vertex.entry(end).or_default().insert(id);
        Ok(previous)
    }

    fn index_line(&mut self, line: &Line) {
        self.lines_by_vertex
            .entry(line.start())
            .or_default()
            .insert(line.id());
        self.lines_by_vertex
            .entry(line.end())
            .or_default()
            .insert(line.id());
    }

    fn unindex_line(&mut self, line: &Line) {
        for endpoint in [line.start(), line.end()] {
            if let Some(set) = self.lines_by_vertex.get_mut(&endpoint) {
                set.remove(&line.id());
                if set.is_empty() {
                    self.lines_by_vertex.remove(&endpoint);
                }
            }
        }
    }
}
