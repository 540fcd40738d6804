//! The graph integrity layer: validation of structural intents.
//!
//! Every structural intent is gatekept here before it reaches the store.
//! Centralizing the rules means the command stack and the element store
//! never need to know diagram-level policy; they execute already-validated
//! effects, which keeps undo and redo symmetric: nothing can be rejected
//! halfway through a revert.

use feyngraph_core::identifier::{LineId, VertexId};

use crate::{
    config::DiagramPolicy,
    error::{GraphError, Rejection, Result},
    store::ElementStore,
};

/// The complete set of removals a vertex deletion entails.
///
/// Deleting a vertex removes the vertex and every incident line as one
/// atomic unit; there are no partial cascades. The plan is consumed by the
/// facade to build a single compound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadePlan {
    vertex: VertexId,
    lines: Vec<LineId>,
}

impl CascadePlan {
    /// The vertex being deleted.
    pub fn vertex(&self) -> VertexId {
        self.vertex
    }

    /// The incident lines removed together with the vertex, in ascending id
    /// order.
    pub fn lines(&self) -> &[LineId] {
        &self.lines
    }
}

/// Validates adding a line of any kind between two vertices.
///
/// Fails if either endpoint is absent, if the endpoints coincide and the
/// policy forbids self-loops, or if a line between the pair exists and the
/// policy forbids parallel lines.
pub(crate) fn validate_add_line(
    store: &ElementStore,
    policy: &DiagramPolicy,
    start: VertexId,
    end: VertexId,
) -> Result<()> {
    validate_endpoints(store, policy, start, end, None)
}

/// Validates moving a line's endpoints, with the same rules as adding.
///
/// The line itself is excluded from the parallel-line check so that a
/// reconnect keeping one endpoint in place never conflicts with itself.
pub(crate) fn validate_reconnect(
    store: &ElementStore,
    policy: &DiagramPolicy,
    line: LineId,
    new_start: VertexId,
    new_end: VertexId,
) -> Result<()> {
    if !store.contains_line(line) {
        return Err(GraphError::LineNotFound(line));
    }
    validate_endpoints(store, policy, new_start, new_end, Some(line))
}

/// Computes the cascade plan for deleting a vertex.
pub(crate) fn plan_delete_vertex(store: &ElementStore, vertex: VertexId) -> Result<CascadePlan> {
    if !store.contains_vertex(vertex) {
        return Err(GraphError::VertexNotFound(vertex));
    }
    let lines: Vec<LineId> = store.incident_lines(vertex).collect();
    Ok(CascadePlan { vertex, lines })
}

fn validate_endpoints(
    store: &ElementStore,
    policy: &DiagramPolicy,
    start: VertexId,
    end: VertexId,
    exclude: Option<LineId>,
) -> Result<()> {
    for endpoint in [start, end] {
        if !store.contains_vertex(endpoint) {
            return Err(Rejection::DanglingEndpoint(endpoint).into());
        }
    }
    if start == end && !policy.allow_self_loops() {
        return Err(Rejection::SelfLoopDisallowed(start).into());
    }
    if !policy.allow_parallel_lines() {
        let occupied = store.incident_lines(start).any(|id| {
            if Some(id) == exclude {
                return false;
            }
            // incident_lines(start) only yields lines touching start, so a
            // parallel line is one whose other endpoint is `end`
            store
                .line(id)
                .map(|line| line.touches(end))
                .unwrap_or(false)
        });
        if occupied {
            return Err(Rejection::ParallelLineDisallowed(start, end).into());
        }
    }
    Ok(())
}
