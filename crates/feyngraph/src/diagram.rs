//! The diagram facade: the single entry point for all edits and queries.
//!
//! [`Diagram`] composes the element store, the integrity layer, and the
//! command stack, and is the only type presentation code talks to. Every
//! intent follows the same path: validate, build a reversible command,
//! execute it on the stack, notify observers. Rejected intents are complete
//! no-ops: no history entry is created and no notification fires, so callers
//! can report the failure without rolling anything back themselves.
//!
//! There is deliberately no global "current diagram"; construct a value,
//! own it at the top of the application, and pass it down.

use log::{debug, info, trace, warn};

use feyngraph_core::{
    element::{Line, LineKind, Vertex},
    geometry::Point,
    identifier::{IdRegistry, LineId, VertexId},
};

use crate::{
    command::{CommandStack, EditCommand},
    config::DiagramPolicy,
    error::Result,
    integrity,
    snapshot::Snapshot,
    store::ElementStore,
};

/// Sequence number of a completed facade operation.
///
/// Strictly increasing over the lifetime of one diagram; undo and redo get
/// their own numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationId(u64);

impl OperationId {
    /// Returns the raw sequence number.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// What a change notification reports about the affected elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Elements came into existence (including via undo of a removal).
    Added,
    /// Elements were removed (including via undo of an addition).
    Removed,
    /// Element attributes or endpoints changed.
    Modified,
}

/// One change notification, emitted synchronously after each successful
/// mutating operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Sequence number of the operation that produced this event.
    pub operation: OperationId,
    /// The nature of the change.
    pub kind: ChangeKind,
    /// Vertices the operation touched.
    pub vertices: Vec<VertexId>,
    /// Lines the operation touched.
    pub lines: Vec<LineId>,
}

/// Handle for detaching a registered observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&ChangeEvent)>;

/// An editable Feynman diagram with undo/redo.
///
/// Owns the authoritative element maps and the command history exclusively;
/// no other component holds a mutable handle to either. All operations are
/// synchronous and run to completion before returning.
///
/// # Examples
///
/// ```
/// use feyngraph::{Diagram, element::LineKind, geometry::Point};
///
/// let mut diagram = Diagram::new();
/// let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
/// let b = diagram.add_vertex(Point::new(1.0, 1.0)).unwrap();
/// let line = diagram.add_line(a, b, LineKind::fermion()).unwrap();
///
/// // deleting `a` cascades over the incident line, as one undo step
/// diagram.delete_vertex(a).unwrap();
/// assert_eq!(diagram.line_count(), 0);
/// diagram.undo().unwrap();
/// assert!(diagram.line(line).is_ok());
/// ```
#[derive(Default)]
pub struct Diagram {
    store: ElementStore,
    stack: CommandStack,
    registry: IdRegistry,
    policy: DiagramPolicy,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
    next_operation: u64,
}

impl std::fmt::Debug for Diagram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagram")
            .field("store", &self.store)
            .field("stack", &self.stack)
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .field("observers", &self.observers.len())
            .field("next_observer", &self.next_observer)
            .field("next_operation", &self.next_operation)
            .finish()
    }
}

impl Diagram {
    /// Creates an empty diagram with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty diagram with an explicit structural policy.
    pub fn with_policy(policy: DiagramPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// The structural policy this diagram validates against.
    pub fn policy(&self) -> &DiagramPolicy {
        &self.policy
    }

    // =========================================================================
    // Intent API
    // =========================================================================

    /// Adds a vertex at `position` with default attributes.
    pub fn add_vertex(&mut self, position: Point) -> Result<VertexId> {
        self.add_vertex_with(position, |_| {})
    }

    /// Adds a vertex at `position`, letting `configure` adjust its
    /// attributes before it is recorded. Creation and configuration form a
    /// single undo step.
    pub fn add_vertex_with(
        &mut self,
        position: Point,
        configure: impl FnOnce(&mut Vertex),
    ) -> Result<VertexId> {
        let id = self.registry.next_vertex_id();
        let mut vertex = Vertex::new(id, position);
        configure(&mut vertex);

        let command = EditCommand::AddVertex(vertex);
        self.commit(command)?;
        info!(vertex:? = id; "Vertex added");
        Ok(id)
    }

    /// Adds a line of `kind` between two existing vertices.
    ///
    /// # Errors
    ///
    /// Rejected if either endpoint is absent, or per policy for self-loops
    /// and parallel lines. A rejected call changes nothing.
    pub fn add_line(&mut self, start: VertexId, end: VertexId, kind: LineKind) -> Result<LineId> {
        self.add_line_with(start, end, kind, |_| {})
    }

    /// Adds a line, letting `configure` adjust styling and label before it
    /// is recorded, as a single undo step.
    ///
    /// Endpoints set inside `configure` are ignored: they were validated
    /// against the integrity rules and are restored afterwards. Use
    /// [`reconnect_line`](Self::reconnect_line) to move endpoints.
    pub fn add_line_with(
        &mut self,
        start: VertexId,
        end: VertexId,
        kind: LineKind,
        configure: impl FnOnce(&mut Line),
    ) -> Result<LineId> {
        integrity::validate_add_line(&self.store, &self.policy, start, end)?;

        let id = self.registry.next_line_id();
        let mut line = Line::new(id, start, end, kind);
        configure(&mut line);
        line.set_endpoints(start, end);

        let command = EditCommand::AddLine(line);
        self.commit(command)?;
        info!(line:? = id, start:? = start, end:? = end; "Line added");
        Ok(id)
    }

    /// Deletes a vertex together with every incident line, as one atomic,
    /// single-undo-step cascade.
    pub fn delete_vertex(&mut self, id: VertexId) -> Result<()> {
        let plan = integrity::plan_delete_vertex(&self.store, id)?;
        debug!(vertex:? = id, cascade = plan.lines().len(); "Cascade planned");

        let mut commands = Vec::with_capacity(plan.lines().len() + 1);
        for line_id in plan.lines() {
            commands.push(EditCommand::RemoveLine(self.store.line(*line_id)?.clone()));
        }
        commands.push(EditCommand::RemoveVertex(self.store.vertex(id)?.clone()));

        self.commit(EditCommand::Compound(commands))?;
        info!(vertex:? = id; "Vertex deleted");
        Ok(())
    }

    /// Deletes a single line.
    pub fn delete_line(&mut self, id: LineId) -> Result<()> {
        let line = self.store.line(id)?.clone();
        self.commit(EditCommand::RemoveLine(line))?;
        info!(line:? = id; "Line deleted");
        Ok(())
    }

    /// Edits a vertex's attributes through `configure`.
    ///
    /// The edit is recorded as one reversible step. If `configure` leaves
    /// the record unchanged, nothing is recorded and no event fires.
    pub fn set_vertex_attrs(
        &mut self,
        id: VertexId,
        configure: impl FnOnce(&mut Vertex),
    ) -> Result<()> {
        let before = self.store.vertex(id)?.clone();
        let mut after = before.clone();
        configure(&mut after);
        if after == before {
            return Ok(());
        }

        self.commit(EditCommand::ReplaceVertex { before, after })?;
        info!(vertex:? = id; "Vertex attributes changed");
        Ok(())
    }

    /// Edits a line's attributes through `configure`.
    ///
    /// Endpoints set inside `configure` are restored afterwards; endpoint
    /// moves are structural and go through
    /// [`reconnect_line`](Self::reconnect_line). A no-op edit records
    /// nothing.
    pub fn set_line_attrs(&mut self, id: LineId, configure: impl FnOnce(&mut Line)) -> Result<()> {
        let before = self.store.line(id)?.clone();
        let mut after = before.clone();
        configure(&mut after);
        after.set_endpoints(before.start(), before.end());
        if after == before {
            return Ok(());
        }

        self.commit(EditCommand::ReplaceLine { before, after })?;
        info!(line:? = id; "Line attributes changed");
        Ok(())
    }

    /// Moves a line's endpoints, validating like an addition.
    ///
    /// Keeping an endpoint in place never conflicts with the line itself
    /// under the parallel-line policy. A no-op reconnect records nothing.
    pub fn reconnect_line(
        &mut self,
        id: LineId,
        new_start: VertexId,
        new_end: VertexId,
    ) -> Result<()> {
        integrity::validate_reconnect(&self.store, &self.policy, id, new_start, new_end)?;

        let before = self.store.line(id)?.clone();
        if before.start() == new_start && before.end() == new_end {
            return Ok(());
        }
        let mut after = before.clone();
        after.set_endpoints(new_start, new_end);

        self.commit(EditCommand::ReplaceLine { before, after })?;
        info!(line:? = id, start:? = new_start, end:? = new_end; "Line reconnected");
        Ok(())
    }

    /// Removes every element, as one undo step. Clearing an empty diagram
    /// records nothing.
    pub fn clear(&mut self) -> Result<()> {
        if self.store.vertex_count() == 0 && self.store.line_count() == 0 {
            return Ok(());
        }

        // lines first so every vertex is free when its removal applies
        let mut commands: Vec<EditCommand> = self
            .store
            .lines()
            .cloned()
            .map(EditCommand::RemoveLine)
            .collect();
        commands.extend(
            self.store
                .vertices()
                .cloned()
                .map(EditCommand::RemoveVertex),
        );

        self.commit(EditCommand::Compound(commands))?;
        info!("Diagram cleared");
        Ok(())
    }

    /// Reverts the most recent applied operation.
    ///
    /// # Errors
    ///
    /// Rejected with `NothingToUndo` on an empty history; the diagram is
    /// unchanged.
    pub fn undo(&mut self) -> Result<()> {
        let (kind, vertices, lines) = {
            let command = self.stack.undo(&mut self.store)?;
            let (vertices, lines) = command.affected();
            (command.kind(true), vertices, lines)
        };
        info!("Undo");
        self.emit(kind, vertices, lines);
        Ok(())
    }

    /// Re-applies the most recently undone operation.
    ///
    /// # Errors
    ///
    /// Rejected with `NothingToRedo` when no undone operation is ahead of
    /// the cursor; the diagram is unchanged.
    pub fn redo(&mut self) -> Result<()> {
        let (kind, vertices, lines) = {
            let command = self.stack.redo(&mut self.store)?;
            let (vertices, lines) = command.affected();
            (command.kind(false), vertices, lines)
        };
        info!("Redo");
        self.emit(kind, vertices, lines);
        Ok(())
    }

    /// Whether there is an operation to undo.
    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    /// Whether there is an undone operation to redo.
    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    // =========================================================================
    // Query API
    // =========================================================================

    /// Returns the vertex with the given id.
    pub fn vertex(&self, id: VertexId) -> Result<&Vertex> {
        self.store.vertex(id)
    }

    /// Returns the line with the given id.
    pub fn line(&self, id: LineId) -> Result<&Line> {
        self.store.line(id)
    }

    /// Iterates over all vertices in ascending id order (creation order).
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.store.vertices()
    }

    /// Iterates over all lines in ascending id order (creation order).
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.store.lines()
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.store.vertex_count()
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.store.line_count()
    }

    /// Returns the ids of lines incident to `vertex`, in ascending id order.
    pub fn incident_lines(&self, vertex: VertexId) -> Result<Vec<LineId>> {
        self.store.vertex(vertex)?;
        Ok(self.store.incident_lines(vertex).collect())
    }

    /// Previews what [`delete_vertex`](Self::delete_vertex) would remove,
    /// without changing anything. Confirmation dialogs list the doomed lines
    /// from this.
    pub fn delete_plan(&self, vertex: VertexId) -> Result<integrity::CascadePlan> {
        integrity::plan_delete_vertex(&self.store, vertex)
    }

    /// Captures an immutable point-in-time view of all elements.
    ///
    /// The snapshot holds copies: later edits do not show through, and
    /// mutating the snapshot does not touch the diagram.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.store.vertices().cloned().collect(),
            self.store.lines().cloned().collect(),
        )
    }

    /// Reconstructs a diagram from a snapshot, without command history.
    ///
    /// The snapshot is validated under `policy` exactly like live edits:
    /// dangling endpoints, policy violations, and duplicate ids all fail the
    /// import. Identifier counters resume past the highest imported ids, so
    /// ids are never reused across a save/load cycle.
    pub fn from_snapshot(snapshot: &Snapshot, policy: DiagramPolicy) -> Result<Self> {
        let mut diagram = Self::with_policy(policy);
        for vertex in snapshot.vertices() {
            diagram.store.insert_vertex(vertex.clone())?;
            diagram.registry.bump_past_vertex(vertex.id());
        }
        for line in snapshot.lines() {
            integrity::validate_add_line(
                &diagram.store,
                &diagram.policy,
                line.start(),
                line.end(),
            )
            .inspect_err(|err| warn!(line:? = line.id(); "Snapshot rejected: {err}"))?;
            diagram.store.insert_line(line.clone())?;
            diagram.registry.bump_past_line(line.id());
        }
        info!(
            vertices = diagram.store.vertex_count(),
            lines = diagram.store.line_count();
            "Diagram imported from snapshot"
        );
        Ok(diagram)
    }

    // =========================================================================
    // Change notification
    // =========================================================================

    /// Registers an observer called synchronously after each successful
    /// mutating operation, including undo and redo.
    ///
    /// Observers receive the event and nothing else; they cannot reach back
    /// into the diagram from inside the callback. Follow-up intents an
    /// observer wants to trigger must be queued by the caller and dispatched
    /// after the current operation has returned.
    pub fn observe(&mut self, observer: impl FnMut(&ChangeEvent) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Detaches an observer. Returns `false` if the id was already detached.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Validated-command path shared by every mutating intent: execute on
    /// the stack, then notify.
    fn commit(&mut self, command: EditCommand) -> Result<()> {
        let kind = command.kind(false);
        let (vertices, lines) = command.affected();
        self.stack.execute(&mut self.store, command)?;
        self.emit(kind, vertices, lines);
        Ok(())
    }

    fn emit(&mut self, kind: ChangeKind, vertices: Vec<VertexId>, lines: Vec<LineId>) {
        let event = ChangeEvent {
            operation: OperationId(self.next_operation),
            kind,
            vertices,
            lines,
        };
        self.next_operation += 1;
        trace!(event:? = event; "Notifying observers");
        for (_, observer) in &mut self.observers {
            observer(&event);
        }
    }
}
