//! Reversible edit commands and the linear undo/redo history.
//!
//! Every mutation of the element store is expressed as an [`EditCommand`]
//! capturing enough state to reverse itself exactly: removals carry the
//! removed record, attribute changes carry both the before and the after
//! record. A multi-element change (cascade delete, clear) is one
//! [`EditCommand::Compound`] entry, so it undoes as a single user-visible
//! step.
//!
//! [`CommandStack`] owns the linear history with a cursor. Executing a new
//! command discards any undone tail, which is the standard linear-history
//! policy.

use feyngraph_core::{
    element::{Line, Vertex},
    identifier::{LineId, VertexId},
};

use crate::{
    diagram::ChangeKind,
    error::{GraphError, Rejection, Result},
    store::ElementStore,
};

/// One reversible unit of change against the element store.
///
/// `apply` and `revert` must be called strictly alternately from the state
/// the command was built against; the command stack guarantees this.
#[derive(Debug, Clone)]
pub(crate) enum EditCommand {
    /// Insert a new vertex.
    AddVertex(Vertex),
    /// Remove a vertex; the record is kept for revert.
    RemoveVertex(Vertex),
    /// Insert a new line.
    AddLine(Line),
    /// Remove a line; the record is kept for revert.
    RemoveLine(Line),
    /// Replace a vertex record (attribute edit).
    ReplaceVertex { before: Vertex, after: Vertex },
    /// Replace a line record (attribute edit or reconnect).
    ReplaceLine { before: Line, after: Line },
    /// Several elementary commands applied and reverted as one unit.
    Compound(Vec<EditCommand>),
}

impl EditCommand {
    /// Applies this command to the store.
    ///
    /// A compound that fails partway is rolled back before the error is
    /// returned, so the store never keeps a partial cascade.
    pub(crate) fn apply(&self, store: &mut ElementStore) -> Result<()> {
        match self {
            Self::AddVertex(vertex) => store.insert_vertex(vertex.clone()),
            Self::RemoveVertex(vertex) => store.remove_vertex(vertex.id()).map(drop),
            Self::AddLine(line) => store.insert_line(line.clone()),
            Self::RemoveLine(line) => store.remove_line(line.id()).map(drop),
            Self::ReplaceVertex { after, .. } => store.replace_vertex(after.clone()).map(drop),
            Self::ReplaceLine { after, .. } => store.replace_line(after.clone()).map(drop),
            Self::Compound(commands) => {
                for (applied, command) in commands.iter().enumerate() {
                    if let Err(err) = command.apply(store) {
                        roll_back(&commands[..applied], store, &err)?;
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }

    /// Reverts this command, restoring the store state from before `apply`.
    pub(crate) fn revert(&self, store: &mut ElementStore) -> Result<()> {
        match self {
            Self::AddVertex(vertex) => store.remove_vertex(vertex.id()).map(drop),
            Self::RemoveVertex(vertex) => store.insert_vertex(vertex.clone()),
            Self::AddLine(line) => store.remove_line(line.id()).map(drop),
            Self::RemoveLine(line) => store.insert_line(line.clone()),
            Self::ReplaceVertex { before, .. } => store.replace_vertex(before.clone()).map(drop),
            Self::ReplaceLine { before, .. } => store.replace_line(before.clone()).map(drop),
            Self::Compound(commands) => {
                for (reverted, command) in commands.iter().rev().enumerate() {
                    if let Err(err) = command.revert(store) {
                        let already = commands.len() - reverted..commands.len();
                        reapply(&commands[already], store, &err)?;
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }

    /// The notification kind this command corresponds to. `inverted` gives
    /// the kind of the inverse operation (an undone addition is a removal).
    pub(crate) fn kind(&self, inverted: bool) -> ChangeKind {
        match self {
            Self::AddVertex(_) | Self::AddLine(_) => {
                if inverted {
                    ChangeKind::Removed
                } else {
                    ChangeKind::Added
                }
            }
            Self::RemoveVertex(_) | Self::RemoveLine(_) => {
                if inverted {
                    ChangeKind::Added
                } else {
                    ChangeKind::Removed
                }
            }
            Self::ReplaceVertex { .. } | Self::ReplaceLine { .. } => ChangeKind::Modified,
            Self::Compound(commands) => {
                let mut kinds = commands.iter().map(|command| command.kind(inverted));
                let Some(first) = kinds.next() else {
                    return ChangeKind::Modified;
                };
                if kinds.all(|kind| kind == first) {
                    first
                } else {
                    ChangeKind::Modified
                }
            }
        }
    }

    /// Collects the element ids this command touches.
    pub(crate) fn affected(&self) -> (Vec<VertexId>, Vec<LineId>) {
        let mut vertices = Vec::new();
        let mut lines = Vec::new();
        self.collect_affected(&mut vertices, &mut lines);
        (vertices, lines)
    }

    fn collect_affected(&self, vertices: &mut Vec<VertexId>, lines: &mut Vec<LineId>) {
        match self {
            Self::AddVertex(vertex) | Self::RemoveVertex(vertex) => vertices.push(vertex.id()),
            Self::ReplaceVertex { before, .. } => vertices.push(before.id()),
            Self::AddLine(line) | Self::RemoveLine(line) => lines.push(line.id()),
            Self::ReplaceLine { before, .. } => lines.push(before.id()),
            Self::Compound(commands) => {
                for command in commands {
                    command.collect_affected(vertices, lines);
                }
            }
        }
    }
}

fn roll_back(applied: &[EditCommand], store: &mut ElementStore, cause: &GraphError) -> Result<()> {
    for command in applied.iter().rev() {
        if command.revert(store).is_err() {
            return Err(GraphError::Invariant(format!(
                "compound rollback failed after `{cause}`; store state is unreliable"
            )));
        }
    }
    Ok(())
}

fn reapply(
    reverted: &[EditCommand],
    store: &mut ElementStore,
    cause: &GraphError,
) -> Result<()> {
    for command in reverted {
        if command.apply(store).is_err() {
            return Err(GraphError::Invariant(format!(
                "compound revert rollback failed after `{cause}`; store state is unreliable"
            )));
        }
    }
    Ok(())
}

/// The linear undo/redo history.
///
/// The cursor points just past the last applied command; `execute` truncates
/// anything beyond the cursor before appending. Both `undo` and `redo` leave
/// the stack untouched when they reject at a history bound.
#[derive(Debug, Default)]
pub(crate) struct CommandStack {
    history: Vec<EditCommand>,
    cursor: usize,
}

impl CommandStack {
    /// Creates an empty history.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Applies `command` and records it at the cursor.
    ///
    /// If `apply` fails, neither the store (see [`EditCommand::apply`]) nor
    /// the history changes.
    pub(crate) fn execute(&mut self, store: &mut ElementStore, command: EditCommand) -> Result<()> {
        command.apply(store)?;
        self.history.truncate(self.cursor);
        self.history.push(command);
        self.cursor = self.history.len();
        Ok(())
    }

    /// Reverts the command before the cursor and steps back.
    ///
    /// Returns the undone command so the caller can derive its notification.
    pub(crate) fn undo(&mut self, store: &mut ElementStore) -> Result<&EditCommand> {
        if self.cursor == 0 {
            return Err(Rejection::NothingToUndo.into());
        }
        let index = self.cursor - 1;
        self.history[index].revert(store)?;
        self.cursor = index;
        Ok(&self.history[index])
    }

    /// Re-applies the command at the cursor and steps forward.
    pub(crate) fn redo(&mut self, store: &mut ElementStore) -> Result<&EditCommand> {
        if self.cursor == self.history.len() {
            return Err(Rejection::NothingToRedo.into());
        }
        self.history[self.cursor].apply(store)?;
        self.cursor += 1;
        Ok(&self.history[self.cursor - 1])
    }

    /// Whether there is a command to undo.
    pub(crate) fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether there is an undone command to redo.
    pub(crate) fn can_redo(&self) -> bool {
        self.cursor < self.history.len()
    }
}
