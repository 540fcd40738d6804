//! feyngraph - The diagram graph model behind a Feynman diagram editor.
//!
//! This crate owns what must stay correct no matter what the UI does: vertex
//! and line identity, referential integrity (no line ever references a
//! missing vertex), cascade effects of vertex deletion, and atomic, undoable
//! mutation through a command stack. Rendering, dialogs, and persistence
//! formats are external collaborators that drive the [`Diagram`] facade and
//! listen to its change events.

pub mod config;

mod command;
mod diagram;
mod error;
mod integrity;
mod snapshot;
mod store;

pub use feyngraph_core::{color, element, geometry, identifier, stroke};

pub use diagram::{ChangeEvent, ChangeKind, Diagram, ObserverId, OperationId};
pub use error::{GraphError, Rejection, Result};
pub use integrity::CascadePlan;
pub use snapshot::Snapshot;
