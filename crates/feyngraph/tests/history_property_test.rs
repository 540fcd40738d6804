//! Property tests for the undo/redo history.
//!
//! Random intent sequences are driven through the facade; whatever subset of
//! them actually lands in the history must undo back to the starting state
//! exactly, and redo forward to the final state exactly.

use proptest::prelude::*;

use feyngraph::{Diagram, Snapshot, element::LineKind, geometry::Point, identifier::VertexId};

/// One randomly generated editing intent.
///
/// Element references are picks into whatever currently exists, so sequences
/// stay mostly valid while still exercising rejections (self-loops, empty
/// diagrams).
#[derive(Debug, Clone)]
enum Intent {
    AddVertex { x: f64, y: f64 },
    AddLine { start: usize, end: usize, kind: usize },
    DeleteVertex { pick: usize },
    DeleteLine { pick: usize },
    RelabelVertex { pick: usize, label: String },
    Clear,
}

fn kinds() -> [LineKind; 6] {
    [
        LineKind::fermion(),
        LineKind::antifermion(),
        LineKind::photon(),
        LineKind::gluon(),
        LineKind::w_boson(),
        LineKind::z_boson(),
    ]
}

fn intent_strategy() -> impl Strategy<Value = Intent> {
    prop_oneof![
        4 => (-10.0..10.0f64, -10.0..10.0f64)
            .prop_map(|(x, y)| Intent::AddVertex { x, y }),
        4 => (any::<usize>(), any::<usize>(), 0..6usize)
            .prop_map(|(start, end, kind)| Intent::AddLine { start, end, kind }),
        2 => any::<usize>().prop_map(|pick| Intent::DeleteVertex { pick }),
        2 => any::<usize>().prop_map(|pick| Intent::DeleteLine { pick }),
        2 => (any::<usize>(), "[a-z]{0,4}")
            .prop_map(|(pick, label)| Intent::RelabelVertex { pick, label }),
        1 => Just(Intent::Clear),
    ]
}

fn nth_vertex(diagram: &Diagram, pick: usize) -> Option<VertexId> {
    let count = diagram.vertex_count();
    if count == 0 {
        return None;
    }
    diagram.vertices().nth(pick % count).map(|v| v.id())
}

/// Applies one intent, ignoring rejections. Returns whether the diagram
/// actually changed, which is exactly when a history entry was recorded.
fn apply(diagram: &mut Diagram, intent: &Intent) -> bool {
    let before = diagram.snapshot();
    match intent {
        Intent::AddVertex { x, y } => {
            let _ = diagram.add_vertex(Point::new(*x, *y));
        }
        Intent::AddLine { start, end, kind } => {
            if let (Some(start), Some(end)) =
                (nth_vertex(diagram, *start), nth_vertex(diagram, *end))
            {
                let _ = diagram.add_line(start, end, kinds()[*kind].clone());
            }
        }
        Intent::DeleteVertex { pick } => {
            if let Some(id) = nth_vertex(diagram, *pick) {
                let _ = diagram.delete_vertex(id);
            }
        }
        Intent::DeleteLine { pick } => {
            let count = diagram.line_count();
            if count != 0 {
                let id = diagram.lines().nth(pick % count).map(|l| l.id()).unwrap();
                let _ = diagram.delete_line(id);
            }
        }
        Intent::RelabelVertex { pick, label } => {
            if let Some(id) = nth_vertex(diagram, *pick) {
                let _ = diagram.set_vertex_attrs(id, |v| v.set_label(label.clone()));
            }
        }
        Intent::Clear => {
            let _ = diagram.clear();
        }
    }
    diagram.snapshot() != before
}

fn run_session(intents: &[Intent]) -> (Diagram, Snapshot, usize) {
    let mut diagram = Diagram::new();
    let initial = diagram.snapshot();
    let applied = intents
        .iter()
        .filter(|intent| apply(&mut diagram, intent))
        .count();
    (diagram, initial, applied)
}

fn check_undo_all_restores_initial(intents: &[Intent]) -> Result<(), TestCaseError> {
    let (mut diagram, initial, applied) = run_session(intents);

    for _ in 0..applied {
        prop_assert!(diagram.undo().is_ok());
    }
    prop_assert_eq!(diagram.snapshot(), initial);
    // the history is exhausted: exactly `applied` entries existed
    prop_assert!(diagram.undo().is_err());
    Ok(())
}

fn check_undo_redo_round_trip(intents: &[Intent]) -> Result<(), TestCaseError> {
    let (mut diagram, _, applied) = run_session(intents);
    let finished = diagram.snapshot();

    for _ in 0..applied {
        prop_assert!(diagram.undo().is_ok());
    }
    for _ in 0..applied {
        prop_assert!(diagram.redo().is_ok());
    }
    prop_assert_eq!(diagram.snapshot(), finished);
    Ok(())
}

fn check_vertex_ids_unique(intents: &[Intent]) -> Result<(), TestCaseError> {
    let mut diagram = Diagram::new();
    let mut issued = Vec::new();
    for intent in intents {
        if let Intent::AddVertex { x, y } = intent {
            issued.push(diagram.add_vertex(Point::new(*x, *y)).unwrap());
        } else {
            apply(&mut diagram, intent);
        }
    }

    let mut deduped = issued.clone();
    deduped.sort();
    deduped.dedup();
    prop_assert_eq!(deduped.len(), issued.len());
    Ok(())
}

proptest! {
    #[test]
    fn undo_all_restores_initial(intents in prop::collection::vec(intent_strategy(), 0..24)) {
        check_undo_all_restores_initial(&intents)?;
    }

    #[test]
    fn undo_redo_round_trip(intents in prop::collection::vec(intent_strategy(), 0..24)) {
        check_undo_redo_round_trip(&intents)?;
    }

    #[test]
    fn vertex_ids_unique(intents in prop::collection::vec(intent_strategy(), 0..24)) {
        check_vertex_ids_unique(&intents)?;
    }
}
