//! Integration tests for the Diagram facade API
//!
//! These tests drive the public API the way a presentation layer would:
//! intents in, snapshots and change events out.

use std::{cell::RefCell, rc::Rc};

use feyngraph::{
    ChangeKind, Diagram, GraphError, Rejection, Snapshot, config::DiagramPolicy,
    element::{FermionAttrs, LineKind},
    geometry::Point,
    identifier::VertexId,
};

#[test]
fn test_undo_is_exact_inverse_over_a_session() {
    let mut diagram = Diagram::new();
    let initial = diagram.snapshot();

    // a small editing session: three mutating intents
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = diagram.add_vertex(Point::new(1.0, 1.0)).unwrap();
    diagram.add_line(a, b, LineKind::photon()).unwrap();

    for _ in 0..3 {
        diagram.undo().unwrap();
    }
    assert_eq!(diagram.snapshot(), initial);
}

#[test]
fn test_execute_undo_redo_round_trip() {
    let mut diagram = Diagram::new();
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = diagram.add_vertex(Point::new(2.0, 0.0)).unwrap();
    diagram.add_line(a, b, LineKind::gluon()).unwrap();
    let executed = diagram.snapshot();

    diagram.undo().unwrap();
    assert_ne!(diagram.snapshot(), executed);

    diagram.redo().unwrap();
    assert_eq!(diagram.snapshot(), executed);
}

#[test]
fn test_cascade_delete_and_single_step_undo() {
    let mut diagram = Diagram::new();
    let hub = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let spokes: Vec<VertexId> = (0..3)
        .map(|i| diagram.add_vertex(Point::new(1.0, i as f64)).unwrap())
        .collect();
    for &spoke in &spokes {
        diagram.add_line(hub, spoke, LineKind::fermion()).unwrap();
    }
    let before_delete = diagram.snapshot();

    // the plan names exactly the three incident lines
    let plan = diagram.delete_plan(hub).unwrap();
    assert_eq!(plan.lines().len(), 3);

    diagram.delete_vertex(hub).unwrap();
    assert_eq!(diagram.vertex_count(), 3);
    assert_eq!(diagram.line_count(), 0);

    // one undo brings back all four elements with ids and attributes intact
    diagram.undo().unwrap();
    assert_eq!(diagram.snapshot(), before_delete);
}

#[test]
fn test_rejected_add_line_is_a_complete_noop() {
    let mut diagram = Diagram::new();
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let before = diagram.snapshot();
    let could_undo = diagram.can_undo();

    let err = diagram
        .add_line(a, VertexId::new(404), LineKind::fermion())
        .unwrap_err();
    assert_eq!(
        err,
        GraphError::Rejected(Rejection::DanglingEndpoint(VertexId::new(404)))
    );

    assert_eq!(diagram.snapshot(), before);
    assert_eq!(diagram.can_undo(), could_undo);
    assert!(!diagram.can_redo());
}

#[test]
fn test_identifiers_survive_deletion_without_reuse() {
    let mut diagram = Diagram::new();
    let v1 = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    diagram.delete_vertex(v1).unwrap();

    let v2 = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    assert_ne!(v2, v1);
}

#[test]
fn test_history_bounds_leave_snapshot_unchanged() {
    let mut diagram = Diagram::new();
    diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let snapshot = diagram.snapshot();

    assert_eq!(
        diagram.redo().unwrap_err(),
        GraphError::Rejected(Rejection::NothingToRedo)
    );
    diagram.undo().unwrap();
    diagram.redo().unwrap();
    diagram.undo().unwrap();
    diagram.undo().unwrap_err();
    diagram.redo().unwrap();

    assert_eq!(diagram.snapshot(), snapshot);
}

#[test]
fn test_fermion_cascade_scenario() {
    // Create vertices A(0,0), B(1,1); add fermion A->B with the arrow shown;
    // delete A; undo; redo.
    let mut diagram = Diagram::new();
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = diagram.add_vertex(Point::new(1.0, 1.0)).unwrap();
    let line = diagram
        .add_line_with(a, b, LineKind::Fermion(FermionAttrs::default()), |l| {
            l.set_label("e^-");
        })
        .unwrap();

    diagram.delete_vertex(a).unwrap();
    let vertices: Vec<VertexId> = diagram.vertices().map(|v| v.id()).collect();
    assert_eq!(vertices, vec![b]);
    assert!(diagram.line(line).is_err());
    let post_delete = diagram.snapshot();

    diagram.undo().unwrap();
    let restored = diagram.line(line).unwrap();
    assert_eq!(restored.label(), "e^-");
    let LineKind::Fermion(attrs) = restored.kind() else {
        panic!("restored line is not a fermion");
    };
    assert!(attrs.show_arrow);

    diagram.redo().unwrap();
    assert_eq!(diagram.snapshot(), post_delete);
}

#[test]
fn test_self_loop_rejected_under_default_policy() {
    let mut diagram = Diagram::new();
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let before = diagram.snapshot();

    let err = diagram.add_line(a, a, LineKind::fermion()).unwrap_err();
    assert_eq!(
        err,
        GraphError::Rejected(Rejection::SelfLoopDisallowed(a))
    );
    assert_eq!(diagram.snapshot(), before);
}

#[test]
fn test_self_loop_allowed_by_policy() {
    let policy = DiagramPolicy::new(true, true);
    let mut diagram = Diagram::with_policy(policy);
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();

    let line = diagram.add_line(a, a, LineKind::photon()).unwrap();
    assert_eq!(diagram.incident_lines(a).unwrap(), vec![line]);

    // a cascade over a self-loop removes vertex and loop in one step
    diagram.delete_vertex(a).unwrap();
    assert_eq!(diagram.vertex_count(), 0);
    assert_eq!(diagram.line_count(), 0);
    diagram.undo().unwrap();
    assert_eq!(diagram.vertex_count(), 1);
    assert_eq!(diagram.line_count(), 1);
}

#[test]
fn test_cascade_event_reports_all_removed_elements() {
    let mut diagram = Diagram::new();
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = diagram.add_vertex(Point::new(1.0, 0.0)).unwrap();
    let l1 = diagram.add_line(a, b, LineKind::fermion()).unwrap();
    let l2 = diagram.add_line(a, b, LineKind::photon()).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    diagram.observe(move |event| sink.borrow_mut().push(event.clone()));

    diagram.delete_vertex(a).unwrap();

    let events = seen.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, ChangeKind::Removed);
    assert_eq!(events[0].vertices, vec![a]);
    assert_eq!(events[0].lines, vec![l1, l2]);
}

#[test]
fn test_snapshot_round_trip_all_line_kinds() {
    let mut diagram = Diagram::new();
    let left = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let right = diagram
        .add_vertex_with(Point::new(4.0, 0.0), |v| v.set_label("blob"))
        .unwrap();

    for kind in [
        LineKind::fermion(),
        LineKind::antifermion(),
        LineKind::photon(),
        LineKind::gluon(),
        LineKind::w_boson(),
        LineKind::z_boson(),
    ] {
        diagram.add_line(left, right, kind).unwrap();
    }

    let snapshot = diagram.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).unwrap();
    let decoded: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);

    let restored = Diagram::from_snapshot(&decoded, DiagramPolicy::default()).unwrap();
    assert_eq!(restored.snapshot(), snapshot);
}

#[test]
fn test_import_resumes_id_sequence() {
    let mut diagram = Diagram::new();
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = diagram.add_vertex(Point::new(1.0, 0.0)).unwrap();
    diagram.add_line(a, b, LineKind::fermion()).unwrap();

    let mut restored =
        Diagram::from_snapshot(&diagram.snapshot(), DiagramPolicy::default()).unwrap();
    let fresh = restored.add_vertex(Point::new(2.0, 0.0)).unwrap();

    assert_ne!(fresh, a);
    assert_ne!(fresh, b);
}

#[test]
fn test_import_rejects_dangling_endpoint() {
    let mut diagram = Diagram::new();
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = diagram.add_vertex(Point::new(1.0, 0.0)).unwrap();
    diagram.add_line(a, b, LineKind::fermion()).unwrap();

    // corrupt the snapshot: drop vertex b but keep the line
    let full = diagram.snapshot();
    let broken = Snapshot::new(full.vertices()[..1].to_vec(), full.lines().to_vec());

    let err = Diagram::from_snapshot(&broken, DiagramPolicy::default()).unwrap_err();
    assert_eq!(err, GraphError::Rejected(Rejection::DanglingEndpoint(b)));
}

#[test]
fn test_import_validates_against_policy() {
    let permissive = DiagramPolicy::new(true, true);
    let mut diagram = Diagram::with_policy(permissive);
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    diagram.add_line(a, a, LineKind::photon()).unwrap();
    let snapshot = diagram.snapshot();

    // the same data fails under the default (no self-loop) policy
    let err = Diagram::from_snapshot(&snapshot, DiagramPolicy::default()).unwrap_err();
    assert_eq!(err, GraphError::Rejected(Rejection::SelfLoopDisallowed(a)));

    // and loads fine under the policy it was created with
    assert!(Diagram::from_snapshot(&snapshot, permissive).is_ok());
}

#[test]
fn test_new_edit_discards_redo_history() {
    let mut diagram = Diagram::new();
    let a = diagram.add_vertex(Point::new(0.0, 0.0)).unwrap();
    let b = diagram.add_vertex(Point::new(1.0, 0.0)).unwrap();
    diagram.add_line(a, b, LineKind::w_boson()).unwrap();

    diagram.undo().unwrap();
    assert!(diagram.can_redo());

    diagram.add_line(b, a, LineKind::z_boson()).unwrap();
    assert!(!diagram.can_redo());
    assert_eq!(
        diagram.redo().unwrap_err(),
        GraphError::Rejected(Rejection::NothingToRedo)
    );
}
