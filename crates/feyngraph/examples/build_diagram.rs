//! Example: Building and editing a diagram programmatically
//!
//! This example drives the diagram facade the way a presentation layer
//! would: electron-positron annihilation into a muon pair, an attribute
//! edit, a cascade delete, and an undo, with a change-event listener
//! printing what happens.

use feyngraph::{Diagram, config::DiagramPolicy, element::LineKind, geometry::Point};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log::LevelFilter::Debug)
        .init();

    let mut diagram = Diagram::with_policy(DiagramPolicy::default());

    // print every change notification
    diagram.observe(|event| {
        println!(
            "event #{}: {:?} vertices={:?} lines={:?}",
            event.operation.raw(),
            event.kind,
            event.vertices,
            event.lines
        );
    });

    // e- e+ -> photon -> mu- mu+
    let e_in = diagram.add_vertex_with(Point::new(-2.0, 1.0), |v| v.set_label("e^-"))?;
    let p_in = diagram.add_vertex_with(Point::new(-2.0, -1.0), |v| v.set_label("e^+"))?;
    let left = diagram.add_vertex(Point::new(-1.0, 0.0))?;
    let right = diagram.add_vertex(Point::new(1.0, 0.0))?;
    let mu_out = diagram.add_vertex_with(Point::new(2.0, 1.0), |v| v.set_label("mu^-"))?;
    let nu_out = diagram.add_vertex_with(Point::new(2.0, -1.0), |v| v.set_label("mu^+"))?;

    diagram.add_line(e_in, left, LineKind::fermion())?;
    diagram.add_line(left, p_in, LineKind::antifermion())?;
    let propagator = diagram.add_line_with(left, right, LineKind::photon(), |l| {
        l.set_label("gamma");
    })?;
    diagram.add_line(right, mu_out, LineKind::fermion())?;
    diagram.add_line(nu_out, right, LineKind::fermion())?;

    // restyle the propagator
    diagram.set_line_attrs(propagator, |l| {
        l.style_mut().width = 1.5;
    })?;

    // deleting the left interaction vertex cascades over three lines...
    println!(
        "deleting {left} takes {} lines with it",
        diagram.delete_plan(left)?.lines().len()
    );
    diagram.delete_vertex(left)?;

    // ...and one undo brings all four elements back
    diagram.undo()?;

    println!(
        "final diagram: {} vertices, {} lines",
        diagram.vertex_count(),
        diagram.line_count()
    );
    println!("{}", serde_json::to_string_pretty(&diagram.snapshot())?);

    Ok(())
}
