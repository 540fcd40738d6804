//! Feyngraph Core Types and Definitions
//!
//! This crate provides the foundational types for feyngraph diagrams. It
//! includes:
//!
//! - **Identifiers**: Typed, never-reused element identifiers
//!   ([`identifier::VertexId`], [`identifier::LineId`], [`identifier::IdRegistry`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Strokes**: Dash pattern definitions ([`stroke`] module)
//! - **Elements**: Vertex and particle-line records ([`element`] module)

pub mod color;
pub mod element;
pub mod geometry;
pub mod identifier;
pub mod stroke;
