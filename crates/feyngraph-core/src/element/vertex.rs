//! Vertex records and their styling.

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    geometry::{Point, Vec2},
    identifier::VertexId,
};

/// Marker and label styling for an ordinary (point-like) vertex.
///
/// Field meanings follow the usual plotting conventions: `size` is the marker
/// area, `z_order` the stacking position relative to lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexStyle {
    /// Marker area.
    #[serde(default = "default_marker_size")]
    pub size: f64,
    /// Marker fill color.
    #[serde(default)]
    pub color: Color,
    /// Marker edge color.
    #[serde(default)]
    pub edge_color: Color,
    /// Marker edge width.
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Stacking order relative to lines.
    #[serde(default = "default_vertex_z_order")]
    pub z_order: i32,
    /// Label font size.
    #[serde(default = "default_label_size")]
    pub label_size: f64,
    /// Label color.
    #[serde(default)]
    pub label_color: Color,
}

fn default_marker_size() -> f64 {
    100.0
}

fn default_line_width() -> f64 {
    1.0
}

fn default_alpha() -> f64 {
    1.0
}

fn default_vertex_z_order() -> i32 {
    2
}

fn default_label_size() -> f64 {
    30.0
}

impl Default for VertexStyle {
    fn default() -> Self {
        Self {
            size: default_marker_size(),
            color: Color::default(),
            edge_color: Color::default(),
            line_width: default_line_width(),
            alpha: default_alpha(),
            z_order: default_vertex_z_order(),
            label_size: default_label_size(),
            label_color: Color::default(),
        }
    }
}

/// Hatching of a structured vertex's disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HatchStyle {
    /// No hatching.
    None,
    /// A backend-native hatch pattern string such as `"/"` or `"xx"`.
    Pattern(String),
    /// Explicitly drawn hatch lines with full styling control.
    Custom(Hatch),
}

impl Default for HatchStyle {
    fn default() -> Self {
        Self::Pattern("/".to_string())
    }
}

/// Explicit hatch-line styling for [`HatchStyle::Custom`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hatch {
    /// Hatch line color.
    #[serde(default)]
    pub line_color: Color,
    /// Hatch line width.
    #[serde(default = "default_hatch_width")]
    pub line_width: f64,
    /// Hatch line angle in degrees.
    #[serde(default = "default_hatch_angle")]
    pub angle_deg: f64,
    /// Spacing between hatch lines as a ratio of the disc radius.
    #[serde(default = "default_hatch_spacing")]
    pub spacing_ratio: f64,
}

fn default_hatch_width() -> f64 {
    0.5
}

fn default_hatch_angle() -> f64 {
    45.0
}

fn default_hatch_spacing() -> f64 {
    0.1
}

impl Default for Hatch {
    fn default() -> Self {
        Self {
            line_color: Color::default(),
            line_width: default_hatch_width(),
            angle_deg: default_hatch_angle(),
            spacing_ratio: default_hatch_spacing(),
        }
    }
}

/// Extended attribute set of a structured vertex.
///
/// A structured vertex is drawn as a filled disc (an effective blob such as a
/// hadronic interaction region) instead of a point marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredStyle {
    /// Disc radius in diagram coordinates.
    #[serde(default = "default_structured_radius")]
    pub radius: f64,
    /// Disc fill color.
    #[serde(default = "default_structured_fill")]
    pub fill_color: Color,
    /// Disc border color.
    #[serde(default)]
    pub edge_color: Color,
    /// Disc border width.
    #[serde(default = "default_structured_line_width")]
    pub line_width: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Hatching of the disc interior.
    #[serde(default)]
    pub hatch: HatchStyle,
    /// Stacking order of the disc.
    #[serde(default = "default_vertex_z_order")]
    pub z_order: i32,
}

fn default_structured_radius() -> f64 {
    0.5
}

fn default_structured_fill() -> Color {
    Color::new("lightgray").expect("'lightgray' is a valid CSS color")
}

fn default_structured_line_width() -> f64 {
    1.5
}

impl Default for StructuredStyle {
    fn default() -> Self {
        Self {
            radius: default_structured_radius(),
            fill_color: default_structured_fill(),
            edge_color: Color::default(),
            line_width: default_structured_line_width(),
            alpha: default_alpha(),
            hatch: HatchStyle::default(),
            z_order: default_vertex_z_order(),
        }
    }
}

/// A vertex: an interaction point in a Feynman diagram.
///
/// The id is immutable after creation and unique for the diagram's lifetime.
/// Everything else is a presentation attribute the editor may change; those
/// changes go through the diagram facade so they land on the command stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    id: VertexId,
    position: Point,
    #[serde(default)]
    label: String,
    #[serde(default = "default_label_offset")]
    label_offset: Vec2,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    label_hidden: bool,
    #[serde(default)]
    style: VertexStyle,
    /// `Some` switches the vertex to its structured (disc) rendering.
    #[serde(default)]
    structured: Option<StructuredStyle>,
}

fn default_label_offset() -> Vec2 {
    Vec2::new(0.5, 0.0)
}

impl Vertex {
    /// Creates a vertex at `position` with default attributes.
    pub fn new(id: VertexId, position: Point) -> Self {
        Self {
            id,
            position,
            label: String::new(),
            label_offset: default_label_offset(),
            hidden: false,
            label_hidden: false,
            style: VertexStyle::default(),
            structured: None,
        }
    }

    /// Get the vertex identifier.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Get the vertex position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Borrow the vertex label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the label offset relative to the vertex position.
    pub fn label_offset(&self) -> Vec2 {
        self.label_offset
    }

    /// Whether the vertex marker is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Whether the label is hidden.
    pub fn is_label_hidden(&self) -> bool {
        self.label_hidden
    }

    /// Borrow the marker/label styling.
    pub fn style(&self) -> &VertexStyle {
        &self.style
    }

    /// Borrow the structured style, if this vertex is structured.
    pub fn structured(&self) -> Option<&StructuredStyle> {
        self.structured.as_ref()
    }

    /// Whether this vertex uses the structured (disc) rendering.
    pub fn is_structured(&self) -> bool {
        self.structured.is_some()
    }

    /// Sets the vertex position.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Sets the vertex label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Sets the label offset.
    pub fn set_label_offset(&mut self, offset: Vec2) {
        self.label_offset = offset;
    }

    /// Hides or shows the vertex marker.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Hides or shows the label.
    pub fn set_label_hidden(&mut self, hidden: bool) {
        self.label_hidden = hidden;
    }

    /// Replaces the marker/label styling.
    pub fn set_style(&mut self, style: VertexStyle) {
        self.style = style;
    }

    /// Mutably borrow the marker/label styling.
    pub fn style_mut(&mut self) -> &mut VertexStyle {
        &mut self.style
    }

    /// Enables or disables the structured rendering.
    pub fn set_structured(&mut self, structured: Option<StructuredStyle>) {
        self.structured = structured;
    }

    /// Immutable-style variant of [`set_label`](Self::set_label).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }

    /// Immutable-style variant of [`set_structured`](Self::set_structured).
    pub fn with_structured(mut self, structured: StructuredStyle) -> Self {
        self.structured = Some(structured);
        self
    }
}
