//! Particle-line records: the [`Line`] type and its per-kind payloads.
//!
//! Every line belongs to one of a closed set of particle kinds. Instead of a
//! dynamic attribute bag keyed by type, the kind-specific attributes form a
//! tagged union ([`LineKind`]), so rendering and editing code switching on
//! the kind is checked for exhaustiveness at compile time.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    geometry::Vec2,
    identifier::{LineId, VertexId},
    stroke::StrokePattern,
};

/// Conventional photon phase: wave starts/ends at a zero crossing.
pub const PHASE_ZERO: f64 = 0.0;

/// Conventional photon phase: wave starts/ends half a period in.
pub const PHASE_HALF_TURN: f64 = 180.0;

/// Arrow attributes of fermion and antifermion lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FermionAttrs {
    /// Whether the direction arrow is drawn at all.
    #[serde(default = "default_true")]
    pub show_arrow: bool,
    /// Filled vs outline arrow head.
    #[serde(default)]
    pub arrow_filled: bool,
    /// Arrow pointing against the start→end direction.
    #[serde(default)]
    pub arrow_reversed: bool,
    /// Arrow position along the line in `[0, 1]`.
    #[serde(default = "default_arrow_position")]
    pub arrow_position: f64,
    /// Arrow head size.
    #[serde(default = "default_arrow_size")]
    pub arrow_size: f64,
    /// Arrow outline width; `None` inherits the line width.
    #[serde(default)]
    pub arrow_line_width: Option<f64>,
}

fn default_true() -> bool {
    true
}

fn default_arrow_position() -> f64 {
    0.5
}

fn default_arrow_size() -> f64 {
    10.0
}

impl Default for FermionAttrs {
    fn default() -> Self {
        Self {
            show_arrow: true,
            arrow_filled: false,
            arrow_reversed: false,
            arrow_position: default_arrow_position(),
            arrow_size: default_arrow_size(),
            arrow_line_width: None,
        }
    }
}

impl FermionAttrs {
    /// Defaults for an antifermion: the arrow points against the line
    /// direction.
    pub fn reversed() -> Self {
        Self {
            arrow_reversed: true,
            ..Self::default()
        }
    }
}

/// Waveform attributes of photon lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotonAttrs {
    /// Wave amplitude in diagram coordinates.
    #[serde(default = "default_photon_amplitude")]
    pub amplitude: f64,
    /// Wavelength in diagram coordinates.
    #[serde(default = "default_photon_wavelength")]
    pub wavelength: f64,
    /// Phase at the start vertex, in degrees. Conventionally
    /// [`PHASE_ZERO`] or [`PHASE_HALF_TURN`], but any value is accepted.
    #[serde(default)]
    pub initial_phase_deg: f64,
    /// Phase at the end vertex, in degrees.
    #[serde(default)]
    pub final_phase_deg: f64,
}

fn default_photon_amplitude() -> f64 {
    0.1
}

fn default_photon_wavelength() -> f64 {
    0.5
}

impl Default for PhotonAttrs {
    fn default() -> Self {
        Self {
            amplitude: default_photon_amplitude(),
            wavelength: default_photon_wavelength(),
            initial_phase_deg: PHASE_ZERO,
            final_phase_deg: PHASE_ZERO,
        }
    }
}

/// Coil attributes of gluon lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GluonAttrs {
    /// Coil amplitude in diagram coordinates.
    #[serde(default = "default_photon_amplitude")]
    pub amplitude: f64,
    /// Coil wavelength in diagram coordinates.
    #[serde(default = "default_gluon_wavelength")]
    pub wavelength: f64,
    /// Number of coil cycles along the line.
    #[serde(default = "default_gluon_cycles")]
    pub n_cycles: u32,
    /// Curvature of the coil's carrier path.
    #[serde(default = "default_bezier_offset")]
    pub bezier_offset: f64,
}

fn default_gluon_wavelength() -> f64 {
    0.2
}

fn default_gluon_cycles() -> u32 {
    16
}

fn default_bezier_offset() -> f64 {
    0.3
}

impl Default for GluonAttrs {
    fn default() -> Self {
        Self {
            amplitude: default_photon_amplitude(),
            wavelength: default_gluon_wavelength(),
            n_cycles: default_gluon_cycles(),
            bezier_offset: default_bezier_offset(),
        }
    }
}

/// Zigzag attributes of W and Z boson lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZigzagAttrs {
    /// Zigzag amplitude in diagram coordinates.
    #[serde(default = "default_zigzag_amplitude")]
    pub amplitude: f64,
    /// Zigzag oscillations per unit length.
    #[serde(default = "default_zigzag_frequency")]
    pub frequency: f64,
}

fn default_zigzag_amplitude() -> f64 {
    0.2
}

fn default_zigzag_frequency() -> f64 {
    2.0
}

impl Default for ZigzagAttrs {
    fn default() -> Self {
        Self {
            amplitude: default_zigzag_amplitude(),
            frequency: default_zigzag_frequency(),
        }
    }
}

/// The particle kind of a line together with its kind-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineKind {
    /// Fermion propagator: straight line, arrow along the direction.
    Fermion(FermionAttrs),
    /// Antifermion propagator: straight line, arrow against the direction.
    Antifermion(FermionAttrs),
    /// Photon propagator: sine wave.
    Photon(PhotonAttrs),
    /// Gluon propagator: coil.
    Gluon(GluonAttrs),
    /// W boson propagator: zigzag.
    WBoson(ZigzagAttrs),
    /// Z boson propagator: zigzag.
    ZBoson(ZigzagAttrs),
}

impl LineKind {
    /// Fermion kind with default arrow attributes.
    pub fn fermion() -> Self {
        Self::Fermion(FermionAttrs::default())
    }

    /// Antifermion kind; the arrow defaults to reversed.
    pub fn antifermion() -> Self {
        Self::Antifermion(FermionAttrs::reversed())
    }

    /// Photon kind with default waveform attributes.
    pub fn photon() -> Self {
        Self::Photon(PhotonAttrs::default())
    }

    /// Gluon kind with default coil attributes.
    pub fn gluon() -> Self {
        Self::Gluon(GluonAttrs::default())
    }

    /// W boson kind with default zigzag attributes.
    pub fn w_boson() -> Self {
        Self::WBoson(ZigzagAttrs::default())
    }

    /// Z boson kind with default zigzag attributes.
    pub fn z_boson() -> Self {
        Self::ZBoson(ZigzagAttrs::default())
    }

    /// Short lowercase name of the kind, e.g. for list widgets and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fermion(_) => "fermion",
            Self::Antifermion(_) => "antifermion",
            Self::Photon(_) => "photon",
            Self::Gluon(_) => "gluon",
            Self::WBoson(_) => "w_boson",
            Self::ZBoson(_) => "z_boson",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Horizontal alignment of a line label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    /// Left-aligned
    Left,
    /// Centered (default)
    #[default]
    Center,
    /// Right-aligned
    Right,
}

impl FromStr for HAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            _ => Err(format!(
                "invalid horizontal alignment `{s}`, valid values: left, center, right"
            )),
        }
    }
}

/// Vertical alignment of a line label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    /// Top-aligned
    Top,
    /// Centered (default)
    #[default]
    Center,
    /// Bottom-aligned
    Bottom,
}

impl FromStr for VAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            _ => Err(format!(
                "invalid vertical alignment `{s}`, valid values: top, center, bottom"
            )),
        }
    }
}

/// Stroke styling shared by every line kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// Stroke color.
    #[serde(default)]
    pub color: Color,
    /// Stroke width.
    #[serde(default = "default_line_width")]
    pub width: f64,
    /// Dash pattern.
    #[serde(default)]
    pub dash: StrokePattern,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Stacking order relative to vertices.
    #[serde(default = "default_line_z_order")]
    pub z_order: i32,
    /// Curvature of the line's path; `0` is a straight connection.
    #[serde(default = "default_bezier_offset")]
    pub bezier_offset: f64,
    /// Departure angle at the start vertex, in degrees. `None` lets the
    /// renderer pick.
    #[serde(default)]
    pub angle_out: Option<f64>,
    /// Arrival angle at the end vertex, in degrees.
    #[serde(default)]
    pub angle_in: Option<f64>,
}

fn default_line_width() -> f64 {
    1.0
}

fn default_alpha() -> f64 {
    1.0
}

fn default_line_z_order() -> i32 {
    1
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: default_line_width(),
            dash: StrokePattern::default(),
            alpha: default_alpha(),
            z_order: default_line_z_order(),
            bezier_offset: default_bezier_offset(),
            angle_out: None,
            angle_in: None,
        }
    }
}

/// A line: a typed particle propagator connecting two vertices.
///
/// Both endpoints must reference vertices that exist in the same diagram;
/// the engine's integrity layer enforces this, the record itself cannot.
/// The id is immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    id: LineId,
    start: VertexId,
    end: VertexId,
    #[serde(flatten)]
    kind: LineKind,
    #[serde(default)]
    style: LineStyle,
    #[serde(default)]
    label: String,
    #[serde(default = "default_label_offset")]
    label_offset: Vec2,
    #[serde(default = "default_label_size")]
    label_size: f64,
    #[serde(default)]
    label_color: Color,
    #[serde(default)]
    label_halign: HAlign,
    #[serde(default)]
    label_valign: VAlign,
}

fn default_label_offset() -> Vec2 {
    Vec2::new(0.5, 0.0)
}

fn default_label_size() -> f64 {
    30.0
}

impl Line {
    /// Creates a line of the given kind between two vertices with default
    /// styling.
    pub fn new(id: LineId, start: VertexId, end: VertexId, kind: LineKind) -> Self {
        Self {
            id,
            start,
            end,
            kind,
            style: LineStyle::default(),
            label: String::new(),
            label_offset: default_label_offset(),
            label_size: default_label_size(),
            label_color: Color::default(),
            label_halign: HAlign::default(),
            label_valign: VAlign::default(),
        }
    }

    /// Get the line identifier.
    pub fn id(&self) -> LineId {
        self.id
    }

    /// Get the start vertex id.
    pub fn start(&self) -> VertexId {
        self.start
    }

    /// Get the end vertex id.
    pub fn end(&self) -> VertexId {
        self.end
    }

    /// Whether both endpoints reference the same vertex.
    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }

    /// Whether `vertex` is one of this line's endpoints.
    pub fn touches(&self, vertex: VertexId) -> bool {
        self.start == vertex || self.end == vertex
    }

    /// Borrow the kind and its kind-specific attributes.
    pub fn kind(&self) -> &LineKind {
        &self.kind
    }

    /// Borrow the shared stroke styling.
    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Borrow the label text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the label offset relative to the line midpoint.
    pub fn label_offset(&self) -> Vec2 {
        self.label_offset
    }

    /// Get the label font size.
    pub fn label_size(&self) -> f64 {
        self.label_size
    }

    /// Get the label color.
    pub fn label_color(&self) -> Color {
        self.label_color
    }

    /// Get the horizontal label alignment.
    pub fn label_halign(&self) -> HAlign {
        self.label_halign
    }

    /// Get the vertical label alignment.
    pub fn label_valign(&self) -> VAlign {
        self.label_valign
    }

    /// Replaces both endpoints.
    ///
    /// Endpoint changes are structural: within a diagram they must go through
    /// the facade's reconnect operation so that the integrity layer sees them.
    pub fn set_endpoints(&mut self, start: VertexId, end: VertexId) {
        self.start = start;
        self.end = end;
    }

    /// Replaces the kind and its attributes.
    pub fn set_kind(&mut self, kind: LineKind) {
        self.kind = kind;
    }

    /// Mutably borrow the kind.
    pub fn kind_mut(&mut self) -> &mut LineKind {
        &mut self.kind
    }

    /// Replaces the shared stroke styling.
    pub fn set_style(&mut self, style: LineStyle) {
        self.style = style;
    }

    /// Mutably borrow the shared stroke styling.
    pub fn style_mut(&mut self) -> &mut LineStyle {
        &mut self.style
    }

    /// Sets the label text.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Sets the label offset.
    pub fn set_label_offset(&mut self, offset: Vec2) {
        self.label_offset = offset;
    }

    /// Sets the label font size.
    pub fn set_label_size(&mut self, size: f64) {
        self.label_size = size;
    }

    /// Sets the label color.
    pub fn set_label_color(&mut self, color: Color) {
        self.label_color = color;
    }

    /// Sets the horizontal label alignment.
    pub fn set_label_halign(&mut self, halign: HAlign) {
        self.label_halign = halign;
    }

    /// Sets the vertical label alignment.
    pub fn set_label_valign(&mut self, valign: VAlign) {
        self.label_valign = valign;
    }

    /// Immutable-style variant of [`set_label`](Self::set_label).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.set_label(label);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(kind: LineKind) -> Line {
        Line::new(LineId::new(0), VertexId::new(1), VertexId::new(2), kind)
    }

    #[test]
    fn test_antifermion_defaults_reversed() {
        let LineKind::Antifermion(attrs) = LineKind::antifermion() else {
            panic!("antifermion constructor produced a different kind");
        };
        assert!(attrs.arrow_reversed);
        assert!(attrs.show_arrow);
    }

    #[test]
    fn test_touches_and_self_loop() {
        let l = line(LineKind::fermion());
        assert!(l.touches(VertexId::new(1)));
        assert!(l.touches(VertexId::new(2)));
        assert!(!l.touches(VertexId::new(3)));
        assert!(!l.is_self_loop());

        let mut loop_line = l.clone();
        loop_line.set_endpoints(VertexId::new(1), VertexId::new(1));
        assert!(loop_line.is_self_loop());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(LineKind::fermion().name(), "fermion");
        assert_eq!(LineKind::antifermion().name(), "antifermion");
        assert_eq!(LineKind::photon().name(), "photon");
        assert_eq!(LineKind::gluon().name(), "gluon");
        assert_eq!(LineKind::w_boson().name(), "w_boson");
        assert_eq!(LineKind::z_boson().name(), "z_boson");
    }

    #[test]
    fn test_kind_serde_tagging() {
        let l = line(LineKind::photon());
        let json = serde_json::to_value(&l).unwrap();

        // The kind tag is flattened into the line object.
        assert_eq!(json["kind"], "photon");
        assert_eq!(json["start"], 1);
        assert_eq!(json["end"], 2);

        let back: Line = serde_json::from_value(json).unwrap();
        assert_eq!(back, l);
    }

    #[test]
    fn test_alignment_from_str() {
        assert_eq!(HAlign::from_str("left").unwrap(), HAlign::Left);
        assert_eq!(VAlign::from_str("bottom").unwrap(), VAlign::Bottom);

        let err = HAlign::from_str("middle").unwrap_err();
        assert!(err.contains("invalid horizontal alignment"));
    }

    #[test]
    fn test_photon_phase_constants() {
        let attrs = PhotonAttrs {
            final_phase_deg: PHASE_HALF_TURN,
            ..PhotonAttrs::default()
        };
        assert_eq!(attrs.initial_phase_deg, PHASE_ZERO);
        assert_eq!(attrs.final_phase_deg, 180.0);
    }
}
