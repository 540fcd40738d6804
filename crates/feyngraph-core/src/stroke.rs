//! Dash pattern definitions for particle lines.
//!
//! This module provides [`StrokePattern`], the dash pattern carried by every
//! line's shared style. The rendering collaborator maps patterns onto its
//! backend's dash vocabulary; the core only stores them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Defines the dash pattern of a stroke.
///
/// Integrates both the concept of "style" (solid vs patterned) and the
/// specific dash pattern into a single type.
///
/// # Dash values
///
/// Each patterned variant has a canonical dash/gap length list, exposed by
/// [`StrokePattern::dash_value`]:
/// - `Solid`: none
/// - `Dashed`: "5,5"
/// - `Dotted`: "2,3"
/// - `DashDot`: "10,5,2,5"
/// - `Custom(pattern)`: the provided pattern string
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokePattern {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line with equal dash and gap lengths
    Dashed,
    /// Dotted line with small dots
    Dotted,
    /// Dash-dot pattern
    DashDot,
    /// Custom dasharray pattern
    /// Format: comma or space-separated list of dash/gap lengths
    /// Example: "10,5,2,3" = 10px dash, 5px gap, 2px dash, 3px gap (repeating)
    Custom(String),
}

impl FromStr for StrokePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            "dash-dot" | "dashdot" => Ok(Self::DashDot),
            // Any other value is treated as a custom dasharray pattern
            _ => Ok(Self::Custom(s.to_string())),
        }
    }
}

impl StrokePattern {
    /// Returns the dasharray value for this pattern, or None for solid lines
    pub fn dash_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::DashDot => Some("10,5,2,5".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_values() {
        assert_eq!(StrokePattern::Solid.dash_value(), None);
        assert_eq!(StrokePattern::Dashed.dash_value(), Some("5,5".to_string()));
        assert_eq!(StrokePattern::Dotted.dash_value(), Some("2,3".to_string()));
        assert_eq!(
            StrokePattern::DashDot.dash_value(),
            Some("10,5,2,5".to_string())
        );

        let custom = StrokePattern::Custom("15,3,3,3".to_string());
        assert_eq!(custom.dash_value(), Some("15,3,3,3".to_string()));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            StrokePattern::from_str("solid").unwrap(),
            StrokePattern::Solid
        );
        assert_eq!(
            StrokePattern::from_str("dashed").unwrap(),
            StrokePattern::Dashed
        );
        assert_eq!(
            StrokePattern::from_str("dotted").unwrap(),
            StrokePattern::Dotted
        );
        assert_eq!(
            StrokePattern::from_str("dash-dot").unwrap(),
            StrokePattern::DashDot
        );
        assert_eq!(
            StrokePattern::from_str("dashdot").unwrap(),
            StrokePattern::DashDot
        );

        // Unrecognized strings become custom patterns
        assert_eq!(
            StrokePattern::from_str("10,5,2,5").unwrap(),
            StrokePattern::Custom("10,5,2,5".to_string())
        );
    }
}
