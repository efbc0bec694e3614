//! Numeric text entry for vector components.
//!
//! Editors push every keystroke through [`parse_component`]. Text that is not
//! (yet) a number is ignored and the previous value stays, so a half-typed
//! "-" or "1," never disturbs the picture.

use serde::{Deserialize, Serialize};

/// Parse user text as a component value.
///
/// A comma is accepted as decimal separator and surrounding whitespace is
/// ignored. Malformed or non-finite input returns `previous` unchanged.
pub fn parse_component(text: &str, previous: f64) -> f64 {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(previous)
}

/// Render a component for an editor: integers without decimals, others with two
pub fn format_component(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Inclusive value range of a component editor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentRange {
    pub min: f64,
    pub max: f64,
}

impl ComponentRange {
    /// Range of the pair canvas spinners and sliders
    pub const PAIR: ComponentRange = ComponentRange {
        min: -10.0,
        max: 10.0,
    };

    /// Range of the world list spinners
    pub const WORLD: ComponentRange = ComponentRange {
        min: -20.0,
        max: 20.0,
    };

    /// Clamp a value into the range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Parse text and clamp the result, keeping `previous` on bad input
    pub fn parse(&self, text: &str, previous: f64) -> f64 {
        self.clamp(parse_component(text, previous))
    }
}
