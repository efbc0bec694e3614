//! Render configuration.
//!
//! Every constant the engines use lives here with its reference default.
//! A host can override any subset from JSON:
//!
//! ```rust
//! use vectorlab::RenderConfig;
//!
//! let config = RenderConfig::from_json_str(r#"{ "projection": { "margin": 60.0 } }"#)?;
//! assert_eq!(config.projection.margin, 60.0);
//! assert_eq!(config.scene.pixel_budget, 200.0);
//! # Ok::<(), vectorlab::VectorError>(())
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// How vectors are named in 2D labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelScheme {
    /// "v1", "v2", ...
    Indexed,
    /// "v₁", "v₂", ...
    Subscript,
}

impl LabelScheme {
    /// Label of the vector at display position `index`
    pub fn label(self, index: usize) -> String {
        match self {
            LabelScheme::Indexed => format!("v{}", index + 1),
            LabelScheme::Subscript => {
                let digits: String = (index + 1)
                    .to_string()
                    .chars()
                    .filter_map(|d| d.to_digit(10))
                    .filter_map(|d| char::from_u32(0x2080 + d))
                    .collect();
                format!("v{}", digits)
            }
        }
    }
}

/// Constants of the 2D projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionStyle {
    /// Screen space reserved around the fitted geometry for labels
    pub margin: f64,
    /// Pixels per unit when no fit can be computed
    pub default_scale: f64,
    /// Fit at least one unit on each side of the origin
    pub floor_at_one: bool,
    /// Fit the sum of the first two vectors even when it is hidden
    pub always_fit_sum: bool,
    /// Vectors shorter than this are not drawn and disable the pair overlays
    pub hide_below: Option<f64>,
    pub vector_stroke: f64,
    pub arrow_head_length: f64,
    /// Half-angle between the shaft and each arrowhead segment (degrees)
    pub arrow_head_angle: f64,
    /// Offset of a vector label from its tip, right and up (pixels)
    pub label_offset: f64,
    pub labels: LabelScheme,
    pub sum_label: String,
    pub tick_half_length: f64,
    pub arc_radius: f64,
    /// Number of segments in the angle arc polyline
    pub arc_segments: usize,
    pub orthogonality_radius: f64,
}

impl ProjectionStyle {
    /// Style of the canvas showing the whole world
    pub fn world() -> Self {
        ProjectionStyle {
            margin: 80.0,
            default_scale: 40.0,
            floor_at_one: true,
            always_fit_sum: false,
            hide_below: None,
            vector_stroke: 2.0,
            arrow_head_length: 10.0,
            arrow_head_angle: 20.0,
            label_offset: 4.0,
            labels: LabelScheme::Indexed,
            sum_label: "R".to_string(),
            tick_half_length: 4.0,
            arc_radius: 40.0,
            arc_segments: 50,
            orthogonality_radius: 10.0,
        }
    }

    /// Style of the two-vector direct-manipulation canvas
    pub fn pair() -> Self {
        ProjectionStyle {
            margin: 100.0,
            floor_at_one: false,
            always_fit_sum: true,
            hide_below: Some(0.1),
            label_offset: 5.0,
            labels: LabelScheme::Subscript,
            sum_label: "v₁+v₂".to_string(),
            ..Self::world()
        }
    }
}

impl Default for ProjectionStyle {
    fn default() -> Self {
        Self::world()
    }
}

/// Constants of the 3D scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneStyle {
    /// Scene pixels covered by the fitted span
    pub pixel_budget: f64,
    /// Smallest span in world units
    pub min_span: f64,
    /// Span as a multiple of the longest vector
    pub span_padding: f64,
    pub axis_shaft_radius: f64,
    pub axis_head_length: f64,
    pub axis_head_radius: f64,
    /// Gap between an axis arrowhead and its label
    pub axis_label_gap: f64,
    pub cone_divisions: usize,
    pub grid_line_radius: f64,
    pub tick_size: f64,
    pub arrow_shaft_radius: f64,
    /// Arrowhead length as a fraction of the arrow length
    pub arrow_head_ratio: f64,
    /// Arrowhead radius as a fraction of its length
    pub arrow_head_radius_ratio: f64,
    pub min_shaft_length: f64,
}

impl Default for SceneStyle {
    fn default() -> Self {
        SceneStyle {
            pixel_budget: 200.0,
            min_span: 2.0,
            span_padding: 1.2,
            axis_shaft_radius: 1.0,
            axis_head_length: 12.0,
            axis_head_radius: 4.0,
            axis_label_gap: 6.0,
            cone_divisions: 24,
            grid_line_radius: 0.3,
            tick_size: 6.0,
            arrow_shaft_radius: 2.0,
            arrow_head_ratio: 0.12,
            arrow_head_radius_ratio: 0.35,
            min_shaft_length: 1.0,
        }
    }
}

/// Orbit camera defaults and perspective parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Initial rotation about X (degrees)
    pub pitch: f64,
    /// Initial rotation about Y (degrees)
    pub yaw: f64,
    /// Camera distance from the origin along -Z
    pub distance: f64,
    pub near_clip: f64,
    pub far_clip: f64,
    /// Vertical field of view (degrees)
    pub field_of_view: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings {
            pitch: -30.0,
            yaw: -45.0,
            distance: 600.0,
            near_clip: 0.1,
            far_clip: 10_000.0,
            field_of_view: 30.0,
        }
    }
}

/// All render constants
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub projection: ProjectionStyle,
    pub scene: SceneStyle,
    pub camera: CameraSettings,
}

impl RenderConfig {
    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
