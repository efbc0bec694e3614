//! Orbit camera state.
//!
//! The scene never moves the camera itself. Orbiting rotates the whole scene
//! root by yaw about Y and then pitch about X, while a perspective camera sits
//! at a fixed distance on -Z looking at the origin.

use crate::config::CameraSettings;
use crate::types::{Transform, Vector2, Vector3, Viewport};
use crate::world::Axis;

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragAnchor {
    x: f64,
    y: f64,
    pitch: f64,
    yaw: f64,
}

/// Pitch and yaw of the scene root, in degrees.
///
/// Shared by every 3D render call; pointer input updates it between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub pitch: f64,
    pub yaw: f64,
    anchor: Option<DragAnchor>,
}

impl ViewTransform {
    pub fn new(pitch: f64, yaw: f64) -> Self {
        ViewTransform {
            pitch,
            yaw,
            anchor: None,
        }
    }

    /// Initial orientation from camera settings
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new(settings.pitch, settings.yaw)
    }

    /// Record the pointer position and current angles at press time
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.anchor = Some(DragAnchor {
            x,
            y,
            pitch: self.pitch,
            yaw: self.yaw,
        });
    }

    /// Orbit relative to the press anchor, one degree per pixel.
    ///
    /// Moving the pointer down tilts the scene up. Returns false when no
    /// drag is in progress.
    pub fn drag_to(&mut self, x: f64, y: f64) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        self.pitch = anchor.pitch - (y - anchor.y);
        self.yaw = anchor.yaw + (x - anchor.x);
        true
    }

    pub fn end_drag(&mut self) {
        self.anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Incremental orbit by a pointer delta
    pub fn apply_delta(&mut self, dx: f64, dy: f64) {
        self.pitch -= dy;
        self.yaw += dx;
    }

    /// Rotation applied to the scene root
    pub fn transform(&self) -> Transform {
        let yaw = Transform::from_rotation_degrees(Axis::Y.unit(), self.yaw);
        let pitch = Transform::from_rotation_degrees(Axis::X.unit(), self.pitch);
        yaw.then(&pitch)
    }

    /// Scene point after the orbit rotation
    pub fn to_camera_space(&self, point: Vector3) -> Vector3 {
        self.transform().apply(point)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

/// Project a scene point to the viewport.
///
/// The camera looks down +Z from `-settings.distance`, with a vertical field
/// of view of `settings.field_of_view`. Scene Y grows upwards. Points outside
/// the clip range give `None`.
pub fn project(
    view: &ViewTransform,
    settings: &CameraSettings,
    viewport: Viewport,
    point: Vector3,
) -> Option<Vector2> {
    let p = view.to_camera_space(point);
    let depth = p.z + settings.distance;
    if depth < settings.near_clip || depth > settings.far_clip {
        return None;
    }
    let focal = (viewport.height / 2.0) / (settings.field_of_view.to_radians() / 2.0).tan();
    let center = viewport.center();
    Some(Vector2::new(
        center.x + focal * p.x / depth,
        center.y - focal * p.y / depth,
    ))
}
