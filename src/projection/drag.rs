//! Direct manipulation of vector tips on the 2D canvas.

use super::Projection;
use crate::error::Result;
use crate::types::{Vector2, VectorId};
use crate::world::World;
use tracing::debug;

/// World-unit distance within which a press grabs a vector tip
pub const PICK_RADIUS: f64 = 0.5;

/// Press, drag and release state for draggable vector tips.
///
/// Candidates are tested in order and the first one whose tip lies within
/// the pick radius wins, so an earlier vector shadows a later one at the
/// same spot.
#[derive(Debug, Clone)]
pub struct DragController {
    candidates: Vec<VectorId>,
    active: Option<VectorId>,
    pick_radius: f64,
}

impl DragController {
    /// Create a controller over the given tips, in priority order
    pub fn new(candidates: Vec<VectorId>) -> Self {
        DragController {
            candidates,
            active: None,
            pick_radius: PICK_RADIUS,
        }
    }

    /// Vector currently being dragged
    pub fn active(&self) -> Option<VectorId> {
        self.active
    }

    pub fn candidates(&self) -> &[VectorId] {
        &self.candidates
    }

    /// Press at a world point; selects the first candidate within reach
    pub fn press_at(&mut self, world: &World, point: [f64; 2]) -> Option<VectorId> {
        let [px, py] = point;
        self.active = self.candidates.iter().copied().find(|id| {
            world
                .get(*id)
                .is_some_and(|v| (px - v.x()).hypot(py - v.y()) < self.pick_radius)
        });
        if let Some(id) = self.active {
            debug!(%id, x = px, y = py, "drag started");
        }
        self.active
    }

    /// Press at a screen position under `projection`
    pub fn press(&mut self, world: &World, projection: &Projection, screen: Vector2) -> Option<VectorId> {
        self.press_at(world, projection.to_world(screen))
    }

    /// Move the grabbed tip to a world point.
    ///
    /// Returns `Ok(false)` when nothing is grabbed.
    pub fn drag_to(&mut self, world: &mut World, point: [f64; 2]) -> Result<bool> {
        let Some(id) = self.active else {
            return Ok(false);
        };
        world.set_xy(id, point[0], point[1])?;
        Ok(true)
    }

    /// Move the grabbed tip to a screen position under `projection`
    pub fn drag(&mut self, world: &mut World, projection: &Projection, screen: Vector2) -> Result<bool> {
        self.drag_to(world, projection.to_world(screen))
    }

    /// End the gesture
    pub fn release(&mut self) {
        self.active = None;
    }
}
