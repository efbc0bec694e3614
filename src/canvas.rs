//! The two canvas variants and the policy that picks between them.

use crate::flags::DisplayFlags;
use crate::projection::{DrawList, ProjectionEngine};
use crate::scene::{SceneEngine, SceneGraph, ViewTransform};
use crate::types::Viewport;
use crate::world::World;
use std::fmt;
use tracing::info;

/// Which canvas is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanvasMode {
    TwoD,
    ThreeD,
}

impl fmt::Display for CanvasMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasMode::TwoD => write!(f, "2D"),
            CanvasMode::ThreeD => write!(f, "3D"),
        }
    }
}

/// Surface state shared by both canvases
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewState {
    pub viewport: Viewport,
    pub view: ViewTransform,
}

/// Output of either canvas
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    TwoD(DrawList),
    ThreeD(SceneGraph),
}

impl Frame {
    pub fn mode(&self) -> CanvasMode {
        match self {
            Frame::TwoD(_) => CanvasMode::TwoD,
            Frame::ThreeD(_) => CanvasMode::ThreeD,
        }
    }

    pub fn as_draw_list(&self) -> Option<&DrawList> {
        match self {
            Frame::TwoD(list) => Some(list),
            Frame::ThreeD(_) => None,
        }
    }

    pub fn as_scene(&self) -> Option<&SceneGraph> {
        match self {
            Frame::ThreeD(scene) => Some(scene),
            Frame::TwoD(_) => None,
        }
    }
}

/// Common interface of the 2D and 3D renderers.
///
/// Implementations read the world on every call and keep nothing between
/// frames.
pub trait VectorCanvas {
    /// Variant this canvas implements
    fn mode(&self) -> CanvasMode;

    /// Display toggles the canvas honours
    fn exposed_flags(&self) -> DisplayFlags;

    /// Render the current world
    fn render(&self, world: &World, flags: DisplayFlags, state: &ViewState) -> Frame;
}

impl VectorCanvas for ProjectionEngine {
    fn mode(&self) -> CanvasMode {
        CanvasMode::TwoD
    }

    fn exposed_flags(&self) -> DisplayFlags {
        DisplayFlags::all()
    }

    fn render(&self, world: &World, flags: DisplayFlags, state: &ViewState) -> Frame {
        Frame::TwoD(ProjectionEngine::render(self, world, flags, state.viewport))
    }
}

impl VectorCanvas for SceneEngine {
    fn mode(&self) -> CanvasMode {
        CanvasMode::ThreeD
    }

    fn exposed_flags(&self) -> DisplayFlags {
        DisplayFlags::SCENE
    }

    fn render(&self, world: &World, flags: DisplayFlags, state: &ViewState) -> Frame {
        let flags = flags.intersection(self.exposed_flags());
        Frame::ThreeD(SceneEngine::render(self, world, flags, &state.view))
    }
}

/// Tracks the presented canvas across redraws
#[derive(Debug, Clone)]
pub struct CanvasSelector {
    current: CanvasMode,
    switches: usize,
}

impl CanvasSelector {
    pub fn new() -> Self {
        CanvasSelector {
            current: CanvasMode::TwoD,
            switches: 0,
        }
    }

    /// 3D iff some vector has a non-negligible Z component
    pub fn choose(world: &World) -> CanvasMode {
        if world.dimension() == 3 {
            CanvasMode::ThreeD
        } else {
            CanvasMode::TwoD
        }
    }

    pub fn current(&self) -> CanvasMode {
        self.current
    }

    /// Number of mode changes so far
    pub fn switches(&self) -> usize {
        self.switches
    }

    /// Re-evaluate for `world`; returns true if the mode changed
    pub fn update(&mut self, world: &World) -> bool {
        let next = Self::choose(world);
        if next == self.current {
            return false;
        }
        info!(from = %self.current, to = %next, "switching canvas");
        self.current = next;
        self.switches += 1;
        true
    }
}

impl Default for CanvasSelector {
    fn default() -> Self {
        Self::new()
    }
}
