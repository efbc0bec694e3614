//! # vectorlab
//!
//! Rendering and dynamic scaling engine for small sets of 2D and 3D vectors.
//!
//! The crate turns a live, observable list of vectors into either a flat 2D
//! picture (axes, grid, ticks, arrows, sum, angle arc, orthogonality marker)
//! or an orbitable 3D scene (three axes, lattices on three planes, tick
//! cubes, oriented arrows). Both are recomputed from scratch on every
//! redraw so the geometry always fits the surface.
//!
//! ## Features
//!
//! - Vector algebra on component slices with explicit dimension errors
//! - Ordered world with add/remove/component-change events
//! - Auto-fit 2D projection producing tagged draw commands
//! - 3D scene graph with hand-built cone meshes and an orbit camera
//! - Automatic 2D/3D canvas selection by the depth of the data
//! - Two-vector session with direct dragging of arrow tips
//!
//! ## Quick Start
//!
//! ```rust
//! use vectorlab::{Axis, CanvasMode, Vector, VectorSession};
//!
//! let mut session = VectorSession::new();
//! let id = session.add_vector(Vector::new_2d(3.0, 4.0))?;
//! assert_eq!(session.mode(), CanvasMode::TwoD);
//!
//! // A depth component moves the session to the 3D canvas
//! session.set_component(id, Axis::Z, 2.0)?;
//! assert_eq!(session.mode(), CanvasMode::ThreeD);
//! # Ok::<(), vectorlab::VectorError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`World`] - ordered vectors and their change events
//! - [`ProjectionEngine`] - 2D renderer producing a [`DrawList`]
//! - [`SceneEngine`] - 3D renderer producing a [`SceneGraph`]
//! - [`VectorCanvas`] - common interface of both renderers
//! - [`CanvasSelector`] - picks the canvas for the current world
//! - [`VectorSession`] / [`PairSession`] - hosts that redraw on every event

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod canvas;
pub mod config;
pub mod error;
pub mod events;
pub mod flags;
pub mod input;
pub mod math;
pub mod projection;
pub mod scene;
pub mod session;
pub mod types;
pub mod world;

// Re-export commonly used types
pub use canvas::{CanvasMode, CanvasSelector, Frame, VectorCanvas, ViewState};
pub use config::{CameraSettings, LabelScheme, ProjectionStyle, RenderConfig, SceneStyle};
pub use error::{Result, VectorError};
pub use events::{EventKind, EventLog, SubscriptionId, WorldEvent};
pub use flags::DisplayFlags;
pub use input::{format_component, parse_component, ComponentRange};
pub use projection::{DragController, DrawCommand, DrawLayer, DrawList, Projection, ProjectionEngine};
pub use scene::{build_cone_mesh, ConeMesh, SceneEngine, SceneGraph, SceneNode, Shape, ViewTransform};
pub use session::{PairSession, VectorSession};
pub use types::{BoundingBox2D, Color, Transform, Vector2, Vector3, VectorId, Viewport};
pub use world::{Axis, Vector, World, WorldSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
