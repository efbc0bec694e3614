//! Hosting sessions.
//!
//! A session owns a [`World`], the shared display state, and the canvases.
//! It subscribes to the world once at construction; from then on every
//! mutation redraws the visible canvas inside the mutating call, so a frame
//! never shows a half-applied change.
//!
//! [`VectorSession`] hosts the general N-vector world and switches between
//! the 2D and 3D canvases. [`PairSession`] hosts exactly two planar vectors
//! and adds drag manipulation of their tips.

use crate::canvas::{CanvasMode, CanvasSelector, Frame, VectorCanvas, ViewState};
use crate::config::{ProjectionStyle, RenderConfig};
use crate::error::{Result, VectorError};
use crate::events::WorldEvent;
use crate::flags::DisplayFlags;
use crate::input::ComponentRange;
use crate::math;
use crate::projection::{DragController, DrawList, ProjectionEngine};
use crate::scene::{SceneEngine, ViewTransform};
use crate::types::{Vector2, VectorId, Viewport};
use crate::world::{Axis, Vector, World, WorldSnapshot};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Canvases and display state driven by world events
#[derive(Debug)]
struct CanvasHost {
    projection: ProjectionEngine,
    scene: SceneEngine,
    selector: CanvasSelector,
    flags: DisplayFlags,
    state: ViewState,
    frame: Frame,
    redraws: usize,
}

impl CanvasHost {
    fn new(config: &RenderConfig, world: &World) -> Self {
        let projection = ProjectionEngine::new(config.projection.clone());
        let scene = SceneEngine::new(config.scene.clone(), config.camera);
        let state = ViewState {
            viewport: Viewport::default(),
            view: ViewTransform::from_settings(&config.camera),
        };
        let flags = DisplayFlags::default();
        let mut selector = CanvasSelector::new();
        selector.update(world);
        let frame = match selector.current() {
            CanvasMode::TwoD => VectorCanvas::render(&projection, world, flags, &state),
            CanvasMode::ThreeD => VectorCanvas::render(&scene, world, flags, &state),
        };
        CanvasHost {
            projection,
            scene,
            selector,
            flags,
            state,
            frame,
            redraws: 1,
        }
    }

    fn canvas(&self) -> &dyn VectorCanvas {
        match self.selector.current() {
            CanvasMode::TwoD => &self.projection,
            CanvasMode::ThreeD => &self.scene,
        }
    }

    fn redraw(&mut self, world: &World) {
        self.selector.update(world);
        self.frame = self.canvas().render(world, self.flags, &self.state);
        self.redraws += 1;
        trace!(mode = %self.selector.current(), redraws = self.redraws, "redrawn");
    }
}

/// Session over an arbitrary list of 2D and 3D vectors
#[derive(Debug)]
pub struct VectorSession {
    world: World,
    host: Rc<RefCell<CanvasHost>>,
}

impl VectorSession {
    /// Create an empty session with default constants
    pub fn new() -> Self {
        Self::with_config(&RenderConfig::default())
    }

    /// Create an empty session with the given constants
    pub fn with_config(config: &RenderConfig) -> Self {
        let mut world = World::new();
        let host = Rc::new(RefCell::new(CanvasHost::new(config, &world)));
        let listener = Rc::clone(&host);
        world.subscribe(move |event: &WorldEvent, world: &World| {
            debug!(%event, "redrawing after world event");
            listener.borrow_mut().redraw(world);
        });
        VectorSession { world, host }
    }

    /// Read access to the world
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn add_vector(&mut self, vector: Vector) -> Result<VectorId> {
        self.world.add(vector)
    }

    /// Add the unit X vector, as the "add" button does
    pub fn add_default_vector(&mut self) -> Result<VectorId> {
        self.world.add(Vector::default())
    }

    pub fn remove_vector(&mut self, id: VectorId) -> Option<Vector> {
        self.world.remove(id)
    }

    pub fn clear(&mut self) {
        self.world.clear();
    }

    /// Set one component, clamped to the list editor range
    pub fn set_component(&mut self, id: VectorId, axis: Axis, value: f64) -> Result<()> {
        self.world.set_component(id, axis, ComponentRange::WORLD.clamp(value))
    }

    /// Apply editor text to a component.
    ///
    /// Malformed text keeps the current value; numbers are clamped to the
    /// list editor range. Returns the value now stored.
    pub fn set_component_text(&mut self, id: VectorId, axis: Axis, text: &str) -> Result<f64> {
        let previous = self
            .world
            .get(id)
            .ok_or(VectorError::UnknownVector(id))?
            .get(axis)?;
        let value = ComponentRange::WORLD.parse(text, previous);
        self.world.set_component(id, axis, value)?;
        Ok(value)
    }

    /// Replace the whole world with a snapshot.
    ///
    /// The snapshot is validated first; on error the world is untouched.
    pub fn load_snapshot(&mut self, snapshot: &WorldSnapshot) -> Result<()> {
        let restored = World::from_snapshot(snapshot)?;
        self.world.clear();
        for vector in restored.vectors() {
            self.world.add(*vector)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.world.snapshot()
    }

    pub fn flags(&self) -> DisplayFlags {
        self.host.borrow().flags
    }

    /// Turn toggles on or off; shared by both canvases
    pub fn set_flag(&mut self, flags: DisplayFlags, on: bool) {
        let next = self.flags().with(flags, on);
        self.set_flags(next);
    }

    pub fn set_flags(&mut self, flags: DisplayFlags) {
        let mut host = self.host.borrow_mut();
        if host.flags != flags {
            host.flags = flags;
            host.redraw(&self.world);
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.host.borrow().state.viewport
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let mut host = self.host.borrow_mut();
        host.state.viewport = Viewport::new(width, height);
        host.redraw(&self.world);
    }

    pub fn view(&self) -> ViewTransform {
        self.host.borrow().state.view
    }

    /// Pointer press on the 3D canvas
    pub fn begin_orbit(&mut self, x: f64, y: f64) {
        self.host.borrow_mut().state.view.begin_drag(x, y);
    }

    /// Pointer drag on the 3D canvas
    pub fn orbit_to(&mut self, x: f64, y: f64) {
        let mut host = self.host.borrow_mut();
        if host.state.view.drag_to(x, y) {
            host.redraw(&self.world);
        }
    }

    pub fn end_orbit(&mut self) {
        self.host.borrow_mut().state.view.end_drag();
    }

    /// Orbit by a raw pointer delta
    pub fn orbit_by(&mut self, dx: f64, dy: f64) {
        let mut host = self.host.borrow_mut();
        host.state.view.apply_delta(dx, dy);
        host.redraw(&self.world);
    }

    /// Canvas currently presented
    pub fn mode(&self) -> CanvasMode {
        self.host.borrow().selector.current()
    }

    /// Last rendered frame
    pub fn frame(&self) -> Frame {
        self.host.borrow().frame.clone()
    }

    /// Number of frames rendered so far, including the initial one
    pub fn redraw_count(&self) -> usize {
        self.host.borrow().redraws
    }
}

impl Default for VectorSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Projection and display state of the pair canvas
#[derive(Debug)]
struct PairHost {
    engine: ProjectionEngine,
    flags: DisplayFlags,
    viewport: Viewport,
    frame: DrawList,
    redraws: usize,
}

impl PairHost {
    fn redraw(&mut self, world: &World) {
        self.frame = self.engine.render(world, self.flags, self.viewport);
        self.redraws += 1;
    }
}

/// Two planar vectors with direct manipulation
#[derive(Debug)]
pub struct PairSession {
    world: World,
    first: VectorId,
    second: VectorId,
    drag: DragController,
    host: Rc<RefCell<PairHost>>,
}

impl PairSession {
    /// Both vectors start at the origin
    pub fn new() -> Result<Self> {
        Self::with_style(ProjectionStyle::pair())
    }

    pub fn with_style(style: ProjectionStyle) -> Result<Self> {
        let mut world = World::new();
        let first = world.add(Vector::new_2d(0.0, 0.0))?;
        let second = world.add(Vector::new_2d(0.0, 0.0))?;

        let engine = ProjectionEngine::new(style);
        let flags = DisplayFlags::pair_default();
        let viewport = Viewport::default();
        let frame = engine.render(&world, flags, viewport);
        let host = Rc::new(RefCell::new(PairHost {
            engine,
            flags,
            viewport,
            frame,
            redraws: 1,
        }));
        let listener = Rc::clone(&host);
        world.subscribe(move |_, world| listener.borrow_mut().redraw(world));

        Ok(PairSession {
            world,
            first,
            second,
            drag: DragController::new(vec![first, second]),
            host,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Id of v₁
    pub fn first(&self) -> VectorId {
        self.first
    }

    /// Id of v₂
    pub fn second(&self) -> VectorId {
        self.second
    }

    fn planar(&self, id: VectorId) -> [f64; 2] {
        self.world.get(id).map_or([0.0, 0.0], |v| [v.x(), v.y()])
    }

    /// Set X or Y of one of the two vectors, clamped to the editor range
    pub fn set_component(&mut self, id: VectorId, axis: Axis, value: f64) -> Result<()> {
        if axis == Axis::Z {
            return Err(VectorError::AxisOutOfRange { axis, dimension: 2 });
        }
        self.world.set_component(id, axis, ComponentRange::PAIR.clamp(value))
    }

    /// Apply editor text; malformed text keeps the current value
    pub fn set_component_text(&mut self, id: VectorId, axis: Axis, text: &str) -> Result<f64> {
        let previous = self
            .world
            .get(id)
            .ok_or(VectorError::UnknownVector(id))?
            .get(axis)?;
        let value = ComponentRange::PAIR.parse(text, previous);
        self.set_component(id, axis, value)?;
        Ok(value)
    }

    /// Components of v₁ + v₂
    pub fn sum(&self) -> [f64; 2] {
        let (a, b) = (self.planar(self.first), self.planar(self.second));
        [a[0] + b[0], a[1] + b[1]]
    }

    /// Angle between v₁ and v₂ in degrees (0 if either is zero)
    pub fn angle_degrees(&self) -> f64 {
        math::angle_degrees(&self.planar(self.first), &self.planar(self.second)).unwrap_or(0.0)
    }

    pub fn is_orthogonal(&self) -> bool {
        math::is_orthogonal(&self.planar(self.first), &self.planar(self.second)).unwrap_or(false)
    }

    pub fn flags(&self) -> DisplayFlags {
        self.host.borrow().flags
    }

    pub fn set_flag(&mut self, flags: DisplayFlags, on: bool) {
        let mut host = self.host.borrow_mut();
        let next = host.flags.with(flags, on);
        if next != host.flags {
            host.flags = next;
            host.redraw(&self.world);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        let mut host = self.host.borrow_mut();
        host.viewport = Viewport::new(width, height);
        host.redraw(&self.world);
    }

    /// Pointer press; maps through the last rendered projection
    pub fn press(&mut self, screen: Vector2) -> Option<VectorId> {
        let projection = self.host.borrow().frame.projection;
        self.drag.press(&self.world, &projection, screen)
    }

    /// Pointer drag; moves the grabbed tip, if any
    pub fn drag(&mut self, screen: Vector2) -> Result<bool> {
        let projection = self.host.borrow().frame.projection;
        self.drag.drag(&mut self.world, &projection, screen)
    }

    pub fn release(&mut self) {
        self.drag.release();
    }

    /// Vector currently grabbed
    pub fn dragging(&self) -> Option<VectorId> {
        self.drag.active()
    }

    pub fn frame(&self) -> DrawList {
        self.host.borrow().frame.clone()
    }

    pub fn redraw_count(&self) -> usize {
        self.host.borrow().redraws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::DrawLayer;

    #[test]
    fn test_every_mutation_redraws() {
        let mut session = VectorSession::new();
        assert_eq!(session.redraw_count(), 1);

        let id = session.add_default_vector().unwrap();
        assert_eq!(session.redraw_count(), 2);
        session.set_component(id, Axis::Y, 2.0).unwrap();
        assert_eq!(session.redraw_count(), 3);
        // unchanged value, no event
        session.set_component(id, Axis::Y, 2.0).unwrap();
        assert_eq!(session.redraw_count(), 3);
        session.remove_vector(id);
        assert_eq!(session.redraw_count(), 4);
    }

    #[test]
    fn test_mode_follows_depth() {
        let mut session = VectorSession::new();
        let id = session.add_default_vector().unwrap();
        assert_eq!(session.mode(), CanvasMode::TwoD);

        session.set_component(id, Axis::Z, 2.0).unwrap();
        assert_eq!(session.mode(), CanvasMode::ThreeD);
        assert!(session.frame().as_scene().is_some());

        session.set_component(id, Axis::Z, 0.0).unwrap();
        assert_eq!(session.mode(), CanvasMode::TwoD);
        assert!(session.frame().as_draw_list().is_some());
    }

    #[test]
    fn test_flags_survive_mode_switch() {
        let mut session = VectorSession::new();
        let id = session.add_default_vector().unwrap();
        session.set_flag(DisplayFlags::GRID, false);

        session.set_component(id, Axis::Z, 1.0).unwrap();
        assert!(session.frame().as_scene().unwrap().grid.is_empty());
        session.set_component(id, Axis::Z, 0.0).unwrap();
        assert!(!session.frame().as_draw_list().unwrap().has_layer(DrawLayer::Grid));
        assert!(!session.flags().contains(DisplayFlags::GRID));
    }

    #[test]
    fn test_component_text() {
        let mut session = VectorSession::new();
        let id = session.add_default_vector().unwrap();
        assert_eq!(session.set_component_text(id, Axis::X, "2,5").unwrap(), 2.5);
        assert_eq!(session.set_component_text(id, Axis::X, "abc").unwrap(), 2.5);
        assert_eq!(session.set_component_text(id, Axis::X, "99").unwrap(), 20.0);
        assert!(session.set_component_text(VectorId::new(42), Axis::X, "1").is_err());
    }

    #[test]
    fn test_orbit_redraws_scene() {
        let mut session = VectorSession::new();
        session.add_vector(Vector::new_3d(1.0, 1.0, 1.0)).unwrap();
        session.begin_orbit(10.0, 10.0);
        session.orbit_to(20.0, 0.0);
        session.end_orbit();

        let scene = session.frame();
        let scene = scene.as_scene().unwrap();
        assert_eq!(scene.view.pitch, -20.0);
        assert_eq!(scene.view.yaw, -35.0);

        session.orbit_by(-5.0, 0.0);
        assert_eq!(session.view().yaw, -40.0);
    }

    #[test]
    fn test_load_snapshot() {
        let mut session = VectorSession::new();
        session.add_default_vector().unwrap();

        let snapshot = WorldSnapshot {
            vectors: vec![vec![1.0, 2.0], vec![0.0, 0.0, 3.0]],
        };
        session.load_snapshot(&snapshot).unwrap();
        assert_eq!(session.snapshot(), snapshot);
        assert_eq!(session.mode(), CanvasMode::ThreeD);

        let bad = WorldSnapshot {
            vectors: vec![vec![1.0]],
        };
        assert!(session.load_snapshot(&bad).is_err());
        assert_eq!(session.snapshot(), snapshot);
    }

    #[test]
    fn test_pair_defaults() {
        let pair = PairSession::new().unwrap();
        assert_eq!(pair.world().len(), 2);
        assert!(!pair.flags().contains(DisplayFlags::GRID));
        // both at the origin: nothing but background, axes and ticks
        let frame = pair.frame();
        assert!(!frame.has_layer(DrawLayer::Vector(0)));
        assert!(!frame.has_layer(DrawLayer::Sum));
        assert_eq!(frame.projection.scale, 40.0);
    }

    #[test]
    fn test_pair_readouts() {
        let mut pair = PairSession::new().unwrap();
        let (a, b) = (pair.first(), pair.second());
        pair.set_component(a, Axis::X, 3.0).unwrap();
        pair.set_component(b, Axis::Y, 15.0).unwrap();

        assert_eq!(pair.world().get(b).unwrap().y(), 10.0);
        assert_eq!(pair.sum(), [3.0, 10.0]);
        assert!(pair.is_orthogonal());
        assert!((pair.angle_degrees() - 90.0).abs() < 1e-9);
        assert!(pair.set_component(a, Axis::Z, 1.0).is_err());
        assert!(pair.frame().texts().contains(&"v₁+v₂ (3.0, 10.0)"));
    }

    #[test]
    fn test_pair_drag() {
        let mut pair = PairSession::new().unwrap();
        let a = pair.first();
        pair.set_component(a, Axis::X, 2.0).unwrap();

        // v₂ is hidden and still at the origin, so the fit is 2 units: scale 100
        let projection = pair.frame().projection;
        assert_eq!(projection.scale, 100.0);

        assert_eq!(pair.press(projection.to_screen(2.0, 0.2)), Some(a));
        assert!(pair.drag(projection.to_screen(1.0, 1.0)).unwrap());
        assert_eq!(pair.world().get(a).unwrap().components(), &[1.0, 1.0]);
        pair.release();
        assert_eq!(pair.dragging(), None);
    }

    #[test]
    fn test_drag_frames_show_whole_position() {
        let mut pair = PairSession::new().unwrap();
        let a = pair.first();
        pair.set_component(a, Axis::X, 2.0).unwrap();
        let projection = pair.frame().projection;
        let before = pair.redraw_count();

        // runs after the host listener, so it sees every frame the drag produced
        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&frames);
        let host = Rc::clone(&pair.host);
        pair.world.subscribe(move |_, _| sink.borrow_mut().push(host.borrow().frame.clone()));

        pair.press(projection.to_screen(2.0, 0.0));
        assert!(pair.drag(projection.to_screen(1.0, 1.0)).unwrap());

        // one redraw per changed component
        assert_eq!(pair.redraw_count(), before + 2);
        let frames = frames.borrow();
        assert_eq!(frames.len(), 2);
        for frame in frames.iter() {
            let shaft = frame.layer(DrawLayer::Vector(0))[0].points();
            assert_eq!(shaft[1], frame.projection.to_screen(1.0, 1.0));
        }
    }

    #[test]
    fn test_set_component_clamps_to_list_range() {
        let mut session = VectorSession::new();
        let id = session.add_default_vector().unwrap();
        session.set_component(id, Axis::X, 99.0).unwrap();
        session.set_component(id, Axis::Y, -25.0).unwrap();
        assert_eq!(session.world().get(id).unwrap().components(), &[20.0, -20.0, 0.0]);
        assert!(session.set_component(id, Axis::Z, f64::NAN).is_err());
    }
}
