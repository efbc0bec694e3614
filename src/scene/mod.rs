//! Auto-fitting 3D scene.
//!
//! [`SceneEngine::render`] builds a [`SceneGraph`] in scene pixels with Y
//! up: three bidirectional axes, optional lattices on the XY, XZ and YZ
//! planes, optional tick cubes, and one arrow per non-zero vector. The
//! scale is chosen so the longest vector plus some padding always covers
//! the same pixel budget.

pub mod camera;
pub mod mesh;
pub mod node;

pub use camera::{project, ViewTransform};
pub use mesh::{build_cone_mesh, ConeMesh};
pub use node::{SceneGraph, SceneNode, Shape, VectorArrow};

use crate::config::{CameraSettings, SceneStyle};
use crate::flags::DisplayFlags;
use crate::math::{self, lattice_range, MAX_LATTICE_CELLS, NEGLIGIBLE};
use crate::types::{palette_3d, Color, Transform, Vector3, VectorId};
use crate::world::{Axis, Vector, World};
use tracing::debug;

/// Line direction and offset direction of each grid family
const GRID_FAMILIES: [(Axis, Axis); 6] = [
    // XY plane
    (Axis::X, Axis::Y),
    (Axis::Y, Axis::X),
    // XZ plane
    (Axis::X, Axis::Z),
    (Axis::Z, Axis::X),
    // YZ plane
    (Axis::Y, Axis::Z),
    (Axis::Z, Axis::Y),
];

fn axis_color(axis: Axis) -> Color {
    match axis {
        Axis::X => Color::RED,
        Axis::Y => Color::GREEN,
        Axis::Z => Color::BLUE,
    }
}

fn axis_name(axis: Axis) -> &'static str {
    match axis {
        Axis::X => "X",
        Axis::Y => "Y",
        Axis::Z => "Z",
    }
}

/// Rotation carrying local +Y onto `axis`
fn along(axis: Axis) -> Transform {
    Transform::rotation_between(Vector3::UNIT_Y, axis.unit(), Vector3::UNIT_X)
}

/// Renders a world as an orbitable 3D scene
#[derive(Debug, Clone, Default)]
pub struct SceneEngine {
    style: SceneStyle,
    camera: CameraSettings,
}

impl SceneEngine {
    pub fn new(style: SceneStyle, camera: CameraSettings) -> Self {
        SceneEngine { style, camera }
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    pub fn camera(&self) -> &CameraSettings {
        &self.camera
    }

    /// Span in world units and scale in pixels per unit
    pub fn fit(&self, world: &World) -> (f64, f64) {
        let max_len = world.vectors().map(Vector::magnitude).fold(1.0, f64::max);
        let span = self
            .style
            .min_span
            .max(max_len * self.style.span_padding)
            .min(f64::MAX);
        (span, self.style.pixel_budget / span)
    }

    /// Build the scene for the current world and orbit angles
    pub fn render(&self, world: &World, flags: DisplayFlags, view: &ViewTransform) -> SceneGraph {
        let (span_units, scale) = self.fit(world);
        debug!(
            scale,
            span = span_units,
            vectors = world.len(),
            pitch = view.pitch,
            yaw = view.yaw,
            "building scene"
        );

        let mut scene = SceneGraph {
            scale,
            span_units,
            camera: self.camera,
            view: *view,
            axes: Vec::new(),
            grid: Vec::new(),
            ticks: Vec::new(),
            vectors: Vec::new(),
        };

        if flags.contains(DisplayFlags::GRID) {
            scene.grid = self.build_grid(span_units, scale);
        }
        if flags.contains(DisplayFlags::TICKS) {
            scene.ticks = self.build_ticks(span_units, scale);
        }
        scene.axes = self.build_axes(span_units * scale);

        for (index, (id, v)) in world.list().into_iter().enumerate() {
            if v.magnitude() <= NEGLIGIBLE {
                continue;
            }
            scene.vectors.push(self.build_arrow(index, id, &v, scale));
        }
        scene
    }

    fn build_axes(&self, len: f64) -> Vec<SceneNode> {
        let s = &self.style;
        let mut nodes = Vec::with_capacity(9);
        for axis in Axis::ALL {
            let color = axis_color(axis);
            let dir = axis.unit();
            nodes.push(SceneNode::cylinder(s.axis_shaft_radius, 2.0 * len, color).placed(along(axis)));
            nodes.push(
                SceneNode::cone(
                    build_cone_mesh(s.axis_head_radius, s.axis_head_length, s.cone_divisions),
                    color,
                )
                .placed(along(axis))
                .translated(dir * (len + s.axis_head_length / 2.0)),
            );
            nodes.push(
                SceneNode::text(axis_name(axis), color.darker())
                    .translated(dir * (len + s.axis_head_length + s.axis_label_gap)),
            );
        }
        nodes
    }

    fn build_grid(&self, span_units: f64, scale: f64) -> Vec<SceneNode> {
        let step = math::lattice_step(span_units, MAX_LATTICE_CELLS);
        let lines = math::lattice_cells(span_units, step, MAX_LATTICE_CELLS, true);
        let spacing = step * scale;
        let length = lines as f64 * 2.0 * spacing;
        let mut nodes = Vec::with_capacity(GRID_FAMILIES.len() * (2 * lines + 1));
        for (line_axis, offset_axis) in GRID_FAMILIES {
            for k in lattice_range(lines) {
                nodes.push(
                    SceneNode::cylinder(self.style.grid_line_radius, length, Color::GRID_3D)
                        .placed(along(line_axis))
                        .translated(offset_axis.unit() * (k as f64 * spacing)),
                );
            }
        }
        nodes
    }

    fn build_ticks(&self, span_units: f64, scale: f64) -> Vec<SceneNode> {
        let step = math::lattice_step(span_units, MAX_LATTICE_CELLS);
        let ticks = math::lattice_cells(span_units, step, MAX_LATTICE_CELLS, true);
        let spacing = step * scale;
        let mut nodes = Vec::with_capacity(Axis::ALL.len() * 2 * ticks);
        for k in lattice_range(ticks).filter(|k| *k != 0) {
            for axis in Axis::ALL {
                nodes.push(
                    SceneNode::cube(self.style.tick_size, Color::DARK_GRAY)
                        .translated(axis.unit() * (k as f64 * spacing)),
                );
            }
        }
        nodes
    }

    fn build_arrow(&self, index: usize, id: VectorId, v: &Vector, scale: f64) -> VectorArrow {
        let s = &self.style;
        let color = palette_3d(index);
        let length = v.magnitude() * scale;
        let head_length = length * s.arrow_head_ratio;
        let shaft_length = length - head_length;

        let shaft = SceneNode::cylinder(s.arrow_shaft_radius, shaft_length.max(s.min_shaft_length), color)
            .translated(Vector3::new(0.0, shaft_length / 2.0, 0.0));
        let head = SceneNode::cone(
            build_cone_mesh(head_length * s.arrow_head_radius_ratio, head_length, s.cone_divisions),
            color,
        )
        .translated(Vector3::new(0.0, length - head_length / 2.0, 0.0));
        let caption = SceneNode::text(
            format!("v{} ({:.1}, {:.1}, {:.1})", index + 1, v.x(), v.y(), v.z()),
            color.darker(),
        )
        .translated(Vector3::new(0.0, length + s.axis_head_length, 0.0));

        VectorArrow {
            index,
            id,
            color,
            length,
            orientation: Transform::rotation_between(Vector3::UNIT_Y, v.to_vector3(), Vector3::UNIT_X),
            shaft,
            head,
            caption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_of(vectors: &[Vector]) -> World {
        let mut world = World::new();
        for v in vectors {
            world.add(*v).unwrap();
        }
        world
    }

    fn close(a: Vector3, b: Vector3) -> bool {
        a.distance(&b) < 1e-9
    }

    #[test]
    fn test_fit() {
        let engine = SceneEngine::default();
        // short vectors keep the minimum span
        let (span, scale) = engine.fit(&world_of(&[Vector::new_3d(1.0, 0.0, 1.0)]));
        assert_eq!(span, 2.0);
        assert_eq!(scale, 100.0);

        let (span, scale) = engine.fit(&world_of(&[Vector::new_3d(0.0, 0.0, 5.0)]));
        assert!((span - 6.0).abs() < 1e-12);
        assert!((scale - 200.0 / 6.0).abs() < 1e-9);

        assert_eq!(engine.fit(&World::new()), (2.0, 100.0));
    }

    #[test]
    fn test_axes() {
        let engine = SceneEngine::default();
        let scene = engine.render(&World::new(), DisplayFlags::empty(), &ViewTransform::default());
        assert_eq!(scene.axes.len(), 9);
        assert_eq!(scene.labels(), vec!["X", "Y", "Z"]);

        // span 2, scale 100: shafts reach 200 px each way
        let x_shaft = &scene.axes[0];
        assert!(close(x_shaft.direction(), Vector3::UNIT_X));
        assert_eq!(x_shaft.shape, Shape::Cylinder { radius: 1.0, height: 400.0 });

        let z_head = &scene.axes[7];
        assert!(close(z_head.position(), Vector3::new(0.0, 0.0, 206.0)));
        assert!(close(z_head.direction(), Vector3::UNIT_Z));

        let y_label = &scene.axes[5];
        assert!(close(y_label.position(), Vector3::new(0.0, 218.0, 0.0)));
        assert_eq!(y_label.color, Color::GREEN.darker());
    }

    #[test]
    fn test_grid_and_ticks() {
        let engine = SceneEngine::default();
        let world = world_of(&[Vector::new_3d(1.0, 0.0, 1.0)]);
        let scene = engine.render(&world, DisplayFlags::SCENE, &ViewTransform::default());

        // span 2: k in -2..=2 for six families
        assert_eq!(scene.grid.len(), 30);
        for line in &scene.grid {
            assert_eq!(line.shape, Shape::Cylinder { radius: 0.3, height: 400.0 });
            assert_eq!(line.color, Color::GRID_3D);
        }
        // every plane gets lines, not just the ground
        assert!(scene.grid.iter().any(|n| close(n.position(), Vector3::new(0.0, 0.0, 200.0))
            && close(n.direction(), Vector3::UNIT_X)));
        assert!(scene.grid.iter().any(|n| close(n.position(), Vector3::new(0.0, 100.0, 0.0))
            && close(n.direction(), Vector3::UNIT_Z)));

        // four nonzero offsets on each of three axes
        assert_eq!(scene.ticks.len(), 12);
        assert!(scene.ticks.iter().all(|n| n.position() != Vector3::ZERO));
        assert!(scene
            .ticks
            .iter()
            .any(|n| n.position() == Vector3::new(0.0, -200.0, 0.0)));

        let bare = engine.render(&world, DisplayFlags::empty(), &ViewTransform::default());
        assert!(bare.grid.is_empty());
        assert!(bare.ticks.is_empty());
    }

    #[test]
    fn test_arrow_orientation() {
        let engine = SceneEngine::default();
        let world = world_of(&[Vector::new_3d(1.0, 2.0, 2.0)]);
        let scene = engine.render(&world, DisplayFlags::empty(), &ViewTransform::default());
        let arrow = scene.vector(0).unwrap();

        // |v| = 3, span 3.6
        assert!((scene.scale - 200.0 / 3.6).abs() < 1e-9);
        assert!((arrow.length - 3.0 * scene.scale).abs() < 1e-9);
        assert!(close(arrow.tip(), Vector3::new(1.0, 2.0, 2.0) * scene.scale));
        assert_eq!(arrow.label(), "v1 (1.0, 2.0, 2.0)");
        assert_eq!(arrow.color, Color::RED);

        let [shaft, head, _] = arrow.nodes();
        assert!(close(shaft.direction(), Vector3::new(1.0, 2.0, 2.0) / 3.0));
        let head_length = arrow.length * 0.12;
        let expected = Vector3::new(1.0, 2.0, 2.0) / 3.0 * (arrow.length - head_length / 2.0);
        assert!(close(head.position(), expected));
        match &head.shape {
            Shape::Cone(mesh) => {
                assert!((mesh.height - head_length).abs() < 1e-12);
                assert!((mesh.radius - head_length * 0.35).abs() < 1e-12);
                assert_eq!(mesh.divisions, 24);
            }
            other => panic!("expected cone, got {:?}", other),
        }
    }

    #[test]
    fn test_antiparallel_arrow() {
        let engine = SceneEngine::default();
        let world = world_of(&[Vector::new_3d(0.0, -2.0, 0.0)]);
        let scene = engine.render(&world, DisplayFlags::empty(), &ViewTransform::default());
        let arrow = scene.vector(0).unwrap();
        assert!(close(arrow.tip(), Vector3::new(0.0, -2.0 * scene.scale, 0.0)));
    }

    #[test]
    fn test_zero_vectors_keep_index() {
        let engine = SceneEngine::default();
        let world = world_of(&[
            Vector::new_3d(0.0, 0.0, 0.0),
            Vector::new_3d(0.0, 0.0, 1.0),
        ]);
        let scene = engine.render(&world, DisplayFlags::empty(), &ViewTransform::default());

        assert_eq!(scene.vectors.len(), 1);
        let arrow = &scene.vectors[0];
        assert_eq!(arrow.index, 1);
        assert_eq!(arrow.color, Color::DODGER_BLUE);
        assert!(arrow.label().starts_with("v2 "));
        assert!(scene.vector(0).is_none());
    }

    #[test]
    fn test_negligible_threshold_is_exclusive() {
        let engine = SceneEngine::default();
        let world = world_of(&[
            Vector::new_3d(0.0, 0.0, NEGLIGIBLE),
            Vector::new_3d(0.0, 0.0, 2.0 * NEGLIGIBLE),
        ]);
        let scene = engine.render(&world, DisplayFlags::empty(), &ViewTransform::default());
        assert_eq!(scene.vectors.len(), 1);
        assert_eq!(scene.vectors[0].index, 1);
    }

    #[test]
    fn test_huge_vector_keeps_lattice_bounded() {
        let engine = SceneEngine::default();
        let world = world_of(&[Vector::new_3d(1e300, 0.0, 1.0)]);
        let scene = engine.render(&world, DisplayFlags::SCENE, &ViewTransform::default());

        assert!(!scene.grid.is_empty());
        assert!(scene.grid.len() <= GRID_FAMILIES.len() * (2 * MAX_LATTICE_CELLS + 1));
        assert!(!scene.ticks.is_empty());
        assert!(scene.ticks.len() <= Axis::ALL.len() * 2 * MAX_LATTICE_CELLS);

        // the lattice still covers roughly the pixel budget
        for node in scene.grid.iter().chain(&scene.ticks) {
            let p = node.position();
            assert!(p.x.abs() < 250.0 && p.y.abs() < 250.0 && p.z.abs() < 250.0, "{}", p);
        }
        let arrow = scene.vector(0).unwrap();
        assert!((arrow.length - 200.0 / 1.2).abs() < 1e-6);
        assert!(close(arrow.tip().normalize(), Vector3::UNIT_X));
    }

    #[test]
    fn test_short_shaft_floor() {
        let engine = SceneEngine::default();
        let world = world_of(&[Vector::new_3d(1.0, 0.0, 0.0), Vector::new_3d(0.0, 0.0, 0.005)]);
        let scene = engine.render(&world, DisplayFlags::empty(), &ViewTransform::default());
        let arrow = scene.vector(1).unwrap();
        match arrow.shaft.shape {
            Shape::Cylinder { height, .. } => assert_eq!(height, 1.0),
            ref other => panic!("expected cylinder, got {:?}", other),
        }
    }

    #[test]
    fn test_projected_tip_in_view() {
        let engine = SceneEngine::default();
        let world = world_of(&[Vector::new_3d(3.0, 4.0, 5.0)]);
        let scene = engine.render(&world, DisplayFlags::SCENE, &ViewTransform::default());
        let viewport = crate::types::Viewport::new(600.0, 600.0);
        let tip = scene.project(scene.vectors[0].tip(), viewport).unwrap();
        assert!(viewport.bounds().contains(tip));
    }
}
