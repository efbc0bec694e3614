//! Auto-fitting 2D projection.
//!
//! [`ProjectionEngine::render`] turns the current world into a [`DrawList`].
//! The scale is recomputed from scratch on every call so the longest visible
//! component always fits inside the viewport minus a fixed label margin.
//! World Y grows upwards, screen Y downwards, hence the flip in
//! [`Projection::to_screen`].

pub mod drag;
pub mod draw;

pub use drag::DragController;
pub use draw::{DrawCommand, DrawItem, DrawLayer, DrawList, Stroke};

use crate::config::ProjectionStyle;
use crate::flags::DisplayFlags;
use crate::math::{self, lattice_range, MAX_LATTICE_CELLS};
use crate::types::{palette_2d, Color, Vector2, Viewport};
use crate::world::{Vector, World};
use std::f64::consts::PI;
use tracing::debug;

/// World-to-screen mapping of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position of the world origin
    pub origin: Vector2,
    /// Pixels per world unit
    pub scale: f64,
}

impl Projection {
    pub const fn new(origin: Vector2, scale: f64) -> Self {
        Projection { origin, scale }
    }

    /// Screen position of world point `(x, y)`
    pub fn to_screen(&self, x: f64, y: f64) -> Vector2 {
        Vector2::new(self.origin.x + x * self.scale, self.origin.y - y * self.scale)
    }

    /// World point under screen position `screen`
    pub fn to_world(&self, screen: Vector2) -> [f64; 2] {
        [
            (screen.x - self.origin.x) / self.scale,
            (self.origin.y - screen.y) / self.scale,
        ]
    }
}

/// Pixels per unit that fit `max_abs` units on each side of the origin.
///
/// Falls back to `style.default_scale` when there is nothing to fit or the
/// viewport is too small to hold the margin.
pub fn fit_scale(max_abs: f64, viewport: Viewport, style: &ProjectionStyle) -> f64 {
    let max = if style.floor_at_one { max_abs.max(1.0) } else { max_abs };
    if max == 0.0 || viewport.is_empty() {
        return style.default_scale;
    }
    let sx = (viewport.width / 2.0 - style.margin) / max;
    let sy = (viewport.height / 2.0 - style.margin) / max;
    let scale = sx.min(sy);
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        style.default_scale
    }
}

/// Signed sweep from angle `a1` to `a2` along the shorter path, in `(-π, π]`
pub fn arc_sweep(a1: f64, a2: f64) -> f64 {
    let mut sweep = a2 - a1;
    if sweep <= -PI {
        sweep += 2.0 * PI;
    }
    if sweep > PI {
        sweep -= 2.0 * PI;
    }
    sweep
}

/// Per-side line count and spacing in world units of a lattice over `extent` units
fn lattice(extent: f64, round_up: bool) -> (usize, f64) {
    let step = math::lattice_step(extent, MAX_LATTICE_CELLS);
    (math::lattice_cells(extent, step, MAX_LATTICE_CELLS, round_up), step)
}

/// Label of the `k`-th tick; none at the origin or past `f64` range
fn tick_label(k: i64, step: f64) -> Option<String> {
    let value = k as f64 * step;
    if k == 0 || !value.is_finite() {
        None
    } else if value.abs() < 1e6 {
        Some(format!("{}", value))
    } else {
        Some(format!("{:e}", value))
    }
}

fn planar(v: &Vector) -> [f64; 2] {
    [v.x(), v.y()]
}

/// Angle in degrees and orthogonality of two planar vectors
fn pair_metrics(a: &[f64; 2], b: &[f64; 2]) -> (f64, bool) {
    // both operands have two components, so neither call can fail
    let angle = math::angle_degrees(a, b).unwrap_or(0.0);
    let orthogonal = math::is_orthogonal(a, b).unwrap_or(false);
    (angle, orthogonal)
}

/// Renders a world as a flat 2D picture
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    style: ProjectionStyle,
}

impl ProjectionEngine {
    pub fn new(style: ProjectionStyle) -> Self {
        ProjectionEngine { style }
    }

    pub fn style(&self) -> &ProjectionStyle {
        &self.style
    }

    fn is_visible(&self, v: &Vector) -> bool {
        self.style.hide_below.map_or(true, |min| v.magnitude() > min)
    }

    /// Largest |x| or |y| the frame must fit
    pub fn max_abs_component(&self, world: &World, flags: DisplayFlags) -> f64 {
        let mut max = world
            .vectors()
            .map(|v| v.x().abs().max(v.y().abs()))
            .fold(0.0, f64::max);

        let fit_sum = self.style.always_fit_sum || flags.contains(DisplayFlags::RESULT);
        if fit_sum {
            if let (Some((_, a)), Some((_, b))) = (world.get_index(0), world.get_index(1)) {
                max = max.max((a.x() + b.x()).abs()).max((a.y() + b.y()).abs());
            }
        }
        max
    }

    /// Mapping the next frame will use
    pub fn projection(&self, world: &World, flags: DisplayFlags, viewport: Viewport) -> Projection {
        let max = self.max_abs_component(world, flags);
        Projection::new(viewport.center(), fit_scale(max, viewport, &self.style))
    }

    /// Draw the whole frame
    pub fn render(&self, world: &World, flags: DisplayFlags, viewport: Viewport) -> DrawList {
        let projection = self.projection(world, flags, viewport);
        debug!(
            scale = projection.scale,
            vectors = world.len(),
            width = viewport.width,
            height = viewport.height,
            "projecting world"
        );

        let mut out = DrawList::new(viewport, projection);
        out.push(
            DrawLayer::Background,
            DrawCommand::Fill {
                min: Vector2::ZERO,
                max: Vector2::new(viewport.width, viewport.height),
                color: Color::WHITE,
            },
        );

        if flags.contains(DisplayFlags::GRID) {
            self.draw_grid(&mut out);
        }
        self.draw_axes(&mut out);
        if flags.contains(DisplayFlags::TICKS) {
            self.draw_ticks(&mut out);
        }

        for (index, v) in world.vectors().enumerate() {
            if self.is_visible(v) {
                let label = self.style.labels.label(index);
                self.draw_arrow(&mut out, DrawLayer::Vector(index), planar(v), palette_2d(index), &label, flags);
            }
        }

        let (Some((_, a)), Some((_, b))) = (world.get_index(0), world.get_index(1)) else {
            return out;
        };
        if !(self.is_visible(a) && self.is_visible(b)) {
            return out;
        }
        let (pa, pb) = (planar(a), planar(b));

        if flags.contains(DisplayFlags::RESULT) {
            let sum = [pa[0] + pb[0], pa[1] + pb[1]];
            let label = self.style.sum_label.clone();
            self.draw_arrow(&mut out, DrawLayer::Sum, sum, Color::GREEN, &label, flags);
        }

        let (angle, orthogonal) = pair_metrics(&pa, &pb);
        if flags.contains(DisplayFlags::ANGLE) {
            self.draw_angle_arc(&mut out, &pa, &pb, angle);
        }
        if flags.contains(DisplayFlags::ORTHOGONALITY) && orthogonal {
            self.draw_orthogonality_marker(&mut out);
        }
        out
    }

    fn draw_grid(&self, out: &mut DrawList) {
        let Projection { origin, scale } = out.projection;
        let Viewport { width, height } = out.viewport;
        let stroke = Stroke::new(Color::GRID, 1.0);

        let (columns, step) = lattice(width / (2.0 * scale), true);
        for i in lattice_range(columns) {
            let x = origin.x + i as f64 * (step * scale);
            out.push(
                DrawLayer::Grid,
                DrawCommand::Line {
                    from: Vector2::new(x, 0.0),
                    to: Vector2::new(x, height),
                    stroke,
                },
            );
        }

        let (rows, step) = lattice(height / (2.0 * scale), true);
        for j in lattice_range(rows) {
            let y = origin.y - j as f64 * (step * scale);
            out.push(
                DrawLayer::Grid,
                DrawCommand::Line {
                    from: Vector2::new(0.0, y),
                    to: Vector2::new(width, y),
                    stroke,
                },
            );
        }
    }

    fn draw_axes(&self, out: &mut DrawList) {
        let origin = out.projection.origin;
        let Viewport { width, height } = out.viewport;
        let stroke = Stroke::new(Color::LIGHT_GRAY, 1.0);
        out.push(
            DrawLayer::Axis,
            DrawCommand::Line {
                from: Vector2::new(origin.x, 0.0),
                to: Vector2::new(origin.x, height),
                stroke,
            },
        );
        out.push(
            DrawLayer::Axis,
            DrawCommand::Line {
                from: Vector2::new(0.0, origin.y),
                to: Vector2::new(width, origin.y),
                stroke,
            },
        );
    }

    fn draw_ticks(&self, out: &mut DrawList) {
        let Projection { origin, scale } = out.projection;
        let Viewport { width, height } = out.viewport;
        let half = self.style.tick_half_length;
        let stroke = Stroke::new(Color::GRAY, 1.0);

        let (nx, step) = lattice(width / (2.0 * scale), false);
        for i in lattice_range(nx) {
            let x = origin.x + i as f64 * (step * scale);
            out.push(
                DrawLayer::Tick,
                DrawCommand::Line {
                    from: Vector2::new(x, origin.y - half),
                    to: Vector2::new(x, origin.y + half),
                    stroke,
                },
            );
            if let Some(content) = tick_label(i, step) {
                out.push(
                    DrawLayer::Tick,
                    DrawCommand::Text {
                        position: Vector2::new(x - 4.0, origin.y + 16.0),
                        content,
                        color: Color::GRAY,
                    },
                );
            }
        }

        let (ny, step) = lattice(height / (2.0 * scale), false);
        for j in lattice_range(ny) {
            let y = origin.y - j as f64 * (step * scale);
            out.push(
                DrawLayer::Tick,
                DrawCommand::Line {
                    from: Vector2::new(origin.x - half, y),
                    to: Vector2::new(origin.x + half, y),
                    stroke,
                },
            );
            if let Some(content) = tick_label(j, step) {
                out.push(
                    DrawLayer::Tick,
                    DrawCommand::Text {
                        position: Vector2::new(origin.x + 6.0, y + 4.0),
                        content,
                        color: Color::GRAY,
                    },
                );
            }
        }
    }

    fn draw_arrow(
        &self,
        out: &mut DrawList,
        layer: DrawLayer,
        [x, y]: [f64; 2],
        color: Color,
        label: &str,
        flags: DisplayFlags,
    ) {
        let origin = out.projection.origin;
        let tip = out.projection.to_screen(x, y);
        let stroke = Stroke::new(color, self.style.vector_stroke);
        out.push(layer, DrawCommand::Line { from: origin, to: tip, stroke });

        // two head segments, mirrored about the shaft
        let heading = (origin.y - tip.y).atan2(tip.x - origin.x);
        let len = self.style.arrow_head_length;
        let spread = self.style.arrow_head_angle.to_radians();
        for side in [heading - spread, heading + spread] {
            let end = Vector2::new(tip.x - len * side.cos(), tip.y + len * side.sin());
            out.push(layer, DrawCommand::Line { from: tip, to: end, stroke });
        }

        let content = if flags.contains(DisplayFlags::COORDINATES) {
            format!("{} ({:.1}, {:.1})", label, x, y)
        } else {
            label.to_string()
        };
        let offset = self.style.label_offset;
        out.push(
            layer,
            DrawCommand::Text {
                position: Vector2::new(tip.x + offset, tip.y - offset),
                content,
                color: color.darker(),
            },
        );
    }

    fn draw_angle_arc(&self, out: &mut DrawList, a: &[f64; 2], b: &[f64; 2], angle: f64) {
        let origin = out.projection.origin;
        let r = self.style.arc_radius;
        let a1 = a[1].atan2(a[0]);
        let sweep = arc_sweep(a1, b[1].atan2(b[0]));
        let segments = self.style.arc_segments.max(1);

        let points = (0..=segments)
            .map(|k| {
                let t = a1 + sweep * k as f64 / segments as f64;
                Vector2::new(origin.x + r * t.cos(), origin.y - r * t.sin())
            })
            .collect();
        out.push(
            DrawLayer::AngleArc,
            DrawCommand::Polyline {
                points,
                stroke: Stroke::new(Color::DARK_ORANGE, 1.5),
            },
        );

        let mid = a1 + sweep / 2.0;
        out.push(
            DrawLayer::AngleArc,
            DrawCommand::Text {
                position: Vector2::new(origin.x + (r + 10.0) * mid.cos(), origin.y - (r + 10.0) * mid.sin()),
                content: format!("{:.1}°", angle),
                color: Color::DARK_ORANGE.darker(),
            },
        );
    }

    fn draw_orthogonality_marker(&self, out: &mut DrawList) {
        let origin = out.projection.origin;
        out.push(
            DrawLayer::Orthogonality,
            DrawCommand::Circle {
                center: origin,
                radius: self.style.orthogonality_radius,
                stroke: Stroke::new(Color::MEDIUM_PURPLE, 2.0),
            },
        );
        out.push(
            DrawLayer::Orthogonality,
            DrawCommand::Text {
                position: Vector2::new(origin.x + 12.0, origin.y - 12.0),
                content: "⊥".to_string(),
                color: Color::MEDIUM_PURPLE,
            },
        );
    }
}
