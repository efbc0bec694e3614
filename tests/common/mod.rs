//! Shared test utilities for vectorlab integration tests.
//!
//! World builders live in [`builders`], tolerance-based assertions in
//! [`comparison`]. Test crates import everything via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use vectorlab::{DrawCommand, DrawLayer, DrawList, Vector2};

/// Standard square viewport used by the reference scenarios
pub const SIDE: f64 = 600.0;

/// Screen position of the shaft tip of the vector drawn on `layer`
pub fn arrow_tip(list: &DrawList, layer: DrawLayer) -> Option<Vector2> {
    let origin = list.projection.origin;
    list.layer(layer).into_iter().find_map(|command| match command {
        DrawCommand::Line { from, to, .. } if *from == origin => Some(*to),
        _ => None,
    })
}

/// Labels drawn on one layer
pub fn layer_texts(list: &DrawList, layer: DrawLayer) -> Vec<String> {
    list.layer(layer)
        .into_iter()
        .filter_map(DrawCommand::text)
        .map(str::to_string)
        .collect()
}
