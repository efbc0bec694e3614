//! World and session builders shared by the integration tests.

#![allow(dead_code)]

use vectorlab::{Vector, VectorId, VectorSession, World, WorldSnapshot};

/// World holding the given component lists, in order
pub fn world_of(components: &[&[f64]]) -> World {
    let mut world = World::new();
    for c in components {
        let vector = Vector::from_components(c).unwrap();
        world.add(vector).unwrap();
    }
    world
}

/// The single-vector world of the auto-fit reference scenario
pub fn reference_world() -> World {
    world_of(&[&[3.0, 4.0]])
}

/// Five vectors mixing 2D and 3D, one of them zero
pub fn mixed_world() -> World {
    world_of(&[
        &[1.0, 2.0],
        &[-3.0, 0.5, 0.0],
        &[0.0, 0.0],
        &[2.0, -1.0, 4.0],
        &[-0.25, -6.0],
    ])
}

/// Snapshot of [`mixed_world`]
pub fn mixed_snapshot() -> WorldSnapshot {
    mixed_world().snapshot()
}

/// Session with one default vector, returning its id
pub fn session_with_default() -> (VectorSession, VectorId) {
    let mut session = VectorSession::new();
    let id = session.add_default_vector().unwrap();
    (session, id)
}
