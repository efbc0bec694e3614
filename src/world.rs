//! The live, ordered collection of vectors being visualised.
//!
//! A [`World`] owns its vectors, hands out stable [`VectorId`]s and publishes
//! a [`WorldEvent`] after each mutation. Insertion order is display order:
//! the vector at index 0 is drawn as "v1" with the first palette color.

use crate::error::{Result, VectorError};
use crate::events::{Listener, Listeners, SubscriptionId, WorldEvent};
use crate::math::{self, NEGLIGIBLE};
use crate::types::{Vector3, VectorId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{trace, warn};

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in component order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit direction of this axis in scene space
    pub const fn unit(self) -> Vector3 {
        match self {
            Axis::X => Vector3::UNIT_X,
            Axis::Y => Vector3::UNIT_Y,
            Axis::Z => Vector3::UNIT_Z,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// A 2- or 3-component vector.
///
/// The dimension is fixed at construction. A 2D vector reads back `z = 0`
/// but has no Z component to set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    components: [f64; 3],
    dimension: usize,
}

impl Vector {
    /// Create a 2D vector
    pub const fn new_2d(x: f64, y: f64) -> Self {
        Vector {
            components: [x, y, 0.0],
            dimension: 2,
        }
    }

    /// Create a 3D vector
    pub const fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Vector {
            components: [x, y, z],
            dimension: 3,
        }
    }

    /// Create a vector from 2 or 3 components
    pub fn from_components(components: &[f64]) -> Result<Self> {
        match *components {
            [x, y] => Ok(Vector::new_2d(x, y)),
            [x, y, z] => Ok(Vector::new_3d(x, y, z)),
            _ => Err(VectorError::InvalidDimension(components.len())),
        }
    }

    /// Number of components (2 or 3)
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// The components, `dimension()` long
    pub fn components(&self) -> &[f64] {
        &self.components[..self.dimension]
    }

    pub fn x(&self) -> f64 {
        self.components[0]
    }

    pub fn y(&self) -> f64 {
        self.components[1]
    }

    /// Z component; 0 for 2D vectors
    pub fn z(&self) -> f64 {
        self.components[2]
    }

    /// Read one component
    pub fn get(&self, axis: Axis) -> Result<f64> {
        self.components()
            .get(axis.index())
            .copied()
            .ok_or(VectorError::AxisOutOfRange {
                axis,
                dimension: self.dimension,
            })
    }

    /// Euclidean length over all components
    pub fn magnitude(&self) -> f64 {
        math::magnitude(self.components())
    }

    /// Whether the Z component is large enough to need the 3D canvas
    pub fn has_depth(&self) -> bool {
        self.z().abs() > NEGLIGIBLE
    }

    /// Whether every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.components().iter().all(|c| c.is_finite())
    }

    /// Position in scene space (Z = 0 for 2D vectors)
    pub fn to_vector3(&self) -> Vector3 {
        Vector3::from_components(&self.components)
    }

    fn check_finite(&self) -> Result<()> {
        for axis in &Axis::ALL[..self.dimension] {
            let value = self.components[axis.index()];
            if !value.is_finite() {
                return Err(VectorError::NonFiniteComponent { axis: *axis, value });
            }
        }
        Ok(())
    }

    fn set(&mut self, axis: Axis, value: f64) -> Result<f64> {
        if axis.index() >= self.dimension {
            return Err(VectorError::AxisOutOfRange {
                axis,
                dimension: self.dimension,
            });
        }
        if !value.is_finite() {
            return Err(VectorError::NonFiniteComponent { axis, value });
        }
        let old = self.components[axis.index()];
        self.components[axis.index()] = value;
        Ok(old)
    }
}

impl Default for Vector {
    /// The vector a freshly added row starts with: (1, 0, 0)
    fn default() -> Self {
        Vector::new_3d(1.0, 0.0, 0.0)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dimension {
            2 => write!(f, "({}, {})", self.x(), self.y()),
            _ => write!(f, "({}, {}, {})", self.x(), self.y(), self.z()),
        }
    }
}

/// Ordered component lists of a world, for storage or transfer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub vectors: Vec<Vec<f64>>,
}

/// An ordered, observable collection of vectors
#[derive(Debug, Default)]
pub struct World {
    /// Vectors in display order
    vectors: IndexMap<VectorId, Vector, ahash::RandomState>,
    /// Last id handed out
    last_id: u64,
    listeners: Listeners,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a world from a snapshot, validating every vector
    pub fn from_snapshot(snapshot: &WorldSnapshot) -> Result<Self> {
        let mut world = World::new();
        for (i, components) in snapshot.vectors.iter().enumerate() {
            let vector = Vector::from_components(components).map_err(|e| {
                warn!(index = i, error = %e, "rejecting snapshot entry");
                VectorError::InvalidSnapshot(format!("entry {}: {}", i, e))
            })?;
            world
                .add(vector)
                .map_err(|e| VectorError::InvalidSnapshot(format!("entry {}: {}", i, e)))?;
        }
        Ok(world)
    }

    /// Component lists in display order
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            vectors: self.vectors.values().map(|v| v.components().to_vec()).collect(),
        }
    }

    fn allocate_id(&mut self) -> VectorId {
        self.last_id += 1;
        VectorId::new(self.last_id)
    }

    /// Append a vector; NaN and infinite components are rejected
    pub fn add(&mut self, vector: Vector) -> Result<VectorId> {
        if let Err(e) = vector.check_finite() {
            warn!(error = %e, "rejecting vector");
            return Err(e);
        }
        let id = self.allocate_id();
        self.vectors.insert(id, vector);
        let index = self.vectors.len() - 1;
        self.emit(WorldEvent::Added { id, index, vector });
        Ok(id)
    }

    /// Remove a vector, keeping the order of the others
    pub fn remove(&mut self, id: VectorId) -> Option<Vector> {
        let (index, _, vector) = self.vectors.shift_remove_full(&id)?;
        self.emit(WorldEvent::Removed { id, index, vector });
        Some(vector)
    }

    /// Remove every vector, front to back
    pub fn clear(&mut self) {
        while let Some(id) = self.vectors.keys().next().copied() {
            self.remove(id);
        }
    }

    /// Ordered snapshot of ids and values
    pub fn list(&self) -> Vec<(VectorId, Vector)> {
        self.vectors.iter().map(|(id, v)| (*id, *v)).collect()
    }

    /// Iterate over vectors in display order
    pub fn vectors(&self) -> impl Iterator<Item = &Vector> {
        self.vectors.values()
    }

    /// Iterate over ids in display order
    pub fn ids(&self) -> impl Iterator<Item = VectorId> + '_ {
        self.vectors.keys().copied()
    }

    /// Get a vector by id
    pub fn get(&self, id: VectorId) -> Option<&Vector> {
        self.vectors.get(&id)
    }

    /// Get the vector at a display position
    pub fn get_index(&self, index: usize) -> Option<(VectorId, &Vector)> {
        self.vectors.get_index(index).map(|(id, v)| (*id, v))
    }

    /// Display position of a vector
    pub fn index_of(&self, id: VectorId) -> Option<usize> {
        self.vectors.get_index_of(&id)
    }

    /// Number of vectors
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the world holds no vectors
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Set one component.
    ///
    /// Emits [`WorldEvent::ComponentChanged`] only when the value actually
    /// changes. Non-finite values are rejected and leave the vector untouched.
    pub fn set_component(&mut self, id: VectorId, axis: Axis, value: f64) -> Result<()> {
        let vector = self
            .vectors
            .get_mut(&id)
            .ok_or(VectorError::UnknownVector(id))?;
        let old = vector.set(axis, value).inspect_err(|e| {
            warn!(%id, error = %e, "rejecting component update");
        })?;
        if old != value {
            self.emit(WorldEvent::ComponentChanged {
                id,
                axis,
                old,
                new: value,
            });
        }
        Ok(())
    }

    /// Set X and Y together (Z is left as is).
    ///
    /// Both components are stored before any event goes out, so listeners
    /// never see the new X next to the old Y. Nothing changes on error.
    pub fn set_xy(&mut self, id: VectorId, x: f64, y: f64) -> Result<()> {
        let vector = self
            .vectors
            .get_mut(&id)
            .ok_or(VectorError::UnknownVector(id))?;
        let mut updated = *vector;
        let (old_x, old_y) = updated
            .set(Axis::X, x)
            .and_then(|old_x| updated.set(Axis::Y, y).map(|old_y| (old_x, old_y)))
            .inspect_err(|e| {
                warn!(%id, error = %e, "rejecting position update");
            })?;
        *vector = updated;

        for (axis, old, new) in [(Axis::X, old_x, x), (Axis::Y, old_y, y)] {
            if old != new {
                self.emit(WorldEvent::ComponentChanged { id, axis, old, new });
            }
        }
        Ok(())
    }

    /// 3 if any vector has a non-negligible Z component, else 2
    pub fn dimension(&self) -> usize {
        if self.vectors.values().any(Vector::has_depth) {
            3
        } else {
            2
        }
    }

    /// Register a listener, called after every mutation
    pub fn subscribe(&mut self, listener: impl FnMut(&WorldEvent, &World) + 'static) -> SubscriptionId {
        let boxed: Listener = Box::new(listener);
        self.listeners.add(boxed)
    }

    /// Remove a listener; returns false if it was not registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }

    fn emit(&mut self, event: WorldEvent) {
        trace!(%event, "world event");
        let mut listeners = std::mem::take(&mut self.listeners.entries);
        for (_, listener) in listeners.iter_mut() {
            listener(&event, &*self);
        }
        self.listeners.entries = listeners;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, EventLog};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(world: &mut World) -> Rc<RefCell<EventLog>> {
        let log = Rc::new(RefCell::new(EventLog::new()));
        let sink = Rc::clone(&log);
        world.subscribe(move |event, _| sink.borrow_mut().record(event));
        log
    }

    #[test]
    fn test_vector_dimensions() {
        let v = Vector::new_2d(1.0, 2.0);
        assert_eq!(v.dimension(), 2);
        assert_eq!(v.components(), &[1.0, 2.0]);
        assert_eq!(v.z(), 0.0);
        assert!(matches!(
            v.get(Axis::Z),
            Err(VectorError::AxisOutOfRange { axis: Axis::Z, dimension: 2 })
        ));

        let v = Vector::from_components(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(v.dimension(), 3);
        assert!(Vector::from_components(&[1.0]).is_err());
        assert!(Vector::from_components(&[1.0, 2.0, 3.0, 4.0]).is_err());
    }

    #[test]
    fn test_add_preserves_order() {
        let mut world = World::new();
        let a = world.add(Vector::new_2d(1.0, 0.0)).unwrap();
        let b = world.add(Vector::new_2d(0.0, 1.0)).unwrap();
        let c = world.add(Vector::default()).unwrap();

        assert_eq!(world.ids().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(world.index_of(c), Some(2));

        world.remove(b);
        assert_eq!(world.ids().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(world.index_of(c), Some(1));
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut world = World::new();
        let a = world.add(Vector::default()).unwrap();
        world.remove(a);
        let b = world.add(Vector::default()).unwrap();
        assert_ne!(a, b);
        assert!(world.get(a).is_none());
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut world = World::new();
        assert!(world.add(Vector::new_2d(f64::NAN, 0.0)).is_err());
        assert!(world.is_empty());

        let id = world.add(Vector::new_3d(1.0, 2.0, 3.0)).unwrap();
        let err = world.set_component(id, Axis::Z, f64::INFINITY).unwrap_err();
        assert!(matches!(err, VectorError::NonFiniteComponent { axis: Axis::Z, .. }));
        assert_eq!(world.get(id).unwrap().z(), 3.0);
    }

    #[test]
    fn test_events() {
        let mut world = World::new();
        let log = recording(&mut world);

        let id = world.add(Vector::new_3d(1.0, 0.0, 0.0)).unwrap();
        world.set_component(id, Axis::Y, 2.0).unwrap();
        // same value again: no event
        world.set_component(id, Axis::Y, 2.0).unwrap();
        world.remove(id);

        let log = log.borrow();
        let kinds: Vec<_> = log.iter().map(WorldEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::Added, EventKind::ComponentChanged, EventKind::Removed]
        );
    }

    #[test]
    fn test_listener_sees_applied_state() {
        let mut world = World::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        world.subscribe(move |event, w| {
            let v = w.get(event.id()).copied();
            sink.borrow_mut().push((w.len(), v));
        });

        let id = world.add(Vector::new_2d(1.0, 1.0)).unwrap();
        world.set_component(id, Axis::X, 4.0).unwrap();
        world.remove(id);

        let seen = seen.borrow();
        assert_eq!(seen[0], (1, Some(Vector::new_2d(1.0, 1.0))));
        assert_eq!(seen[1], (1, Some(Vector::new_2d(4.0, 1.0))));
        assert_eq!(seen[2], (0, None));
    }

    #[test]
    fn test_set_xy_applies_both_before_notifying() {
        let mut world = World::new();
        let id = world.add(Vector::new_2d(1.0, 1.0)).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        world.subscribe(move |event, w| {
            let v = w.get(event.id()).copied();
            sink.borrow_mut().push(v);
        });

        world.set_xy(id, 3.0, -2.0).unwrap();
        assert_eq!(*seen.borrow(), vec![Some(Vector::new_2d(3.0, -2.0)); 2]);

        // only Y moves: one event
        world.set_xy(id, 3.0, 5.0).unwrap();
        assert_eq!(seen.borrow().len(), 3);

        // a bad Y leaves X untouched too
        assert!(world.set_xy(id, 7.0, f64::NAN).is_err());
        assert_eq!(world.get(id).unwrap(), &Vector::new_2d(3.0, 5.0));
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let mut world = World::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let sub = world.subscribe(move |_, _| *sink.borrow_mut() += 1);

        world.add(Vector::default()).unwrap();
        assert!(world.unsubscribe(sub));
        world.add(Vector::default()).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_clear_emits_removals() {
        let mut world = World::new();
        world.add(Vector::default()).unwrap();
        world.add(Vector::default()).unwrap();
        let log = recording(&mut world);

        world.clear();
        assert!(world.is_empty());
        let log = log.borrow();
        assert_eq!(log.of_kind(EventKind::Removed).len(), 2);
        // each removal reports index 0 since the front is removed first
        assert!(log.iter().all(|e| matches!(e, WorldEvent::Removed { index: 0, .. })));
    }

    #[test]
    fn test_dimension_threshold() {
        let mut world = World::new();
        assert_eq!(world.dimension(), 2);
        let id = world.add(Vector::new_3d(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(world.dimension(), 2);
        world.set_component(id, Axis::Z, 1e-7).unwrap();
        assert_eq!(world.dimension(), 2);
        world.set_component(id, Axis::Z, -2e-6).unwrap();
        assert_eq!(world.dimension(), 3);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut world = World::new();
        world.add(Vector::new_2d(1.5, -2.0)).unwrap();
        world.add(Vector::new_3d(0.0, 1.0, 2.0)).unwrap();

        let snapshot = world.snapshot();
        assert_eq!(snapshot.vectors, vec![vec![1.5, -2.0], vec![0.0, 1.0, 2.0]]);

        let restored = World::from_snapshot(&snapshot).unwrap();
        let values: Vec<_> = restored.vectors().copied().collect();
        let original: Vec<_> = world.vectors().copied().collect();
        assert_eq!(values, original);
    }

    #[test]
    fn test_snapshot_rejects_bad_entries() {
        let bad = WorldSnapshot {
            vectors: vec![vec![1.0, 2.0], vec![1.0]],
        };
        assert!(matches!(
            World::from_snapshot(&bad),
            Err(VectorError::InvalidSnapshot(_))
        ));
    }
}
