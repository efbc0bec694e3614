//! World change events and subscriptions.
//!
//! A [`crate::World`] publishes a [`WorldEvent`] after every mutation has been
//! fully applied. Subscribers are plain closures that receive the event and a
//! read-only view of the world, so a redraw triggered from a listener always
//! sees the post-mutation state.

use crate::types::VectorId;
use crate::world::{Axis, Vector, World};
use std::fmt;

/// Structural change kinds, for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A vector was appended.
    Added,
    /// A vector was taken out.
    Removed,
    /// One component of an existing vector changed value.
    ComponentChanged,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "Added"),
            Self::Removed => write!(f, "Removed"),
            Self::ComponentChanged => write!(f, "ComponentChanged"),
        }
    }
}

/// A single change to a world.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldEvent {
    /// `vector` now sits at display position `index`.
    Added {
        id: VectorId,
        index: usize,
        vector: Vector,
    },
    /// `vector` was at display position `index` before removal.
    Removed {
        id: VectorId,
        index: usize,
        vector: Vector,
    },
    /// Component `axis` of vector `id` went from `old` to `new`.
    ComponentChanged {
        id: VectorId,
        axis: Axis,
        old: f64,
        new: f64,
    },
}

impl WorldEvent {
    /// The kind of change.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Added { .. } => EventKind::Added,
            Self::Removed { .. } => EventKind::Removed,
            Self::ComponentChanged { .. } => EventKind::ComponentChanged,
        }
    }

    /// The vector the event is about.
    pub fn id(&self) -> VectorId {
        match self {
            Self::Added { id, .. } | Self::Removed { id, .. } | Self::ComponentChanged { id, .. } => *id,
        }
    }

    /// Whether this change can move a vector in or out of the XY plane.
    pub fn touches_depth(&self) -> bool {
        match self {
            Self::Added { .. } | Self::Removed { .. } => true,
            Self::ComponentChanged { axis, .. } => *axis == Axis::Z,
        }
    }
}

impl fmt::Display for WorldEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { id, index, vector } => write!(f, "[Added] {} at {}: {}", id, index, vector),
            Self::Removed { id, index, vector } => write!(f, "[Removed] {} from {}: {}", id, index, vector),
            Self::ComponentChanged { id, axis, old, new } => {
                write!(f, "[ComponentChanged] {}.{}: {} -> {}", id, axis, old, new)
            }
        }
    }
}

/// Token returned by [`World::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked synchronously after each world mutation.
pub type Listener = Box<dyn FnMut(&WorldEvent, &World)>;

/// Registered listeners in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    pub(crate) entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        self.next += 1;
        let id = SubscriptionId(self.next);
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sid, _)| *sid != id);
        self.entries.len() != before
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// Records events in arrival order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    items: Vec<WorldEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append an event.
    pub fn record(&mut self, event: &WorldEvent) {
        self.items.push(event.clone());
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterate over all events.
    pub fn iter(&self) -> std::slice::Iter<'_, WorldEvent> {
        self.items.iter()
    }

    /// All events of a specific kind.
    pub fn of_kind(&self, kind: EventKind) -> Vec<&WorldEvent> {
        self.items.iter().filter(|e| e.kind() == kind).collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a WorldEvent;
    type IntoIter = std::slice::Iter<'a, WorldEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
