use crate::core::BodyHandle;
use crate::collision::CollisionPair;
use std::collections::VecDeque;

/// How a pair's overlap changed between two detection passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEventType {
    /// Found this pass, absent the pass before
    Begin,

    /// Found in both passes
    Persist,

    /// Found the pass before, absent this pass
    End,
}

/// A change in the overlap state of one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub event_type: CollisionEventType,

    /// Lower handle of the pair
    pub body_a: BodyHandle,

    /// Higher handle of the pair
    pub body_b: BodyHandle,
}

impl CollisionEvent {
    pub fn new(event_type: CollisionEventType, pair: CollisionPair) -> Self {
        Self {
            event_type,
            body_a: pair.body_a,
            body_b: pair.body_b,
        }
    }

    pub fn pair(&self) -> CollisionPair {
        CollisionPair::new(self.body_a, self.body_b)
    }

    /// Returns whether `body` is one side of the pair
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.pair().contains(body)
    }
}

/// Lifecycle changes of the body set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEventType {
    Added,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyEvent {
    pub event_type: BodyEventType,
    pub body: BodyHandle,
}

/// FIFO of events produced by a [`CollisionWorld`](crate::core::CollisionWorld).
///
/// Nothing is dropped automatically: callers drain or clear the queue between
/// ticks. Collision events of one pass are queued begin first, then persist,
/// then end, each group in pair order.
#[derive(Debug, Default)]
pub struct EventQueue {
    collisions: VecDeque<CollisionEvent>,
    bodies: VecDeque<BodyEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_collision(&mut self, event: CollisionEvent) {
        self.collisions.push_back(event);
    }

    pub fn push_body(&mut self, event_type: BodyEventType, body: BodyHandle) {
        self.bodies.push_back(BodyEvent { event_type, body });
    }

    /// Takes the oldest collision event
    pub fn pop_collision(&mut self) -> Option<CollisionEvent> {
        self.collisions.pop_front()
    }

    /// Takes the oldest body event
    pub fn pop_body(&mut self) -> Option<BodyEvent> {
        self.bodies.pop_front()
    }

    /// Removes and yields every queued collision event, oldest first
    pub fn drain_collisions(&mut self) -> impl Iterator<Item = CollisionEvent> + '_ {
        self.collisions.drain(..)
    }

    /// Removes and yields every queued body event, oldest first
    pub fn drain_bodies(&mut self) -> impl Iterator<Item = BodyEvent> + '_ {
        self.bodies.drain(..)
    }

    /// Queued collision events of one kind, oldest first
    pub fn collisions_of_type(&self, event_type: CollisionEventType) -> impl Iterator<Item = &CollisionEvent> + '_ {
        self.collisions.iter().filter(move |event| event.event_type == event_type)
    }

    /// Queued collision events naming `body` on either side, oldest first
    pub fn collisions_involving(&self, body: BodyHandle) -> impl Iterator<Item = &CollisionEvent> + '_ {
        self.collisions.iter().filter(move |event| event.involves(body))
    }

    pub fn collision_count(&self) -> usize {
        self.collisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collisions.is_empty() && self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.collisions.clear();
        self.bodies.clear();
    }
}
