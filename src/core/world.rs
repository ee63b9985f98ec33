use crate::core::{BodyEventType, BodyHandle, BodyStorage, CollisionConfig, EventQueue};
use crate::core::storage::Storage;
use crate::bodies::Body;
use crate::collision::{CollisionDetector, DetectionStats, OverlapResolver, ResolveReport};
use crate::error::PhysicsError;
use crate::Result;

/// Owns a set of bodies and runs the per-tick collision pipeline on them
pub struct CollisionWorld {
    /// All bodies in the world
    bodies: BodyStorage<Body>,

    /// Configuration for detection and resolution
    config: CollisionConfig,

    /// Finds overlapping pairs
    detector: CollisionDetector,

    /// Pushes overlapping bodies apart
    resolver: OverlapResolver,

    /// Queue of collision and body events
    events: EventQueue,

    /// Number of completed ticks
    tick: u64,
}

impl CollisionWorld {
    /// Creates a new world with default settings
    pub fn new() -> Self {
        let config = CollisionConfig::default();
        Self {
            detector: CollisionDetector::new(&config),
            resolver: OverlapResolver::new(&config),
            bodies: BodyStorage::new(),
            config,
            events: EventQueue::new(),
            tick: 0,
        }
    }

    /// Creates a new world with the given configuration
    pub fn with_config(config: CollisionConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            detector: CollisionDetector::new(&config),
            resolver: OverlapResolver::new(&config),
            bodies: BodyStorage::new(),
            config,
            events: EventQueue::new(),
            tick: 0,
        })
    }

    /// Returns the configuration
    pub fn get_config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Returns the number of completed ticks
    pub fn get_tick(&self) -> u64 {
        self.tick
    }

    /// Adds a body to the world and returns its handle.
    ///
    /// Panics after `u32::MAX + 1` additions, see [`BodyStorage::try_add`].
    pub fn add_body(&mut self, body: Body) -> BodyHandle {
        let handle = self.bodies.add(body);

        self.events.push_body(BodyEventType::Added, handle);

        handle
    }

    /// Removes a body from the world.
    ///
    /// Other bodies may still list the handle as a partner until the next
    /// detection pass; resolution skips such stale partners.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Result<Body> {
        self.bodies.get_body(handle)?;

        self.events.push_body(BodyEventType::Removed, handle);

        self.bodies.remove(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle))
        })
    }

    /// Gets a reference to a body by its handle
    pub fn get_body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.get_body(handle)
    }

    /// Gets a mutable reference to a body by its handle
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.bodies.get_body_mut(handle)
    }

    /// Returns the body storage
    pub fn bodies(&self) -> &BodyStorage<Body> {
        &self.bodies
    }

    /// Returns the number of bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Returns the detector
    pub fn detector(&self) -> &CollisionDetector {
        &self.detector
    }

    /// Returns the event queue
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Returns a mutable reference to the event queue
    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// Advances every non-static body by its velocity
    pub fn integrate(&mut self, dt: f32) {
        for (_, body) in self.bodies.iter_mut() {
            body.integrate(dt);
        }
    }

    /// Finds overlapping pairs, flags the bodies and queues begin/persist/end events
    pub fn detect_collisions(&mut self) -> DetectionStats {
        let stats = self.detector.detect(&mut self.bodies);

        for event in self.detector.collision_events() {
            self.events.push_collision(event);
        }

        stats
    }

    /// Pushes apart the bodies flagged by the last detection pass
    pub fn resolve_overlaps(&mut self) -> ResolveReport {
        self.resolver.resolve(&mut self.bodies)
    }

    /// Runs one tick: integrate, detect, resolve
    pub fn step(&mut self, dt: f32) -> ResolveReport {
        self.integrate(dt);
        self.detect_collisions();
        let report = self.resolve_overlaps();
        self.tick += 1;
        report
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new()
    }
}
