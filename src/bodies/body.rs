use crate::bodies::{body_flags::BodyFlags, BodyType};
use crate::core::BodyHandle;
use crate::math::{Aabb, Vector2};

use std::collections::HashSet;

/// An axis-aligned rectangular body taking part in collision handling.
///
/// The position is the center of the rectangle and `size` its full width and
/// height. Collision state (`is_colliding` and the partner set) is rewritten by
/// the detector every tick; partners are stored as handles into the owning
/// [`BodyStorage`](crate::core::BodyStorage), never as references.
#[derive(Debug, Clone)]
pub struct Body {
    /// Center of the body in world space
    position: Vector2,

    /// Full width and height
    size: Vector2,

    /// Linear velocity, zeroed per axis when the resolver pushes the body
    velocity: Vector2,

    /// The body's type (dynamic or static)
    body_type: BodyType,

    /// The body's flags
    flags: BodyFlags,

    /// Whether the body overlapped anything during the last detection pass
    is_colliding: bool,

    /// Bodies overlapping this one during the last detection pass
    colliding_with: HashSet<BodyHandle>,
}

impl Body {
    /// Creates a new body with the given center, size and type
    pub fn new(position: Vector2, size: Vector2, body_type: BodyType) -> Self {
        Self {
            position,
            size,
            velocity: Vector2::zero(),
            body_type,
            flags: BodyFlags::empty(),
            is_colliding: false,
            colliding_with: HashSet::new(),
        }
    }

    /// Creates a new dynamic body
    pub fn new_dynamic(position: Vector2, size: Vector2) -> Self {
        Self::new(position, size, BodyType::Dynamic)
    }

    /// Creates a new static body
    pub fn new_static(position: Vector2, size: Vector2) -> Self {
        Self::new(position, size, BodyType::Static)
    }

    /// Creates a trigger volume that reports overlaps but is never resolved
    pub fn new_trigger(position: Vector2, size: Vector2) -> Self {
        Self::new(position, size, BodyType::Dynamic).with_flags(BodyFlags::TRIGGER)
    }

    /// Sets the initial velocity
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Adds the given flags
    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    /// Returns the body's center
    pub fn get_position(&self) -> Vector2 {
        self.position
    }

    /// Sets the body's center
    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    /// Returns the full width and height
    pub fn get_size(&self) -> Vector2 {
        self.size
    }

    /// Sets the full width and height
    pub fn set_size(&mut self, size: Vector2) {
        self.size = size;
    }

    /// Returns half the width and height
    pub fn half_extents(&self) -> Vector2 {
        self.size * 0.5
    }

    /// Returns the world-space bounding box
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size)
    }

    /// Returns the body's velocity
    pub fn get_velocity(&self) -> Vector2 {
        self.velocity
    }

    /// Sets the body's velocity
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    /// Returns the body's type
    pub fn get_body_type(&self) -> BodyType {
        self.body_type
    }

    /// Sets the body's type
    pub fn set_body_type(&mut self, body_type: BodyType) {
        self.body_type = body_type;
    }

    /// Returns the body's flags
    pub fn get_flags(&self) -> BodyFlags {
        self.flags
    }

    /// Sets the body's flags
    pub fn set_flags(&mut self, flags: BodyFlags) {
        self.flags = flags;
    }

    /// Returns whether the body is immovable
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Returns whether the body is a trigger volume
    pub fn is_trigger(&self) -> bool {
        self.flags.contains(BodyFlags::TRIGGER)
    }

    /// Returns whether the body takes part in detection
    pub fn is_enabled(&self) -> bool {
        !self.flags.contains(BodyFlags::DISABLED)
    }

    /// Returns whether the body overlapped anything during the last detection pass
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    /// Returns the handles of the bodies overlapping this one
    pub fn get_colliding_with(&self) -> &HashSet<BodyHandle> {
        &self.colliding_with
    }

    /// Returns whether `other` was recorded as overlapping this body
    pub fn is_colliding_with(&self, other: BodyHandle) -> bool {
        self.colliding_with.contains(&other)
    }

    /// Clears the collision flag and the partner set
    pub fn reset_collision_state(&mut self) {
        self.is_colliding = false;
        self.colliding_with.clear();
    }

    /// Records an overlap with `other`
    pub(crate) fn add_collision(&mut self, other: BodyHandle) {
        self.is_colliding = true;
        self.colliding_with.insert(other);
    }

    /// Advances the position by the current velocity. Static bodies never move.
    pub fn integrate(&mut self, dt: f32) {
        if self.is_static() {
            return;
        }

        self.position += self.velocity * dt;
    }
}
