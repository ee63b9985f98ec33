pub mod math;
pub mod core;
pub mod bodies;
pub mod collision;

/// Re-export common types for easier usage
pub use crate::core::{BodyHandle, BodyStorage, CollisionConfig, CollisionWorld, Storage};
pub use crate::bodies::{Body, BodyType};
pub use crate::collision::{detect_collisions, resolve_overlaps, CollisionDetector, OverlapResolver};
pub use crate::math::Vector2;

/// Error types for the collision engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Capacity exceeded: {0}")]
        CapacityExceeded(String),
    }
}

/// Result type for collision engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
