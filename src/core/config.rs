use crate::error::PhysicsError;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Configuration parameters for collision detection and overlap resolution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct CollisionConfig {
    /// Side length of a spatial hash cell.
    ///
    /// Must be at least the largest body extent, otherwise the 3x3 neighborhood
    /// search can miss overlapping pairs.
    pub cell_size: f32,

    /// Upper bound on resolver passes per tick
    pub max_iterations: u32,

    /// Accumulated corrections at or below this magnitude are not applied, and
    /// residual penetration at or below it counts as resolved
    pub epsilon: f32,

    /// Whether to spread cell scanning and correction over the rayon pool.
    /// Ignored unless the crate is built with the `parallel` feature.
    pub parallel: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_size: 250.0,
            max_iterations: 8,
            epsilon: 1.0e-4,
            parallel: true,
        }
    }
}

impl CollisionConfig {
    /// Creates a configuration with the given cell size and default resolver settings
    pub fn with_cell_size(cell_size: f32) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    /// Checks that every parameter is usable
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "cell_size must be finite and positive, got {}",
                self.cell_size
            )));
        }

        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }

        if self.max_iterations == 0 {
            return Err(PhysicsError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns whether work should actually be dispatched to the thread pool
    pub(crate) fn use_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}
