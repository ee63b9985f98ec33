use crate::bodies::Body;
use crate::collision::spatial_grid::{CellKey, SpatialHashGrid};
use crate::core::{BodyStorage, Storage};

/// Grid-backed broad phase.
///
/// `rebuild` resets every body's transient collision state before the grid is
/// filled, so no body can carry a flag or partner from a previous tick into
/// pair testing.
#[derive(Debug, Clone)]
pub struct BroadPhase {
    /// The grid holding this tick's bodies
    grid: SpatialHashGrid,

    /// Largest width or height seen during the last rebuild
    max_extent: f32,

    /// Number of bodies registered during the last rebuild
    body_count: usize,
}

impl BroadPhase {
    /// Creates a broad phase with the given cell size
    pub fn new(cell_size: f32) -> Self {
        Self {
            grid: SpatialHashGrid::new(cell_size),
            max_extent: 0.0,
            body_count: 0,
        }
    }

    /// Clears the grid and registers every enabled body at its current position
    pub fn rebuild(&mut self, bodies: &mut BodyStorage<Body>) {
        self.grid.clear();
        self.max_extent = 0.0;
        self.body_count = 0;

        for (handle, body) in bodies.iter_mut() {
            body.reset_collision_state();

            if !body.is_enabled() {
                continue;
            }

            self.grid.insert(handle, body.get_position());
            self.max_extent = self.max_extent.max(body.get_size().max_component());
            self.body_count += 1;
        }

        if self.max_extent > self.grid.cell_size() {
            log::warn!(
                "largest body extent {} exceeds cell size {}; neighbor search may miss overlaps",
                self.max_extent,
                self.grid.cell_size()
            );
        }
    }

    /// Returns the keys of all occupied cells
    pub fn occupied_cells(&self) -> Vec<CellKey> {
        self.grid.occupied_cells()
    }

    /// Returns the grid built by the last rebuild
    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }

    /// Returns the largest width or height seen during the last rebuild
    pub fn max_extent(&self) -> f32 {
        self.max_extent
    }

    /// Returns the number of bodies registered during the last rebuild
    pub fn body_count(&self) -> usize {
        self.body_count
    }
}
