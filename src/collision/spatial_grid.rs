use crate::core::BodyHandle;
use crate::math::Vector2;

use std::collections::HashMap;

/// Integer cell coordinate: `(floor(x / cell_size), floor(y / cell_size))`
pub type CellKey = (i32, i32);

/// Uniform grid bucketing body handles by the cell their center falls in.
///
/// The grid has no removal: it is cleared and refilled every tick. Each body is
/// registered in exactly one cell, so a body can only be found through the
/// 3x3 neighborhood if its partner is at most `cell_size` away on each axis.
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    /// The cell size (both dimensions)
    cell_size: f32,

    /// The cells containing bodies, in insertion order per cell
    cells: HashMap<CellKey, Vec<BodyHandle>>,
}

impl SpatialHashGrid {
    /// Creates an empty grid
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Returns the cell size
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Gets the cell key for a position.
    ///
    /// Uses true division followed by floor, so a position on a cell boundary
    /// always lands in the cell whose lower edge it sits on. Coordinates beyond
    /// the `i32` range saturate to the outermost cell and NaN maps to cell 0.
    #[inline]
    pub fn cell_key(&self, position: Vector2) -> CellKey {
        (
            (position.x / self.cell_size).floor() as i32,
            (position.y / self.cell_size).floor() as i32,
        )
    }

    /// Registers a body in the cell containing `position`
    pub fn insert(&mut self, handle: BodyHandle, position: Vector2) {
        let key = self.cell_key(position);
        self.cells.entry(key).or_default().push(handle);
    }

    /// Writes every handle registered in the 3x3 block of cells around
    /// `position` into `buf`. The buffer is cleared first.
    pub fn query_neighbors_into(&self, position: Vector2, buf: &mut Vec<BodyHandle>) {
        buf.clear();
        let (cx, cy) = self.cell_key(position);

        for dx in -1..=1 {
            for dy in -1..=1 {
                // Neighbors past the outermost cell do not exist
                let (Some(x), Some(y)) = (cx.checked_add(dx), cy.checked_add(dy)) else {
                    continue;
                };

                if let Some(handles) = self.cells.get(&(x, y)) {
                    buf.extend_from_slice(handles);
                }
            }
        }
    }

    /// Returns every handle registered in the 3x3 block of cells around `position`
    pub fn query_neighbors(&self, position: Vector2) -> Vec<BodyHandle> {
        let mut buf = Vec::new();
        self.query_neighbors_into(position, &mut buf);
        buf
    }

    /// Returns the handles registered in a single cell
    pub fn cell(&self, key: CellKey) -> &[BodyHandle] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the keys of all non-empty cells, in no particular order
    pub fn occupied_cells(&self) -> Vec<CellKey> {
        self.cells.keys().copied().collect()
    }

    /// Returns the number of non-empty cells
    pub fn occupied_cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the total number of registered handles
    pub fn body_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Returns whether no handle is registered
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Removes every handle
    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_positions_use_floor_division() {
        let grid = SpatialHashGrid::new(100.0);

        assert_eq!(grid.cell_key(Vector2::new(0.0, 0.0)), (0, 0));
        assert_eq!(grid.cell_key(Vector2::new(99.9, 99.9)), (0, 0));
        assert_eq!(grid.cell_key(Vector2::new(100.0, 0.0)), (1, 0));
        assert_eq!(grid.cell_key(Vector2::new(-0.1, -100.0)), (-1, -1));
        assert_eq!(grid.cell_key(Vector2::new(-100.1, 250.0)), (-2, 2));
    }

    #[test]
    fn extreme_positions_saturate_at_the_grid_edge() {
        let mut grid = SpatialHashGrid::new(100.0);

        assert_eq!(grid.cell_key(Vector2::new(1.0e12, -1.0e12)), (i32::MAX, i32::MIN));
        assert_eq!(grid.cell_key(Vector2::new(f32::INFINITY, f32::NEG_INFINITY)), (i32::MAX, i32::MIN));
        assert_eq!(grid.cell_key(Vector2::new(f32::NAN, 50.0)), (0, 0));

        grid.insert(BodyHandle(0), Vector2::new(1.0e12, 0.0));
        grid.insert(BodyHandle(1), Vector2::new(f32::INFINITY, 0.0));
        grid.insert(BodyHandle(2), Vector2::new(-1.0e12, f32::NEG_INFINITY));

        assert_eq!(grid.query_neighbors(Vector2::new(1.0e12, 0.0)), vec![BodyHandle(0), BodyHandle(1)]);
        assert_eq!(grid.query_neighbors(Vector2::new(-1.0e12, f32::NEG_INFINITY)), vec![BodyHandle(2)]);
    }

    #[test]
    fn neighborhood_covers_three_by_three_block() {
        let mut grid = SpatialHashGrid::new(10.0);
        grid.insert(BodyHandle(0), Vector2::new(5.0, 5.0));
        grid.insert(BodyHandle(1), Vector2::new(-5.0, -5.0));
        grid.insert(BodyHandle(2), Vector2::new(15.0, -5.0));
        grid.insert(BodyHandle(3), Vector2::new(25.0, 5.0));
        grid.insert(BodyHandle(4), Vector2::new(5.0, -15.0));

        let mut found = grid.query_neighbors(Vector2::new(5.0, 5.0));
        found.sort();

        assert_eq!(found, vec![BodyHandle(0), BodyHandle(1), BodyHandle(2)]);
    }

    #[test]
    fn cell_keeps_insertion_order() {
        let mut grid = SpatialHashGrid::new(50.0);
        grid.insert(BodyHandle(7), Vector2::new(1.0, 1.0));
        grid.insert(BodyHandle(3), Vector2::new(2.0, 2.0));
        grid.insert(BodyHandle(5), Vector2::new(3.0, 3.0));

        assert_eq!(grid.cell((0, 0)), &[BodyHandle(7), BodyHandle(3), BodyHandle(5)]);
        assert!(grid.cell((1, 0)).is_empty());
        assert_eq!(grid.occupied_cell_count(), 1);
        assert_eq!(grid.body_count(), 3);
    }

    #[test]
    fn clear_empties_every_cell() {
        let mut grid = SpatialHashGrid::new(50.0);
        grid.insert(BodyHandle(0), Vector2::new(1.0, 1.0));
        grid.insert(BodyHandle(1), Vector2::new(400.0, 1.0));
        grid.clear();

        assert!(grid.is_empty());
        assert!(grid.occupied_cells().is_empty());
        assert!(grid.query_neighbors(Vector2::new(1.0, 1.0)).is_empty());
    }
}
