use crate::bodies::Body;
use crate::collision::{
    broad_phase::BroadPhase,
    collision_pair::CollisionPair,
    narrow_phase::test_bodies,
    spatial_grid::{CellKey, SpatialHashGrid},
};
use crate::core::{BodyHandle, BodyStorage, CollisionConfig, CollisionEvent, CollisionEventType, Storage};

use std::collections::HashSet;

/// Counters describing one detection pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DetectionStats {
    /// Bodies registered in the grid
    pub bodies: usize,

    /// Non-empty grid cells
    pub occupied_cells: usize,

    /// Narrow-phase box tests performed
    pub narrow_phase_tests: usize,

    /// Distinct overlapping pairs found
    pub colliding_pairs: usize,

    /// Largest body width or height
    pub max_extent: f32,
}

/// Per-worker result of scanning a batch of cells
#[derive(Debug, Default)]
struct PairAccumulator {
    pairs: HashSet<CollisionPair>,
    narrow_phase_tests: usize,
    scratch: Vec<BodyHandle>,
}

impl PairAccumulator {
    /// Set union plus counter sum; symmetric and idempotent on the pair set
    fn merge(mut self, mut other: Self) -> Self {
        if self.pairs.len() < other.pairs.len() {
            std::mem::swap(&mut self.pairs, &mut other.pairs);
        }
        self.pairs.extend(other.pairs);
        self.narrow_phase_tests += other.narrow_phase_tests;
        self
    }

    /// Tests every body of `cell` against its 3x3 neighborhood
    fn scan_cell(&mut self, grid: &SpatialHashGrid, bodies: &BodyStorage<Body>, cell: CellKey) {
        for &handle in grid.cell(cell) {
            let Some(body) = bodies.get(handle) else {
                continue;
            };

            let mut neighbors = std::mem::take(&mut self.scratch);
            grid.query_neighbors_into(body.get_position(), &mut neighbors);

            for &other in &neighbors {
                // Neighborhoods are symmetric, so each unordered pair is reached
                // from both ends; only the lower handle tests it.
                if other <= handle {
                    continue;
                }

                let pair = CollisionPair::new(handle, other);
                if self.pairs.contains(&pair) {
                    continue;
                }

                let Some(other_body) = bodies.get(other) else {
                    continue;
                };

                self.narrow_phase_tests += 1;
                if test_bodies(body, other_body).has_penetration() {
                    self.pairs.insert(pair);
                }
            }

            self.scratch = neighbors;
        }
    }
}

/// Finds every overlapping pair of bodies each tick and writes the result
/// back onto the bodies.
///
/// Detection runs in three steps: the broad phase rebuilds the grid and resets
/// collision state, occupied cells are scanned (on the rayon pool when
/// enabled) into per-worker pair sets, and the merged set is written back as
/// flags and partner handles.
#[derive(Debug, Clone)]
pub struct CollisionDetector {
    /// The grid broad phase
    broad_phase: BroadPhase,

    /// Whether to scan cells on the rayon pool
    parallel: bool,

    /// Pairs found by the last pass
    current_pairs: HashSet<CollisionPair>,

    /// Pairs found by the pass before that
    previous_pairs: HashSet<CollisionPair>,

    /// Counters of the last pass
    stats: DetectionStats,
}

impl CollisionDetector {
    /// Creates a detector using the cell size and parallelism of `config`.
    ///
    /// The config is not validated here. A zero, negative or non-finite cell
    /// size is replaced by the default one so that cell keys stay meaningful.
    pub fn new(config: &CollisionConfig) -> Self {
        let mut cell_size = config.cell_size;
        if !cell_size.is_finite() || cell_size <= 0.0 {
            let fallback = CollisionConfig::default().cell_size;
            log::warn!("unusable cell size {}, falling back to {}", cell_size, fallback);
            cell_size = fallback;
        }

        Self {
            broad_phase: BroadPhase::new(cell_size),
            parallel: config.use_parallel(),
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
            stats: DetectionStats::default(),
        }
    }

    /// Runs one detection pass over `bodies`.
    ///
    /// Every body's `is_colliding` flag and partner set is rewritten. Must run
    /// after movement and before overlap resolution within a tick.
    pub fn detect(&mut self, bodies: &mut BodyStorage<Body>) -> DetectionStats {
        self.broad_phase.rebuild(bodies);
        let cells = self.broad_phase.occupied_cells();

        let found = find_pairs(self.broad_phase.grid(), bodies, &cells, self.parallel);

        for pair in &found.pairs {
            mark_pair(bodies, *pair);
        }

        self.stats = DetectionStats {
            bodies: self.broad_phase.body_count(),
            occupied_cells: cells.len(),
            narrow_phase_tests: found.narrow_phase_tests,
            colliding_pairs: found.pairs.len(),
            max_extent: self.broad_phase.max_extent(),
        };

        log::trace!(
            "detection: {} bodies, {} cells, {} tests, {} pairs",
            self.stats.bodies,
            self.stats.occupied_cells,
            self.stats.narrow_phase_tests,
            self.stats.colliding_pairs
        );

        self.previous_pairs = std::mem::replace(&mut self.current_pairs, found.pairs);
        self.stats
    }

    /// Returns the pairs found by the last pass
    pub fn collision_pairs(&self) -> &HashSet<CollisionPair> {
        &self.current_pairs
    }

    /// Returns the pairs found by the last pass in handle order
    pub fn sorted_pairs(&self) -> Vec<CollisionPair> {
        let mut pairs: Vec<CollisionPair> = self.current_pairs.iter().copied().collect();
        pairs.sort();
        pairs
    }

    /// Returns whether two bodies overlapped during the last pass
    pub fn are_colliding(&self, body_a: BodyHandle, body_b: BodyHandle) -> bool {
        body_a != body_b && self.current_pairs.contains(&CollisionPair::new(body_a, body_b))
    }

    /// Classifies the last pass against the one before it.
    ///
    /// Events are ordered by kind (begin, persist, end) and then by pair.
    pub fn collision_events(&self) -> Vec<CollisionEvent> {
        let mut begin = Vec::new();
        let mut persist = Vec::new();
        for pair in &self.current_pairs {
            if self.previous_pairs.contains(pair) {
                persist.push(*pair);
            } else {
                begin.push(*pair);
            }
        }

        let mut end: Vec<CollisionPair> = self
            .previous_pairs
            .difference(&self.current_pairs)
            .copied()
            .collect();

        begin.sort();
        persist.sort();
        end.sort();

        let tagged = |pairs: Vec<CollisionPair>, event_type: CollisionEventType| {
            pairs.into_iter().map(move |pair| CollisionEvent::new(event_type, pair))
        };

        tagged(begin, CollisionEventType::Begin)
            .chain(tagged(persist, CollisionEventType::Persist))
            .chain(tagged(end, CollisionEventType::End))
            .collect()
    }

    /// Returns the counters of the last pass
    pub fn last_stats(&self) -> DetectionStats {
        self.stats
    }

    /// Returns the broad phase
    pub fn broad_phase(&self) -> &BroadPhase {
        &self.broad_phase
    }
}

/// Scans `cells` into a single merged accumulator
fn find_pairs(
    grid: &SpatialHashGrid,
    bodies: &BodyStorage<Body>,
    cells: &[CellKey],
    parallel: bool,
) -> PairAccumulator {
    if parallel {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            return cells
                .par_iter()
                .fold(PairAccumulator::default, |mut acc, &cell| {
                    acc.scan_cell(grid, bodies, cell);
                    acc
                })
                .reduce(PairAccumulator::default, PairAccumulator::merge);
        }
    }

    cells.iter().fold(PairAccumulator::default(), |mut acc, &cell| {
        acc.scan_cell(grid, bodies, cell);
        acc
    })
}

/// Records `pair` on both bodies. A stale handle leaves the pair unrecorded.
fn mark_pair(bodies: &mut BodyStorage<Body>, pair: CollisionPair) {
    if bodies.get(pair.body_a).is_none() || bodies.get(pair.body_b).is_none() {
        log::trace!("skipping pair {:?} with a removed body", pair);
        return;
    }

    if let Some(body) = bodies.get_mut(pair.body_a) {
        body.add_collision(pair.body_b);
    }
    if let Some(body) = bodies.get_mut(pair.body_b) {
        body.add_collision(pair.body_a);
    }
}
