use crate::bodies::Body;
use crate::collision::{
    collision_pair::CollisionPair,
    narrow_phase::{test_bodies, Axis},
};
use crate::core::{BodyHandle, BodyStorage, CollisionConfig, Storage};
use crate::math::Vector2;

use std::collections::{HashMap, HashSet};
use std::ops::{Add, AddAssign};

/// Outcome of one call to [`OverlapResolver::resolve`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Correction passes run
    pub iterations: u32,

    /// Pair corrections above epsilon computed over all passes
    pub corrected_pairs: usize,

    /// Whether no collected pair is left needing a correction above epsilon
    pub converged: bool,
}

/// Pending positional offset for one body during one pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Correction {
    /// Summed displacement from every pair touching the body
    pub offset: Vector2,

    /// Whether some pair pushed the body along X
    pub stop_x: bool,

    /// Whether some pair pushed the body along Y
    pub stop_y: bool,
}

impl Correction {
    fn along(axis: Axis, amount: f32) -> Self {
        match axis {
            Axis::X => Self {
                offset: Vector2::new(amount, 0.0),
                stop_x: true,
                stop_y: false,
            },
            Axis::Y => Self {
                offset: Vector2::new(0.0, amount),
                stop_x: false,
                stop_y: true,
            },
        }
    }
}

impl Add for Correction {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            offset: self.offset + rhs.offset,
            stop_x: self.stop_x || rhs.stop_x,
            stop_y: self.stop_y || rhs.stop_y,
        }
    }
}

impl AddAssign for Correction {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Per-body corrections of one pass
#[derive(Debug, Default)]
struct CorrectionBatch {
    intents: HashMap<BodyHandle, Correction>,
    corrected_pairs: usize,
}

impl CorrectionBatch {
    fn push(&mut self, handle: BodyHandle, correction: Correction) {
        *self.intents.entry(handle).or_default() += correction;
    }

    /// Sums intents per body; associative and commutative
    fn merge(mut self, mut other: Self) -> Self {
        if self.intents.len() < other.intents.len() {
            std::mem::swap(&mut self.intents, &mut other.intents);
        }
        for (handle, correction) in other.intents {
            self.push(handle, correction);
        }
        self.corrected_pairs += other.corrected_pairs;
        self
    }

    /// Adds the minimum-translation correction for `pair` when it exceeds `epsilon`
    fn add_pair(&mut self, bodies: &BodyStorage<Body>, pair: CollisionPair, epsilon: f32) {
        let (Some(a), Some(b)) = (bodies.get(pair.body_a), bodies.get(pair.body_b)) else {
            return;
        };

        if pending_correction(a, b) <= epsilon {
            return;
        }

        let overlap = test_bodies(a, b);
        let axis = overlap.min_axis();
        let depth = overlap.depth(axis);
        // Direction that moves A away from B; B moves the opposite way.
        let sign = overlap.direction(axis);

        match (a.is_static(), b.is_static()) {
            (false, false) => {
                let half = depth * 0.5 * sign;
                self.push(pair.body_a, Correction::along(axis, half));
                self.push(pair.body_b, Correction::along(axis, -half));
            }
            (true, false) => self.push(pair.body_b, Correction::along(axis, -depth * sign)),
            (false, true) => self.push(pair.body_a, Correction::along(axis, depth * sign)),
            (true, true) => return,
        }

        self.corrected_pairs += 1;
    }
}

/// Pushes overlapping bodies apart along their axis of least penetration.
///
/// Works from the collision state written by
/// [`CollisionDetector`](crate::collision::CollisionDetector): only pairs
/// recorded in partner sets are considered. Each pass computes one correction
/// per pair from current positions, sums them per body and applies the sums;
/// passes repeat until no pair would receive a correction above `epsilon` or
/// `max_iterations` is reached.
#[derive(Debug, Clone)]
pub struct OverlapResolver {
    /// Upper bound on passes per call
    max_iterations: u32,

    /// Anti-jitter threshold
    epsilon: f32,

    /// Whether to compute corrections on the rayon pool
    parallel: bool,
}

impl OverlapResolver {
    /// Creates a resolver from `config`
    pub fn new(config: &CollisionConfig) -> Self {
        Self {
            max_iterations: config.max_iterations.max(1),
            epsilon: config.epsilon.max(0.0),
            parallel: config.use_parallel(),
        }
    }

    /// Returns the pass limit
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Returns the anti-jitter threshold
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Resolves overlaps among the pairs recorded on `bodies`.
    ///
    /// Moves non-static bodies and zeroes their velocity on the corrected axis.
    /// Must run after detection within a tick.
    pub fn resolve(&self, bodies: &mut BodyStorage<Body>) -> ResolveReport {
        let mut report = ResolveReport::default();

        // Collision flags are fixed for the whole call, so the pair set is too.
        let pairs = collect_pairs(bodies);
        if pairs.is_empty() {
            report.converged = true;
            return report;
        }

        while report.iterations < self.max_iterations {
            let batch = self.compute_corrections(bodies, &pairs);
            report.iterations += 1;
            report.corrected_pairs += batch.corrected_pairs;

            let moved = self.apply(bodies, batch.intents);

            if !self.any_penetrating(bodies, &pairs) {
                report.converged = true;
                break;
            }

            if moved == 0 {
                // Every remaining correction is below epsilon; further passes repeat this one.
                break;
            }
        }

        if report.converged {
            log::debug!(
                "resolved {} pairs in {} iterations",
                pairs.len(),
                report.iterations
            );
        } else {
            log::warn!(
                "overlap resolution stopped after {} iterations with residual penetration",
                report.iterations
            );
        }

        report
    }

    /// Map step: one correction per pair, reduced per body
    fn compute_corrections(&self, bodies: &BodyStorage<Body>, pairs: &[CollisionPair]) -> CorrectionBatch {
        if self.parallel {
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;

                return pairs
                    .par_iter()
                    .fold(CorrectionBatch::default, |mut batch, &pair| {
                        batch.add_pair(bodies, pair, self.epsilon);
                        batch
                    })
                    .reduce(CorrectionBatch::default, CorrectionBatch::merge);
            }
        }

        pairs.iter().fold(CorrectionBatch::default(), |mut batch, &pair| {
            batch.add_pair(bodies, pair, self.epsilon);
            batch
        })
    }

    /// Applies summed corrections. Returns the number of bodies that moved.
    fn apply(&self, bodies: &mut BodyStorage<Body>, intents: HashMap<BodyHandle, Correction>) -> usize {
        let mut moved = 0;

        for (handle, correction) in intents {
            let Some(body) = bodies.get_mut(handle) else {
                continue;
            };

            let push_x = correction.stop_x && correction.offset.x.abs() > self.epsilon;
            let push_y = correction.stop_y && correction.offset.y.abs() > self.epsilon;
            if !push_x && !push_y {
                continue;
            }

            // Only an axis the body is actually pushed along loses its velocity
            let mut position = body.get_position();
            let mut velocity = body.get_velocity();
            if push_x {
                position.x += correction.offset.x;
                velocity.x = 0.0;
            }
            if push_y {
                position.y += correction.offset.y;
                velocity.y = 0.0;
            }

            body.set_position(position);
            body.set_velocity(velocity);
            moved += 1;
        }

        moved
    }

    /// Returns whether any pair would still receive a correction above epsilon
    fn any_penetrating(&self, bodies: &BodyStorage<Body>, pairs: &[CollisionPair]) -> bool {
        pairs.iter().any(|pair| {
            match (bodies.get(pair.body_a), bodies.get(pair.body_b)) {
                (Some(a), Some(b)) => pending_correction(a, b) > self.epsilon,
                _ => false,
            }
        })
    }
}

/// Size of the correction either movable body of the pair would receive this pass
fn pending_correction(a: &Body, b: &Body) -> f32 {
    if !is_resolvable(a, b) {
        return 0.0;
    }

    let overlap = test_bodies(a, b);
    if !overlap.has_penetration() {
        return 0.0;
    }

    let depth = overlap.depth(overlap.min_axis());
    if a.is_static() || b.is_static() {
        depth
    } else {
        depth * 0.5
    }
}

/// Triggers never take part in resolution, and two static bodies cannot be separated
fn is_resolvable(a: &Body, b: &Body) -> bool {
    !a.is_trigger() && !b.is_trigger() && !(a.is_static() && b.is_static())
}

/// Distinct pairs recorded on colliding, non-trigger bodies, in handle order
fn collect_pairs(bodies: &BodyStorage<Body>) -> Vec<CollisionPair> {
    let mut seen = HashSet::new();

    for (handle, body) in bodies.iter() {
        if !body.is_colliding() || body.is_trigger() || body.get_colliding_with().is_empty() {
            continue;
        }

        for &other in body.get_colliding_with() {
            if other != handle {
                seen.insert(CollisionPair::new(handle, other));
            }
        }
    }

    let mut pairs: Vec<CollisionPair> = seen.into_iter().collect();
    pairs.sort();
    pairs
}
