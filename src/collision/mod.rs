mod collision_pair;
mod collision_detector;
mod broad_phase;
mod narrow_phase;
mod overlap_resolver;
mod spatial_grid;

pub use self::collision_pair::CollisionPair;
pub use self::collision_detector::{CollisionDetector, DetectionStats};
pub use self::broad_phase::BroadPhase;
pub use self::narrow_phase::{compute_overlap, test_bodies, Axis, OverlapResult};
pub use self::overlap_resolver::{Correction, OverlapResolver, ResolveReport};
pub use self::spatial_grid::{CellKey, SpatialHashGrid};

use crate::bodies::Body;
use crate::core::{BodyStorage, CollisionConfig};

/// Runs one detection pass over `bodies` with a throwaway detector.
///
/// Rewrites every body's collision flag and partner set. Callers that want
/// begin/end events across ticks should keep a [`CollisionDetector`] instead.
/// `config` is not validated; see [`CollisionDetector::new`] for how an
/// unusable cell size is handled.
pub fn detect_collisions(bodies: &mut BodyStorage<Body>, config: &CollisionConfig) -> DetectionStats {
    CollisionDetector::new(config).detect(bodies)
}

/// Resolves the overlaps recorded by the last detection pass on `bodies`.
///
/// `config` is not validated; `max_iterations` is raised to at least one and
/// `epsilon` to at least zero.
pub fn resolve_overlaps(bodies: &mut BodyStorage<Body>, config: &CollisionConfig) -> ResolveReport {
    OverlapResolver::new(config).resolve(bodies)
}
