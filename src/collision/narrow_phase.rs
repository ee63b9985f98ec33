use crate::bodies::Body;
use crate::math::{push_sign, Vector2};

/// A world axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Result of the box-box test between A and B.
///
/// `delta` points from B's center to A's center. `overlap` holds the
/// penetration depth per axis; the boxes intersect only when both are
/// strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapResult {
    /// `center_a - center_b`
    pub delta: Vector2,

    /// `(half_a + half_b) - |delta|` per axis
    pub overlap: Vector2,
}

impl OverlapResult {
    /// Returns whether the boxes intersect
    #[inline]
    pub fn has_penetration(&self) -> bool {
        self.overlap.x > 0.0 && self.overlap.y > 0.0
    }

    /// Axis of least penetration. Ties go to Y.
    #[inline]
    pub fn min_axis(&self) -> Axis {
        if self.overlap.x < self.overlap.y {
            Axis::X
        } else {
            Axis::Y
        }
    }

    /// Penetration depth along `axis`
    #[inline]
    pub fn depth(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.overlap.x,
            Axis::Y => self.overlap.y,
        }
    }

    /// Direction (`1.0` or `-1.0`) A must move along `axis` to leave B
    #[inline]
    pub fn direction(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => push_sign(self.delta.x),
            Axis::Y => push_sign(self.delta.y),
        }
    }

    /// Minimum translation vector that moves A fully out of B
    #[inline]
    pub fn separation(&self) -> Vector2 {
        let axis = self.min_axis();
        let amount = self.depth(axis) * self.direction(axis);
        match axis {
            Axis::X => Vector2::new(amount, 0.0),
            Axis::Y => Vector2::new(0.0, amount),
        }
    }
}

/// Separating-axis test for two axis-aligned boxes given by center and half extents.
///
/// An axis on which either box has a zero or negative extent never reports a
/// positive overlap, so degenerate boxes are simply non-colliding.
#[inline]
pub fn compute_overlap(
    center_a: Vector2,
    half_a: Vector2,
    center_b: Vector2,
    half_b: Vector2,
) -> OverlapResult {
    let delta = center_a - center_b;
    let overlap = Vector2::new(
        axis_overlap(half_a.x, half_b.x, delta.x),
        axis_overlap(half_a.y, half_b.y, delta.y),
    );

    OverlapResult { delta, overlap }
}

#[inline]
fn axis_overlap(half_a: f32, half_b: f32, delta: f32) -> f32 {
    let depth = (half_a + half_b) - delta.abs();
    if half_a > 0.0 && half_b > 0.0 {
        depth
    } else {
        depth.min(0.0)
    }
}

/// Runs [`compute_overlap`] on two bodies. Rotation is never considered.
#[inline]
pub fn test_bodies(a: &Body, b: &Body) -> OverlapResult {
    compute_overlap(
        a.get_position(),
        a.half_extents(),
        b.get_position(),
        b.half_extents(),
    )
}
