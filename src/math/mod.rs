mod vector;
mod aabb;

pub use vector::Vector2;
pub use aabb::Aabb;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f32 = 1.0e-6;

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f32) -> bool {
    a.abs() < EPSILON
}

/// Returns `1.0` for strictly positive values and `-1.0` otherwise.
///
/// Unlike `f32::signum`, zero maps to `-1.0`, so coincident centers always
/// separate in a fixed direction.
#[inline]
pub fn push_sign(value: f32) -> f32 {
    if value > 0.0 { 1.0 } else { -1.0 }
}
