use rect_collide::math::{push_sign, Aabb, Vector2};
use approx::assert_relative_eq;

#[test]
fn test_vector2_operations() {
    let v1 = Vector2::new(1.0, 2.0);
    let v2 = Vector2::new(4.0, -6.0);

    // Addition
    let sum = v1 + v2;
    assert_eq!(sum, Vector2::new(5.0, -4.0));

    // Subtraction
    let diff = v2 - v1;
    assert_eq!(diff, Vector2::new(3.0, -8.0));

    // Scalar multiplication from both sides
    assert_eq!(v1 * 2.0, Vector2::new(2.0, 4.0));
    assert_eq!(0.5 * v2, Vector2::new(2.0, -3.0));

    // Dot product
    assert_eq!(v1.dot(&v2), 1.0 * 4.0 + 2.0 * -6.0);

    // Length
    assert_relative_eq!(Vector2::new(3.0, 4.0).length(), 5.0);

    // Component helpers
    assert_eq!(v2.abs(), Vector2::new(4.0, 6.0));
    assert_eq!(v2.max_component(), 4.0);
    assert_eq!(v1.min(&v2), Vector2::new(1.0, -6.0));
    assert_eq!(v1.max(&v2), Vector2::new(4.0, 2.0));

    // Compound assignment
    let mut v = v1;
    v += Vector2::new(1.0, 1.0);
    v *= 3.0;
    v -= Vector2::new(6.0, 0.0);
    assert_eq!(v, Vector2::new(0.0, 9.0));
}

#[test]
fn test_vector2_approx_comparison() {
    let a = Vector2::new(0.1 + 0.2, 1.0);
    let b = Vector2::new(0.3, 1.0);

    assert_relative_eq!(a, b);
    assert!(Vector2::new(1.0e-7, 0.0).is_zero());
    assert!(!Vector2::new(f32::NAN, 0.0).is_finite());
}

#[test]
fn test_vector2_nalgebra_interop() {
    let v = Vector2::new(2.5, -1.5);
    let na_v: nalgebra::Vector2<f32> = v.into();

    assert_eq!(na_v.x, 2.5);
    assert_eq!(na_v.y, -1.5);
    assert_relative_eq!(na_v.norm(), v.length());
}

#[test]
fn test_push_sign_maps_zero_to_negative() {
    assert_eq!(push_sign(3.0), 1.0);
    assert_eq!(push_sign(-0.5), -1.0);
    assert_eq!(push_sign(0.0), -1.0);
}

#[test]
fn test_aabb_operations() {
    let a = Aabb::from_center_size(Vector2::new(0.0, 0.0), Vector2::new(10.0, 4.0));
    assert_eq!(a.min, Vector2::new(-5.0, -2.0));
    assert_eq!(a.max, Vector2::new(5.0, 2.0));
    assert_eq!(a.center(), Vector2::zero());
    assert_eq!(a.half_extents(), Vector2::new(5.0, 2.0));
    assert_eq!(a.area(), 40.0);

    assert!(a.contains_point(Vector2::new(5.0, 2.0)));
    assert!(!a.contains_point(Vector2::new(5.1, 0.0)));

    let b = Aabb::new(Vector2::new(3.0, 1.0), Vector2::new(8.0, 6.0));
    assert!(a.intersects(&b));

    let overlap = a.intersection(&b).unwrap();
    assert_eq!(overlap.min, Vector2::new(3.0, 1.0));
    assert_eq!(overlap.max, Vector2::new(5.0, 2.0));

    let union = a.union(&b);
    assert_eq!(union.min, Vector2::new(-5.0, -2.0));
    assert_eq!(union.max, Vector2::new(8.0, 6.0));
}

#[test]
fn test_aabb_touching_edges_do_not_intersect() {
    let a = Aabb::from_center_size(Vector2::new(0.0, 0.0), Vector2::new(10.0, 10.0));
    let b = Aabb::from_center_size(Vector2::new(10.0, 0.0), Vector2::new(10.0, 10.0));

    assert!(!a.intersects(&b));
    assert!(a.intersection(&b).is_none());
}
