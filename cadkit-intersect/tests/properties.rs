//! Property-based regression for the algebraic laws spec.md §8 states as
//! invariants: `three_planes` on an orthonormal basis returns the origin,
//! `rays` is symmetric under swapping its two inputs, and `segments` is
//! commutative up to a swap of its output parameters.

use cadkit_base::assert_near;
use cadkit_intersect::*;
use proptest::prelude::*;

fn finite(range: std::ops::Range<f64>) -> impl Strategy<Value = f64> { range }

fn unit_vector() -> impl Strategy<Value = Vector3> {
    (finite(-1.0..1.0), finite(-1.0..1.0), finite(-1.0..1.0)).prop_filter_map("non-degenerate", |(x, y, z)| {
        let v = Vector3::new(x, y, z);
        if v.magnitude() > 1e-3 {
            Some(v.normalize())
        } else {
            None
        }
    })
}

fn point3() -> impl Strategy<Value = Point3> {
    (finite(-5.0..5.0), finite(-5.0..5.0), finite(-5.0..5.0)).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

proptest! {
    #[test]
    fn three_planes_orthonormal_basis_round_trips_to_the_origin(
        axis in 0..3usize,
        angle in 0.0f64..std::f64::consts::TAU,
    ) {
        // Any rotation of the standard basis is still orthonormal; the
        // common solution of the three coordinate planes through the
        // origin must remain the origin regardless of orientation.
        let (e1, e2, e3) = rotated_basis(axis, angle);
        let p = three_planes(e1, 0.0, e2, 0.0, e3, 0.0);
        prop_assert!(p.is_some());
        let p = p.unwrap();
        prop_assert!(p.distance(Point3::new(0.0, 0.0, 0.0)) < 1e-6);
    }

    #[test]
    fn rays_is_symmetric_under_input_swap(
        a0 in point3(), a in unit_vector(),
        b0 in point3(), b in unit_vector(),
    ) {
        if let Some((t, w, p0, p1)) = rays(a0, a, b0, b) {
            let swapped = rays(b0, b, a0, a);
            prop_assert!(swapped.is_some());
            let (t2, w2, p2, p3) = swapped.unwrap();
            prop_assert!((t - w2).abs() < 1e-6);
            prop_assert!((w - t2).abs() < 1e-6);
            prop_assert!(p0.distance(p3) < 1e-6);
            prop_assert!(p1.distance(p2) < 1e-6);
        }
    }

    #[test]
    fn segments_is_commutative_up_to_parameter_swap(
        a0 in point3(), a1 in point3(),
        b0 in point3(), b1 in point3(),
    ) {
        let forward = segments(a0, a1, b0, b1, 1e-3);
        let backward = segments(b0, b1, a0, a1, 1e-3);
        prop_assert_eq!(forward.is_some(), backward.is_some());
        if let (Some(f), Some(b)) = (forward, backward) {
            prop_assert!((f.u0 - b.u1).abs() < 1e-6);
            prop_assert!((f.u1 - b.u0).abs() < 1e-6);
        }
    }
}

/// Three mutually orthogonal unit vectors obtained by rotating the standard
/// basis by `angle` about coordinate `axis` — a cheap way to sample the
/// space of orthonormal bases without pulling in a quaternion/rotation
/// dependency just for test data.
fn rotated_basis(axis: usize, angle: f64) -> (Vector3, Vector3, Vector3) {
    let (s, c) = angle.sin_cos();
    let rotate = |v: Vector3| -> Vector3 {
        match axis {
            0 => Vector3::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z),
            1 => Vector3::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z),
            _ => Vector3::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z),
        }
    };
    (
        rotate(Vector3::new(1.0, 0.0, 0.0)),
        rotate(Vector3::new(0.0, 1.0, 0.0)),
        rotate(Vector3::new(0.0, 0.0, 1.0)),
    )
}

#[test]
fn assert_near_macro_is_usable_from_integration_tests() {
    assert_near!(1.0 + 1e-9, 1.0);
}
