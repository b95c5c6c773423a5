//! Plane/plane, three-plane, ray/ray, segment/segment, segment/triangle and
//! segment/plane primitive intersections (spec.md §4.2). Every routine here
//! reports expected absence (parallel planes, disjoint segments, a miss
//! outside the triangle) as `None`, never as an `Err` — see spec.md §7.

use crate::*;

/// `planes(o0, n0, o1, n1) -> Ray?`. The line contained in both planes, or
/// `None` if the normals are (nearly) parallel.
///
/// The direction is `normalize(n0 x n1)`. To find a point on the line, the
/// coordinate axis `i*` that maximizes `|cross(n0, n1)[i]|` is dropped,
/// reducing to a 2x2 linear solve in the remaining two axes for
/// `n . p = n . o` on both planes; the dropped coordinate is set to zero.
pub fn planes(o0: Point3, n0: Vector3, o1: Point3, n1: Vector3) -> Option<Ray> {
    let cross = n0.cross(n1);
    if cross.magnitude2().so_small2() {
        return None;
    }
    let dir = cross.normalize();
    let d0 = n0.dot(o0.to_vec());
    let d1 = n1.dot(o1.to_vec());

    // Drop the axis where `cross` is largest in magnitude.
    let (ax, ay, az) = (cross.x.abs(), cross.y.abs(), cross.z.abs());
    let point = if ax >= ay && ax >= az {
        // drop x: solve n0.y*y + n0.z*z = d0, n1.y*y + n1.z*z = d1
        let (y, z) = solve_2x2(n0.y, n0.z, n1.y, n1.z, d0, d1)?;
        Point3::new(0.0, y, z)
    } else if ay >= ax && ay >= az {
        // drop y: solve n0.x*x + n0.z*z = d0, n1.x*x + n1.z*z = d1
        let (x, z) = solve_2x2(n0.x, n0.z, n1.x, n1.z, d0, d1)?;
        Point3::new(x, 0.0, z)
    } else {
        // drop z: solve n0.x*x + n0.y*y = d0, n1.x*x + n1.y*y = d1
        let (x, y) = solve_2x2(n0.x, n0.y, n1.x, n1.y, d0, d1)?;
        Point3::new(x, y, 0.0)
    };
    Some(Ray { origin: point, dir })
}

/// Solves `[[a, b], [c, d]] . [x, y] = [e, f]` by Cramer's rule, failing on
/// a (near-)singular matrix.
fn solve_2x2(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Option<(f64, f64)> {
    let det = a * d - b * c;
    if det.so_small() {
        return None;
    }
    Some(((e * d - b * f) / det, (a * f - e * c) / det))
}

/// `three_planes(n0, d0, n1, d1, n2, d2) -> Point?`. Cramer-style solve for
/// the point common to three planes `n_i . p = d_i`. `None` when the
/// configuration admits no single point (planes parallel or near-parallel
/// to a common line).
pub fn three_planes(
    n0: Vector3,
    d0: f64,
    n1: Vector3,
    d1: f64,
    n2: Vector3,
    d2: f64,
) -> Option<Point3> {
    let u = n1.cross(n2);
    let den = n0.dot(u);
    if den.so_small() {
        return None;
    }
    let v = d0 * u + n0.cross(d2 * n1 - d1 * n2);
    Some(Point3::from_vec(v / den))
}

/// `rays(a0, a, b0, b) -> (t, w, p0, p1)?`. Closest-point parameters
/// between two rays with unit directions `a`, `b`, using the standard
/// geomalgorithms.com A07 formula. `None` when the rays are (nearly)
/// parallel. `p0`/`p1` are the closest points on ray `a`/`b`; for
/// non-parallel rays these coincide iff the rays actually meet.
///
/// Symmetric under swapping the two rays: `rays(b0, b, a0, a)` returns
/// `(w, t, p1, p0)`.
pub fn rays(a0: Point3, a: Vector3, b0: Point3, b: Vector3) -> Option<(f64, f64, Point3, Point3)> {
    let r = a0 - b0;
    let daa = a.dot(a);
    let dab = a.dot(b);
    let dbb = b.dot(b);
    let dar = a.dot(r);
    let dbr = b.dot(r);
    let denom = daa * dbb - dab * dab;
    if denom.so_small() {
        return None;
    }
    let t = (dab * dbr - dbb * dar) / denom;
    let w = (daa * dbr - dab * dar) / denom;
    Some((t, w, a0 + a * t, b0 + b * w))
}

/// `segments(a0, a1, b0, b1, tol) -> CurveCurveIntersection?`. Normalizes
/// both segments, delegates to `rays`, clamps the ray parameters to each
/// segment's own length, and accepts the pair iff the resulting points are
/// within `tol` of each other.
pub fn segments(
    a0: Point3,
    a1: Point3,
    b0: Point3,
    b1: Point3,
    tol: f64,
) -> Option<CurveCurveIntersection> {
    let a_vec = a1 - a0;
    let b_vec = b1 - b0;
    let len_a = a_vec.magnitude();
    let len_b = b_vec.magnitude();
    if len_a.so_small() || len_b.so_small() {
        return None;
    }
    let a_dir = a_vec / len_a;
    let b_dir = b_vec / len_b;
    let (t, w, _, _) = rays(a0, a_dir, b0, b_dir)?;
    let t = t.clamp(0.0, len_a);
    let w = w.clamp(0.0, len_b);
    let p0 = a0 + a_dir * t;
    let p1 = b0 + b_dir * w;
    if p0.distance2(p1) < tol * tol {
        Some(CurveCurveIntersection { u0: t / len_a, u1: w / len_b, point0: p0, point1: p1 })
    } else {
        None
    }
}

/// `segment_with_triangle(p0, p1, tri) -> TriSegmentIntersection?`.
/// Möller-style ray/plane intersection followed by a barycentric
/// containment test. Fails when the segment is parallel to the triangle's
/// plane, when the plane-crossing parameter falls outside `[0, 1]`, or when
/// the barycentrics fall outside `[-eps, 1+eps]` with `s + t <= 1 + eps`.
pub fn segment_with_triangle(
    p0: Point3,
    p1: Point3,
    tri: [Point3; 3],
) -> Option<TriSegmentIntersection> {
    let [v0, v1, v2] = tri;
    let dir = p1 - p0;
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let n = e1.cross(e2);
    let denom = n.dot(dir);
    if denom.so_small() {
        return None;
    }
    let a = n.dot(v0 - p0);
    let r = a / denom;
    if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&r) {
        return None;
    }
    let point = p0 + dir * r;
    let (s, t) = barycentric(v0, e1, e2, point)?;
    if s >= -TOLERANCE && t >= -TOLERANCE && s + t <= 1.0 + TOLERANCE {
        Some(TriSegmentIntersection { r, s, t, point })
    } else {
        None
    }
}

/// Barycentric `(s, t)` of `point` in the plane through `v0` spanned by
/// `e1`, `e2`: `point = v0 + s*e1 + t*e2`. `None` if `e1`/`e2` are (nearly)
/// collinear.
fn barycentric(v0: Point3, e1: Vector3, e2: Vector3, point: Point3) -> Option<(f64, f64)> {
    let d = point - v0;
    let d11 = e1.dot(e1);
    let d12 = e1.dot(e2);
    let d22 = e2.dot(e2);
    let d1d = e1.dot(d);
    let d2d = e2.dot(d);
    let denom = d11 * d22 - d12 * d12;
    if denom.so_small() {
        return None;
    }
    Some(((d22 * d1d - d12 * d2d) / denom, (d11 * d2d - d12 * d1d) / denom))
}

/// `segment_with_plane(p0, p1, v0, n) -> Point?`. The scalar parameter
/// where the segment crosses an oriented plane through `v0` with normal
/// `n`; the caller checks the `[0, 1]` range. `None` on parallelism.
pub fn segment_with_plane(p0: Point3, p1: Point3, v0: Point3, n: Vector3) -> Option<Point3> {
    let dir = p1 - p0;
    let denom = n.dot(dir);
    if denom.so_small() {
        return None;
    }
    let t = n.dot(v0 - p0) / denom;
    Some(p0 + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadkit_base::assert_near;

    #[test]
    fn planes_coincident_fails() {
        let o = Point3::new(0.0, 0.0, 0.0);
        let n = Vector3::new(0.0, 0.0, 1.0);
        assert_eq!(planes(o, n, o, n), None);
    }

    #[test]
    fn planes_xy_and_xz() {
        let ray = planes(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        assert_near!(ray.dir.x.abs(), 1.0);
        assert_near!(ray.origin, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn three_planes_orthonormal_basis_is_origin() {
        let p = three_planes(
            Vector3::new(1.0, 0.0, 0.0),
            0.0,
            Vector3::new(0.0, 1.0, 0.0),
            0.0,
            Vector3::new(0.0, 0.0, 1.0),
            0.0,
        )
        .unwrap();
        assert_near!(p, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn three_planes_concrete() {
        let p = three_planes(
            Vector3::new(1.0, 0.0, 0.0),
            1.0,
            Vector3::new(0.0, 1.0, 0.0),
            2.0,
            Vector3::new(0.0, 0.0, 1.0),
            3.0,
        )
        .unwrap();
        assert_near!(p, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn three_planes_parallel_fails() {
        assert_eq!(
            three_planes(
                Vector3::new(1.0, 0.0, 0.0),
                0.0,
                Vector3::new(1.0, 0.0, 0.0),
                1.0,
                Vector3::new(0.0, 1.0, 0.0),
                0.0,
            ),
            None
        );
    }

    #[test]
    fn rays_perpendicular() {
        let (t, w, p0, p1) = rays(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
        )
        .unwrap();
        assert_near!(t, 0.0);
        assert_near!(w, 1.0);
        assert_near!(p0, Point3::new(0.0, 0.0, 0.0));
        assert_near!(p1, Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn rays_symmetric_under_swap() {
        let a0 = Point3::new(0.3, -1.0, 2.0);
        let a = Vector3::new(1.0, 0.2, 0.0).normalize();
        let b0 = Point3::new(-0.5, 0.4, 1.0);
        let b = Vector3::new(0.0, 1.0, 0.3).normalize();
        let (t, w, p0, p1) = rays(a0, a, b0, b).unwrap();
        let (w2, t2, p1b, p0b) = rays(b0, b, a0, a).unwrap();
        assert_near!(t, t2);
        assert_near!(w, w2);
        assert_near!(p0, p0b);
        assert_near!(p1, p1b);
    }

    #[test]
    fn rays_parallel_fails() {
        assert_eq!(
            rays(
                Point3::new(0.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
            ),
            None
        );
    }

    #[test]
    fn segments_crossing_midpoints() {
        let r = segments(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            1e-6,
        )
        .unwrap();
        assert_near!(r.u0, 0.5);
        assert_near!(r.u1, 0.5);
        assert_near!(r.point0, Point3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn segments_commutative_up_to_swap() {
        let a0 = Point3::new(0.0, 0.0, 0.0);
        let a1 = Point3::new(1.0, 0.0, 0.0);
        let b0 = Point3::new(0.5, -1.0, 0.0);
        let b1 = Point3::new(0.5, 1.0, 0.0);
        let ab = segments(a0, a1, b0, b1, 1e-6).unwrap();
        let ba = segments(b0, b1, a0, a1, 1e-6).unwrap();
        assert_near!(ab.u0, ba.u1);
        assert_near!(ab.u1, ba.u0);
    }

    #[test]
    fn segment_with_triangle_center_hit() {
        let tri = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        let hit = segment_with_triangle(Point3::new(0.25, 0.25, -1.0), Point3::new(0.25, 0.25, 1.0), tri)
            .unwrap();
        assert_near!(hit.r, 0.5);
        assert_near!(hit.s, 0.25);
        assert_near!(hit.t, 0.25);
        assert_near!(hit.point, Point3::new(0.25, 0.25, 0.0));
    }

    #[test]
    fn segment_with_triangle_misses_outside() {
        let tri = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        assert!(segment_with_triangle(Point3::new(2.0, 2.0, -1.0), Point3::new(2.0, 2.0, 1.0), tri).is_none());
    }

    #[test]
    fn segment_with_plane_basic() {
        let p = segment_with_plane(
            Point3::new(0.0, 0.0, -1.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert_near!(p, Point3::new(0.0, 0.0, 0.0));
    }
}
