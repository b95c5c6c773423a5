//! Triangle–triangle intersection (spec.md §4.3): two coplanar clips
//! against the shared line followed by an interval merge.

use crate::*;
use itertools::Itertools;

/// `clipRayInCoplanarTriangle` (spec.md §4.3). Intersects `ray` with each of
/// the triangle's three edges via `rays`, keeping edge hits whose edge
/// parameter falls in `[-ε, length + ε]`, then returns the surviving hits'
/// ray-parameter extremes as a `CurveTriPoint` interval. `None` if fewer
/// than two edges are crossed.
fn clip_ray_in_coplanar_triangle(points: [Point3; 3], uvs: [Point2; 3], ray: Ray) -> Option<Interval<CurveTriPoint>> {
    let hits: Vec<CurveTriPoint> = points
        .into_iter()
        .zip(uvs)
        .circular_tuple_windows()
        .filter_map(|((p_i, uv_i), (p_j, uv_j))| {
            let edge = p_j - p_i;
            let length = edge.magnitude();
            if length.so_small() {
                return None;
            }
            let (useg, uray, _, _) = rays(p_i, edge / length, ray.origin, ray.dir)?;
            if useg < -TOLERANCE || useg > length + TOLERANCE {
                return None;
            }
            let r = useg / length;
            let uv = uv_i + r * (uv_j - uv_i);
            Some(CurveTriPoint { u: uray, point: ray.at(uray), uv })
        })
        .collect();
    if hits.len() < 2 {
        return None;
    }
    let min = *hits.iter().min_by(|a, b| a.u.partial_cmp(&b.u).unwrap()).unwrap();
    let max = *hits.iter().max_by(|a, b| a.u.partial_cmp(&b.u).unwrap()).unwrap();
    Some(Interval::new(min, max))
}

/// Which side's clip supplied a merged extremum's ray parameter (and thus
/// its UV directly, rather than by `triangle_uv_from_point`).
#[derive(Clone, Copy)]
enum Side {
    Zero,
    One,
}

fn labeled_point(
    extremum: CurveTriPoint,
    side: Side,
    mesh0: &PolygonMesh,
    face0: usize,
    mesh1: &PolygonMesh,
    face1: usize,
) -> MeshIntersectionPoint {
    let (uv0, uv1) = match side {
        Side::Zero => (extremum.uv, mesh1.triangle_uv_from_point(face1, extremum.point)),
        Side::One => (mesh0.triangle_uv_from_point(face0, extremum.point), extremum.uv),
    };
    MeshIntersectionPoint {
        uv0,
        uv1,
        point: extremum.point,
        face_index0: face0,
        face_index1: face1,
        opp: None,
        adj: None,
        visited: false,
    }
}

/// `mergeTriangleClipIntervals` (spec.md §4.3). Intersects the two
/// ray-parameter intervals; fails when they are disjoint by more than `ε`.
/// Each merged extremum takes its UV from whichever side's clip produced
/// the tighter bound, and reconstructs the other side's UV by barycentric
/// lift of the shared world point.
fn merge_triangle_clip_intervals(
    clip0: Interval<CurveTriPoint>,
    clip1: Interval<CurveTriPoint>,
    mesh0: &PolygonMesh,
    face0: usize,
    mesh1: &PolygonMesh,
    face1: usize,
) -> Option<Interval<MeshIntersectionPoint>> {
    let (min_extremum, min_side) = if clip0.min.u >= clip1.min.u {
        (clip0.min, Side::Zero)
    } else {
        (clip1.min, Side::One)
    };
    let (max_extremum, max_side) = if clip0.max.u <= clip1.max.u {
        (clip0.max, Side::Zero)
    } else {
        (clip1.max, Side::One)
    };
    if min_extremum.u > max_extremum.u + TOLERANCE {
        return None;
    }
    let min = labeled_point(min_extremum, min_side, mesh0, face0, mesh1, face1);
    let max = labeled_point(max_extremum, max_side, mesh0, face0, mesh1, face1);
    Some(Interval { min, max })
}

/// Triangle–triangle intersection for one face pair (spec.md §4.3): plane
/// normals from the vertex ring, the shared line via `planes`, a coplanar
/// clip against each triangle, then the interval merge. `None` on any
/// failure along the way — coplanar-but-non-parallel planes, a clip that
/// misses the triangle, or a merge of disjoint intervals — all of which are
/// the expected-absence outcome of spec.md §7, not a hard error.
pub fn triangle_triangle(
    mesh0: &PolygonMesh,
    face0: usize,
    mesh1: &PolygonMesh,
    face1: usize,
) -> Option<Interval<MeshIntersectionPoint>> {
    let points0 = mesh0.face_points(face0);
    let points1 = mesh1.face_points(face1);
    let n0 = mesh0.face_normal(face0);
    let n1 = mesh1.face_normal(face1);
    let ray = planes(points0[0], n0, points1[0], n1)?;
    let clip0 = clip_ray_in_coplanar_triangle(points0, mesh0.face_uvs(face0), ray)?;
    let clip1 = clip_ray_in_coplanar_triangle(points1, mesh1.face_uvs(face1), ray)?;
    merge_triangle_clip_intervals(clip0, clip1, mesh0, face0, mesh1, face1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadkit_base::assert_near;

    fn square(offset: Vector3, uvs: [Point2; 4]) -> (Vec<Point3>, [Point2; 4]) {
        (
            vec![
                Point3::new(0.0, 0.0, 0.0) + offset,
                Point3::new(1.0, 0.0, 0.0) + offset,
                Point3::new(1.0, 1.0, 0.0) + offset,
                Point3::new(0.0, 1.0, 0.0) + offset,
            ],
            uvs,
        )
    }

    fn default_uvs() -> [Point2; 4] {
        [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)]
    }

    fn flat_mesh(offset: Vector3) -> PolygonMesh {
        let (points, uvs) = square(offset, default_uvs());
        PolygonMesh::new(points, vec![[0, 1, 2], [0, 2, 3]], uvs.to_vec())
    }

    fn vertical_mesh(x: f64) -> PolygonMesh {
        let points = vec![
            Point3::new(x, -1.0, -1.0),
            Point3::new(x, 1.0, -1.0),
            Point3::new(x, 1.0, 1.0),
            Point3::new(x, -1.0, 1.0),
        ];
        PolygonMesh::new(points, vec![[0, 1, 2], [0, 2, 3]], default_uvs().to_vec())
    }

    #[test]
    fn crossing_planes_produce_an_interval() {
        let horizontal = flat_mesh(Vector3::new(-0.3, -0.6, 0.0));
        let vertical = vertical_mesh(0.0);
        let hit = triangle_triangle(&horizontal, 0, &vertical, 0).or_else(|| {
            triangle_triangle(&horizontal, 0, &vertical, 1)
        });
        assert!(hit.is_some());
        let interval = hit.unwrap();
        assert_near!(interval.min.point.x, 0.0);
        assert_near!(interval.max.point.x, 0.0);
    }

    #[test]
    fn coincident_planes_have_no_well_defined_line() {
        let a = flat_mesh(Vector3::new(0.0, 0.0, 0.0));
        let b = flat_mesh(Vector3::new(0.1, 0.0, 0.0));
        assert!(triangle_triangle(&a, 0, &b, 0).is_none());
    }

    #[test]
    fn disjoint_triangles_on_intersecting_planes_miss() {
        let horizontal = flat_mesh(Vector3::new(10.0, 10.0, 0.0));
        let vertical = vertical_mesh(0.0);
        assert!(triangle_triangle(&horizontal, 0, &vertical, 0).is_none());
        assert!(triangle_triangle(&horizontal, 1, &vertical, 0).is_none());
    }
}
