//! Polyline drivers (spec.md §4.7): `polyline_and_mesh` and `polylines`,
//! both bbox-pruned via `SegmentTree`/`FaceTree` and built on the §4.2
//! primitives, with local segment parameters lifted into each polyline's
//! global parametrization.

use crate::*;

/// `polyline_and_mesh(P, M, tol)`. Each bbox-pruned `(segment, face)` pair
/// is tested with `segment_with_triangle`; on a hit the local segment
/// parameter `r` is lifted to `P`'s global parameter and the face UV comes
/// from `triangle_uv_from_point`.
pub fn polyline_and_mesh(polyline: &PolylineCurve, mesh: &PolygonMesh, tol: f64) -> Vec<PolylineMeshIntersection> {
    let candidates = bbox_intersect(SegmentTree::new(polyline), FaceTree::new(mesh), tol);
    let mut found = Vec::new();
    for (seg, face) in candidates {
        let (p0, p1) = polyline.segment_points(seg);
        let Some(hit) = segment_with_triangle(p0, p1, mesh.face_points(face)) else { continue };
        found.push(PolylineMeshIntersection {
            u: polyline.global_parameter(seg, hit.r),
            uv: mesh.triangle_uv_from_point(face, hit.point),
            point: hit.point,
            face_index: face,
        });
    }
    found
}

/// `polylines(P0, P1, tol)`. Each bbox-pruned `(segment0, segment1)` pair is
/// tested with `segments`; the local `[0, 1]` parameters it returns are
/// lifted into each polyline's own global parametrization.
pub fn polylines(polyline0: &PolylineCurve, polyline1: &PolylineCurve, tol: f64) -> Vec<CurveCurveIntersection> {
    let candidates = bbox_intersect(SegmentTree::new(polyline0), SegmentTree::new(polyline1), tol);
    let mut found = Vec::new();
    for (seg0, seg1) in candidates {
        let (a0, a1) = polyline0.segment_points(seg0);
        let (b0, b1) = polyline1.segment_points(seg1);
        let Some(hit) = segments(a0, a1, b0, b1, tol) else { continue };
        found.push(CurveCurveIntersection {
            u0: polyline0.global_parameter(seg0, hit.u0),
            u1: polyline1.global_parameter(seg1, hit.u1),
            point0: hit.point0,
            point1: hit.point1,
        });
    }
    found
}
