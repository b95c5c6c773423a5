//! `meshes(mesh0, mesh1) -> seq of polyline` (spec.md §4.4): bbox-pruned
//! triangle–triangle intersection over every candidate face pair, followed
//! by degenerate filtering, dedup, and polyline reconstruction.

use crate::*;
use rustc_hash::FxHashMap as HashMap;

/// Full mesh–mesh intersection. Candidate face pairs come from
/// `bbox_intersect` over lazy `FaceTree`s at `tol = 0`, matching spec.md
/// §4.4 step 1 exactly; the triangle–triangle tolerance for degenerate and
/// dedup filtering is `tol`.
pub fn meshes(mesh0: &PolygonMesh, mesh1: &PolygonMesh, tol: f64) -> Result<Vec<PolylineCurve>> {
    let candidates = bbox_intersect(FaceTree::new(mesh0), FaceTree::new(mesh1), 0.0);

    let mut segments = Vec::new();
    for (f0, f1) in candidates {
        let Some(interval) = triangle_triangle(mesh0, f0, mesh1, f1) else { continue };
        if interval.min.point.distance2(interval.max.point) < tol * tol {
            continue;
        }
        segments.push((interval.min, interval.max));
    }

    dedup_segments(&mut segments, tol);
    reconstruct_polylines(segments, tol)
}

/// Quantizes a UV coordinate into a grid cell of side `tol`, so that any two
/// points within `tol` of each other land in the same or an adjacent cell.
fn cell(uv: Point2, tol: f64) -> (i64, i64) {
    ((uv.x / tol).floor() as i64, (uv.y / tol).floor() as i64)
}

/// Drops duplicate segments (spec.md §4.4 step 3): two segments are the
/// same physical edge when their endpoints agree in mesh 0's UV either in
/// the same order or swapped — this is what happens when the true
/// intersection lies exactly on a shared mesh edge and gets reported once
/// per adjacent face. Candidates are bucketed into a `tol`-sized UV grid so
/// each lookup only has to scan the surrounding 3x3 neighborhood instead of
/// every previously kept segment.
fn dedup_segments(segments: &mut Vec<(MeshIntersectionPoint, MeshIntersectionPoint)>, tol: f64) {
    let tol2 = tol * tol;
    let mut buckets: HashMap<(i64, i64), Vec<usize>> = HashMap::default();
    let mut kept: Vec<(MeshIntersectionPoint, MeshIntersectionPoint)> = Vec::with_capacity(segments.len());

    'outer: for candidate in segments.drain(..) {
        let (cx, cy) = cell(candidate.0.uv0, tol);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(indices) = buckets.get(&(cx + dx, cy + dy)) else { continue };
                for &idx in indices {
                    let existing = &kept[idx];
                    let same_order = candidate.0.uv0.distance2(existing.0.uv0) < tol2
                        && candidate.1.uv0.distance2(existing.1.uv0) < tol2;
                    let swapped = candidate.0.uv0.distance2(existing.1.uv0) < tol2
                        && candidate.1.uv0.distance2(existing.0.uv0) < tol2;
                    if same_order || swapped {
                        continue 'outer;
                    }
                }
            }
        }
        let idx = kept.len();
        buckets.entry(cell(candidate.0.uv0, tol)).or_default().push(idx);
        buckets.entry(cell(candidate.1.uv0, tol)).or_default().push(idx);
        kept.push(candidate);
    }
    *segments = kept;
}
