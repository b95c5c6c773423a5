//! `curves` (spec.md §4.6): bbox-pruned candidates between two curves, each
//! refined by minimizing `‖C0(u) − C1(w)‖²`, seeded at the first-knot
//! parameters of the candidate sub-ranges.

use crate::*;

/// Intersects two curves. Differs from [`curve_and_surface`] only in the
/// seed: each candidate's own range start, rather than its midpoint, per
/// spec.md §4.6.
pub fn curves<C0, C1, M>(curve0: &C0, curve1: &C1, minimizer: &M, tol: f64) -> Vec<CurveCurveIntersection>
where
    C0: ParametricCurve3D,
    C1: ParametricCurve3D,
    M: UnconstrainedMinimizer,
{
    let candidates = bbox_intersect(CurveRangeTree::new(curve0), CurveRangeTree::new(curve1), tol);
    let mut found = Vec::new();
    for ((t0, _), (w0, _)) in candidates {
        let seed = [t0, w0];
        let solution = minimizer.minimize(
            |x: [f64; 2]| curve0.subs(x[0]).distance2(curve1.subs(x[1])),
            seed,
            tol,
        );
        let point0 = curve0.subs(solution[0]);
        let point1 = curve1.subs(solution[1]);
        if point0.distance(point1) >= tol {
            continue;
        }
        let hit = CurveCurveIntersection { u0: solution[0], u1: solution[1], point0, point1 };
        if !found.iter().any(|h: &CurveCurveIntersection| h.point0.distance2(hit.point0) < tol * tol) {
            found.push(hit);
        }
    }
    found
}
