use crate::*;

/// `PolylineData` of spec.md §1/§4.7: a piecewise-linear curve with an
/// explicit global parametrization, so a local intersection parameter on
/// segment `i` can be lifted to the polyline's own domain by linear
/// interpolation between `params[i]` and `params[i + 1]`.
///
/// Generalizes truck's `PolylineCurve<P>(pub Vec<P>)`, which carries no
/// parametrization of its own (callers there reconstruct one via arc length
/// on demand); spec.md's drivers need the parametrization to be a first-class
/// field instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolylineCurve {
    /// Vertex positions, in order along the polyline.
    pub points: Vec<Point3>,
    /// Global parameter at each vertex, strictly increasing, same length as
    /// `points`.
    pub params: Vec<f64>,
}

impl PolylineCurve {
    /// Builds a polyline. Panics in debug builds if `points` and `params`
    /// disagree in length.
    pub fn new(points: Vec<Point3>, params: Vec<f64>) -> Self {
        debug_assert_eq!(points.len(), params.len());
        PolylineCurve { points, params }
    }

    /// Number of line segments (`points.len() - 1`, or `0` for a degenerate
    /// single-point polyline).
    pub fn segment_count(&self) -> usize { self.points.len().saturating_sub(1) }

    /// Endpoints of segment `i`.
    pub fn segment_points(&self, i: usize) -> (Point3, Point3) { (self.points[i], self.points[i + 1]) }

    /// Lifts a local segment parameter `r in [0, 1]` on segment `i` to the
    /// polyline's global parameter domain.
    pub fn global_parameter(&self, i: usize, r: f64) -> f64 {
        self.params[i] * (1.0 - r) + self.params[i + 1] * r
    }

    /// Axis-aligned bounding box over all vertices.
    pub fn bounding_box(&self) -> BoundingBox<Point3> { self.points.iter().collect() }

    /// Axis-aligned bounding box of a single segment.
    pub fn segment_bounding_box(&self, i: usize) -> BoundingBox<Point3> {
        let (p0, p1) = self.segment_points(i);
        [p0, p1].iter().collect()
    }
}
