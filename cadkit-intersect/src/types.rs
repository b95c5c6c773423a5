use crate::*;

/// `(origin, dir)` with `dir` unit-length: an infinite line with a
/// preferred direction and a reference point (spec.md §3).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// A point the line passes through.
    pub origin: Point3,
    /// Unit direction.
    pub dir: Vector3,
}

impl Ray {
    /// Point at ray parameter `t`.
    pub fn at(&self, t: f64) -> Point3 { self.origin + self.dir * t }
}

/// A pair `(min, max)` ordered by an implicit scalar `.u` on `T`, i.e.
/// `min.u() <= max.u()` (spec.md §3). `U` is extracted via the `HasU`
/// trait so `Interval` stays generic over both plain scalars and labeled
/// endpoints like `MeshIntersectionPoint`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval<T> {
    /// The endpoint with the smaller `.u()`.
    pub min: T,
    /// The endpoint with the larger `.u()`.
    pub max: T,
}

/// Projects a labeled value onto the scalar it is ordered by within an
/// `Interval`.
pub trait HasU {
    /// The ordering scalar.
    fn u(&self) -> f64;
}

impl HasU for f64 {
    fn u(&self) -> f64 { *self }
}

impl<T: HasU> Interval<T> {
    /// Builds the interval, swapping `a`/`b` so `min.u() <= max.u()`.
    pub fn new(a: T, b: T) -> Self {
        if a.u() <= b.u() {
            Interval { min: a, max: b }
        } else {
            Interval { min: b, max: a }
        }
    }
}

/// A point lying on a ray clipped to a triangle: `u` is the ray parameter,
/// `point` the world position, `uv` the triangle's parametric coordinate
/// (spec.md §3).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveTriPoint {
    /// Ray parameter.
    pub u: f64,
    /// World position.
    pub point: Point3,
    /// Triangle-local UV.
    pub uv: Point2,
}

impl HasU for CurveTriPoint {
    fn u(&self) -> f64 { self.u }
}

/// An endpoint of a mesh-mesh intersection segment (spec.md §3). Stored in
/// a flat arena (`Vec<MeshIntersectionPoint>`) owned by a single top-level
/// call to `meshes`; `opp`/`adj` are indices into that arena rather than
/// shared pointers, per the design notes' "arena-allocated records with
/// indices" option. `visited` is local scratch, reset at the start of each
/// reconstruction pass.
///
/// Invariants once reconstruction has run: `arena[p.opp].opp == Some(p)`;
/// `p.adj == Some(q) => arena[q].adj == Some(p)`; `visited` only flips
/// `false -> true`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshIntersectionPoint {
    /// Parametric coordinate on mesh 0's face.
    pub uv0: Point2,
    /// Parametric coordinate on mesh 1's face.
    pub uv1: Point2,
    /// World position.
    pub point: Point3,
    /// Face index in mesh 0.
    pub face_index0: usize,
    /// Face index in mesh 1.
    pub face_index1: usize,
    /// The other endpoint of the same segment.
    pub opp: Option<usize>,
    /// The endpoint of a different segment spatially coincident with this
    /// one. `None` at a free endpoint or a branching point.
    pub adj: Option<usize>,
    /// Scratch flag used only during the walk in `reconstruct_polylines`.
    pub visited: bool,
}

/// Result of `segments`/`curves`: two curve parameters and the (nearly)
/// coincident world points they evaluate to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveCurveIntersection {
    /// Parameter on the first curve.
    pub u0: f64,
    /// Parameter on the second curve.
    pub u1: f64,
    /// Point on the first curve at `u0`.
    pub point0: Point3,
    /// Point on the second curve at `u1`.
    pub point1: Point3,
}

/// Result of `curve_and_surface`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSurfaceIntersection {
    /// Parameter on the curve.
    pub u: f64,
    /// Parameter on the surface.
    pub uv: Point2,
    /// World point (curve and surface evaluate here, up to tolerance).
    pub point: Point3,
}

/// Result of `refine_surface_point` (spec.md §4.5).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSurfaceIntersectionPoint {
    /// Parameter on surface 0.
    pub uv0: Point2,
    /// Parameter on surface 1.
    pub uv1: Point2,
    /// World point (the last-evaluated point on surface 0).
    pub point: Point3,
    /// Distance between the two surfaces' evaluations at `uv0`/`uv1` when
    /// iteration stopped — `< tol` on convergence, otherwise the best
    /// estimate reached within the iteration cap.
    pub dist: f64,
}

/// Result of `polyline_and_mesh`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolylineMeshIntersection {
    /// Global parameter on the polyline.
    pub u: f64,
    /// UV on the mesh face.
    pub uv: Point2,
    /// World point.
    pub point: Point3,
    /// Mesh face index.
    pub face_index: usize,
}

/// Result of `segment_with_triangle` (spec.md §4.2).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriSegmentIntersection {
    /// Segment parameter in `[0, 1]`.
    pub r: f64,
    /// Barycentric coordinate along `v1 - v0`.
    pub s: f64,
    /// Barycentric coordinate along `v2 - v0`.
    pub t: f64,
    /// World point, `v0 + s*(v1-v0) + t*(v2-v0)`.
    pub point: Point3,
}
