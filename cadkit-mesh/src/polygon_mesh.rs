use crate::*;

/// A triangulated mesh: the output of `tessellate_rational_surface_adaptive`
/// (spec.md §6) and one of the two operands of `meshes` (spec.md §4.4).
///
/// `uvs[vi]` is the surface parameter corresponding to vertex `vi`, so a
/// face's UV triple can be read off directly instead of re-querying the
/// surface — exactly the `faces[k]`/`uvs[vi]` contract spec.md states.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolygonMesh {
    /// Vertex world positions.
    pub points: Vec<Point3>,
    /// Each face is a triple of indices into `points` (and `uvs`), wound
    /// counterclockwise when viewed from outside (right-hand rule for the
    /// face normal).
    pub faces: Vec<[usize; 3]>,
    /// Per-vertex surface parameter, aligned with `points`.
    pub uvs: Vec<Point2>,
}

impl PolygonMesh {
    /// Builds a mesh from explicit buffers. Panics in debug builds if `uvs`
    /// is non-empty and its length disagrees with `points`, or if a face
    /// index is out of range — this is a construction-time invariant, not a
    /// runtime condition callers need to recover from.
    pub fn new(points: Vec<Point3>, faces: Vec<[usize; 3]>, uvs: Vec<Point2>) -> Self {
        debug_assert!(uvs.is_empty() || uvs.len() == points.len());
        debug_assert!(faces.iter().all(|f| f.iter().all(|&i| i < points.len())));
        PolygonMesh { points, faces, uvs }
    }

    /// Number of triangular faces.
    pub fn face_count(&self) -> usize { self.faces.len() }

    /// World-space vertex positions of face `fi`.
    pub fn face_points(&self, fi: usize) -> [Point3; 3] {
        let f = self.faces[fi];
        [self.points[f[0]], self.points[f[1]], self.points[f[2]]]
    }

    /// Per-vertex surface parameters of face `fi`.
    pub fn face_uvs(&self, fi: usize) -> [Point2; 3] {
        let f = self.faces[fi];
        [self.uvs[f[0]], self.uvs[f[1]], self.uvs[f[2]]]
    }

    /// Outward normal of face `fi`, via the right-hand rule on its vertex
    /// ring. Not normalized to a specific length convention beyond unit
    /// norm; degenerate (zero-area) faces return a zero vector.
    pub fn face_normal(&self, fi: usize) -> Vector3 {
        let [p0, p1, p2] = self.face_points(fi);
        (p1 - p0).cross(p2 - p0).normalize()
    }

    /// Axis-aligned bounding box over all vertex positions.
    pub fn bounding_box(&self) -> BoundingBox<Point3> { self.points.iter().collect() }

    /// Axis-aligned bounding box of a single face.
    pub fn face_bounding_box(&self, fi: usize) -> BoundingBox<Point3> {
        self.face_points(fi).iter().collect()
    }
}

/// `triangle_uv_from_point(mesh, faceIndex, worldPoint) -> UV` (spec.md §6):
/// the barycentric lift of a world point known to lie on (or very near) a
/// face, back into the mesh's UV attribute.
pub trait TriangleUvFromPoint {
    /// Barycentric-interpolates the UV of `point` on face `face_index`.
    /// `point` is assumed to already lie in the face's plane; callers that
    /// got `point` from a segment/triangle or triangle/triangle test
    /// satisfy this by construction.
    fn triangle_uv_from_point(&self, face_index: usize, point: Point3) -> Point2;
}

impl TriangleUvFromPoint for PolygonMesh {
    fn triangle_uv_from_point(&self, face_index: usize, point: Point3) -> Point2 {
        let [p0, p1, p2] = self.face_points(face_index);
        let [uv0, uv1, uv2] = self.face_uvs(face_index);
        let (s, t) = barycentric_2d(p0, p1, p2, point);
        Point2::new(
            uv0.x + s * (uv1.x - uv0.x) + t * (uv2.x - uv0.x),
            uv0.y + s * (uv1.y - uv0.y) + t * (uv2.y - uv0.y),
        )
    }
}

/// Barycentric `(s, t)` of `point` on triangle `(p0, p1, p2)`, projected
/// onto the triangle's own plane so a point that is only approximately
/// coplanar (within refinement tolerance) still resolves sensibly.
fn barycentric_2d(p0: Point3, p1: Point3, p2: Point3, point: Point3) -> (f64, f64) {
    let e1 = p1 - p0;
    let e2 = p2 - p0;
    let d = point - p0;
    let d11 = e1.dot(e1);
    let d12 = e1.dot(e2);
    let d22 = e2.dot(e2);
    let d1d = e1.dot(d);
    let d2d = e2.dot(d);
    let denom = d11 * d22 - d12 * d12;
    if denom.so_small() {
        return (0.0, 0.0);
    }
    let s = (d22 * d1d - d12 * d2d) / denom;
    let t = (d11 * d2d - d12 * d1d) / denom;
    (s, t)
}
