use crate::*;
use cadkit_geotrait::{ParametricCurve3D, ParametricSurface3D};

/// `tessellate_rational_surface_adaptive(S) -> MeshData` (spec.md §6). The
/// tessellation algorithm itself is out of scope for this engine — it is
/// consumed as an oracle contract by the intersection drivers that operate
/// on meshes derived from surfaces, never implemented here.
pub trait TessellateAdaptive: ParametricSurface3D {
    /// Produces a triangulated approximation of `self`, accurate enough
    /// that triangle-triangle tests against it stay within the caller's
    /// working tolerance.
    fn tessellate_adaptive(&self) -> PolygonMesh;
}

/// `fit_interpolated_curve(points, degree) -> CurveData` (spec.md §6),
/// consumed by callers that turn a reconstructed polyline (§4.4) into a
/// smooth curve. Out of scope here for the same reason as tessellation: the
/// fitting algorithm is an external collaborator, not part of the
/// intersection engine.
pub trait FitInterpolatedCurve: ParametricCurve3D {
    /// Fits a curve of the given `degree` through `points` in order.
    fn fit_interpolated_curve(points: &[Point3], degree: usize) -> Self;
}
