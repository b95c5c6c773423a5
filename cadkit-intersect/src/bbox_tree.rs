//! `IBoundingBoxTree<T>` (spec.md §9): a capability contract for lazy
//! bounding-box trees, plus the generic `bbox_intersect` traversal and four
//! concrete realizations (mesh faces, polyline segments, curve parameter
//! ranges, surface parameter rectangles).
//!
//! Trees are built per call and consumed by the traversal; `split` returns
//! fresh owned subtrees rather than mutating in place (spec.md §5, "Tree
//! lifecycle").

use crate::*;

/// A lazy bounding-box tree over some collection of `Item`s. `split` may be
/// called on a tree that is not `indivisible`; callers must check
/// `is_empty`/`indivisible` before calling `split`/`yield_item`.
pub trait BoundingVolumeTree: Sized {
    /// The handle produced at a leaf: a face index, a segment index, a
    /// curve sub-range, or a surface sub-rectangle.
    type Item: Copy;

    /// The box enclosing everything this (sub)tree can still yield.
    fn bounding_box(&self) -> BoundingBox<Point3>;

    /// No items remain.
    fn is_empty(&self) -> bool;

    /// Cannot (or need not) be split further; `yield_item` is valid.
    fn indivisible(&self, tol: f64) -> bool;

    /// Splits into two subtrees whose combined items equal this tree's.
    /// Only valid when `!indivisible(tol)`.
    fn split(&self) -> (Self, Self);

    /// The single item a leaf tree stands for. Only valid when
    /// `indivisible` held for some `tol`.
    fn yield_item(&self) -> Self::Item;
}

/// `bbox_intersect(a, b, tol)` (spec.md §4.1): every leaf pair whose boxes
/// overlap within `tol`, found without recursing past indivisible trees.
/// Uses an explicit work stack rather than direct recursion (spec.md §9,
/// "Recursion in tree traversal") so adversarial inputs cannot blow the
/// call stack.
pub fn bbox_intersect<A, B>(a: A, b: B, tol: f64) -> Vec<(A::Item, B::Item)>
where
    A: BoundingVolumeTree + Clone,
    B: BoundingVolumeTree + Clone,
{
    let mut out = Vec::new();
    let mut stack = vec![(a, b)];
    while let Some((a, b)) = stack.pop() {
        if a.is_empty() || b.is_empty() {
            continue;
        }
        if !a.bounding_box().intersects(&b.bounding_box(), tol) {
            continue;
        }
        let a_leaf = a.indivisible(tol);
        let b_leaf = b.indivisible(tol);
        if a_leaf && b_leaf {
            out.push((a.yield_item(), b.yield_item()));
        } else if a_leaf {
            let (b0, b1) = b.split();
            stack.push((a.clone(), b0));
            stack.push((a, b1));
        } else if b_leaf {
            let (a0, a1) = a.split();
            stack.push((a0, b.clone()));
            stack.push((a1, b));
        } else {
            let (a0, a1) = a.split();
            let (b0, b1) = b.split();
            stack.push((a0.clone(), b0.clone()));
            stack.push((a0, b1.clone()));
            stack.push((a1.clone(), b0));
            stack.push((a1, b1));
        }
    }
    out
}

fn widest_axis(points: impl Iterator<Item = Point3>) -> (BoundingBox<Point3>, usize) {
    let bb: BoundingBox<Point3> = points.collect();
    let d = bb.diagonal();
    let axis = if d.x >= d.y && d.x >= d.z {
        0
    } else if d.y >= d.x && d.y >= d.z {
        1
    } else {
        2
    };
    (bb, axis)
}

fn component(p: Point3, axis: usize) -> f64 {
    match axis {
        0 => p.x,
        1 => p.y,
        _ => p.z,
    }
}

/// Lazy bounding-box tree over a contiguous range of a mesh's faces.
/// `split` sorts the range's face centroids along the box's widest axis and
/// divides at the median, grounding the "lazy mesh tree" realization named
/// in spec.md §9.
#[derive(Clone)]
pub struct FaceTree<'a> {
    mesh: &'a PolygonMesh,
    faces: Vec<usize>,
}

impl<'a> FaceTree<'a> {
    /// A tree over every face of `mesh`.
    pub fn new(mesh: &'a PolygonMesh) -> Self {
        FaceTree { faces: (0..mesh.face_count()).collect(), mesh }
    }
}

impl<'a> BoundingVolumeTree for FaceTree<'a> {
    type Item = usize;

    fn bounding_box(&self) -> BoundingBox<Point3> {
        self.faces.iter().flat_map(|&f| self.mesh.face_points(f)).collect()
    }

    fn is_empty(&self) -> bool { self.faces.is_empty() }

    fn indivisible(&self, _tol: f64) -> bool { self.faces.len() <= 1 }

    fn split(&self) -> (Self, Self) {
        let (_, axis) = widest_axis(self.faces.iter().flat_map(|&f| self.mesh.face_points(f)));
        let mut sorted = self.faces.clone();
        sorted.sort_by(|&a, &b| {
            let ca = centroid(self.mesh.face_points(a));
            let cb = centroid(self.mesh.face_points(b));
            component(ca, axis).partial_cmp(&component(cb, axis)).unwrap()
        });
        let mid = sorted.len() / 2;
        let (left, right) = sorted.split_at(mid);
        (
            FaceTree { mesh: self.mesh, faces: left.to_vec() },
            FaceTree { mesh: self.mesh, faces: right.to_vec() },
        )
    }

    fn yield_item(&self) -> usize { self.faces[0] }
}

fn centroid(pts: [Point3; 3]) -> Point3 {
    Point3::from_vec((pts[0].to_vec() + pts[1].to_vec() + pts[2].to_vec()) / 3.0)
}

/// Lazy bounding-box tree over a contiguous range of a polyline's segments.
#[derive(Clone)]
pub struct SegmentTree<'a> {
    polyline: &'a PolylineCurve,
    segments: Vec<usize>,
}

impl<'a> SegmentTree<'a> {
    /// A tree over every segment of `polyline`.
    pub fn new(polyline: &'a PolylineCurve) -> Self {
        SegmentTree { segments: (0..polyline.segment_count()).collect(), polyline }
    }
}

impl<'a> BoundingVolumeTree for SegmentTree<'a> {
    type Item = usize;

    fn bounding_box(&self) -> BoundingBox<Point3> {
        self.segments
            .iter()
            .flat_map(|&s| {
                let (p0, p1) = self.polyline.segment_points(s);
                [p0, p1]
            })
            .collect()
    }

    fn is_empty(&self) -> bool { self.segments.is_empty() }

    fn indivisible(&self, _tol: f64) -> bool { self.segments.len() <= 1 }

    fn split(&self) -> (Self, Self) {
        let (_, axis) = widest_axis(self.segments.iter().flat_map(|&s| {
            let (p0, p1) = self.polyline.segment_points(s);
            [p0, p1]
        }));
        let mut sorted = self.segments.clone();
        sorted.sort_by(|&a, &b| {
            let (pa0, pa1) = self.polyline.segment_points(a);
            let (pb0, pb1) = self.polyline.segment_points(b);
            let ca = Point3::from_vec((pa0.to_vec() + pa1.to_vec()) / 2.0);
            let cb = Point3::from_vec((pb0.to_vec() + pb1.to_vec()) / 2.0);
            component(ca, axis).partial_cmp(&component(cb, axis)).unwrap()
        });
        let mid = sorted.len() / 2;
        let (left, right) = sorted.split_at(mid);
        (
            SegmentTree { polyline: self.polyline, segments: left.to_vec() },
            SegmentTree { polyline: self.polyline, segments: right.to_vec() },
        )
    }

    fn yield_item(&self) -> usize { self.segments[0] }
}

const CURVE_TREE_MAX_DEPTH: usize = 12;
const CURVE_TREE_SAMPLES: usize = 5;

/// Lazy bounding-box tree over a sub-range of a curve's parameter domain.
/// The box is a sampled approximation (the curve's true convex hull is not
/// available through `ParametricCurve3D` alone); depth is capped so a
/// pathological curve cannot split forever.
#[derive(Clone)]
pub struct CurveRangeTree<'a, C> {
    curve: &'a C,
    range: (f64, f64),
    depth: usize,
}

impl<'a, C: ParametricCurve3D> CurveRangeTree<'a, C> {
    /// A tree over the curve's full parameter range.
    pub fn new(curve: &'a C) -> Self {
        CurveRangeTree { range: curve.parameter_range(), curve, depth: 0 }
    }

    fn sample_points(&self) -> impl Iterator<Item = Point3> + '_ {
        let (t0, t1) = self.range;
        (0..CURVE_TREE_SAMPLES).map(move |i| {
            let t = t0 + (t1 - t0) * i as f64 / (CURVE_TREE_SAMPLES - 1) as f64;
            self.curve.subs(t)
        })
    }
}

impl<'a, C: ParametricCurve3D> BoundingVolumeTree for CurveRangeTree<'a, C> {
    /// A curve sub-range handle, `(t0, t1)`.
    type Item = (f64, f64);

    fn bounding_box(&self) -> BoundingBox<Point3> { self.sample_points().collect() }

    fn is_empty(&self) -> bool { self.range.1 <= self.range.0 }

    fn indivisible(&self, _tol: f64) -> bool { self.depth >= CURVE_TREE_MAX_DEPTH }

    fn split(&self) -> (Self, Self) {
        let (t0, t1) = self.range;
        let mid = (t0 + t1) / 2.0;
        (
            CurveRangeTree { curve: self.curve, range: (t0, mid), depth: self.depth + 1 },
            CurveRangeTree { curve: self.curve, range: (mid, t1), depth: self.depth + 1 },
        )
    }

    fn yield_item(&self) -> (f64, f64) { self.range }
}

const SURFACE_TREE_MAX_DEPTH: usize = 10;
const SURFACE_TREE_SAMPLES: usize = 3;

/// Lazy bounding-box tree over a sub-rectangle of a surface's `(u, v)`
/// domain. Same sampled-box approximation and depth cap as
/// `CurveRangeTree`.
#[derive(Clone)]
pub struct SurfaceRectTree<'a, S> {
    surface: &'a S,
    u_range: (f64, f64),
    v_range: (f64, f64),
    depth: usize,
}

impl<'a, S: ParametricSurface3D> SurfaceRectTree<'a, S> {
    /// A tree over the surface's full parameter domain.
    pub fn new(surface: &'a S) -> Self {
        let (u_range, v_range) = surface.parameter_range();
        SurfaceRectTree { surface, u_range, v_range, depth: 0 }
    }

    fn sample_points(&self) -> impl Iterator<Item = Point3> + '_ {
        let (u0, u1) = self.u_range;
        let (v0, v1) = self.v_range;
        (0..SURFACE_TREE_SAMPLES).flat_map(move |i| {
            let u = u0 + (u1 - u0) * i as f64 / (SURFACE_TREE_SAMPLES - 1) as f64;
            (0..SURFACE_TREE_SAMPLES).map(move |j| {
                let v = v0 + (v1 - v0) * j as f64 / (SURFACE_TREE_SAMPLES - 1) as f64;
                self.surface.subs(u, v)
            })
        })
    }
}

impl<'a, S: ParametricSurface3D> BoundingVolumeTree for SurfaceRectTree<'a, S> {
    /// A surface sub-rectangle handle, `((u0, u1), (v0, v1))`.
    type Item = ((f64, f64), (f64, f64));

    fn bounding_box(&self) -> BoundingBox<Point3> { self.sample_points().collect() }

    fn is_empty(&self) -> bool { self.u_range.1 <= self.u_range.0 || self.v_range.1 <= self.v_range.0 }

    fn indivisible(&self, _tol: f64) -> bool { self.depth >= SURFACE_TREE_MAX_DEPTH }

    fn split(&self) -> (Self, Self) {
        let (u0, u1) = self.u_range;
        let (v0, v1) = self.v_range;
        let u_wide = (u1 - u0) >= (v1 - v0);
        if u_wide {
            let mid = (u0 + u1) / 2.0;
            (
                SurfaceRectTree { surface: self.surface, u_range: (u0, mid), v_range: self.v_range, depth: self.depth + 1 },
                SurfaceRectTree { surface: self.surface, u_range: (mid, u1), v_range: self.v_range, depth: self.depth + 1 },
            )
        } else {
            let mid = (v0 + v1) / 2.0;
            (
                SurfaceRectTree { surface: self.surface, u_range: self.u_range, v_range: (v0, mid), depth: self.depth + 1 },
                SurfaceRectTree { surface: self.surface, u_range: self.u_range, v_range: (mid, v1), depth: self.depth + 1 },
            )
        }
    }

    fn yield_item(&self) -> ((f64, f64), (f64, f64)) { (self.u_range, self.v_range) }
}
