use thiserror::Error;

/// Error handler for [`Error`](enum.Error.html).
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures the engine raises instead of returning `None`/`[]`
/// (spec.md §7 classes 2 and 3). Expected absence of an intersection —
/// parallel planes, disjoint intervals, a deduped-away candidate — is never
/// an `Error`; it is an `Option::None` or an empty `Vec` at the call site.
#[derive(Debug, PartialEq, Error)]
pub enum Error {
    /// `three_planes` found no single intersection point while refining a
    /// surface-surface point (spec.md §4.5 step 4). The caller already
    /// provided a validated estimate, so this indicates the refinement
    /// walked into a numerically degenerate configuration; recovering
    /// silently here would return garbage instead of surfacing the failure.
    #[error(
        "three-plane solve degenerated while refining a surface-surface point \
         (planes nearly parallel); no single intersection point exists"
    )]
    DegenerateRefinement,
    /// Polyline reconstruction (spec.md §4.4) found an endpoint that was
    /// already marked visited while walking a new root. The segment graph
    /// invariants (`p.opp.opp == p`, symmetric `adj`, monotone `visited`)
    /// guarantee this cannot happen on well-formed input; seeing it means a
    /// dedup or linkage bug corrupted the graph, and hiding the failure
    /// would silently return a malformed polyline.
    #[error(
        "polyline reconstruction revisited endpoint {0} — segment graph invariant violated"
    )]
    RevisitedEndpoint(usize),
}
