use crate::math::Real;

/// Errors that can occur while refining a mesh or tessellating a polygon.
///
/// All failures are geometric or structural, never transient, so nothing is
/// ever retried. A failed call computes nothing (for invalid inputs) or
/// identifies the offending face; a partially refined mesh is never returned
/// as a success.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq)]
pub enum RefineError {
    /// The reference length must be strictly positive and finite.
    #[error("the reference length must be strictly positive and finite (got {0})")]
    InvalidReferenceLength(Real),

    /// A face references a vertex id outside of the input vertex buffer.
    #[error("face {face} references vertex {vertex} but only {num_vertices} vertices were given")]
    FaceIndexOutOfBounds {
        /// Index of the offending face.
        face: u32,
        /// The out-of-range vertex id.
        vertex: u32,
        /// Size of the input vertex buffer.
        num_vertices: usize,
    },

    /// A polygon needs at least three corners.
    #[error("a polygon needs at least 3 corners (got {0})")]
    NotEnoughCorners(usize),

    /// The corners of a face are collinear or duplicated, so no local
    /// coordinate frame can be built for it.
    ///
    /// Whether this aborts the whole refinement or skips the face is
    /// controlled by [`DegeneratePolicy`](crate::refine::DegeneratePolicy).
    #[error("face {0} is degenerate (collinear or duplicated corners)")]
    DegenerateFace(u32),

    /// The Delaunay triangulation of one face's point set failed.
    #[error("the triangulation of face {0} failed")]
    TriangulationFailed(u32),
}
