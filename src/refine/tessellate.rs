//! Standalone tessellation of one convex 2D polygon.

use crate::error::RefineError;
use crate::math::{Point2, Real};
use crate::refine::edges::split_segment;
use crate::refine::sampling;
use crate::refine::triangulate::triangulate_region;

/// Every polygon is seeded with at least this many interior points,
/// whatever its estimated area.
const MIN_INTERIOR_SAMPLES: usize = 10;

/// The tessellation of a single convex polygon.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PolygonTessellation {
    /// The tessellation points: the input corners first, unchanged and in
    /// input order, then edge subdivision points, then interior points.
    pub vertices: Vec<Point2>,
    /// Triangles covering the polygon, as triples of indices into `vertices`.
    pub triangles: Vec<[u32; 3]>,
}

/// Tessellates one convex polygon in isolation, with a fixed random seed.
///
/// See [`tessellate_polygon_with_seed`].
pub fn tessellate_polygon(
    corners: &[Point2],
    reference_length: Real,
) -> Result<PolygonTessellation, RefineError> {
    tessellate_polygon_with_seed(corners, reference_length, 0)
}

/// Tessellates one convex polygon in isolation.
///
/// The corners must be ordered along the boundary and describe a convex
/// region; this is not validated. Each boundary edge is subdivided to
/// roughly `reference_length`, interior points are seeded from all corners,
/// and the resulting point set is Delaunay-triangulated.
///
/// Unlike [`refine_mesh`](crate::refine::refine_mesh) there is no edge
/// sharing with neighboring faces; the polygon is treated as a standalone
/// region.
///
/// The interior point count is estimated from the area of the polygon's
/// first three corners only, which is exact for triangles and an
/// approximation for anything denser; at least 10 points are always
/// seeded.
pub fn tessellate_polygon_with_seed(
    corners: &[Point2],
    reference_length: Real,
    seed: u64,
) -> Result<PolygonTessellation, RefineError> {
    if !reference_length.is_finite() || reference_length <= 0.0 {
        return Err(RefineError::InvalidReferenceLength(reference_length));
    }

    if corners.len() < 3 {
        return Err(RefineError::NotEnoughCorners(corners.len()));
    }

    let mut vertices = corners.to_vec();
    let mut chains = Vec::with_capacity(corners.len());

    // No adjacent face can share these edges, so they are subdivided locally
    // rather than through a registry.
    for i in 0..corners.len() {
        let next = (i + 1) % corners.len();
        let first = vertices.len() as u32;
        split_segment(&corners[i], &corners[next], reference_length, &mut vertices);

        let mut chain = Vec::with_capacity(vertices.len() - first as usize + 2);
        chain.push(i as u32);
        chain.extend(first..vertices.len() as u32);
        chain.push(next as u32);
        chains.push(chain);
    }

    let area = (corners[1] - corners[0])
        .perp(&(corners[2] - corners[0]))
        .abs()
        * 0.5;
    let reference_area = reference_length * reference_length * 0.5;
    let num_interior = ((area / reference_area).round() as usize).max(MIN_INTERIOR_SAMPLES);

    let mut rng = oorandom::Rand64::new(seed as u128);
    vertices.extend(sampling::sample_in_convex_polygon(&mut rng, corners, num_interior));

    let triangles =
        triangulate_region(&vertices, &chains).ok_or(RefineError::TriangulationFailed(0))?;

    Ok(PolygonTessellation { vertices, triangles })
}
