//! Whole-mesh refinement: drives the local frame, edge registry, interior
//! sampler and per-face triangulation, then stitches the per-face results
//! into one globally indexed mesh.

use crate::error::RefineError;
use crate::math::{Point, Point2, Real};
use crate::refine::edges::EdgeRegistry;
use crate::refine::frame::LocalFrame;
use crate::refine::sampling;
use crate::refine::triangulate::triangulate_region;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Every mesh face is seeded with at least this many interior points.
const MIN_INTERIOR_SAMPLES: usize = 1;

/// How [`refine_mesh_with_options`] treats an input face whose corners are
/// collinear or duplicated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneratePolicy {
    /// Fail the whole refinement with [`RefineError::DegenerateFace`].
    #[default]
    Abort,
    /// Skip the face, record its index in [`RefinedMesh::skipped_faces`] and
    /// log a warning. The output then only covers the remaining faces.
    Skip,
}

/// Options controlling [`refine_mesh_with_options`].
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RefineOptions {
    /// Policy applied to degenerate input faces.
    pub degenerate_faces: DegeneratePolicy,
    /// Seed of the deterministic random streams used for interior point
    /// seeding. Two refinements of the same input with the same seed produce
    /// identical meshes, sequentially or in parallel.
    pub seed: u64,
}

/// A refined triangle mesh.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct RefinedMesh {
    /// All mesh vertices. The input vertices come first, unchanged and at
    /// their original positions; subdivision and interior vertices follow.
    pub vertices: Vec<Point>,
    /// The refined triangles, as triples of indices into `vertices`.
    pub indices: Vec<[u32; 3]>,
    /// Input faces skipped under [`DegeneratePolicy::Skip`]. Empty under
    /// [`DegeneratePolicy::Abort`].
    pub skipped_faces: Vec<u32>,
}

/// The triangulation of a single face, before global index assignment.
///
/// Triangles index the face's local point list: the three corners, then the
/// subdivision points of its edges (all of which already have global ids),
/// then the freshly sampled interior points.
struct FaceTriangulation {
    boundary_ids: Vec<u32>,
    interior: Vec<Point>,
    triangles: Vec<[u32; 3]>,
}

/// Refines `(vertices, faces)` so that all triangles of the result have
/// edges roughly `reference_length` long, with default [`RefineOptions`].
///
/// See [`refine_mesh_with_options`].
pub fn refine_mesh(
    vertices: &[Point],
    faces: &[[u32; 3]],
    reference_length: Real,
) -> Result<RefinedMesh, RefineError> {
    refine_mesh_with_options(vertices, faces, reference_length, &RefineOptions::default())
}

/// Refines `(vertices, faces)` so that all triangles of the result have
/// edges roughly `reference_length` long.
///
/// Every distinct undirected edge of the input is subdivided exactly once
/// and its subdivision vertices are shared by both adjacent faces, so the
/// refined mesh is watertight wherever the input was. The input vertices are
/// preserved unchanged as the first entries of the output vertex buffer.
///
/// Fails fast with an [`RefineError::InvalidReferenceLength`] or
/// [`RefineError::FaceIndexOutOfBounds`] error before computing anything.
/// Degenerate faces are handled according to
/// [`RefineOptions::degenerate_faces`].
pub fn refine_mesh_with_options(
    vertices: &[Point],
    faces: &[[u32; 3]],
    reference_length: Real,
    options: &RefineOptions,
) -> Result<RefinedMesh, RefineError> {
    if !reference_length.is_finite() || reference_length <= 0.0 {
        return Err(RefineError::InvalidReferenceLength(reference_length));
    }

    for (face_id, face) in faces.iter().enumerate() {
        if let Some(&vertex) = face.iter().find(|v| **v as usize >= vertices.len()) {
            return Err(RefineError::FaceIndexOutOfBounds {
                face: face_id as u32,
                vertex,
                num_vertices: vertices.len(),
            });
        }
    }

    let mut all_vertices = vertices.to_vec();

    // Single writer pass: all edge subdivisions exist before any face is
    // triangulated, so the per-face step only ever reads shared state.
    let registry = EdgeRegistry::subdivide_all(&mut all_vertices, faces, reference_length);

    let refined = map_faces(faces, |face_id, face| {
        refine_face(face_id, face, &all_vertices, &registry, reference_length, options)
    })?;

    // Interior vertices are never shared between faces; minting their global
    // ids face by face keeps the allocation a single monotonic counter.
    let mut indices = Vec::new();
    let mut skipped_faces = Vec::new();
    for (face_id, face_result) in refined.into_iter().enumerate() {
        let Some(face) = face_result else {
            skipped_faces.push(face_id as u32);
            continue;
        };

        let mut local_to_global = face.boundary_ids;
        local_to_global.reserve(face.interior.len());
        for pt in face.interior {
            local_to_global.push(all_vertices.len() as u32);
            all_vertices.push(pt);
        }

        for triangle in face.triangles {
            indices.push(triangle.map(|i| local_to_global[i as usize]));
        }
    }

    log::debug!(
        "refined {} faces into {} triangles and {} vertices ({} faces skipped)",
        faces.len(),
        indices.len(),
        all_vertices.len(),
        skipped_faces.len()
    );

    Ok(RefinedMesh {
        vertices: all_vertices,
        indices,
        skipped_faces,
    })
}

/// Refines one face: projects its corner, edge and interior points into the
/// face's local frame and Delaunay-triangulates them.
///
/// Returns `Ok(None)` for a degenerate face under [`DegeneratePolicy::Skip`].
fn refine_face(
    face_id: u32,
    face: &[u32; 3],
    vertices: &[Point],
    registry: &EdgeRegistry,
    reference_length: Real,
    options: &RefineOptions,
) -> Result<Option<FaceTriangulation>, RefineError> {
    let pa = &vertices[face[0] as usize];
    let pb = &vertices[face[1] as usize];
    let pc = &vertices[face[2] as usize];

    let Some(frame) = LocalFrame::from_points(pa, pb, pc) else {
        return match options.degenerate_faces {
            DegeneratePolicy::Abort => Err(RefineError::DegenerateFace(face_id)),
            DegeneratePolicy::Skip => {
                log::warn!("skipping degenerate face {face_id}");
                Ok(None)
            }
        };
    };

    let mut boundary_ids = vec![face[0], face[1], face[2]];
    let mut local_points = vec![frame.project(pa), frame.project(pb), frame.project(pc)];
    let mut chains = Vec::with_capacity(3);

    for k in 0..3 {
        let (va, vb) = (face[k], face[(k + 1) % 3]);
        let ids = registry.points_on(va, vb);

        let first = boundary_ids.len() as u32;
        for &id in ids {
            boundary_ids.push(id);
            local_points.push(frame.project(&vertices[id as usize]));
        }

        // The registry orders an edge's points from its lower to its higher
        // endpoint id; flip them when this face walks the edge the other way.
        let mut chain = Vec::with_capacity(ids.len() + 2);
        chain.push(k as u32);
        let run = first..first + ids.len() as u32;
        if va <= vb {
            chain.extend(run);
        } else {
            chain.extend(run.rev());
        }
        chain.push(((k + 1) % 3) as u32);
        chains.push(chain);
    }

    let num_interior = interior_count(&local_points[0..3], reference_length);
    let mut rng = sampling::face_rng(options.seed, face_id);
    let interior = sampling::sample_in_convex_polygon(&mut rng, &[*pa, *pb, *pc], num_interior);
    local_points.extend(interior.iter().map(|pt| frame.project(pt)));

    let triangles = triangulate_region(&local_points, &chains)
        .ok_or(RefineError::TriangulationFailed(face_id))?;

    Ok(Some(FaceTriangulation {
        boundary_ids,
        interior,
        triangles,
    }))
}

/// The number of interior points to seed in a triangle with the given 2D
/// corners: the triangle area divided by the area of a right isosceles
/// triangle with `reference_length` legs, rounded, and at least
/// [`MIN_INTERIOR_SAMPLES`].
fn interior_count(corners: &[Point2], reference_length: Real) -> usize {
    let area = (corners[1] - corners[0])
        .perp(&(corners[2] - corners[0]))
        .abs()
        * 0.5;
    let reference_area = reference_length * reference_length * 0.5;

    ((area / reference_area).round() as usize).max(MIN_INTERIOR_SAMPLES)
}

#[cfg(not(feature = "parallel"))]
fn map_faces(
    faces: &[[u32; 3]],
    op: impl Fn(u32, &[u32; 3]) -> Result<Option<FaceTriangulation>, RefineError>,
) -> Result<Vec<Option<FaceTriangulation>>, RefineError> {
    faces
        .iter()
        .enumerate()
        .map(|(face_id, face)| op(face_id as u32, face))
        .collect()
}

#[cfg(feature = "parallel")]
fn map_faces(
    faces: &[[u32; 3]],
    op: impl Fn(u32, &[u32; 3]) -> Result<Option<FaceTriangulation>, RefineError> + Sync,
) -> Result<Vec<Option<FaceTriangulation>>, RefineError> {
    faces
        .par_iter()
        .enumerate()
        .map(|(face_id, face)| op(face_id as u32, face))
        .collect()
}

#[cfg(test)]
mod test {
    use super::interior_count;
    use crate::math::Point2;

    #[test]
    fn interior_count_has_a_floor_of_one() {
        // Unit equilateral triangle against a reference length larger than
        // every edge: the rounded estimate is zero, the floor kicks in.
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 3.0f64.sqrt() / 2.0),
        ];
        assert_eq!(interior_count(&corners, 2.0), 1);
    }

    #[test]
    fn interior_count_tracks_area() {
        let corners = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(0.0, 10.0),
        ];
        // Area 50 against a reference area of 0.5.
        assert_eq!(interior_count(&corners, 1.0), 100);
    }
}
