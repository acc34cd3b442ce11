//! The constrained 2D Delaunay triangulation step shared by per-face
//! refinement and standalone polygon tessellation.

use crate::math::{Point2, Real};
use spade::{ConstrainedDelaunayTriangulation, HasPosition, Triangulation};

/// A 2D triangulation site tagged with the index of the point it came from.
struct Site {
    position: spade::Point2<Real>,
    index: u32,
}

impl HasPosition for Site {
    type Scalar = Real;

    fn position(&self) -> spade::Point2<Real> {
        self.position
    }
}

/// Delaunay-triangulates the points of one convex region.
///
/// `chains` describes the region boundary as straight stretches: for each
/// stretch, the indices into `points` of the points lying on it in order,
/// both endpoints included. Points listed in no chain are interior.
///
/// Consecutive chain points are inserted as constraint edges, so boundary
/// points always sit on boundary edges even when rounding nudges one of
/// them to the interior side of the convex hull; the zero-area slivers such
/// a point leaves between its constraint edges and the hull are dropped.
///
/// Returns the triangles as triples of indices into `points`. Returns
/// `None` if spade rejects a point (e.g. a non-finite coordinate) or if the
/// set spans no area, i.e. it contains fewer than three distinct,
/// non-collinear points.
pub(crate) fn triangulate_region(
    points: &[Point2],
    chains: &[Vec<u32>],
) -> Option<Vec<[u32; 3]>> {
    let mut cdt: ConstrainedDelaunayTriangulation<Site> = ConstrainedDelaunayTriangulation::new();

    let mut handles = Vec::with_capacity(points.len());
    for (index, pt) in points.iter().enumerate() {
        let site = Site {
            position: spade::Point2::new(sanitize_coord(pt.x), sanitize_coord(pt.y)),
            index: index as u32,
        };
        handles.push(cdt.insert(site).ok()?);
    }

    for chain in chains {
        for pair in chain.windows(2) {
            let (ha, hb) = (handles[pair[0] as usize], handles[pair[1] as usize]);
            if ha != hb {
                let _ = cdt.add_constraint(ha, hb);
            }
        }
    }

    // A point belongs to at most two chains (a corner joins two stretches).
    let mut membership = vec![[u32::MAX; 2]; points.len()];
    for (chain_id, chain) in chains.iter().enumerate() {
        for &index in chain {
            let slots = &mut membership[index as usize];
            let slot = usize::from(slots[0] != u32::MAX);
            slots[slot] = chain_id as u32;
        }
    }

    let on_one_chain = |a: u32, b: u32, c: u32| {
        membership[a as usize].iter().any(|&chain| {
            chain != u32::MAX
                && membership[b as usize].contains(&chain)
                && membership[c as usize].contains(&chain)
        })
    };

    let mut triangles = Vec::with_capacity(cdt.num_inner_faces());
    for face in cdt.inner_faces() {
        let [a, b, c] = face.vertices().map(|v| v.data().index);

        // All three vertices on one straight boundary stretch: this is the
        // sliver left by a boundary point that rounding sank inside the hull.
        if on_one_chain(a, b, c) {
            continue;
        }

        triangles.push([a, b, c]);
    }

    if triangles.is_empty() {
        return None;
    }

    Some(triangles)
}

/// Clamps a coordinate into the range of values spade accepts.
///
/// Magnitudes below `spade::MIN_ALLOWED_VALUE` flush to zero and magnitudes
/// above `spade::MAX_ALLOWED_VALUE` saturate.
fn sanitize_coord(coord: Real) -> Real {
    let abs = coord.abs();

    if abs <= spade::MIN_ALLOWED_VALUE {
        0.0
    } else if abs > spade::MAX_ALLOWED_VALUE {
        spade::MAX_ALLOWED_VALUE * coord.signum()
    } else {
        coord
    }
}

#[cfg(test)]
mod test {
    use super::triangulate_region;
    use crate::math::Point2;

    #[test]
    fn square_triangulates_into_two_triangles() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let chains = vec![vec![0, 1], vec![1, 2], vec![2, 3], vec![3, 0]];
        let triangles = triangulate_region(&points, &chains).unwrap();

        assert_eq!(triangles.len(), 2);
        for tri in &triangles {
            for id in tri {
                assert!((*id as usize) < points.len());
            }
        }
    }

    #[test]
    fn degenerate_point_sets_are_rejected() {
        assert!(triangulate_region(&[], &[]).is_none());
        assert!(triangulate_region(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            &[vec![0, 1]],
        )
        .is_none());
        // Collinear points have no inner faces.
        let collinear = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert!(triangulate_region(&collinear, &[vec![0, 1, 2]]).is_none());
        assert!(triangulate_region(&[Point2::new(f64::NAN, 0.0)], &[]).is_none());
    }

    #[test]
    fn boundary_points_sunk_inside_the_hull_leave_no_sliver() {
        // The bottom edge midpoint is nudged inside the triangle, as happens
        // when a 3D edge point is projected through a face frame. The
        // triangle count must stay at P + 2K - 2 = 4 + 2 - 2, with the
        // sliver under the bottom hull edge dropped.
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0e-14),
            Point2::new(2.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(1.0, 0.7),
        ];
        let chains = vec![vec![0, 1, 2], vec![2, 3], vec![3, 0]];
        let triangles = triangulate_region(&points, &chains).unwrap();

        assert_eq!(triangles.len(), 4);
        for tri in &triangles {
            let mut sorted = *tri;
            sorted.sort_unstable();
            assert_ne!(sorted, [0, 1, 2]);
        }
    }
}
