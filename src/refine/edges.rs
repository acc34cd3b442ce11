//! Undirected edge identification and shared edge subdivision.

use crate::math::{Point, Real};
use hashbrown::HashMap;
use smallvec::SmallVec;

/// An undirected mesh edge, identified by its two endpoint vertex ids.
///
/// The ids are stored in increasing order so that `EdgeKey::new(a, b)` and
/// `EdgeKey::new(b, a)` compare and hash identically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    lo: u32,
    hi: u32,
}

impl EdgeKey {
    /// The canonical key of the edge joining vertices `a` and `b`.
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            EdgeKey { lo: a, hi: b }
        } else {
            EdgeKey { lo: b, hi: a }
        }
    }

    /// The smaller of the two endpoint ids.
    pub fn lo(&self) -> u32 {
        self.lo
    }

    /// The larger of the two endpoint ids.
    pub fn hi(&self) -> u32 {
        self.hi
    }
}

type SubdivisionIds = SmallVec<[u32; 4]>;

/// The subdivision points created along each distinct edge of a mesh.
///
/// Subdivision points are created exactly once per undirected edge, no matter
/// how many faces share it, so every face touching an edge resolves the same
/// vertex ids for it. This is what keeps seams between adjacent refined faces
/// watertight.
pub(crate) struct EdgeRegistry {
    subdivisions: HashMap<EdgeKey, SubdivisionIds>,
}

impl EdgeRegistry {
    /// Subdivides every distinct edge of `faces` once, appending the new
    /// points to `vertices` and recording their ids.
    ///
    /// Face indices must already have been validated against `vertices`, and
    /// `reference_length` must be strictly positive.
    pub fn subdivide_all(
        vertices: &mut Vec<Point>,
        faces: &[[u32; 3]],
        reference_length: Real,
    ) -> Self {
        let mut subdivisions = HashMap::default();

        for face in faces {
            for k in 0..3 {
                let key = EdgeKey::new(face[k], face[(k + 1) % 3]);
                if subdivisions.contains_key(&key) {
                    continue;
                }

                let ids = subdivide_segment(vertices, key.lo, key.hi, reference_length);
                let _ = subdivisions.insert(key, ids);
            }
        }

        EdgeRegistry { subdivisions }
    }

    /// The ids of the subdivision points lying strictly between vertices
    /// `a` and `b`, ordered from the lower to the higher endpoint id.
    pub fn points_on(&self, a: u32, b: u32) -> &[u32] {
        self.subdivisions
            .get(&EdgeKey::new(a, b))
            .map(|ids| &ids[..])
            .unwrap_or(&[])
    }
}

/// Splits the segment from vertex `a` to vertex `b`, appending the interior
/// split points to `vertices` and returning their ids.
fn subdivide_segment(
    vertices: &mut Vec<Point>,
    a: u32,
    b: u32,
    reference_length: Real,
) -> SubdivisionIds {
    let pa = vertices[a as usize];
    let pb = vertices[b as usize];
    let first = vertices.len() as u32;
    split_segment(&pa, &pb, reference_length, vertices);

    (first..vertices.len() as u32).collect()
}

/// Splits the segment `[a, b]` into `floor(length / reference_length) + 1`
/// equal parts, appending the interior split points to `out` in order from
/// `a` to `b`.
///
/// A segment shorter than `reference_length` gets no interior point.
pub(crate) fn split_segment<const D: usize>(
    a: &na::Point<Real, D>,
    b: &na::Point<Real, D>,
    reference_length: Real,
    out: &mut Vec<na::Point<Real, D>>,
) {
    let ab = b - a;
    let divisions = (ab.norm() / reference_length) as u32 + 1;
    let step = ab / divisions as Real;

    for i in 1..divisions {
        out.push(*a + step * i as Real);
    }
}

#[cfg(test)]
mod test {
    use super::{EdgeKey, EdgeRegistry};
    use crate::math::Point;

    #[test]
    fn edge_key_ignores_direction() {
        assert_eq!(EdgeKey::new(7, 2), EdgeKey::new(2, 7));
        assert_eq!(EdgeKey::new(7, 2).lo(), 2);
        assert_eq!(EdgeKey::new(7, 2).hi(), 7);
    }

    #[test]
    fn segment_shorter_than_reference_is_not_split() {
        let mut vertices = vec![Point::origin(), Point::new(1.0, 0.0, 0.0)];
        let registry = EdgeRegistry::subdivide_all(&mut vertices, &[[0, 1, 0]], 2.0);

        assert_eq!(registry.points_on(0, 1), &[] as &[u32]);
        assert_eq!(vertices.len(), 2);
    }

    #[test]
    fn split_points_are_evenly_spaced() {
        // A segment of length 10 against a reference length of 3 is cut into
        // floor(10 / 3) + 1 = 4 parts, i.e. 3 interior points.
        let mut vertices = vec![Point::origin(), Point::new(10.0, 0.0, 0.0)];
        let registry = EdgeRegistry::subdivide_all(&mut vertices, &[[0, 1, 0]], 3.0);

        assert_eq!(registry.points_on(0, 1), &[2, 3, 4]);
        assert_eq!(registry.points_on(1, 0), &[2, 3, 4]);
        assert!(relative_eq!(vertices[2].x, 2.5));
        assert!(relative_eq!(vertices[3].x, 5.0));
        assert!(relative_eq!(vertices[4].x, 7.5));
    }

    #[test]
    fn shared_edges_are_subdivided_once() {
        let mut vertices = vec![
            Point::origin(),
            Point::new(4.0, 0.0, 0.0),
            Point::new(2.0, 3.0, 0.0),
            Point::new(2.0, -3.0, 0.0),
        ];
        // Two triangles sharing the edge (0, 1), listed in opposite directions.
        let faces = [[0, 1, 2], [1, 0, 3]];
        let registry = EdgeRegistry::subdivide_all(&mut vertices, &faces, 1.5);

        let from_first = registry.points_on(0, 1).to_vec();
        let from_second = registry.points_on(1, 0).to_vec();
        assert!(!from_first.is_empty());
        assert_eq!(from_first, from_second);
    }
}
