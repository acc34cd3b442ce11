//! Local coordinate frames attached to planar faces.

use crate::math::{Point, Point2, Vector, DEFAULT_EPSILON};

/// An orthonormal 2D coordinate frame embedded in 3D space.
///
/// The frame flattens the points of one planar face into 2D coordinates so
/// that they can be fed to a planar triangulation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LocalFrame {
    origin: Point,
    e1: Vector,
    e2: Vector,
}

impl LocalFrame {
    /// Builds the frame spanned by three non-collinear points.
    ///
    /// The origin is `p0`, the first axis points from `p0` toward `p1`, and
    /// the second axis is the Gram-Schmidt orthogonalization of `p2 - p0`
    /// against the first. Returns `None` if any axis has a near-zero length,
    /// i.e. the points are collinear or duplicated.
    pub fn from_points(p0: &Point, p1: &Point, p2: &Point) -> Option<Self> {
        let e1 = (p1 - p0).try_normalize(DEFAULT_EPSILON)?;
        let v02 = p2 - p0;
        // For collinear points the Gram-Schmidt residual is pure cancellation
        // noise, a few ulps of |v02|, so the rejection threshold must scale
        // with |v02| rather than being an absolute epsilon.
        let residual = v02 - e1 * v02.dot(&e1);
        let e2 = residual.try_normalize(DEFAULT_EPSILON.sqrt() * v02.norm())?;

        Some(LocalFrame {
            origin: *p0,
            e1,
            e2,
        })
    }

    /// The unit normal of the plane spanned by this frame.
    pub fn normal(&self) -> Vector {
        self.e1.cross(&self.e2)
    }

    /// Maps a 3D point to its 2D coordinates in this frame.
    pub fn project(&self, pt: &Point) -> Point2 {
        let v = pt - self.origin;
        Point2::new(v.dot(&self.e1), v.dot(&self.e2))
    }
}

#[cfg(test)]
mod test {
    use super::LocalFrame;
    use crate::math::Point;

    #[test]
    fn frame_axes_are_orthonormal() {
        let frame = LocalFrame::from_points(
            &Point::new(1.0, 2.0, 3.0),
            &Point::new(4.0, 2.0, -1.0),
            &Point::new(0.5, 7.0, 3.0),
        )
        .unwrap();

        assert!(relative_eq!(frame.normal().norm(), 1.0, epsilon = 1.0e-9));
    }

    #[test]
    fn projection_preserves_in_plane_distances() {
        let p0 = Point::new(0.0, 0.0, 1.0);
        let p1 = Point::new(3.0, 0.0, 1.0);
        let p2 = Point::new(0.0, 2.0, 1.0);
        let frame = LocalFrame::from_points(&p0, &p1, &p2).unwrap();

        let q0 = frame.project(&p0);
        let q1 = frame.project(&p1);
        let q2 = frame.project(&p2);

        assert!(relative_eq!((q1 - q0).norm(), 3.0, epsilon = 1.0e-9));
        assert!(relative_eq!((q2 - q0).norm(), 2.0, epsilon = 1.0e-9));
        assert!(relative_eq!((q2 - q1).norm(), (p2 - p1).norm(), epsilon = 1.0e-9));
    }

    #[test]
    fn collinear_points_have_no_frame() {
        let p0 = Point::new(0.0, 0.0, 0.0);
        let p1 = Point::new(1.0, 1.0, 1.0);
        let p2 = Point::new(2.0, 2.0, 2.0);
        assert!(LocalFrame::from_points(&p0, &p1, &p2).is_none());
        assert!(LocalFrame::from_points(&p0, &p0, &p2).is_none());

        // Large magnitudes make the Gram-Schmidt residual large in absolute
        // terms while still being pure rounding noise.
        assert!(LocalFrame::from_points(
            &Point::new(1.0e3, 0.0, -2.0e3),
            &Point::new(2.0e3, 1.0e3, -1.0e3),
            &Point::new(3.0e3, 2.0e3, 0.0),
        )
        .is_none());
    }
}
