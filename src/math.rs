//! Linear algebra type aliases.

use na::{Point3, Vector3};

/// The scalar type used throughout this crate.
pub type Real = f64;

/// The default tolerance used for geometric operations.
pub const DEFAULT_EPSILON: Real = Real::EPSILON;

/// The 3D point type.
pub type Point = Point3<Real>;

/// The 2D point type.
pub type Point2 = na::Point2<Real>;

/// The 3D vector type.
pub type Vector = Vector3<Real>;

/// The 2D vector type.
pub type Vector2 = na::Vector2<Real>;
