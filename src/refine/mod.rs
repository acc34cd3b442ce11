//! Delaunay-based refinement of triangle meshes and convex polygons.
//!
//! The entry points are [`refine_mesh`] (refine a whole triangle mesh while
//! keeping shared edges watertight) and [`tessellate_polygon`] (tessellate a
//! single convex polygon in isolation).

pub use self::edges::EdgeKey;
pub use self::frame::LocalFrame;
pub use self::refine_mesh::{
    refine_mesh, refine_mesh_with_options, DegeneratePolicy, RefineOptions, RefinedMesh,
};
pub use self::tessellate::{
    tessellate_polygon, tessellate_polygon_with_seed, PolygonTessellation,
};

mod edges;
mod frame;
mod refine_mesh;
pub mod sampling;
mod tessellate;
mod triangulate;
