/*!
remesh3d
========

**remesh3d** is a Delaunay-based triangle mesh refinement library written
with the rust programming language. Given a coarse triangle mesh (or a
single convex polygon) and a target edge length, it produces a denser mesh
whose triangles are all roughly that edge length, preserving the original
boundary exactly and keeping shared edges between adjacent faces
consistent.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]

#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod math;
pub mod refine;

mod error;

pub use crate::error::RefineError;
pub use crate::refine::{
    refine_mesh, refine_mesh_with_options, tessellate_polygon, tessellate_polygon_with_seed,
    DegeneratePolicy, LocalFrame, PolygonTessellation, RefineOptions, RefinedMesh,
};
