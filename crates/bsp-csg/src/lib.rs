//! Constructive solid geometry on polygon boundaries using BSP trees.
//!
//! Solids are described by their boundary polygons. Each operand is built
//! into a [`BspNode`] tree, and [`CsgService`] combines two trees with
//! union, subtraction or intersection by running a fixed sequence of
//! `invert`, `clip_to` and `build` steps on private copies.
//!
//! # Example
//!
//! ```ignore
//! use bsp_csg::{BspNode, CsgService, Polygon};
//!
//! let a = BspNode::from_polygons(cube_a)?;
//! let b = BspNode::from_polygons(cube_b)?;
//!
//! let service = CsgService::default();
//! let difference: Vec<Polygon> = service.subtract(&a, &b)?.all_polygons();
//! ```

mod bsp;
mod config;
mod csg;
mod cuttable;
mod error;
pub mod measure;
mod plane;
mod polygon;
mod vertex;

#[cfg(test)]
mod fixtures;

pub use bsp::{BspNode, FirstPolygon, LargestArea, PlaneSelector};
pub use config::{
    CoplanarPolicy, CsgConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ITERATIONS,
};
pub use csg::{BooleanOp, CsgService, Step};
pub use cuttable::{split_polygon, Cuttable, Split};
pub use error::{CsgError, Result};
pub use plane::{Classification, Plane, PlaneSide, PLANE_EPSILON};
pub use polygon::Polygon;
pub use vertex::Vertex;
