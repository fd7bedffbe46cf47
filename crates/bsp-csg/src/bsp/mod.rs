//! Binary Space Partitioning tree for CSG.
//!
//! A BSP tree recursively partitions space using the planes of its input
//! polygons. Besides storing the polygons, the tree describes a solid:
//! cells reached through a missing back child are inside, cells reached
//! through a missing front child are outside. That makes the tree usable
//! for clipping polygons against a solid and, combined with inversion,
//! for boolean operations.
//!
//! # Architecture
//!
//! - [`BspNode`]: a node storing a splitting plane, its coplanar polygons
//!   and owned front/back subtrees
//! - [`PlaneSelector`]: strategy trait for choosing splitting planes

mod node;
mod selector;

pub use node::BspNode;
pub use selector::{FirstPolygon, LargestArea, PlaneSelector};
