//! Plane selection strategies for BSP tree construction.
//!
//! The choice of splitting plane affects tree balance and the number of
//! polygon splits during construction. It never changes the solid a tree
//! describes, so boolean results do not depend on the selector.

use crate::Polygon;

/// Strategy for selecting which polygon's plane to use for splitting.
///
/// A selector is only consulted when a node has no plane yet; once a
/// node's plane is set, later builds reuse it.
pub trait PlaneSelector {
    /// Select a polygon from the slice to use as the splitting plane.
    ///
    /// Returns `None` if the slice is empty.
    /// The returned reference must be to an element in the provided slice.
    fn select<'a, S>(&self, polygons: &'a [Polygon<S>]) -> Option<&'a Polygon<S>>;
}

/// Selects the first polygon in the list.
///
/// This is the simplest and fastest selector, but may produce unbalanced
/// trees depending on input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPolygon;

impl PlaneSelector for FirstPolygon {
    fn select<'a, S>(&self, polygons: &'a [Polygon<S>]) -> Option<&'a Polygon<S>> {
        polygons.first()
    }
}

/// Selects the polygon with the largest area.
///
/// Large faces tend to be the outer hull of a solid, which keeps more of
/// the remaining geometry on one side of the plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestArea;

impl PlaneSelector for LargestArea {
    fn select<'a, S>(&self, polygons: &'a [Polygon<S>]) -> Option<&'a Polygon<S>> {
        polygons
            .iter()
            .max_by(|a, b| a.area().total_cmp(&b.area()))
    }
}
