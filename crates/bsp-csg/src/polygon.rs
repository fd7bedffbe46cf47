//! Convex polygon representation for BSP trees.

use nalgebra::{Point3, Vector3};

use crate::error::{CsgError, Result};
use crate::plane::classify_distances;
use crate::{Classification, Plane, Vertex};

/// A convex polygon in 3D space.
///
/// Vertices lie on `plane` and are wound counter-clockwise when viewed
/// from the front (the direction the plane normal points). `shared` is an
/// opaque tag copied onto every fragment the polygon is split into.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<S = ()> {
    vertices: Vec<Vertex>,
    plane: Plane,
    shared: Option<S>,
}

impl<S> Polygon<S> {
    /// Creates a polygon, deriving its plane from the first three vertices.
    ///
    /// Fails if there are fewer than 3 vertices, any coordinate is
    /// non-finite, or the first three positions are collinear.
    pub fn new(vertices: Vec<Vertex>, shared: Option<S>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(CsgError::invalid_polygon(format!(
                "expected at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if !vertices.iter().all(Vertex::is_finite) {
            return Err(CsgError::invalid_polygon("non-finite vertex data"));
        }
        let plane = Plane::from_points(
            vertices[0].position,
            vertices[1].position,
            vertices[2].position,
        )
        .ok_or_else(|| CsgError::invalid_polygon("first three vertices are collinear"))?;
        if !plane.is_finite() {
            return Err(CsgError::invalid_polygon("non-finite plane"));
        }

        Ok(Self {
            vertices,
            plane,
            shared,
        })
    }

    /// Creates a flat-shaded polygon from positions: every vertex normal is
    /// the polygon's plane normal.
    pub fn from_positions(positions: &[Point3<f64>], shared: Option<S>) -> Result<Self> {
        let vertices = positions
            .iter()
            .map(|&p| Vertex::new(p, Vector3::zeros()))
            .collect();
        let mut polygon = Self::new(vertices, shared)?;
        let normal = polygon.plane.normal();
        for vertex in &mut polygon.vertices {
            vertex.normal = normal;
        }
        Ok(polygon)
    }

    /// Assembles a polygon from parts without any validation.
    ///
    /// Callers are responsible for the vertices lying on `plane`; use
    /// [`Polygon::validate`] to check data of unknown origin.
    pub fn from_parts(vertices: Vec<Vertex>, plane: Plane, shared: Option<S>) -> Self {
        Self {
            vertices,
            plane,
            shared,
        }
    }

    /// Checks that the polygon has at least 3 vertices and only finite data.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.len() < 3 {
            return Err(CsgError::invalid_polygon(format!(
                "expected at least 3 vertices, got {}",
                self.vertices.len()
            )));
        }
        if !self.vertices.iter().all(Vertex::is_finite) {
            return Err(CsgError::invalid_polygon("non-finite vertex data"));
        }
        if !self.plane.is_finite() {
            return Err(CsgError::invalid_polygon("non-finite plane"));
        }
        Ok(())
    }

    /// Returns the vertices of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the plane this polygon lies on.
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Returns the shared tag, if any.
    #[inline]
    pub fn shared(&self) -> Option<&S> {
        self.shared.as_ref()
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Reverses the winding, negates every vertex normal and the plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for vertex in &mut self.vertices {
            vertex.flip();
        }
        self.plane.flip();
    }

    /// Computes the centroid (vertex average) of the polygon.
    pub fn centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.vertices.iter().map(|v| v.position.coords).sum();
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Computes the area of the polygon.
    pub fn area(&self) -> f64 {
        let Some(first) = self.vertices.first() else {
            return 0.0;
        };
        let origin = first.position;
        let doubled: Vector3<f64> = self
            .vertices
            .windows(2)
            .skip(1)
            .map(|pair| (pair[0].position - origin).cross(&(pair[1].position - origin)))
            .sum();
        0.5 * doubled.dot(&self.plane.normal()).abs()
    }

    /// Classifies this polygon relative to a plane.
    ///
    /// Returns:
    /// - `Coplanar` if all vertices lie on the plane
    /// - `Front` if no vertex is behind the plane
    /// - `Back` if no vertex is in front of the plane
    /// - `Spanning` if vertices are on both sides
    pub fn classify(&self, plane: &Plane) -> Classification {
        classify_distances(
            self.vertices
                .iter()
                .map(|vertex| plane.signed_distance(&vertex.position)),
        )
    }
}

impl<S: Clone> Polygon<S> {
    /// Returns a flipped copy of this polygon.
    pub fn flipped(&self) -> Self {
        let mut polygon = self.clone();
        polygon.flip();
        polygon
    }
}
