//! Polygon vertex with a position and a shading normal.

use nalgebra::{Point3, Vector3};

/// A polygon vertex.
///
/// The normal is carried through splits and flipped on inversion; it does
/// not take part in classification (only the polygon's plane does).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Vertex {
    /// Creates a new vertex.
    pub const fn new(position: Point3<f64>, normal: Vector3<f64>) -> Self {
        Self { position, normal }
    }

    /// Negates the vertex normal.
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
    }

    /// Linearly interpolates position and normal towards `other`.
    /// `t = 0` yields `self`, `t = 1` yields `other`.
    pub fn interpolate(&self, other: &Vertex, t: f64) -> Vertex {
        Vertex {
            position: self.position + (other.position - self.position) * t,
            normal: self.normal + (other.normal - self.normal) * t,
        }
    }

    /// Returns `true` if every coordinate of the position and normal is finite.
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite()) && self.normal.iter().all(|c| c.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn interpolate_midpoint() {
        let a = Vertex::new(Point3::new(0.0, 0.0, 0.0), Vector3::x());
        let b = Vertex::new(Point3::new(2.0, 4.0, -2.0), Vector3::y());
        let mid = a.interpolate(&b, 0.5);
        assert_relative_eq!(mid.position, Point3::new(1.0, 2.0, -1.0));
        assert_relative_eq!(mid.normal, Vector3::new(0.5, 0.5, 0.0));
    }

    #[test]
    fn flip_negates_normal_only() {
        let mut v = Vertex::new(Point3::new(1.0, 2.0, 3.0), Vector3::z());
        v.flip();
        assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal, -Vector3::z());
    }

    #[test]
    fn non_finite_position_detected() {
        let v = Vertex::new(Point3::new(f64::NAN, 0.0, 0.0), Vector3::z());
        assert!(!v.is_finite());
    }
}
