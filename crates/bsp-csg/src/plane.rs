//! Plane representation and point classification.

use nalgebra::{Point3, Vector3};

/// Tolerance for plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f64 = 1e-5;

/// Which side of a plane a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// Point is in front of the plane (positive side of normal)
    Front,
    /// Point is behind the plane (negative side of normal)
    Back,
    /// Point lies on the plane (within epsilon tolerance)
    OnPlane,
}

/// Classification of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All vertices are in front of or on the plane
    Front,
    /// All vertices are behind or on the plane
    Back,
    /// All vertices are on the plane (coplanar)
    Coplanar,
    /// Vertices are on both sides (spans the plane)
    Spanning,
}

/// A plane in 3D space, represented as `normal · point = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vector3<f64>,
    w: f64,
}

impl Plane {
    /// Creates a new plane from a normal vector and offset.
    /// The normal will be normalized automatically.
    ///
    /// # Panics
    /// Panics if the normal vector has zero length.
    pub fn new(normal: Vector3<f64>, w: f64) -> Self {
        let norm = normal.norm();
        assert!(norm > f64::EPSILON, "Plane normal cannot be zero");
        Self {
            normal: normal / norm,
            w: w / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    ///
    /// Returns `None` if the normal has zero length.
    pub fn from_point_and_normal(point: Point3<f64>, normal: Vector3<f64>) -> Option<Self> {
        let unit_normal = normal.try_normalize(f64::EPSILON)?;
        Some(Self {
            normal: unit_normal,
            w: unit_normal.dot(&point.coords),
        })
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: (b - a) × (c - a).
    ///
    /// Returns `None` if the points are collinear (or nearly so).
    pub fn from_points(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Option<Self> {
        Self::from_point_and_normal(a, (b - a).cross(&(c - a)))
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn w(&self) -> f64 {
        self.w
    }

    /// Returns `true` if the normal and offset are all finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.normal.iter().all(|c| c.is_finite()) && self.w.is_finite()
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    #[inline]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classifies which side of the plane a point lies on, using [`PLANE_EPSILON`].
    pub fn classify_point(&self, point: &Point3<f64>) -> PlaneSide {
        side_of(self.signed_distance(point))
    }

    /// Flips the plane in place (negates normal and offset).
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }
}

/// Maps a signed distance onto a [`PlaneSide`].
#[inline]
pub(crate) fn side_of(distance: f64) -> PlaneSide {
    if distance < -PLANE_EPSILON {
        PlaneSide::Back
    } else if distance > PLANE_EPSILON {
        PlaneSide::Front
    } else {
        PlaneSide::OnPlane
    }
}

/// Classifies a polygon from the signed distances of its vertices.
pub(crate) fn classify_distances(distances: impl IntoIterator<Item = f64>) -> Classification {
    let mut front = false;
    let mut back = false;
    for distance in distances {
        match side_of(distance) {
            PlaneSide::Front => front = true,
            PlaneSide::Back => back = true,
            PlaneSide::OnPlane => {}
        }
    }

    match (front, back) {
        (false, false) => Classification::Coplanar,
        (true, false) => Classification::Front,
        (false, true) => Classification::Back,
        (true, true) => Classification::Spanning,
    }
}
