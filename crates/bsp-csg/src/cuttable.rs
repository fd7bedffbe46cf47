//! Polygon cutting/splitting against a plane.

use crate::error::{CsgError, Result};
use crate::plane::{classify_distances, side_of};
use crate::{Classification, Plane, PlaneSide, Polygon, Vertex};

/// The four buckets a polygon can land in after being split by a plane.
///
/// Areas of all fragments add up to the area of the input polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Split<S = ()> {
    /// Coplanar polygons facing the same direction as the plane.
    pub coplanar_front: Vec<Polygon<S>>,
    /// Coplanar polygons facing away from the plane.
    pub coplanar_back: Vec<Polygon<S>>,
    /// Polygons (or fragments) in front of the plane.
    pub front: Vec<Polygon<S>>,
    /// Polygons (or fragments) behind the plane.
    pub back: Vec<Polygon<S>>,
}

impl<S> Default for Split<S> {
    fn default() -> Self {
        Self {
            coplanar_front: Vec::new(),
            coplanar_back: Vec::new(),
            front: Vec::new(),
            back: Vec::new(),
        }
    }
}

/// Trait for geometry that can be cut by a plane.
pub trait Cuttable<S> {
    /// Cuts the geometry by a plane.
    ///
    /// # Buckets by classification
    ///
    /// - **Coplanar**: `coplanar_front` if the polygon faces the same way as
    ///   the plane, otherwise `coplanar_back`
    /// - **Front**: `front`
    /// - **Back**: `back`
    /// - **Spanning**: one fragment in `front` and one in `back`; fragments
    ///   with fewer than 3 vertices are dropped
    fn split(&self, plane: &Plane) -> Result<Split<S>>;
}

impl<S: Clone> Cuttable<S> for Polygon<S> {
    fn split(&self, plane: &Plane) -> Result<Split<S>> {
        let mut out = Split::default();
        split_polygon(self, plane, &mut out)?;
        Ok(out)
    }
}

/// Splits `polygon` by `plane`, pushing results into the buckets of `out`.
///
/// Works on the polygon's signed vertex distances; spanning polygons are cut
/// with a Sutherland-Hodgman style walk of the vertex ring, interpolating a
/// new vertex wherever an edge crosses from one side to the other.
pub fn split_polygon<S: Clone>(polygon: &Polygon<S>, plane: &Plane, out: &mut Split<S>) -> Result<()> {
    let vertices = polygon.vertices();

    let mut distances = Vec::with_capacity(vertices.len());
    for vertex in vertices {
        let distance = plane.signed_distance(&vertex.position);
        if !distance.is_finite() {
            return Err(CsgError::NonFiniteDistance { distance });
        }
        distances.push(distance);
    }

    match classify_distances(distances.iter().copied()) {
        Classification::Coplanar => {
            if plane.normal().dot(&polygon.plane().normal()) > 0.0 {
                out.coplanar_front.push(polygon.clone());
            } else {
                out.coplanar_back.push(polygon.clone());
            }
        }
        Classification::Front => out.front.push(polygon.clone()),
        Classification::Back => out.back.push(polygon.clone()),
        Classification::Spanning => {
            let (front_part, back_part) = cut_spanning(polygon, &distances);
            out.front.extend(front_part);
            out.back.extend(back_part);
        }
    }

    Ok(())
}

/// Cuts a polygon known to span the plane into its front and back fragments.
fn cut_spanning<S: Clone>(
    polygon: &Polygon<S>,
    distances: &[f64],
) -> (Option<Polygon<S>>, Option<Polygon<S>>) {
    let vertices = polygon.vertices();
    let n = vertices.len();

    let mut front_verts: Vec<Vertex> = Vec::with_capacity(n + 1);
    let mut back_verts: Vec<Vertex> = Vec::with_capacity(n + 1);

    for i in 0..n {
        let j = (i + 1) % n;
        let (di, dj) = (distances[i], distances[j]);
        let (si, sj) = (side_of(di), side_of(dj));
        let current = vertices[i];

        match si {
            PlaneSide::Front => front_verts.push(current),
            PlaneSide::Back => back_verts.push(current),
            PlaneSide::OnPlane => {
                // On-plane vertices belong to both fragments
                front_verts.push(current);
                back_verts.push(current);
            }
        }

        if matches!(
            (si, sj),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        ) {
            let t = di / (di - dj);
            let intersection = current.interpolate(&vertices[j], t);
            front_verts.push(intersection);
            back_verts.push(intersection);
        }
    }

    let fragment = |verts: Vec<Vertex>| {
        (verts.len() >= 3)
            .then(|| Polygon::from_parts(verts, *polygon.plane(), polygon.shared().cloned()))
    };

    (fragment(front_verts), fragment(back_verts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};

    fn make_polygon(points: &[[f64; 3]]) -> Polygon<u32> {
        let positions: Vec<Point3<f64>> = points.iter().map(|&p| Point3::from(p)).collect();
        Polygon::from_positions(&positions, Some(7)).unwrap()
    }

    #[test]
    fn front_polygon_goes_front() {
        let plane = Plane::new(Vector3::z(), 0.0);
        let poly = make_polygon(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 0.0]]);
        let split = poly.split(&plane).unwrap();
        assert_eq!(split.front, vec![poly]);
        assert!(split.back.is_empty());
        assert!(split.coplanar_front.is_empty() && split.coplanar_back.is_empty());
    }

    #[test]
    fn back_polygon_goes_back() {
        let plane = Plane::new(Vector3::z(), 0.0);
        let poly = make_polygon(&[[0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -2.0]]);
        let split = poly.split(&plane).unwrap();
        assert_eq!(split.back, vec![poly]);
        assert!(split.front.is_empty());
    }

    #[test]
    fn coplanar_polygon_bucketed_by_facing() {
        let plane = Plane::new(Vector3::z(), 0.0);
        let up = make_polygon(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let down = up.flipped();

        let split = up.split(&plane).unwrap();
        assert_eq!(split.coplanar_front.len(), 1);
        assert!(split.coplanar_back.is_empty());

        let split = down.split(&plane).unwrap();
        assert_eq!(split.coplanar_back.len(), 1);
        assert!(split.coplanar_front.is_empty());
    }

    #[test]
    fn spanning_square_splits_in_half() {
        let plane = Plane::new(Vector3::x(), 0.5);
        let square = make_polygon(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ]);

        let split = square.split(&plane).unwrap();
        assert_eq!(split.front.len(), 1);
        assert_eq!(split.back.len(), 1);

        let front = &split.front[0];
        let back = &split.back[0];
        assert_relative_eq!(front.area(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(back.area(), 0.5, epsilon = 1e-12);
        assert!(front.vertices().iter().all(|v| v.position.x >= 0.5 - 1e-12));
        assert!(back.vertices().iter().all(|v| v.position.x <= 0.5 + 1e-12));

        // Fragments keep the tag, the plane and the winding of the original.
        assert_eq!(front.shared(), Some(&7));
        assert_eq!(back.plane(), square.plane());
    }

    #[test]
    fn spanning_through_vertex_keeps_on_plane_vertex_in_both() {
        let plane = Plane::new(Vector3::x(), 0.0);
        let tri = make_polygon(&[[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [-1.0, 1.0, 0.0]]);

        let split = tri.split(&plane).unwrap();
        assert_eq!(split.front[0].len(), 3);
        assert_eq!(split.back[0].len(), 3);
        assert_relative_eq!(
            split.front[0].area() + split.back[0].area(),
            tri.area(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn interpolated_normals_are_carried() {
        let plane = Plane::new(Vector3::x(), 0.5);
        let mut vertices: Vec<Vertex> = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]]
            .iter()
            .map(|&p| Vertex::new(Point3::from(p), Vector3::z()))
            .collect();
        vertices[1].normal = Vector3::x();
        let poly: Polygon = Polygon::new(vertices, None).unwrap();

        let split = poly.split(&plane).unwrap();
        let crossing = split.front[0]
            .vertices()
            .iter()
            .find(|v| (v.position.x - 0.5).abs() < 1e-12 && v.position.y.abs() < 1e-12)
            .unwrap();
        assert_relative_eq!(crossing.normal, Vector3::new(0.5, 0.0, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn split_polygon_accumulates_into_buckets() {
        let plane = Plane::new(Vector3::z(), 0.0);
        let above = make_polygon(&[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]]);
        let below = make_polygon(&[[0.0, 0.0, -1.0], [1.0, 0.0, -1.0], [0.0, 1.0, -1.0]]);

        let mut out = Split::default();
        split_polygon(&above, &plane, &mut out).unwrap();
        split_polygon(&below, &plane, &mut out).unwrap();
        split_polygon(&above, &plane, &mut out).unwrap();

        assert_eq!(out.front, vec![above.clone(), above]);
        assert_eq!(out.back, vec![below]);
        assert!(out.coplanar_front.is_empty() && out.coplanar_back.is_empty());
    }

    #[test]
    fn non_finite_vertex_is_an_error() {
        let plane = Plane::new(Vector3::z(), 0.0);
        let poly: Polygon = Polygon::from_parts(
            vec![
                Vertex::new(Point3::new(0.0, 0.0, f64::NAN), Vector3::z()),
                Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
                Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
            ],
            plane,
            None,
        );
        let err = poly.split(&plane).unwrap_err();
        assert!(matches!(err, CsgError::NonFiniteDistance { .. }));
    }
}
