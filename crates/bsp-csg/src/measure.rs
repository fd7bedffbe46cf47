//! Measurements over polygon boundaries.

use nalgebra::Vector3;

use crate::Polygon;

/// Total area of all polygons.
pub fn surface_area<S>(polygons: &[Polygon<S>]) -> f64 {
    polygons.iter().map(Polygon::area).sum()
}

/// Signed volume enclosed by a closed boundary.
///
/// Sums the signed tetrahedra spanned by the origin and a triangle fan of
/// each polygon. Positive for outward-wound boundaries; meaningless for
/// open ones.
pub fn volume<S>(polygons: &[Polygon<S>]) -> f64 {
    polygons
        .iter()
        .map(|polygon| {
            let vertices = polygon.vertices();
            let Some(first) = vertices.first() else {
                return 0.0;
            };
            let a: Vector3<f64> = first.position.coords;
            vertices
                .windows(2)
                .skip(1)
                .map(|pair| a.dot(&pair[0].position.coords.cross(&pair[1].position.coords)))
                .sum::<f64>()
        })
        .sum::<f64>()
        / 6.0
}
