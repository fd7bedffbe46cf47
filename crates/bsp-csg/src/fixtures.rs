//! Test geometry.

use nalgebra::Point3;

use crate::Polygon;

/// Generates the 6 outward-facing quads of an axis-aligned box.
pub fn box_polygons(min: [f64; 3], max: [f64; 3]) -> Vec<Polygon> {
    let (min, max) = (Point3::from(min), Point3::from(max));
    let corners = [
        Point3::new(min.x, min.y, min.z), // 0: left-bottom-back
        Point3::new(max.x, min.y, min.z), // 1: right-bottom-back
        Point3::new(max.x, max.y, min.z), // 2: right-top-back
        Point3::new(min.x, max.y, min.z), // 3: left-top-back
        Point3::new(min.x, min.y, max.z), // 4: left-bottom-front
        Point3::new(max.x, min.y, max.z), // 5: right-bottom-front
        Point3::new(max.x, max.y, max.z), // 6: right-top-front
        Point3::new(min.x, max.y, max.z), // 7: left-top-front
    ];

    // Counter-clockwise winding viewed from outside
    let faces: [[usize; 4]; 6] = [
        [0, 4, 7, 3], // left (-X)
        [5, 1, 2, 6], // right (+X)
        [0, 1, 5, 4], // bottom (-Y)
        [7, 6, 2, 3], // top (+Y)
        [1, 0, 3, 2], // back (-Z)
        [4, 5, 6, 7], // front (+Z)
    ];

    faces
        .iter()
        .map(|f| {
            Polygon::from_positions(
                &[corners[f[0]], corners[f[1]], corners[f[2]], corners[f[3]]],
                None,
            )
            .unwrap()
        })
        .collect()
}

/// Unit cube with its minimum corner at `offset`.
pub fn unit_cube(offset: [f64; 3]) -> Vec<Polygon> {
    box_polygons(offset, offset.map(|c| c + 1.0))
}

/// Small triangle in the plane `z = height`, facing +Z.
pub fn triangle_at(height: f64) -> Polygon {
    Polygon::from_positions(
        &[
            Point3::new(0.1, 0.1, height),
            Point3::new(0.4, 0.1, height),
            Point3::new(0.1, 0.4, height),
        ],
        None,
    )
    .unwrap()
}

/// Sort key for comparing polygon lists irrespective of order.
pub fn sorted_centroids(polygons: &[Polygon]) -> Vec<[f64; 3]> {
    let mut keys: Vec<[f64; 3]> = polygons
        .iter()
        .map(|p| {
            let c = p.centroid();
            [c.x, c.y, c.z]
        })
        .collect();
    keys.sort_by(|a, b| {
        a[0].total_cmp(&b[0])
            .then(a[1].total_cmp(&b[1]))
            .then(a[2].total_cmp(&b[2]))
    });
    keys
}
