//! Icosahedron base mesh for Dymaxion textures.

use std::f64::consts::TAU;

use glam::DVec3;
use globe_coords::{LonLat, RelXY, lon_lat_to_surface_point};
use globe_projection::{
    DymaxionMapper, TRIANGLE_HALF_WIDTH, TRIANGLE_HEIGHT, TRIANGLE_WIDTH,
};

use crate::{TriangleFace, Vertex};

/// The 20 base faces of the icosahedral globe.
///
/// The icosahedron is oriented with a vertex at each pole. The upper ring of
/// five vertices starts at longitude 0; the lower ring is rotated by half a
/// step, matching the staggered southern row of the texture net.
#[must_use]
pub fn dymaxion_base_faces(radius: f64) -> Vec<TriangleFace> {
    let ring_lat = DymaxionMapper::new().upper_latitude();
    let step = TAU / 5.0;
    let upper: [DVec3; 5] =
        std::array::from_fn(|i| lon_lat_to_surface_point(LonLat::new(i as f64 * step, ring_lat)));
    let lower: [DVec3; 5] = std::array::from_fn(|i| {
        lon_lat_to_surface_point(LonLat::new((i as f64 + 0.5) * step, -ring_lat))
    });
    let v = |normal: DVec3, x: f64, y: f64| Vertex::on_sphere(normal, radius, RelXY::new(x, y));

    let mut faces = Vec::with_capacity(20);
    for i in 0..5 {
        let next = (i + 1) % 5;
        let left = i as f64 * TRIANGLE_WIDTH;
        let right = (i + 1) as f64 * TRIANGLE_WIDTH;

        let n1 = v(upper[i], left, TRIANGLE_HEIGHT);
        let n2 = v(upper[next], right.min(1.0), TRIANGLE_HEIGHT);
        let s1 = v(lower[i], left + TRIANGLE_HALF_WIDTH, 1.0 - TRIANGLE_HEIGHT);
        let s2 = v(
            lower[next],
            (right + TRIANGLE_HALF_WIDTH).min(1.0),
            1.0 - TRIANGLE_HEIGHT,
        );

        let north = v(DVec3::Y, left + TRIANGLE_HALF_WIDTH, 0.0);
        let south = v(DVec3::NEG_Y, right, 1.0);
        faces.push(TriangleFace::new(north, n1, n2));
        faces.push(TriangleFace::new(south, s2, s1));
        faces.push(TriangleFace::new(n2, n1, s1));
        faces.push(TriangleFace::new(n2, s1, s2));
    }
    faces
}
