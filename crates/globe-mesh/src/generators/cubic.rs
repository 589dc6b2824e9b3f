//! Cube base mesh for cube-map textures.
//!
//! Each cube face is a fan of four triangles around its center, which keeps
//! distortion lower than the usual two triangles per face. Corners sit at
//! latitude `±π/4` and longitudes `i·π/2`.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::DVec3;
use globe_coords::{LonLat, RelXY, lon_lat_to_surface_point};

use crate::{TriangleFace, Vertex};

/// Texture `y` of the cap corners on the cap/side boundary.
const CAP_EDGE_Y: f64 = 0.4921875;
/// Texture `y` of the side-face corners on the cap/side boundary.
const SIDE_EDGE_Y: f64 = 0.5078125;

/// The 24 base faces of the cube globe.
#[must_use]
pub fn cubic_base_faces(radius: f64) -> Vec<TriangleFace> {
    let corner = |i: usize, lat: f64| {
        lon_lat_to_surface_point(LonLat::new((i % 4) as f64 * FRAC_PI_2, lat))
    };
    let north_corners: [DVec3; 4] = std::array::from_fn(|i| corner(i, FRAC_PI_4));
    let south_corners: [DVec3; 4] = std::array::from_fn(|i| corner(i, -FRAC_PI_4));

    let north_cap_tex = [(0.0, CAP_EDGE_Y), (0.25, CAP_EDGE_Y), (0.25, 0.0), (0.0, 0.0)];
    let south_cap_tex = [(0.75, 0.0), (1.0, 0.0), (1.0, CAP_EDGE_Y), (0.75, CAP_EDGE_Y)];
    let v = |normal: DVec3, (x, y): (f64, f64)| Vertex::on_sphere(normal, radius, RelXY::new(x, y));

    let north_pole = v(DVec3::Y, (0.125, 0.25));
    let south_pole = v(DVec3::NEG_Y, (0.875, 0.25));

    let mut faces = Vec::with_capacity(24);
    for i in 0..4 {
        let next = (i + 1) % 4;
        faces.push(TriangleFace::new(
            north_pole,
            v(north_corners[i], north_cap_tex[i]),
            v(north_corners[next], north_cap_tex[next]),
        ));
        faces.push(TriangleFace::new(
            south_pole,
            v(south_corners[next], south_cap_tex[next]),
            v(south_corners[i], south_cap_tex[i]),
        ));
    }

    for i in 0..4 {
        let next = (i + 1) % 4;
        let left_x = 0.25 * i as f64;
        let right_x = 0.25 * (i + 1) as f64;
        let center = v(
            lon_lat_to_surface_point(LonLat::new(i as f64 * FRAC_PI_2 + FRAC_PI_4, 0.0)),
            (left_x + 0.125, 0.75),
        );
        // Counter-clockwise from outside: down the west edge, across, up the east edge.
        let rim = [
            v(north_corners[i], (left_x, SIDE_EDGE_Y)),
            v(south_corners[i], (left_x, 1.0)),
            v(south_corners[next], (right_x, 1.0)),
            v(north_corners[next], (right_x, SIDE_EDGE_Y)),
        ];
        for n in 0..4 {
            faces.push(TriangleFace::new(center, rim[n], rim[(n + 1) % 4]));
        }
    }
    faces
}
