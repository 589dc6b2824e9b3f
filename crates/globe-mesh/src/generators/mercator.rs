//! Latitude/longitude grid for equirectangular textures.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use globe_coords::{LonLat, RelXY};
use globe_projection::{MercatorMapper, ProjectionMapper};

use crate::{TriangleFace, Vertex};

/// Fraction of the pole-to-pole arc covered by the quad rows; the remainder
/// is closed by one fan triangle per column at each pole.
pub const MERCATOR_LATITUDE_FUDGE: f64 = 0.984375;

/// Faces of a `radial × lateral` grid plus a pole fan per column.
///
/// Column `r` spans longitudes `[r, r + 1]·2π/radial`; its texture `x` runs
/// from `r/radial` to `(r + 1)/radial`, so the last column ends at `x = 1`
/// on the same positions the first column starts from at `x = 0`. Each pole
/// is one position with a per-column texture coordinate at the column's
/// middle.
#[must_use]
pub fn mercator_grid_faces(radius: f64, radial: u32, lateral: u32) -> Vec<TriangleFace> {
    let d_lon = TAU / f64::from(radial);
    let d_lat = MERCATOR_LATITUDE_FUDGE * PI / f64::from(lateral);
    let equator_row = 0.5 * f64::from(lateral);
    let lat_at = |row: u32| d_lat * (equator_row - f64::from(row));

    let vertex = |column: u32, row: u32| {
        let lon = f64::from(column % radial) * d_lon;
        let lat = lat_at(row);
        let x = f64::from(column) / f64::from(radial);
        let y = MercatorMapper.lon_lat_to_rel_xy(LonLat::new(lon, lat)).y;
        Vertex::at_lon_lat(LonLat::new(lon, lat), radius, RelXY::new(x, y))
    };

    let per_column = (lateral as usize).saturating_mul(2).saturating_add(2);
    let mut faces = Vec::with_capacity(per_column.checked_mul(radial as usize).unwrap_or(0));
    for r in 0..radial {
        let mut top_left = vertex(r, 0);
        let mut top_right = vertex(r + 1, 0);
        let first_top = (top_left, top_right);
        for l in 0..lateral {
            let bottom_left = vertex(r, l + 1);
            let bottom_right = vertex(r + 1, l + 1);
            faces.push(TriangleFace::new(top_right, top_left, bottom_left));
            faces.push(TriangleFace::new(top_right, bottom_left, bottom_right));
            top_left = bottom_left;
            top_right = bottom_right;
        }

        let pole_x = (f64::from(r) + 0.5) / f64::from(radial);
        let north = Vertex::on_sphere(DVec3::Y, radius, RelXY::new(pole_x, 0.0));
        let south = Vertex::on_sphere(DVec3::NEG_Y, radius, RelXY::new(pole_x, 1.0));
        faces.push(TriangleFace::new(north, first_top.0, first_top.1));
        faces.push(TriangleFace::new(south, top_right, top_left));
    }
    faces
}
