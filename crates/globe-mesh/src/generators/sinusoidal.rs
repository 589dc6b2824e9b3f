//! Latitude/longitude grid for sinusoidal textures.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use globe_coords::{LonLat, RelXY};
use globe_projection::{ProjectionMapper, SinusoidalMapper};

use crate::{TriangleFace, Vertex};

/// Longitude, in turns, used for texture lookups on the seam column.
///
/// Sampling just short of a full turn keeps the seam texels inside the
/// populated lens instead of wrapping back to its left edge.
pub const SINUSOIDAL_SEAM_TURNS: f64 = 0.9990234375;

/// Faces of a `radial × lateral` grid whose rows stop one step short of each
/// pole, closed by fans around single pole vertices.
///
/// Texture coordinates come from the sinusoidal mapper; the seam column
/// repeats the positions of the first column with texture coordinates taken
/// at [`SINUSOIDAL_SEAM_TURNS`].
#[must_use]
pub fn sinusoidal_grid_faces(radius: f64, radial: u32, lateral: u32) -> Vec<TriangleFace> {
    let d_lon = TAU / f64::from(radial);
    let d_lat = PI / f64::from(lateral);
    let equator_row = 0.5 * f64::from(lateral);

    let vertex = |column: u32, row: u32| {
        let lat = d_lat * (equator_row - f64::from(row));
        let position = LonLat::new(f64::from(column % radial) * d_lon, lat);
        let tex_lon = if column == radial {
            SINUSOIDAL_SEAM_TURNS * TAU
        } else {
            position.lon
        };
        let tex = SinusoidalMapper.lon_lat_to_rel_xy(LonLat::new(tex_lon, lat));
        Vertex::at_lon_lat(position, radius, tex)
    };

    let north = Vertex::on_sphere(DVec3::Y, radius, RelXY::new(0.5, 0.0));
    let south = Vertex::on_sphere(DVec3::NEG_Y, radius, RelXY::new(0.5, 1.0));
    let last_row = lateral.saturating_sub(1);

    let per_column = (last_row as usize).saturating_mul(2);
    let mut faces = Vec::with_capacity(per_column.checked_mul(radial as usize).unwrap_or(0));
    for r in 0..radial {
        faces.push(TriangleFace::new(north, vertex(r, 1), vertex(r + 1, 1)));
        for l in 1..last_row {
            let top_left = vertex(r, l);
            let bottom_left = vertex(r, l + 1);
            let top_right = vertex(r + 1, l);
            let bottom_right = vertex(r + 1, l + 1);
            faces.push(TriangleFace::new(top_left, bottom_left, top_right));
            faces.push(TriangleFace::new(top_right, bottom_left, bottom_right));
        }
        faces.push(TriangleFace::new(
            south,
            vertex(r + 1, last_row),
            vertex(r, last_row),
        ));
    }
    faces
}
