//! Sinusoidal (equal-area) projection.
//!
//! Each parallel is a horizontal line centered in the image whose length is
//! proportional to `cos(lat)`, producing a lens-shaped populated region.

use std::f64::consts::{PI, TAU};

use globe_coords::{LonLat, RelXY, clamp_latitude, wrap_longitude, wrap_unit};

use crate::{ProjectionKind, ProjectionMapper};

/// Mapper for the sinusoidal texture layout.
///
/// Pixels outside the lens (left or right of a row's populated span) decode to
/// longitude 0 at that row's latitude.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SinusoidalMapper;

/// Populated width of the row at `lat`, and the left offset that centers it.
#[inline]
fn row_span(lat: f64) -> (f64, f64) {
    let width = lat.cos().max(0.0);
    (width, 0.5 * (1.0 - width))
}

impl ProjectionMapper for SinusoidalMapper {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Sinusoidal
    }

    fn lon_lat_to_rel_xy(&self, lon_lat: LonLat) -> RelXY {
        let lat = clamp_latitude(lon_lat.lat);
        let (width, offset) = row_span(lat);
        let x = offset + width * wrap_unit(lon_lat.lon / TAU);
        RelXY::new(x, 0.5 - lat / PI)
    }

    fn rel_xy_to_lon_lat(&self, rel_xy: RelXY) -> LonLat {
        let lat = (0.5 - rel_xy.y.clamp(0.0, 1.0)) * PI;
        let (width, offset) = row_span(lat);
        let x = rel_xy.x.clamp(0.0, 1.0);
        let lon = if x > offset && x < 1.0 - offset {
            TAU * (x - offset) / width
        } else {
            0.0
        };
        LonLat::new(wrap_longitude(lon), lat)
    }
}
