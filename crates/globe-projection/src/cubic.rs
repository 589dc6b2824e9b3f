//! Cube-map projection with a 4×2 atlas.
//!
//! ```text
//! y=0   +-------+-------+-------+-------+
//!       | north |    (unused)   | south |
//!       |  cap  |               |  cap  |
//! y=0.5 +-------+-------+-------+-------+
//!       | side0 | side1 | side2 | side3 |
//!       |       |       |       |       |
//! y=1   +-------+-------+-------+-------+
//!      x=0    0.25    0.5    0.75     1
//! ```
//!
//! Side face `i` covers longitudes `[i·π/2, (i+1)·π/2)` between latitudes
//! `±π/4`; its `x` follows `tan(Δlon)` so meridian edges stay straight. The
//! caps cover `|lat| ≥ π/4` with a polar-to-square mapping: the distance from
//! the cap center grows linearly with the angular distance from the pole and
//! is stretched by `1 / max(|cos θ|, |sin θ|)` so each ring fills a square.
//! The bottom edge of the north cap meets the top edge of side 0.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use globe_coords::{LonLat, RelXY, clamp_latitude, wrap_longitude, wrap_unit};

use crate::{ProjectionKind, ProjectionMapper};

/// Rotation applied to cap azimuths so longitude 0 sits at a cap corner.
const CAP_ANGLE_OFFSET: f64 = 0.75 * PI;
/// Horizontal center of the north and south caps.
const NORTH_CAP_CENTER_X: f64 = 0.125;
const SOUTH_CAP_CENTER_X: f64 = 0.875;
/// Vertical center shared by both caps.
const CAP_CENTER_Y: f64 = 0.25;

/// Mapper for the cubic texture layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CubicMapper;

impl CubicMapper {
    /// Side-face (equatorial) mapping, evaluated regardless of latitude so the
    /// `±π/4` boundary can be compared against the caps.
    fn side_face_rel_xy(lon_lat: LonLat) -> RelXY {
        let q = 4.0 * wrap_unit(lon_lat.lon / TAU);
        let face = (q.floor() as usize).min(3);
        let t = q - face as f64;
        let dx = ((t - 0.5) * FRAC_PI_2).tan();
        let x = dx * 0.125 + (face as f64 + 0.5) * 0.25;
        let y = 0.75 - clamp_latitude(lon_lat.lat) / PI;
        RelXY::new(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
    }

    fn cap_rel_xy(lon_lat: LonLat) -> RelXY {
        let north = lon_lat.lat > 0.0;
        let (sign, center_x) = if north {
            (1.0, NORTH_CAP_CENTER_X)
        } else {
            (-1.0, SOUTH_CAP_CENTER_X)
        };
        let angle = sign * (lon_lat.lon - CAP_ANGLE_OFFSET);
        let (sin, cos) = angle.sin_cos();
        let from_pole = (FRAC_PI_2 - sign * lon_lat.lat) / FRAC_PI_4;
        let h = from_pole / cos.abs().max(sin.abs());
        let x = cos * h * 0.125 + center_x;
        let y = CAP_CENTER_Y - sin * h * 0.25;
        let (min_x, max_x) = if north { (0.0, 0.25) } else { (0.75, 1.0) };
        RelXY::new(x.clamp(min_x, max_x), y.clamp(0.0, 0.5))
    }

    fn cap_lon_lat(rel_xy: RelXY, north: bool) -> LonLat {
        let (sign, center_x) = if north {
            (1.0, NORTH_CAP_CENTER_X)
        } else {
            (-1.0, SOUTH_CAP_CENTER_X)
        };
        let dx = (rel_xy.x - center_x) * 8.0;
        let dy = (CAP_CENTER_Y - rel_xy.y) * 4.0;
        let angle = dy.atan2(dx);
        let (sin, cos) = angle.sin_cos();
        let h = dx.hypot(dy) * cos.abs().max(sin.abs());
        let lon = sign * angle + CAP_ANGLE_OFFSET;
        let lat = sign * (FRAC_PI_2 - FRAC_PI_4 * h.min(1.0));
        LonLat::new(wrap_longitude(lon), lat)
    }

    fn side_face_lon_lat(rel_xy: RelXY) -> LonLat {
        let q = rel_xy.x * 4.0;
        let face = (q.floor() as usize).min(3);
        let dx = (q - face as f64) * 2.0 - 1.0;
        let lon = dx.atan() + FRAC_PI_4 + face as f64 * FRAC_PI_2;
        let lat = (0.75 - rel_xy.y) * PI;
        LonLat::new(wrap_longitude(lon), lat)
    }
}

impl ProjectionMapper for CubicMapper {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Cubic
    }

    fn lon_lat_to_rel_xy(&self, lon_lat: LonLat) -> RelXY {
        let lon_lat = LonLat::new(lon_lat.lon, clamp_latitude(lon_lat.lat));
        if -FRAC_PI_4 < lon_lat.lat && lon_lat.lat < FRAC_PI_4 {
            Self::side_face_rel_xy(lon_lat)
        } else {
            Self::cap_rel_xy(lon_lat)
        }
    }

    fn rel_xy_to_lon_lat(&self, rel_xy: RelXY) -> LonLat {
        let rel_xy = RelXY::new(rel_xy.x.clamp(0.0, 1.0), rel_xy.y.clamp(0.0, 1.0));
        let in_cap_column = rel_xy.x <= 0.25 || rel_xy.x >= 0.75;
        // The shared y = 0.5 edge belongs to the caps where a cap sits above it.
        if rel_xy.y > 0.5 || (rel_xy.y == 0.5 && !in_cap_column) {
            Self::side_face_lon_lat(rel_xy)
        } else if !in_cap_column {
            // Unpopulated middle of the top row.
            LonLat::default()
        } else {
            Self::cap_lon_lat(rel_xy, rel_xy.x <= 0.25)
        }
    }
}
