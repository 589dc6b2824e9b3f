//! Equirectangular ("Mercator" in texture-map parlance) projection.
//!
//! Longitude maps linearly to `x` starting at the prime meridian, latitude maps
//! linearly to `y` with the north pole at the top. This is the canonical
//! storage format that other projections are reprojected from.

use std::f64::consts::{PI, TAU};

use globe_coords::{LonLat, RelXY, clamp_latitude, wrap_longitude, wrap_unit};

use crate::{ProjectionKind, ProjectionMapper};

/// Mapper for the equirectangular texture layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MercatorMapper;

impl ProjectionMapper for MercatorMapper {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Mercator
    }

    #[inline]
    fn lon_lat_to_rel_xy(&self, lon_lat: LonLat) -> RelXY {
        let lat = clamp_latitude(lon_lat.lat);
        RelXY::new(wrap_unit(lon_lat.lon / TAU), 0.5 - lat / PI)
    }

    #[inline]
    fn rel_xy_to_lon_lat(&self, rel_xy: RelXY) -> LonLat {
        let y = rel_xy.y.clamp(0.0, 1.0);
        LonLat::new(wrap_longitude(TAU * wrap_unit(rel_xy.x)), (0.5 - y) * PI)
    }
}
