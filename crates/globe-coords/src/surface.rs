//! Conversions between longitude/latitude and points on the unit sphere.
//!
//! The sphere uses a right-handed frame with `+Y` through the north pole,
//! `+X` through `(lon 0, lat 0)` and `−Z` through `(lon π/2, lat 0)`.

use glam::DVec3;

use crate::LonLat;

/// Convert a longitude/latitude pair to a unit-length surface point.
///
/// ```text
/// x =  cos(lat) · cos(lon)
/// y =  sin(lat)
/// z = −cos(lat) · sin(lon)
/// ```
#[inline]
#[must_use]
pub fn lon_lat_to_surface_point(lon_lat: LonLat) -> DVec3 {
    let (sin_lat, cos_lat) = lon_lat.lat.sin_cos();
    let (sin_lon, cos_lon) = lon_lat.lon.sin_cos();
    DVec3::new(cos_lat * cos_lon, sin_lat, -cos_lat * sin_lon)
}

/// Convert a point (any length) to longitude/latitude.
///
/// The input is normalized first. The result is finite for every finite
/// input: the zero vector and the poles map to longitude 0 because
/// `atan2(0, 0)` is 0.
#[inline]
#[must_use]
pub fn surface_point_to_lon_lat(xyz: DVec3) -> LonLat {
    let p = xyz.normalize_or_zero();
    LonLat::new((-p.z).atan2(p.x), p.y.clamp(-1.0, 1.0).asin())
}
