//! The capability shared by all projection mappers.

use globe_coords::{LonLat, RelXY};

use crate::ProjectionKind;

/// Converts between spherical coordinates and a projection's texture layout.
///
/// Implementations are near-inverses of each other: for every point `p` in
/// the supported domain, `rel_xy_to_lon_lat(lon_lat_to_rel_xy(p))` reproduces
/// `p` up to floating point error, with longitudes compared modulo `2π` and
/// longitude ignored at the poles.
///
/// `lon_lat_to_rel_xy` accepts any finite longitude (wrapped modulo `2π`) and
/// clamps latitude; its output always lies in `[0, 1] × [0, 1]`.
/// `rel_xy_to_lon_lat` returns canonical longitudes in `(−π, π]`.
pub trait ProjectionMapper: Send + Sync {
    /// Which projection this mapper implements.
    fn kind(&self) -> ProjectionKind;

    /// Map a longitude/latitude pair to a relative pixel coordinate.
    fn lon_lat_to_rel_xy(&self, lon_lat: LonLat) -> RelXY;

    /// Map a relative pixel coordinate back to longitude/latitude.
    fn rel_xy_to_lon_lat(&self, rel_xy: RelXY) -> LonLat;
}
