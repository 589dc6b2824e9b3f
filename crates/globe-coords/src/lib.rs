//! Spherical coordinate primitives shared by every projection: longitude/latitude
//! pairs, relative texture coordinates, and the unit-sphere conversions between them.

mod lon_lat;
mod surface;

pub use lon_lat::{
    LonLat, RelXY, clamp_latitude, longitude_distance, wrap_longitude, wrap_unit,
};
pub use surface::{lon_lat_to_surface_point, surface_point_to_lon_lat};
