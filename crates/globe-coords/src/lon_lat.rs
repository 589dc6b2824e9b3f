//! Longitude/latitude pairs and relative texture coordinates.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;

/// A point on the sphere in radians.
///
/// Longitude 0 is the prime meridian and grows eastward; latitude 0 is the
/// equator and `+π/2` is the north pole. Canonical values satisfy
/// `lon ∈ (−π, π]` and `lat ∈ [−π/2, π/2]`, but any finite longitude is
/// accepted by the mappers and treated modulo `2π`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LonLat {
    /// Longitude in radians.
    pub lon: f64,
    /// Latitude in radians.
    pub lat: f64,
}

impl LonLat {
    /// Construct a new coordinate without normalizing it.
    #[inline]
    #[must_use]
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// The same point with longitude wrapped into `(−π, π]` and latitude
    /// clamped to `[−π/2, π/2]`.
    #[must_use]
    pub fn canonical(self) -> Self {
        Self {
            lon: wrap_longitude(self.lon),
            lat: clamp_latitude(self.lat),
        }
    }

    /// Whether this point sits on one of the poles (within `epsilon` radians).
    ///
    /// Longitude is meaningless at the poles, so comparisons there should only
    /// look at latitude.
    #[must_use]
    pub fn is_polar(self, epsilon: f64) -> bool {
        FRAC_PI_2 - self.lat.abs() <= epsilon
    }
}

/// A relative pixel coordinate inside a texture image.
///
/// `x` scales with the image width and `y` with the image height; `(0, 0)` is
/// the top-left corner and `(1, 1)` the bottom-right corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RelXY {
    /// Horizontal position in `[0, 1]`.
    pub x: f64,
    /// Vertical position in `[0, 1]`.
    pub y: f64,
}

impl RelXY {
    /// Construct a relative coordinate without clamping.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components lie in the closed unit interval.
    #[must_use]
    pub fn in_unit_square(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }

    /// Relative coordinate of pixel `(px, py)` in an image of the given size.
    #[must_use]
    pub fn from_pixel(px: u32, py: u32, width: u32, height: u32) -> Self {
        Self {
            x: f64::from(px) / f64::from(width),
            y: f64::from(py) / f64::from(height),
        }
    }

    /// Linear midpoint of two texture coordinates.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: 0.5 * (self.x + other.x),
            y: 0.5 * (self.y + other.y),
        }
    }
}

impl From<RelXY> for DVec2 {
    fn from(rel: RelXY) -> Self {
        DVec2::new(rel.x, rel.y)
    }
}

impl From<DVec2> for RelXY {
    fn from(v: DVec2) -> Self {
        RelXY::new(v.x, v.y)
    }
}

/// Fractional part of `v`, always in `[0, 1)`.
///
/// `v - v.floor()` rounds to exactly `1.0` for tiny negative inputs; those
/// are folded back to `0.0`.
#[inline]
#[must_use]
pub fn wrap_unit(v: f64) -> f64 {
    let r = v - v.floor();
    if r >= 1.0 { 0.0 } else { r }
}

/// Wrap a longitude into the canonical range `(−π, π]`.
#[inline]
#[must_use]
pub fn wrap_longitude(lon: f64) -> f64 {
    let w = lon - TAU * ((lon + PI) / TAU).floor();
    if w <= -PI {
        w + TAU
    } else if w > PI {
        w - TAU
    } else {
        w
    }
}

/// Clamp a latitude to `[−π/2, π/2]`.
#[inline]
#[must_use]
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Circular distance between two longitudes, in `[0, π]`.
#[inline]
#[must_use]
pub fn longitude_distance(a: f64, b: f64) -> f64 {
    wrap_longitude(a - b).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_wrap_unit_range() {
        for v in [-3.75, -1.0, -1e-20, 0.0, 0.25, 1.0, 7.5] {
            let r = wrap_unit(v);
            assert!((0.0..1.0).contains(&r), "wrap_unit({v}) = {r}");
        }
        assert!((wrap_unit(-0.25) - 0.75).abs() < EPSILON);
        assert_eq!(wrap_unit(-1e-20), 0.0);
    }

    #[test]
    fn test_wrap_longitude_canonical_range() {
        for i in -40..=40 {
            let lon = i as f64 * 0.37;
            let w = wrap_longitude(lon);
            assert!(w > -PI && w <= PI, "wrap_longitude({lon}) = {w}");
            assert!(
                ((lon - w) / TAU - ((lon - w) / TAU).round()).abs() < 1e-9,
                "{lon} and {w} are not equivalent modulo 2π"
            );
        }
    }

    #[test]
    fn test_wrap_longitude_maps_minus_pi_to_pi() {
        assert_eq!(wrap_longitude(-PI), PI);
        assert_eq!(wrap_longitude(PI), PI);
        assert!((wrap_longitude(3.0 * PI) - PI).abs() < EPSILON);
    }

    #[test]
    fn test_longitude_distance_across_seam() {
        let d = longitude_distance(PI - 0.01, -PI + 0.01);
        assert!((d - 0.02).abs() < 1e-9, "distance across the date line: {d}");
        assert!(longitude_distance(0.5, 0.5 + TAU) < EPSILON);
    }

    #[test]
    fn test_canonical_clamps_latitude() {
        let ll = LonLat::new(-PI, 2.0).canonical();
        assert_eq!(ll.lon, PI);
        assert_eq!(ll.lat, FRAC_PI_2);
    }

    #[test]
    fn test_rel_xy_from_pixel() {
        let rel = RelXY::from_pixel(32, 16, 64, 32);
        assert_eq!(rel, RelXY::new(0.5, 0.5));
        assert!(rel.in_unit_square());
        assert!(!RelXY::new(1.5, 0.0).in_unit_square());
    }

    #[test]
    fn test_is_polar() {
        assert!(LonLat::new(1.0, FRAC_PI_2).is_polar(1e-9));
        assert!(LonLat::new(1.0, -FRAC_PI_2).is_polar(1e-9));
        assert!(!LonLat::new(1.0, 0.5).is_polar(1e-9));
    }
}
