//! Icosahedral ("Dymaxion") projection.
//!
//! The net is laid out in three rows of triangles, each row one third of the
//! image height:
//!
//! ```text
//!  0 ------------------------------------ 2π
//!   /\  /\  /\  /\  /\           five northern triangles
//!  /__\/__\/__\/__\/__\
//!  \  /\  /\  /\  /\  /\         ten equatorial triangles
//!   \/__\/__\/__\/__\/__\
//!    \  /\  /\  /\  /\  /        five southern triangles,
//!     \/  \/  \/  \/  \/         staggered by half a triangle
//! ```
//!
//! Each triangle is `2/11` of the image wide, so the staggered southern row
//! ends exactly at the right edge. The southern triangle that straddles the
//! `0 / 2π` seam is the last one in the row.
//!
//! Latitudes above the upper vertex ring (or below the lower ring) fall in the
//! polar triangles: the distance from the pole apex grows linearly with the
//! angular distance from the pole, and longitude is spread linearly across the
//! triangle's width at that row. Between the rings the band is a sheared
//! equirectangular strip.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::sync::LazyLock;

use globe_coords::{LonLat, RelXY, clamp_latitude, wrap_longitude, wrap_unit};

use crate::{ProjectionKind, ProjectionMapper};

/// Half of a triangle's width, relative to the image width.
pub const TRIANGLE_HALF_WIDTH: f64 = 1.0 / 11.0;
/// Width of one net triangle, relative to the image width.
pub const TRIANGLE_WIDTH: f64 = 2.0 * TRIANGLE_HALF_WIDTH;
/// Height of one net row, relative to the image height.
pub const TRIANGLE_HEIGHT: f64 = 1.0 / 3.0;

/// Longitude covered by one polar triangle.
const TRIANGLE_LONGITUDE_SPAN: f64 = TAU / 5.0;
/// Fraction of a turn the southern row is rotated by.
const SOUTHERN_ROTATION: f64 = 0.1;
/// Ratio between relative `x` and turns in the equatorial band.
const BAND_TURNS_PER_X: f64 = 1.1;

/// Angle subtended at the center by two icosahedron vertices sharing an edge.
///
/// Derived from the edge geometry of the golden-ratio icosahedron: the vertices
/// `(0, 1, φ)` and `(0, −1, φ)` share an edge of length 2, and the law of
/// cosines gives `cos θ = (a² + b² − c²) / 2ab`.
#[must_use]
pub fn icosahedron_edge_angle() -> f64 {
    let phi = 0.5 * (1.0 + 5.0_f64.sqrt());
    let a2 = 1.0 + phi * phi;
    let c2 = 4.0;
    ((a2 + a2 - c2) / (2.0 * a2)).acos()
}

static EDGE_ANGLE: LazyLock<f64> = LazyLock::new(icosahedron_edge_angle);

/// Mapper for the icosahedral texture layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DymaxionMapper {
    edge_angle: f64,
    upper_latitude: f64,
}

impl Default for DymaxionMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl DymaxionMapper {
    /// Construct the mapper for a regular icosahedron with a vertex at each pole.
    #[must_use]
    pub fn new() -> Self {
        let edge_angle = *EDGE_ANGLE;
        Self {
            edge_angle,
            upper_latitude: FRAC_PI_2 - edge_angle,
        }
    }

    /// Latitude of the upper vertex ring; the lower ring sits at its negation.
    #[must_use]
    pub fn upper_latitude(&self) -> f64 {
        self.upper_latitude
    }

    /// Width of the populated span of a polar triangle at distance `depth`
    /// (relative image height) from its apex.
    #[inline]
    fn line_width(depth: f64) -> f64 {
        TRIANGLE_WIDTH * depth / TRIANGLE_HEIGHT
    }

    /// Locate `x` within a polar triangle row starting at `row_start`.
    ///
    /// Returns the triangle index and the fraction across its populated span.
    fn polar_fraction(x: f64, row_start: f64, depth: f64) -> (usize, f64) {
        let trinum = (((x - row_start).max(0.0) / TRIANGLE_WIDTH).floor() as usize).min(4);
        let dx = x - row_start - trinum as f64 * TRIANGLE_WIDTH;
        let line_width = Self::line_width(depth);
        if line_width <= 0.0 {
            return (trinum, 0.5);
        }
        let inset = 0.5 * (TRIANGLE_WIDTH - line_width);
        (trinum, ((dx - inset) / line_width).clamp(0.0, 1.0))
    }

    /// Inverse of [`polar_fraction`](Self::polar_fraction).
    fn polar_x(span: f64, row_start: f64, depth: f64) -> f64 {
        let trinum = (span.floor() as usize).min(4);
        let fraction = span - trinum as f64;
        let line_width = Self::line_width(depth);
        row_start
            + TRIANGLE_WIDTH * trinum as f64
            + 0.5 * (TRIANGLE_WIDTH - line_width)
            + fraction * line_width
    }
}

impl ProjectionMapper for DymaxionMapper {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Dymaxion
    }

    fn lon_lat_to_rel_xy(&self, lon_lat: LonLat) -> RelXY {
        let turns = wrap_unit(lon_lat.lon / TAU);
        let lat = clamp_latitude(lon_lat.lat);
        let upper = self.upper_latitude;

        if lat >= upper {
            let depth = TRIANGLE_HEIGHT * (1.0 - (lat - upper) / self.edge_angle);
            let x = Self::polar_x(turns * 5.0, 0.0, depth);
            RelXY::new(x.clamp(0.0, 1.0), depth.clamp(0.0, 1.0))
        } else if lat <= -upper {
            let depth = TRIANGLE_HEIGHT * (1.0 - (-upper - lat) / self.edge_angle);
            let span = 5.0 * wrap_unit(turns - SOUTHERN_ROTATION);
            let x = Self::polar_x(span, TRIANGLE_HALF_WIDTH, depth);
            RelXY::new(x.clamp(0.0, 1.0), (1.0 - depth).clamp(0.0, 1.0))
        } else {
            // Sheared band: the left edge moves right by half a triangle from
            // the upper ring to the lower ring.
            let v = lat / (2.0 * upper);
            let y = 0.5 - TRIANGLE_HEIGHT * v;
            let cut = (0.5 - v) * SOUTHERN_ROTATION;
            let h = if turns < cut { turns + 1.0 } else { turns };
            RelXY::new((h / BAND_TURNS_PER_X).clamp(0.0, 1.0), y)
        }
    }

    fn rel_xy_to_lon_lat(&self, rel_xy: RelXY) -> LonLat {
        let x = rel_xy.x.clamp(0.0, 1.0);
        let y = rel_xy.y.clamp(0.0, 1.0);
        let upper = self.upper_latitude;

        let (lon, lat) = if y < TRIANGLE_HEIGHT {
            let lat = (upper + (1.0 - y / TRIANGLE_HEIGHT) * self.edge_angle).min(FRAC_PI_2);
            let (trinum, fraction) = Self::polar_fraction(x, 0.0, y);
            ((trinum as f64 + fraction) * TRIANGLE_LONGITUDE_SPAN, lat)
        } else if y > 1.0 - TRIANGLE_HEIGHT {
            let depth = 1.0 - y;
            let lat = (-upper - (1.0 - depth / TRIANGLE_HEIGHT) * self.edge_angle).max(-FRAC_PI_2);
            let (trinum, fraction) = Self::polar_fraction(x, TRIANGLE_HALF_WIDTH, depth);
            ((trinum as f64 + 0.5 + fraction) * TRIANGLE_LONGITUDE_SPAN, lat)
        } else {
            let lat = (0.5 - y) / TRIANGLE_HEIGHT * 2.0 * upper;
            (TAU * wrap_unit(x * BAND_TURNS_PER_X), lat)
        };
        LonLat::new(wrap_longitude(lon), lat)
    }
}
