//! The closed set of supported projections and dispatch to their mappers.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::{
    CubicMapper, DymaxionMapper, MercatorMapper, ProjectionMapper, SinusoidalMapper,
};

static MERCATOR: MercatorMapper = MercatorMapper;
static SINUSOIDAL: SinusoidalMapper = SinusoidalMapper;
static CUBIC: CubicMapper = CubicMapper;
static DYMAXION: LazyLock<DymaxionMapper> = LazyLock::new(DymaxionMapper::new);

/// A texture projection supported by the globe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    /// Equirectangular layout; the storage format for source imagery.
    #[default]
    Mercator,
    /// Equal-area lens layout.
    Sinusoidal,
    /// Six cube faces in a 4×2 atlas.
    Cubic,
    /// Twenty icosahedron faces in a three-row net.
    Dymaxion,
}

/// Error returned when parsing an unknown projection name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown projection '{name}' (expected one of: mercator, sinusoidal, cubic, dymaxion)")]
pub struct ParseProjectionError {
    /// The rejected input.
    pub name: String,
}

impl ProjectionKind {
    /// Every projection, in declaration order.
    pub const ALL: [ProjectionKind; 4] = [
        ProjectionKind::Mercator,
        ProjectionKind::Sinusoidal,
        ProjectionKind::Cubic,
        ProjectionKind::Dymaxion,
    ];

    /// Lower-case name, as used in config files and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ProjectionKind::Mercator => "mercator",
            ProjectionKind::Sinusoidal => "sinusoidal",
            ProjectionKind::Cubic => "cubic",
            ProjectionKind::Dymaxion => "dymaxion",
        }
    }

    /// The shared mapper implementing this projection.
    #[must_use]
    pub fn mapper(self) -> &'static dyn ProjectionMapper {
        match self {
            ProjectionKind::Mercator => &MERCATOR,
            ProjectionKind::Sinusoidal => &SINUSOIDAL,
            ProjectionKind::Cubic => &CUBIC,
            ProjectionKind::Dymaxion => &*DYMAXION,
        }
    }

    /// Size of the image produced when reprojecting a `src_width × src_height`
    /// equirectangular source into this projection.
    ///
    /// Cubic and sinusoidal targets are twice as wide as they are tall. The
    /// Dymaxion target is sized so that each net triangle is equilateral in
    /// pixels. Every returned dimension is at least 1.
    #[must_use]
    pub fn reprojected_dimensions(self, src_width: u32, src_height: u32) -> (u32, u32) {
        let (width, height) = match self {
            ProjectionKind::Mercator => (src_width, src_height),
            ProjectionKind::Sinusoidal | ProjectionKind::Cubic => {
                (src_height.saturating_mul(2), src_height)
            }
            ProjectionKind::Dymaxion => {
                let triangle_width = (1.1 * f64::from(src_width) / 11.0).floor();
                let triangle_height = (triangle_width * 3.0_f64.sqrt() / 2.0).floor();
                (
                    (11.0 * triangle_width) as u32,
                    (3.0 * triangle_height) as u32,
                )
            }
        };
        (width.max(1), height.max(1))
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProjectionKind {
    type Err = ParseProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        ProjectionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == lowered)
            .ok_or_else(|| ParseProjectionError {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapper_reports_its_kind() {
        for kind in ProjectionKind::ALL {
            assert_eq!(kind.mapper().kind(), kind);
        }
    }

    #[test]
    fn test_parse_and_display_agree() {
        for kind in ProjectionKind::ALL {
            assert_eq!(kind.to_string().parse::<ProjectionKind>(), Ok(kind));
        }
        assert_eq!(" Cubic ".parse::<ProjectionKind>(), Ok(ProjectionKind::Cubic));
    }

    #[test]
    fn test_parse_unknown_name_fails() {
        let err = "gnomonic".parse::<ProjectionKind>().unwrap_err();
        assert_eq!(err.name, "gnomonic");
        assert!(err.to_string().contains("gnomonic"));
    }

    #[test]
    fn test_reprojected_dimensions() {
        assert_eq!(
            ProjectionKind::Mercator.reprojected_dimensions(2048, 1024),
            (2048, 1024)
        );
        assert_eq!(
            ProjectionKind::Cubic.reprojected_dimensions(2048, 1024),
            (2048, 1024)
        );
        assert_eq!(
            ProjectionKind::Sinusoidal.reprojected_dimensions(300, 100),
            (200, 100)
        );
        // tw = ⌊1.1·2048/11⌋ = 204, th = ⌊204·√3/2⌋ = 176.
        assert_eq!(
            ProjectionKind::Dymaxion.reprojected_dimensions(2048, 1024),
            (2244, 528)
        );
    }

    #[test]
    fn test_reprojected_dimensions_never_zero() {
        for kind in ProjectionKind::ALL {
            let (w, h) = kind.reprojected_dimensions(1, 1);
            assert!(w >= 1 && h >= 1, "{kind}: {w}x{h}");
        }
    }
}
