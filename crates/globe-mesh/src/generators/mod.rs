//! Base polyhedra and grids for each projection.
//!
//! Every generator places its vertices on a sphere of the requested radius
//! and assigns texture coordinates in its projection's layout. Both poles are
//! single positions; where the texture wraps around (the `0 / 2π` seam) the
//! vertex position is repeated with the texture coordinate of the far side.
//! All faces wind counter-clockwise when seen from outside the sphere.

mod cubic;
mod dymaxion;
mod mercator;
mod sinusoidal;

use globe_projection::ProjectionKind;
use tracing::debug;

use crate::{Mesh, MeshError, build_mesh, subdivide_times};

pub use cubic::cubic_base_faces;
pub use dymaxion::dymaxion_base_faces;
pub use mercator::{MERCATOR_LATITUDE_FUDGE, mercator_grid_faces};
pub use sinusoidal::{SINUSOIDAL_SEAM_TURNS, sinusoidal_grid_faces};

/// Largest accepted `radial_segments` or `lateral_segments`.
pub const MAX_GRID_SEGMENTS: u32 = 4096;
/// Largest accepted subdivision count for any projection.
pub const MAX_SUBDIVISIONS: u32 = 8;
/// Largest number of triangles [`generate_globe_mesh`] will build.
pub const MAX_FACES: usize = 1 << 24;

/// Parameters shared by the globe mesh generators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeMeshParams {
    /// Sphere radius.
    pub radius: f64,
    /// Columns of the latitude/longitude grids.
    pub radial_segments: u32,
    /// Rows of the latitude/longitude grids.
    pub lateral_segments: u32,
    /// Subdivision passes applied to the Mercator and sinusoidal grids.
    pub grid_subdivisions: u32,
    /// Subdivision passes applied to the cube.
    pub cubic_subdivisions: u32,
    /// Subdivision passes applied to the icosahedron.
    pub dymaxion_subdivisions: u32,
}

impl Default for GlobeMeshParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            radial_segments: 32,
            lateral_segments: 32,
            grid_subdivisions: 0,
            cubic_subdivisions: 3,
            dymaxion_subdivisions: 3,
        }
    }
}

impl GlobeMeshParams {
    /// Same parameters with a different radius.
    #[must_use]
    pub fn with_radius(self, radius: f64) -> Self {
        Self { radius, ..self }
    }

    /// Check that the parameters describe a closed sphere.
    pub fn validate(&self) -> Result<(), MeshError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(MeshError::InvalidParameters(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if self.radial_segments < 3 {
            return Err(MeshError::InvalidParameters(format!(
                "radial_segments must be at least 3, got {}",
                self.radial_segments
            )));
        }
        if self.lateral_segments < 2 {
            return Err(MeshError::InvalidParameters(format!(
                "lateral_segments must be at least 2, got {}",
                self.lateral_segments
            )));
        }
        for (name, segments) in [
            ("radial_segments", self.radial_segments),
            ("lateral_segments", self.lateral_segments),
        ] {
            if segments > MAX_GRID_SEGMENTS {
                return Err(MeshError::InvalidParameters(format!(
                    "{name} must be at most {MAX_GRID_SEGMENTS}, got {segments}"
                )));
            }
        }
        for (name, levels) in [
            ("grid_subdivisions", self.grid_subdivisions),
            ("cubic_subdivisions", self.cubic_subdivisions),
            ("dymaxion_subdivisions", self.dymaxion_subdivisions),
        ] {
            if levels > MAX_SUBDIVISIONS {
                return Err(MeshError::InvalidParameters(format!(
                    "{name} must be at most {MAX_SUBDIVISIONS}, got {levels}"
                )));
            }
        }
        Ok(())
    }

    /// Triangles the mesh for `kind` will have, or `None` if the count does
    /// not fit in `usize`.
    #[must_use]
    pub fn face_count(&self, kind: ProjectionKind) -> Option<usize> {
        let radial = usize::try_from(self.radial_segments).ok()?;
        let lateral = usize::try_from(self.lateral_segments).ok()?;
        let base = match kind {
            ProjectionKind::Mercator => lateral.checked_mul(2)?.checked_add(2)?.checked_mul(radial)?,
            ProjectionKind::Sinusoidal => lateral.checked_sub(1)?.checked_mul(2)?.checked_mul(radial)?,
            ProjectionKind::Cubic => 24,
            ProjectionKind::Dymaxion => 20,
        };
        let growth = 4usize.checked_pow(self.subdivisions_for(kind))?;
        base.checked_mul(growth)
    }

    /// Subdivision passes used for `kind`.
    #[must_use]
    pub fn subdivisions_for(&self, kind: ProjectionKind) -> u32 {
        match kind {
            ProjectionKind::Mercator | ProjectionKind::Sinusoidal => self.grid_subdivisions,
            ProjectionKind::Cubic => self.cubic_subdivisions,
            ProjectionKind::Dymaxion => self.dymaxion_subdivisions,
        }
    }
}

/// Build the globe mesh for `kind`: base faces, deduplication, then the
/// configured number of subdivision passes.
pub fn generate_globe_mesh(kind: ProjectionKind, params: &GlobeMeshParams) -> Result<Mesh, MeshError> {
    params.validate()?;
    match params.face_count(kind) {
        Some(faces) if faces <= MAX_FACES => {}
        faces => {
            return Err(MeshError::InvalidParameters(format!(
                "{kind} mesh would have {} faces, more than {MAX_FACES}",
                faces.map_or_else(|| "too many".to_string(), |f| f.to_string())
            )));
        }
    }
    let base = match kind {
        ProjectionKind::Mercator => {
            mercator_grid_faces(params.radius, params.radial_segments, params.lateral_segments)
        }
        ProjectionKind::Sinusoidal => {
            sinusoidal_grid_faces(params.radius, params.radial_segments, params.lateral_segments)
        }
        ProjectionKind::Cubic => cubic_base_faces(params.radius),
        ProjectionKind::Dymaxion => dymaxion_base_faces(params.radius),
    };
    let levels = params.subdivisions_for(kind);
    debug!(
        projection = %kind,
        base_faces = base.len(),
        levels,
        "Generating globe mesh"
    );
    let mesh = subdivide_times(build_mesh(&base), params.radius, levels)?;
    debug!(
        projection = %kind,
        faces = mesh.face_count(),
        points = mesh.points().len(),
        tex_coords = mesh.tex_coords().len(),
        "Globe mesh ready"
    );
    Ok(mesh)
}
