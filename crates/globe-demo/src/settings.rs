//! Conversions from loaded configuration to library parameters.

use std::path::{Path, PathBuf};

use glam::DVec3;
use globe_config::{MeshConfig, ReprojectConfig, ViewConfig};
use globe_mesh::GlobeMeshParams;
use globe_projection::ProjectionKind;
use globe_texture::ReprojectOptions;
use globe_viewer::{GlobeError, GlobeState};

pub fn mesh_params(mesh: &MeshConfig) -> GlobeMeshParams {
    GlobeMeshParams {
        radius: mesh.radius,
        radial_segments: mesh.radial_segments,
        lateral_segments: mesh.lateral_segments,
        grid_subdivisions: mesh.grid_subdivisions,
        cubic_subdivisions: mesh.cubic_subdivisions,
        dymaxion_subdivisions: mesh.dymaxion_subdivisions,
    }
}

pub fn reproject_options(reproject: &ReprojectConfig) -> ReprojectOptions {
    ReprojectOptions {
        worker_threads: reproject.worker_threads,
        rows_per_task: reproject.rows_per_task,
    }
}

pub fn globe_state(view: &ViewConfig) -> Result<GlobeState, GlobeError> {
    GlobeState::new(
        DVec3::from_array(view.rotation),
        DVec3::from_array(view.light_direction),
    )
}

/// `<dir>/<stem>_<projection>.png` next to the input image.
pub fn default_output_path(input: &Path, kind: ProjectionKind) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "globe".to_string());
    input.with_file_name(format!("{stem}_{}.png", kind.name()))
}

/// Sibling of `output` for an extra layer: `earth_cubic.png` becomes
/// `earth_cubic_ambient.png`.
pub fn layer_path(output: &Path, suffix: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "globe".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{stem}_{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{suffix}"),
    };
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use globe_config::Config;

    use super::*;

    #[test]
    fn test_default_config_matches_library_defaults() {
        let config = Config::default();
        assert_eq!(mesh_params(&config.mesh), GlobeMeshParams::default());
        assert_eq!(reproject_options(&config.reproject), ReprojectOptions::default());
        assert_eq!(globe_state(&config.view).unwrap(), GlobeState::default());
    }

    #[test]
    fn test_zero_light_in_config_is_an_error() {
        let mut config = Config::default();
        config.view.light_direction = [0.0; 3];
        assert!(matches!(
            globe_state(&config.view),
            Err(GlobeError::InvalidLightDirection(_))
        ));
    }

    #[test]
    fn test_default_output_path() {
        let out = default_output_path(Path::new("maps/earth.jpg"), ProjectionKind::Dymaxion);
        assert_eq!(out, PathBuf::from("maps/earth_dymaxion.png"));
        assert_eq!(
            layer_path(&out, "ambient"),
            PathBuf::from("maps/earth_dymaxion_ambient.png")
        );
    }
}
