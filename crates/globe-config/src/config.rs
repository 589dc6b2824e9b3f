//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use globe_projection::ProjectionKind;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "globe.ron";

/// Platform config directory for the globe tools (`<config_dir>/globe-viewer`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("globe-viewer"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Globe mesh generation.
    pub mesh: MeshConfig,
    /// Texture reprojection worker pool.
    pub reproject: ReprojectConfig,
    /// Initial view state.
    pub view: ViewConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Mesh generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Globe radius in model units.
    pub radius: f64,
    /// Subdivision passes for the icosahedral mesh.
    pub dymaxion_subdivisions: u32,
    /// Subdivision passes for the cube mesh.
    pub cubic_subdivisions: u32,
    /// Subdivision passes for the latitude/longitude grids.
    pub grid_subdivisions: u32,
    /// Grid columns.
    pub radial_segments: u32,
    /// Grid rows.
    pub lateral_segments: u32,
}

/// Reprojection worker pool settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReprojectConfig {
    /// Worker threads (0 = one per logical CPU).
    pub worker_threads: usize,
    /// Destination rows per task.
    pub rows_per_task: u32,
}

/// Initial view settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Projection of the globe's textures.
    pub projection: ProjectionKind,
    /// Direction the light travels in (it shines from the opposite side).
    pub light_direction: [f64; 3],
    /// Globe rotation about X, Y and Z, in degrees.
    pub rotation: [f64; 3],
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            dymaxion_subdivisions: 3,
            cubic_subdivisions: 3,
            grid_subdivisions: 0,
            radial_segments: 32,
            lateral_segments: 32,
        }
    }
}

impl Default for ReprojectConfig {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            rows_per_task: 8,
        }
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            projection: ProjectionKind::Mercator,
            light_direction: [1.0, 0.0, -1.0],
            rotation: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as [`CONFIG_FILE_NAME`].
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("radius: 100.0"));
        assert!(ron_str.contains("projection: mercator"));
        assert!(ron_str.contains("rows_per_task: 8"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.view.projection = ProjectionKind::Dymaxion;
        config.view.rotation = [10.0, -45.0, 0.5];
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(mesh: (radius: 6.0), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.mesh.radius, 6.0);
        assert_eq!(config.mesh.cubic_subdivisions, 3);
        assert_eq!(config.view, ViewConfig::default());
        assert_eq!(config.reproject, ReprojectConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_projection_is_a_parse_error() {
        let result: Result<Config, _> = ron::from_str("(view: (projection: gnomonic))");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.mesh.radius = 3.5;
        config.view.projection = ProjectionKind::Cubic;
        config.reproject.worker_threads = 2;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.mesh.dymaxion_subdivisions = 5;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.mesh.dymaxion_subdivisions), Some(5));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_reload_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::default().reload(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
