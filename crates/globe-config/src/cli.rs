//! Command-line argument parsing for the globe tools.

use std::path::PathBuf;

use clap::Parser;
use globe_projection::ProjectionKind;

use crate::Config;

/// Globe reprojection and mesh tool arguments.
///
/// CLI values override settings loaded from `globe.ron`.
#[derive(Parser, Debug)]
#[command(name = "globe", about = "Reproject globe textures and build globe meshes")]
pub struct CliArgs {
    /// Equirectangular source image to reproject.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Where to write the reprojected image.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Target projection (mercator, sinusoidal, cubic, dymaxion).
    #[arg(long)]
    pub projection: Option<ProjectionKind>,

    /// Globe radius.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Subdivision passes applied to the mesh of the chosen projection.
    #[arg(long)]
    pub subdivisions: Option<u32>,

    /// Reprojection worker threads (0 = one per CPU).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Destination rows per reprojection task.
    #[arg(long)]
    pub rows_per_task: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// `--subdivisions` targets the subdivision count of the projection in
    /// effect after `--projection` is applied.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(kind) = args.projection {
            self.view.projection = kind;
        }
        if let Some(r) = args.radius {
            self.mesh.radius = r;
        }
        if let Some(levels) = args.subdivisions {
            match self.view.projection {
                ProjectionKind::Mercator | ProjectionKind::Sinusoidal => {
                    self.mesh.grid_subdivisions = levels;
                }
                ProjectionKind::Cubic => self.mesh.cubic_subdivisions = levels,
                ProjectionKind::Dymaxion => self.mesh.dymaxion_subdivisions = levels,
            }
        }
        if let Some(w) = args.workers {
            self.reproject.worker_threads = w;
        }
        if let Some(rows) = args.rows_per_task {
            self.reproject.rows_per_task = rows;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
