//! Command-line front end: builds a globe mesh for the configured projection
//! and, given an equirectangular image, reprojects it into that projection.

mod settings;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use globe_config::{CliArgs, Config, default_config_dir};
use globe_texture::{
    CancellationToken, DEFAULT_ILLUMINATION_INTENSITY, TaggedTexture, TextureError, TextureLayer,
    illumination_map,
};
use globe_viewer::{Globe, GlobeError};
use tracing::{error, info};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Globe(#[from] GlobeError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().unwrap_or_else(|| {
        default_config_dir().unwrap_or_else(|e| {
            eprintln!("{e}, using ./.globe");
            PathBuf::from(".globe")
        })
    });

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    globe_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs, config: &Config) -> Result<(), DemoError> {
    let kind = config.view.projection;
    let mut globe = Globe::new(kind, settings::mesh_params(&config.mesh))?;
    *globe.state_mut() = settings::globe_state(&config.view)?;

    let mesh = globe.mesh();
    info!(
        projection = %kind,
        faces = mesh.face_count(),
        points = mesh.points().len(),
        normals = mesh.normals().len(),
        tex_coords = mesh.tex_coords().len(),
        "Mesh built"
    );
    let frame = globe.frame();
    info!(light = ?frame.light_position, "View state");

    let Some(input) = args.input.as_deref() else {
        info!("No --input image given; skipping reprojection");
        return Ok(());
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| settings::default_output_path(input, kind));
    reproject_file(&mut globe, input, &output, config)
}

fn reproject_file(
    globe: &mut Globe,
    input: &Path,
    output: &Path,
    config: &Config,
) -> Result<(), DemoError> {
    let source = image::open(input)
        .map_err(|source| DemoError::Open {
            path: input.to_path_buf(),
            source,
        })?
        .to_rgba8();
    info!(
        path = %input.display(),
        width = source.width(),
        height = source.height(),
        "Loaded source image"
    );

    let options = settings::reproject_options(&config.reproject);
    globe.load_layer(TextureLayer::Diffuse, &source, &options, &CancellationToken::new())?;

    let glow = illumination_map(
        &globe.textures().layer(TextureLayer::Diffuse).image,
        DEFAULT_ILLUMINATION_INTENSITY,
    );
    globe.set_layer(TextureLayer::Ambient, TaggedTexture::new(glow, globe.kind())?)?;

    for (layer, path) in [
        (TextureLayer::Diffuse, output.to_path_buf()),
        (TextureLayer::Ambient, settings::layer_path(output, "ambient")),
    ] {
        let image = &globe.textures().layer(layer).image;
        image.save(&path).map_err(|source| DemoError::Save {
            path: path.clone(),
            source,
        })?;
        info!(
            ?layer,
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            "Wrote texture layer"
        );
    }
    Ok(())
}
