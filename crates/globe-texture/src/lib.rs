//! Texture handling for globes: reprojection of equirectangular imagery into
//! each projection's layout, projection-tagged material layers, and small
//! image utilities.

mod error;
mod layers;
mod reproject;
mod utilities;

pub use error::{ReprojectError, TaskFailure, TextureError};
pub use layers::{GlobeTextures, TaggedTexture, TextureLayer};
pub use reproject::{CancellationToken, ReprojectOptions, reproject, reproject_with_mapper};
pub use utilities::{CubeFaces, DEFAULT_ILLUMINATION_INTENSITY, illumination_map};
