//! Globe model error types.

use globe_mesh::MeshError;
use globe_texture::TextureError;

/// Errors produced while building or updating a [`Globe`](crate::Globe).
#[derive(Debug, thiserror::Error)]
pub enum GlobeError {
    /// The mesh could not be generated.
    #[error("mesh generation failed: {0}")]
    Mesh(#[from] MeshError),

    /// A texture layer could not be set.
    #[error("texture update failed: {0}")]
    Texture(#[from] TextureError),

    /// The light direction has no usable length.
    #[error("light direction must be finite and non-zero, got {0:?}")]
    InvalidLightDirection([f64; 3]),
}
