//! Mesh construction error types.

use crate::VertexFormat;

/// Errors produced while building, subdividing, or reading meshes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// The operation needs per-vertex normals and texture coordinates.
    #[error("unsupported vertex format {0:?}: per-vertex normals and texture coordinates are required")]
    UnsupportedFormat(VertexFormat),

    /// A face index array had the wrong number of elements.
    #[error("face index array has {actual} elements, expected {expected}")]
    InvalidFaceIndices {
        /// Elements required by the mesh's vertex format.
        expected: usize,
        /// Elements actually supplied.
        actual: usize,
    },

    /// A face or pool index points past the end of its pool.
    #[error("{pool} index {index} out of range (len = {len})")]
    IndexOutOfRange {
        /// Which pool (or the face list) was indexed.
        pool: &'static str,
        /// The offending index.
        index: usize,
        /// Length of the indexed pool.
        len: usize,
    },

    /// Generator parameters cannot produce a valid sphere.
    #[error("invalid mesh parameters: {0}")]
    InvalidParameters(String),
}
