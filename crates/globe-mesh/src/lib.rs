//! Triangle meshes for textured globes: value types, an interning mesh
//! builder, sphere-preserving subdivision, and one base-mesh generator per
//! projection.

mod error;
pub mod generators;
mod mesh;
mod subdivide;
mod vertex;

pub use error::MeshError;
pub use generators::{
    GlobeMeshParams, MAX_FACES, MAX_GRID_SEGMENTS, MAX_SUBDIVISIONS, generate_globe_mesh,
};
pub use mesh::{GpuVertex, Mesh, VertexFormat, build_mesh};
pub use subdivide::{subdivide, subdivide_times};
pub use vertex::{TriangleFace, Vertex};
