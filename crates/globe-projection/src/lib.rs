//! Bidirectional mappings between longitude/latitude and the relative pixel
//! coordinates of each supported map projection.
//!
//! Every mapper is a stateless value implementing [`ProjectionMapper`]; all
//! methods are pure and safe to call from any number of threads.

mod cubic;
mod dymaxion;
mod kind;
mod mapper;
mod mercator;
mod sinusoidal;

pub use cubic::CubicMapper;
pub use dymaxion::{
    DymaxionMapper, TRIANGLE_HALF_WIDTH, TRIANGLE_HEIGHT, TRIANGLE_WIDTH,
    icosahedron_edge_angle,
};
pub use kind::{ParseProjectionError, ProjectionKind};
pub use mapper::ProjectionMapper;
pub use mercator::MercatorMapper;
pub use sinusoidal::SinusoidalMapper;
