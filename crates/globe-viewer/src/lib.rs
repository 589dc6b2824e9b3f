//! Globe model for renderers.
//!
//! [`Globe`] owns the mesh and texture layers of a globe in one projection
//! and rebuilds them wholesale when the radius or projection changes.
//! [`GlobeState`] carries the explicit view state (rotation and light) a
//! renderer needs each frame.

mod error;
mod globe;
mod state;

pub use error::GlobeError;
pub use globe::{Globe, GlobeFrame};
pub use state::{GlobeState, LIGHT_DISTANCE_RADII};
