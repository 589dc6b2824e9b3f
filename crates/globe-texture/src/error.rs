//! Texture and reprojection error types.

use std::ops::Range;

use globe_coords::RelXY;
use globe_projection::ProjectionKind;

/// Failure of a single row-range task during reprojection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("rows {}..{}: pixel ({x}, {y}) sampled source at {source_rel:?}, outside the source image", rows.start, rows.end)]
pub struct TaskFailure {
    /// Destination rows covered by the failed task.
    pub rows: Range<u32>,
    /// Destination pixel column of the first bad sample.
    pub x: u32,
    /// Destination pixel row of the first bad sample.
    pub y: u32,
    /// Relative source coordinate that fell outside `[0, 1]²` (or was NaN).
    pub source_rel: RelXY,
}

/// Errors returned by [`reproject`](crate::reproject).
#[derive(Debug, thiserror::Error)]
pub enum ReprojectError {
    /// Source or destination image has a zero dimension.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },

    /// One or more tasks sampled outside the source image. No image is
    /// produced; the failures are listed in row order.
    #[error("{} reprojection task(s) sampled outside the source image", .0.len())]
    SampleOutOfBounds(Vec<TaskFailure>),

    /// The caller cancelled the operation before it finished.
    #[error("reprojection cancelled")]
    Cancelled,

    /// A worker thread could not be started.
    #[error("failed to spawn reprojection worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// A worker thread panicked.
    #[error("reprojection worker panicked")]
    WorkerPanicked,
}

/// Errors from texture-layer management and image utilities.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// A texture in one projection was assigned to a globe using another.
    #[error("texture is in {actual} projection but the globe uses {expected}")]
    ProjectionMismatch {
        /// Projection of the globe.
        expected: ProjectionKind,
        /// Projection the texture is tagged with.
        actual: ProjectionKind,
    },

    /// An input image has no pixels.
    #[error("{0} image is empty")]
    EmptyImage(&'static str),

    /// Reprojecting a layer failed.
    #[error(transparent)]
    Reproject(#[from] ReprojectError),
}
