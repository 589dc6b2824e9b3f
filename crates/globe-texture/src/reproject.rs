//! Resampling equirectangular source images into other projections.
//!
//! Each destination pixel is mapped back to longitude/latitude through the
//! target projection, then forward into the equirectangular source, and the
//! nearest source pixel is copied. Rows are independent, so the image is cut
//! into row ranges that a pool of scoped worker threads pulls from a channel.
//! Finished ranges are written into the output at fixed offsets, which makes
//! the result identical for any worker count or task size.

use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crossbeam_channel::unbounded;
use globe_coords::RelXY;
use globe_projection::{MercatorMapper, ProjectionKind, ProjectionMapper};
use image::RgbaImage;
use tracing::{debug, warn};

use crate::{ReprojectError, TaskFailure};

/// Bytes per RGBA8 pixel.
const CHANNELS: usize = 4;

/// Worker pool settings for [`reproject`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReprojectOptions {
    /// Worker threads; 0 means one per logical CPU.
    pub worker_threads: usize,
    /// Destination rows handled by one task.
    pub rows_per_task: u32,
}

impl Default for ReprojectOptions {
    fn default() -> Self {
        Self {
            worker_threads: 0,
            rows_per_task: 8,
        }
    }
}

impl ReprojectOptions {
    /// Worker count after resolving 0 to the CPU count, never more than the
    /// number of tasks.
    fn effective_workers(&self, task_count: usize) -> usize {
        let requested = if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        };
        requested.clamp(1, task_count.max(1))
    }
}

/// Shared flag for cancelling an in-progress reprojection.
///
/// Clones share the same flag. Workers check it before each task, so a
/// cancelled call returns after the tasks already running finish.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// A fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Reproject an equirectangular `source` into `target`, sized by
/// [`ProjectionKind::reprojected_dimensions`].
pub fn reproject(
    source: &RgbaImage,
    target: ProjectionKind,
    options: &ReprojectOptions,
    cancel: &CancellationToken,
) -> Result<RgbaImage, ReprojectError> {
    let (width, height) = target.reprojected_dimensions(source.width(), source.height());
    reproject_with_mapper(source, target.mapper(), width, height, options, cancel)
}

/// Reproject an equirectangular `source` through an arbitrary target mapper
/// into a `width × height` image.
pub fn reproject_with_mapper(
    source: &RgbaImage,
    target: &dyn ProjectionMapper,
    width: u32,
    height: u32,
    options: &ReprojectOptions,
    cancel: &CancellationToken,
) -> Result<RgbaImage, ReprojectError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(ReprojectError::InvalidDimensions {
            width: source.width(),
            height: source.height(),
        });
    }
    if width == 0 || height == 0 {
        return Err(ReprojectError::InvalidDimensions { width, height });
    }
    if cancel.is_cancelled() {
        return Err(ReprojectError::Cancelled);
    }

    let rows_per_task = options.rows_per_task.max(1);
    let tasks: Vec<Range<u32>> = (0..height)
        .step_by(rows_per_task as usize)
        .map(|start| start..(start + rows_per_task).min(height))
        .collect();
    let workers = options.effective_workers(tasks.len());
    let started = Instant::now();
    debug!(
        kind = %target.kind(),
        width,
        height,
        tasks = tasks.len(),
        workers,
        "Starting reprojection"
    );

    let (task_tx, task_rx) = unbounded::<Range<u32>>();
    let (result_tx, result_rx) = unbounded::<(Range<u32>, Result<Vec<u8>, TaskFailure>)>();
    for task in &tasks {
        // Both ends are alive here; sending cannot fail.
        let _ = task_tx.send(task.clone());
    }
    drop(task_tx);

    let sampler = Sampler {
        source,
        target,
        width,
        height,
    };

    std::thread::scope(|scope| -> Result<(), ReprojectError> {
        let mut handles = Vec::with_capacity(workers);
        for i in 0..workers {
            let rx = task_rx.clone();
            let tx = result_tx.clone();
            let sampler = &sampler;
            let handle = std::thread::Builder::new()
                .name(format!("reproject-{i}"))
                .spawn_scoped(scope, move || {
                    while let Ok(rows) = rx.recv() {
                        if cancel.is_cancelled() {
                            break;
                        }
                        let result = sampler.render_rows(rows.clone());
                        if tx.send((rows, result)).is_err() {
                            break;
                        }
                    }
                })
                .map_err(|e| {
                    // Unblock already running workers before bailing out.
                    cancel_pending(&task_rx);
                    ReprojectError::Spawn(e)
                })?;
            handles.push(handle);
        }
        for handle in handles {
            handle.join().map_err(|_| ReprojectError::WorkerPanicked)?;
        }
        Ok(())
    })?;
    drop(result_tx);

    if cancel.is_cancelled() {
        warn!(kind = %target.kind(), "Reprojection cancelled");
        return Err(ReprojectError::Cancelled);
    }

    let row_bytes = width as usize * CHANNELS;
    let mut buffer = vec![0u8; row_bytes * height as usize];
    let mut failures = Vec::new();
    let mut completed = 0usize;
    for (rows, result) in result_rx.iter() {
        completed += 1;
        match result {
            Ok(pixels) => {
                let offset = rows.start as usize * row_bytes;
                buffer[offset..offset + pixels.len()].copy_from_slice(&pixels);
            }
            Err(failure) => failures.push(failure),
        }
    }
    if !failures.is_empty() {
        failures.sort_by_key(|f: &TaskFailure| f.rows.start);
        warn!(
            kind = %target.kind(),
            failed = failures.len(),
            "Reprojection sampled outside the source image"
        );
        return Err(ReprojectError::SampleOutOfBounds(failures));
    }
    if completed != tasks.len() {
        return Err(ReprojectError::WorkerPanicked);
    }

    debug!(
        kind = %target.kind(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Reprojection finished"
    );
    RgbaImage::from_raw(width, height, buffer)
        .ok_or(ReprojectError::InvalidDimensions { width, height })
}

/// Drain queued tasks so idle workers exit.
fn cancel_pending(task_rx: &crossbeam_channel::Receiver<Range<u32>>) {
    while task_rx.try_recv().is_ok() {}
}

/// Per-pixel mapping shared read-only by all workers.
struct Sampler<'a> {
    source: &'a RgbaImage,
    target: &'a dyn ProjectionMapper,
    width: u32,
    height: u32,
}

impl Sampler<'_> {
    fn render_rows(&self, rows: Range<u32>) -> Result<Vec<u8>, TaskFailure> {
        let mut out = Vec::with_capacity(rows.len() * self.width as usize * CHANNELS);
        for y in rows.clone() {
            for x in 0..self.width {
                let rel = RelXY::from_pixel(x, y, self.width, self.height);
                let lon_lat = self.target.rel_xy_to_lon_lat(rel);
                let source_rel = MercatorMapper.lon_lat_to_rel_xy(lon_lat);
                let (sx, sy) = source_pixel(source_rel, self.source.width(), self.source.height())
                    .ok_or_else(|| TaskFailure {
                        rows: rows.clone(),
                        x,
                        y,
                        source_rel,
                    })?;
                out.extend_from_slice(&self.source.get_pixel(sx, sy).0);
            }
        }
        Ok(out)
    }
}

/// Nearest source pixel for a relative coordinate, or `None` if the
/// coordinate is NaN or outside `[0, 1]²`. A coordinate of exactly 1 maps to
/// the last row or column.
fn source_pixel(rel: RelXY, width: u32, height: u32) -> Option<(u32, u32)> {
    if !rel.in_unit_square() {
        return None;
    }
    let px = ((rel.x * f64::from(width)) as u32).min(width - 1);
    let py = ((rel.y * f64::from(height)) as u32).min(height - 1);
    Some((px, py))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_pixel_edges() {
        assert_eq!(source_pixel(RelXY::new(0.0, 0.0), 10, 5), Some((0, 0)));
        assert_eq!(source_pixel(RelXY::new(1.0, 1.0), 10, 5), Some((9, 4)));
        assert_eq!(source_pixel(RelXY::new(0.55, 0.5), 10, 5), Some((5, 2)));
    }

    #[test]
    fn test_source_pixel_rejects_out_of_range() {
        assert_eq!(source_pixel(RelXY::new(-0.01, 0.5), 10, 5), None);
        assert_eq!(source_pixel(RelXY::new(0.5, 1.5), 10, 5), None);
        assert_eq!(source_pixel(RelXY::new(f64::NAN, 0.5), 10, 5), None);
    }

    #[test]
    fn test_effective_workers_bounds() {
        let options = ReprojectOptions {
            worker_threads: 16,
            rows_per_task: 4,
        };
        assert_eq!(options.effective_workers(3), 3);
        assert_eq!(options.effective_workers(0), 1);
        let auto = ReprojectOptions::default();
        assert!(auto.effective_workers(1000) >= 1);
    }

    #[test]
    fn test_cancellation_token_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_uniform_source_stays_uniform() {
        let color = image::Rgba([10, 20, 30, 255]);
        let source = RgbaImage::from_pixel(32, 16, color);
        for kind in ProjectionKind::ALL {
            let out = reproject(
                &source,
                kind,
                &ReprojectOptions::default(),
                &CancellationToken::new(),
            )
            .unwrap();
            assert_eq!(
                (out.width(), out.height()),
                kind.reprojected_dimensions(32, 16)
            );
            assert!(out.pixels().all(|p| *p == color), "{kind}");
        }
    }

    #[test]
    fn test_empty_source_is_rejected() {
        let source = RgbaImage::new(0, 4);
        let err = reproject(
            &source,
            ProjectionKind::Cubic,
            &ReprojectOptions::default(),
            &CancellationToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, ReprojectError::InvalidDimensions { width: 0, height: 4 }));
    }
}
