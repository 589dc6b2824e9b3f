use std::sync::atomic::{AtomicUsize, Ordering};

use globe_coords::{LonLat, RelXY};
use globe_projection::{ProjectionKind, ProjectionMapper};
use globe_texture::{
    CancellationToken, ReprojectError, ReprojectOptions, reproject, reproject_with_mapper,
};
use image::{Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn noise_image(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    RgbaImage::from_fn(width, height, |_, _| Rgba([rng.random(), rng.random(), rng.random(), 255]))
}

#[test]
fn test_output_is_independent_of_parallelism() {
    let source = noise_image(96, 48, 7);
    let cancel = CancellationToken::new();
    for kind in ProjectionKind::ALL {
        let reference = reproject(
            &source,
            kind,
            &ReprojectOptions {
                worker_threads: 1,
                rows_per_task: 1000,
            },
            &cancel,
        )
        .unwrap();
        for (worker_threads, rows_per_task) in [(2, 1), (3, 5), (8, 7), (0, 8)] {
            let options = ReprojectOptions {
                worker_threads,
                rows_per_task,
            };
            let out = reproject(&source, kind, &options, &cancel).unwrap();
            assert!(
                out == reference,
                "{kind}: output differs with {worker_threads} workers, {rows_per_task} rows/task"
            );
        }
    }
}

/// Source whose color identifies the longitude quadrant and latitude band.
fn banded_source() -> RgbaImage {
    RgbaImage::from_fn(128, 64, |x, y| {
        let band = match y {
            0..8 => 1,
            56.. => 3,
            _ => 2,
        };
        Rgba([(x / 32) as u8, band, 0, 255])
    })
}

#[test]
fn test_cubic_face_centers_recover_source_colors() {
    let source = banded_source();
    let cubic = reproject(
        &source,
        ProjectionKind::Cubic,
        &ReprojectOptions::default(),
        &CancellationToken::new(),
    )
    .unwrap();
    assert_eq!(cubic.dimensions(), (128, 64));

    // Side faces: centers at longitudes π/4 + i·π/2 on the equator.
    for i in 0..4u32 {
        let pixel = cubic.get_pixel(16 + 32 * i, 48).0;
        assert_eq!(pixel[..2], [i as u8, 2], "side face {i}");
    }
    // Caps: centers at the poles.
    assert_eq!(cubic.get_pixel(16, 16).0[1], 1, "north cap");
    assert_eq!(cubic.get_pixel(112, 16).0[1], 3, "south cap");
}

#[test]
fn test_cancelled_token_stops_reprojection() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = reproject(
        &noise_image(32, 16, 1),
        ProjectionKind::Dymaxion,
        &ReprojectOptions::default(),
        &cancel,
    )
    .unwrap_err();
    assert!(matches!(err, ReprojectError::Cancelled));
}

/// Equirectangular decoder that cancels `token` once it reaches rows below
/// `cancel_below`, counting every pixel it decodes.
struct CancelsPartway {
    token: CancellationToken,
    cancel_below: f64,
    decoded: AtomicUsize,
}

impl ProjectionMapper for CancelsPartway {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Mercator
    }

    fn lon_lat_to_rel_xy(&self, lon_lat: LonLat) -> RelXY {
        ProjectionKind::Mercator.mapper().lon_lat_to_rel_xy(lon_lat)
    }

    fn rel_xy_to_lon_lat(&self, rel_xy: RelXY) -> LonLat {
        self.decoded.fetch_add(1, Ordering::Relaxed);
        if rel_xy.y > self.cancel_below {
            self.token.cancel();
        }
        ProjectionKind::Mercator.mapper().rel_xy_to_lon_lat(rel_xy)
    }
}

#[test]
fn test_cancelling_mid_run_stops_workers() {
    let (width, height) = (16, 64);
    let token = CancellationToken::new();
    let mapper = CancelsPartway {
        token: token.clone(),
        cancel_below: 0.3,
        decoded: AtomicUsize::new(0),
    };
    let options = ReprojectOptions {
        worker_threads: 2,
        rows_per_task: 1,
    };
    let err = reproject_with_mapper(
        &noise_image(32, 16, 5),
        &mapper,
        width,
        height,
        &options,
        &token,
    )
    .unwrap_err();
    assert!(matches!(err, ReprojectError::Cancelled), "got {err:?}");

    // Each worker finishes at most the row it was on when the flag was set.
    let decoded = mapper.decoded.load(Ordering::Relaxed);
    let total = (width * height) as usize;
    assert!(decoded < total, "decoded {decoded} of {total} pixels after cancelling");
}

/// Decodes the lower half of the image to NaN latitudes.
struct LowerHalfBroken;

impl ProjectionMapper for LowerHalfBroken {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Mercator
    }

    fn lon_lat_to_rel_xy(&self, lon_lat: LonLat) -> RelXY {
        ProjectionKind::Mercator.mapper().lon_lat_to_rel_xy(lon_lat)
    }

    fn rel_xy_to_lon_lat(&self, rel_xy: RelXY) -> LonLat {
        if rel_xy.y >= 0.5 {
            LonLat::new(0.0, f64::NAN)
        } else {
            ProjectionKind::Mercator.mapper().rel_xy_to_lon_lat(rel_xy)
        }
    }
}

#[test]
fn test_out_of_bounds_samples_fail_per_task() {
    let source = noise_image(32, 16, 3);
    let options = ReprojectOptions {
        worker_threads: 3,
        rows_per_task: 4,
    };
    let err = reproject_with_mapper(
        &source,
        &LowerHalfBroken,
        32,
        16,
        &options,
        &CancellationToken::new(),
    )
    .unwrap_err();
    let failures = match err {
        ReprojectError::SampleOutOfBounds(failures) => failures,
        other => panic!("expected sample failures, got {other:?}"),
    };
    let failed_rows: Vec<_> = failures.iter().map(|f| f.rows.clone()).collect();
    assert_eq!(failed_rows, vec![8..12, 12..16]);
    for failure in &failures {
        assert_eq!(failure.x, 0);
        assert_eq!(failure.y, failure.rows.start);
        assert!(failure.source_rel.y.is_nan());
    }
}
