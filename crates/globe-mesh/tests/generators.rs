use std::collections::HashSet;

use globe_mesh::{GlobeMeshParams, Mesh, generate_globe_mesh};
use globe_projection::ProjectionKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const RADIUS: f64 = 42.0;

fn meshes() -> Vec<(ProjectionKind, Mesh)> {
    let params = GlobeMeshParams::default().with_radius(RADIUS);
    ProjectionKind::ALL
        .into_iter()
        .map(|kind| (kind, generate_globe_mesh(kind, &params).unwrap()))
        .collect()
}

#[test]
fn test_all_points_lie_on_sphere() {
    for (kind, mesh) in meshes() {
        for p in mesh.points() {
            assert!(
                (p.length() - RADIUS).abs() < 1e-9,
                "{kind}: point {p:?} at distance {}",
                p.length()
            );
        }
    }
}

#[test]
fn test_faces_wind_counter_clockwise_from_outside() {
    for (kind, mesh) in meshes() {
        for (i, face) in mesh.triangles().unwrap().into_iter().enumerate() {
            let outward = face.geometric_normal().dot(face.centroid());
            assert!(outward > 0.0, "{kind}: face {i} winds inward ({outward})");
        }
    }
}

#[test]
fn test_face_indices_are_in_range() {
    for (kind, mesh) in meshes() {
        let stride = mesh.format().vertex_index_len();
        for group in mesh.face_indices().chunks_exact(stride) {
            assert!((group[0] as usize) < mesh.points().len(), "{kind}");
            assert!((group[1] as usize) < mesh.normals().len(), "{kind}");
            assert!((group[2] as usize) < mesh.tex_coords().len(), "{kind}");
        }
    }
}

#[test]
fn test_tex_coords_lie_in_unit_square() {
    for (kind, mesh) in meshes() {
        for t in mesh.tex_coords() {
            assert!(t.in_unit_square(), "{kind}: {t:?}");
        }
    }
}

#[test]
fn test_pools_hold_no_duplicates() {
    for (kind, mesh) in meshes() {
        let points: HashSet<_> = mesh
            .points()
            .iter()
            .map(|p| p.to_array().map(f64::to_bits))
            .collect();
        assert_eq!(points.len(), mesh.points().len(), "{kind}: duplicate points");
        let tex: HashSet<_> = mesh
            .tex_coords()
            .iter()
            .map(|t| (t.x.to_bits(), t.y.to_bits()))
            .collect();
        assert_eq!(tex.len(), mesh.tex_coords().len(), "{kind}: duplicate tex coords");
    }
}

#[test]
fn test_each_pole_is_a_single_point() {
    for (kind, mesh) in meshes() {
        for sign in [1.0, -1.0] {
            let poles = mesh
                .points()
                .iter()
                .filter(|p| (p.y - sign * RADIUS).abs() < 1e-6)
                .count();
            assert_eq!(poles, 1, "{kind}: {poles} points at pole {sign}");
        }
    }
}

#[test]
fn test_meshes_are_deterministic() {
    let params = GlobeMeshParams::default();
    for kind in ProjectionKind::ALL {
        let a = generate_globe_mesh(kind, &params).unwrap();
        let b = generate_globe_mesh(kind, &params).unwrap();
        assert_eq!(a, b, "{kind}");
    }
}

#[test]
fn test_random_grid_parameters_stay_closed() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for _ in 0..20 {
        let params = GlobeMeshParams {
            radius: rng.random_range(0.5..500.0),
            radial_segments: rng.random_range(3..24),
            lateral_segments: rng.random_range(2..16),
            grid_subdivisions: rng.random_range(0..2),
            ..GlobeMeshParams::default()
        };
        for kind in [ProjectionKind::Mercator, ProjectionKind::Sinusoidal] {
            let mesh = generate_globe_mesh(kind, &params).unwrap();
            let tolerance = 1e-9 * params.radius;
            for p in mesh.points() {
                assert!(
                    (p.length() - params.radius).abs() < tolerance,
                    "{kind} {params:?}: point {p:?} off sphere"
                );
            }
            for face in mesh.triangles().unwrap() {
                assert!(
                    face.geometric_normal().dot(face.centroid()) > 0.0,
                    "{kind} {params:?}: inward face"
                );
            }
        }
    }
}
