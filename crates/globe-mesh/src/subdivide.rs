//! Midpoint subdivision that keeps vertices on the sphere.

use globe_coords::RelXY;

use crate::{Mesh, MeshError, TriangleFace, Vertex, VertexFormat, build_mesh};

/// Split every triangle of `mesh` into four.
///
/// Edge midpoints interpolate point, normal and texture coordinate linearly
/// and independently; the midpoint normal is then renormalized and the point
/// pushed out to `radius` along it. Children keep the parent's winding:
///
/// ```text
///          C
///         / \
///        b---a
///       / \ / \
///      A---c---B
/// ```
///
/// emitted as `(a, b, c)`, `(A, c, b)`, `(B, a, c)`, `(C, b, a)`.
///
/// Requires [`VertexFormat::PointNormalTexCoord`].
pub fn subdivide(mesh: &Mesh, radius: f64) -> Result<Mesh, MeshError> {
    if mesh.format() != VertexFormat::PointNormalTexCoord {
        return Err(MeshError::UnsupportedFormat(mesh.format()));
    }
    let mut children = Vec::with_capacity(mesh.face_count() * 4);
    for face in mesh.triangles()? {
        children.extend(split_face(&face, radius));
    }
    Ok(build_mesh(&children))
}

/// Apply [`subdivide`] `levels` times.
pub fn subdivide_times(mesh: Mesh, radius: f64, levels: u32) -> Result<Mesh, MeshError> {
    (0..levels).try_fold(mesh, |mesh, _| subdivide(&mesh, radius))
}

fn split_face(face: &TriangleFace, radius: f64) -> [TriangleFace; 4] {
    let [big_a, big_b, big_c] = face.vertices;
    let a = midpoint(&big_b, &big_c, radius);
    let b = midpoint(&big_a, &big_c, radius);
    let c = midpoint(&big_a, &big_b, radius);
    [
        TriangleFace::new(a, b, c),
        TriangleFace::new(big_a, c, b),
        TriangleFace::new(big_b, a, c),
        TriangleFace::new(big_c, b, a),
    ]
}

fn midpoint(v1: &Vertex, v2: &Vertex, radius: f64) -> Vertex {
    let normal = v1.normal.lerp(v2.normal, 0.5).normalize_or_zero();
    let tex_coord = RelXY::midpoint(v1.tex_coord, v2.tex_coord);
    Vertex::on_sphere(normal, radius, tex_coord)
}
