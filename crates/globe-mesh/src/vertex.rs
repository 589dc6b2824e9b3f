//! Vertex and triangle value types, plus the bit-exact keys used to intern
//! them into mesh pools.

use glam::DVec3;
use globe_coords::{LonLat, RelXY, lon_lat_to_surface_point};

use crate::{Mesh, MeshError, VertexFormat};

/// A mesh vertex: position, outward unit normal and texture coordinate.
///
/// Two vertices are the same vertex only when all three fields are equal.
/// A seam vertex shares its position and normal with its twin on the other
/// side of the seam but carries a different texture coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Position in model space.
    pub point: DVec3,
    /// Unit surface normal.
    pub normal: DVec3,
    /// Texture coordinate in the owning projection's layout.
    pub tex_coord: RelXY,
}

impl Vertex {
    /// Construct a vertex from its three attributes.
    #[must_use]
    pub const fn new(point: DVec3, normal: DVec3, tex_coord: RelXY) -> Self {
        Self {
            point,
            normal,
            tex_coord,
        }
    }

    /// A vertex on a sphere of `radius` in the direction of the unit `normal`.
    #[must_use]
    pub fn on_sphere(normal: DVec3, radius: f64, tex_coord: RelXY) -> Self {
        Self::new(normal * radius, normal, tex_coord)
    }

    /// A vertex on a sphere of `radius` at the given longitude/latitude.
    #[must_use]
    pub fn at_lon_lat(lon_lat: LonLat, radius: f64, tex_coord: RelXY) -> Self {
        Self::on_sphere(lon_lat_to_surface_point(lon_lat), radius, tex_coord)
    }
}

/// A triangle of three vertices; winding order is significant and preserved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleFace {
    /// Corners in winding order.
    pub vertices: [Vertex; 3],
}

impl TriangleFace {
    /// Construct a face from its corners in winding order.
    #[must_use]
    pub const fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Reconstruct a face from its interleaved pool indices in `mesh`.
    ///
    /// `indices` holds one index group per corner, laid out as in
    /// [`Mesh::face_indices`]: `point, normal, tex_coord` for
    /// [`VertexFormat::PointNormalTexCoord`] (9 elements) or
    /// `point, tex_coord` for [`VertexFormat::PointTexCoord`] (6 elements).
    /// Meshes without normals yield the normalized point direction as normal.
    pub fn from_indices(mesh: &Mesh, indices: &[u32]) -> Result<Self, MeshError> {
        let format = mesh.format();
        let expected = format.face_index_len();
        if indices.len() != expected {
            return Err(MeshError::InvalidFaceIndices {
                expected,
                actual: indices.len(),
            });
        }
        let stride = format.vertex_index_len();
        let mut corners = [Vertex::new(DVec3::ZERO, DVec3::ZERO, RelXY::default()); 3];
        for (corner, group) in corners.iter_mut().zip(indices.chunks_exact(stride)) {
            let point = lookup(mesh.points(), group[0], "point")?;
            let (normal, tex_coord) = match format {
                VertexFormat::PointNormalTexCoord => (
                    lookup(mesh.normals(), group[1], "normal")?,
                    lookup(mesh.tex_coords(), group[2], "tex_coord")?,
                ),
                VertexFormat::PointTexCoord => (
                    point.normalize_or_zero(),
                    lookup(mesh.tex_coords(), group[1], "tex_coord")?,
                ),
            };
            *corner = Vertex::new(point, normal, tex_coord);
        }
        Ok(Self { vertices: corners })
    }

    /// Unnormalized geometric normal `(b − a) × (c − a)`.
    #[must_use]
    pub fn geometric_normal(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (b.point - a.point).cross(c.point - a.point)
    }

    /// Mean of the three corner positions.
    #[must_use]
    pub fn centroid(&self) -> DVec3 {
        let [a, b, c] = self.vertices;
        (a.point + b.point + c.point) / 3.0
    }
}

fn lookup<T: Copy>(pool: &[T], index: u32, name: &'static str) -> Result<T, MeshError> {
    pool.get(index as usize)
        .copied()
        .ok_or(MeshError::IndexOutOfRange {
            pool: name,
            index: index as usize,
            len: pool.len(),
        })
}

/// Bit pattern of `v` with `-0.0` folded onto `+0.0`.
#[inline]
fn float_key(v: f64) -> u64 {
    if v == 0.0 { 0 } else { v.to_bits() }
}

/// Hash key for exact equality of 3D vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Vec3Key([u64; 3]);

impl From<DVec3> for Vec3Key {
    fn from(v: DVec3) -> Self {
        Self([float_key(v.x), float_key(v.y), float_key(v.z)])
    }
}

/// Hash key for exact equality of texture coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct TexKey([u64; 2]);

impl From<RelXY> for TexKey {
    fn from(v: RelXY) -> Self {
        Self([float_key(v.x), float_key(v.y)])
    }
}
