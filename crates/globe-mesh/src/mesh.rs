//! Indexed triangle meshes with deduplicated attribute pools.

use glam::DVec3;
use globe_coords::RelXY;
use rustc_hash::FxHashMap;

use crate::vertex::{TexKey, Vec3Key};
use crate::{MeshError, TriangleFace, Vertex};

/// Which attributes each face-vertex references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    /// `point, tex_coord` per face-vertex.
    PointTexCoord,
    /// `point, normal, tex_coord` per face-vertex.
    PointNormalTexCoord,
}

impl VertexFormat {
    /// Number of pool indices per face-vertex.
    #[must_use]
    pub const fn vertex_index_len(self) -> usize {
        match self {
            VertexFormat::PointTexCoord => 2,
            VertexFormat::PointNormalTexCoord => 3,
        }
    }

    /// Number of pool indices per face.
    #[must_use]
    pub const fn face_index_len(self) -> usize {
        3 * self.vertex_index_len()
    }
}

/// A triangle mesh: three attribute pools and an interleaved face index list.
///
/// Invariants: no pool holds two equal values, and every face index is in
/// range for its pool. Meshes are immutable once built; changing the radius
/// or subdivision level means building a new mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    format: VertexFormat,
    points: Vec<DVec3>,
    normals: Vec<DVec3>,
    tex_coords: Vec<RelXY>,
    faces: Vec<u32>,
}

/// Interleaved GPU vertex (32 bytes), one per face corner.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuVertex {
    /// Model-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

/// Build a [`VertexFormat::PointNormalTexCoord`] mesh from a face list.
///
/// Points, normals and texture coordinates are interned independently by
/// exact value, in first-seen order, so a vertex shared by several faces
/// (or a seam vertex sharing only its position) is stored once per pool.
#[must_use]
pub fn build_mesh(faces: &[TriangleFace]) -> Mesh {
    let mut builder = MeshBuilder::with_capacity(faces.len());
    for face in faces {
        for vertex in &face.vertices {
            builder.push(vertex);
        }
    }
    builder.finish()
}

#[derive(Default)]
struct MeshBuilder {
    points: Vec<DVec3>,
    normals: Vec<DVec3>,
    tex_coords: Vec<RelXY>,
    point_lookup: FxHashMap<Vec3Key, u32>,
    normal_lookup: FxHashMap<Vec3Key, u32>,
    tex_lookup: FxHashMap<TexKey, u32>,
    faces: Vec<u32>,
}

impl MeshBuilder {
    fn with_capacity(face_count: usize) -> Self {
        Self {
            faces: Vec::with_capacity(face_count * 9),
            ..Self::default()
        }
    }

    fn push(&mut self, vertex: &Vertex) {
        let p = intern(&mut self.point_lookup, &mut self.points, vertex.point);
        let n = intern(&mut self.normal_lookup, &mut self.normals, vertex.normal);
        let t = intern(&mut self.tex_lookup, &mut self.tex_coords, vertex.tex_coord);
        self.faces.extend_from_slice(&[p, n, t]);
    }

    fn finish(self) -> Mesh {
        Mesh {
            format: VertexFormat::PointNormalTexCoord,
            points: self.points,
            normals: self.normals,
            tex_coords: self.tex_coords,
            faces: self.faces,
        }
    }
}

fn intern<K, V>(lookup: &mut FxHashMap<K, u32>, pool: &mut Vec<V>, value: V) -> u32
where
    K: From<V> + Eq + std::hash::Hash,
    V: Copy,
{
    *lookup.entry(K::from(value)).or_insert_with(|| {
        pool.push(value);
        (pool.len() - 1) as u32
    })
}

impl Mesh {
    /// Attribute layout of the face index list.
    #[must_use]
    pub fn format(&self) -> VertexFormat {
        self.format
    }

    /// Deduplicated positions.
    #[must_use]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Deduplicated normals; empty for [`VertexFormat::PointTexCoord`].
    #[must_use]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Deduplicated texture coordinates.
    #[must_use]
    pub fn tex_coords(&self) -> &[RelXY] {
        &self.tex_coords
    }

    /// Interleaved face indices, [`VertexFormat::face_index_len`] per face.
    #[must_use]
    pub fn face_indices(&self) -> &[u32] {
        &self.faces
    }

    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len() / self.format.face_index_len()
    }

    /// Reconstruct face `index`.
    pub fn face(&self, index: usize) -> Result<TriangleFace, MeshError> {
        let len = self.format.face_index_len();
        let count = self.face_count();
        if index >= count {
            return Err(MeshError::IndexOutOfRange {
                pool: "face",
                index,
                len: count,
            });
        }
        TriangleFace::from_indices(self, &self.faces[index * len..(index + 1) * len])
    }

    /// Reconstruct every face, in order.
    pub fn triangles(&self) -> Result<Vec<TriangleFace>, MeshError> {
        self.faces
            .chunks_exact(self.format.face_index_len())
            .map(|indices| TriangleFace::from_indices(self, indices))
            .collect()
    }

    /// A copy of this mesh without the normal pool.
    #[must_use]
    pub fn without_normals(&self) -> Mesh {
        let faces = match self.format {
            VertexFormat::PointTexCoord => self.faces.clone(),
            VertexFormat::PointNormalTexCoord => self
                .faces
                .chunks_exact(3)
                .flat_map(|group| [group[0], group[2]])
                .collect(),
        };
        Mesh {
            format: VertexFormat::PointTexCoord,
            points: self.points.clone(),
            normals: Vec::new(),
            tex_coords: self.tex_coords.clone(),
            faces,
        }
    }

    /// Positions as a flat `x, y, z, …` array.
    #[must_use]
    pub fn points_flat(&self) -> Vec<f32> {
        self.points
            .iter()
            .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
            .collect()
    }

    /// Normals as a flat `x, y, z, …` array.
    #[must_use]
    pub fn normals_flat(&self) -> Vec<f32> {
        self.normals
            .iter()
            .flat_map(|n| [n.x as f32, n.y as f32, n.z as f32])
            .collect()
    }

    /// Texture coordinates as a flat `u, v, …` array.
    #[must_use]
    pub fn tex_coords_flat(&self) -> Vec<f32> {
        self.tex_coords
            .iter()
            .flat_map(|t| [t.x as f32, t.y as f32])
            .collect()
    }

    /// Expand every face corner into an interleaved [`GpuVertex`], three per
    /// face in winding order.
    pub fn gpu_vertices(&self) -> Result<Vec<GpuVertex>, MeshError> {
        let mut out = Vec::with_capacity(self.face_count() * 3);
        for face in self.triangles()? {
            out.extend(face.vertices.iter().map(|v| GpuVertex {
                position: v.point.as_vec3().to_array(),
                normal: v.normal.as_vec3().to_array(),
                uv: [v.tex_coord.x as f32, v.tex_coord.y as f32],
            }));
        }
        Ok(out)
    }
}
