//! A globe: mesh, texture layers and view state in one projection.

use glam::{DMat4, DVec3};
use globe_coords::{LonLat, RelXY, lon_lat_to_surface_point};
use globe_mesh::{GlobeMeshParams, Mesh, generate_globe_mesh};
use globe_projection::ProjectionKind;
use globe_texture::{
    CancellationToken, GlobeTextures, ReprojectOptions, TaggedTexture, TextureLayer,
};
use image::RgbaImage;
use tracing::info;

use crate::{GlobeError, GlobeState};

/// Everything a renderer needs to draw one frame of a globe.
#[derive(Clone, Copy, Debug)]
pub struct GlobeFrame<'a> {
    /// Triangle mesh in model space.
    pub mesh: &'a Mesh,
    /// Texture layers, laid out in the mesh's projection.
    pub textures: &'a GlobeTextures,
    /// Model-to-world transform.
    pub model_matrix: DMat4,
    /// World-space position of the point light.
    pub light_position: DVec3,
}

/// A textured globe in a single projection.
///
/// Changing the radius or the projection regenerates the mesh from scratch;
/// a failed rebuild leaves the globe unchanged.
#[derive(Clone, Debug)]
pub struct Globe {
    kind: ProjectionKind,
    params: GlobeMeshParams,
    mesh: Mesh,
    textures: GlobeTextures,
    state: GlobeState,
}

impl Globe {
    /// Build a globe with placeholder textures and the default view state.
    pub fn new(kind: ProjectionKind, params: GlobeMeshParams) -> Result<Self, GlobeError> {
        let mesh = generate_globe_mesh(kind, &params)?;
        info!(
            projection = %kind,
            radius = params.radius,
            faces = mesh.face_count(),
            "Globe created"
        );
        Ok(Self {
            kind,
            params,
            mesh,
            textures: GlobeTextures::new(kind),
            state: GlobeState::default(),
        })
    }

    /// Projection of the mesh texture coordinates and of every layer.
    #[must_use]
    pub fn kind(&self) -> ProjectionKind {
        self.kind
    }

    /// Mesh generation parameters.
    #[must_use]
    pub fn params(&self) -> &GlobeMeshParams {
        &self.params
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.params.radius
    }

    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    #[must_use]
    pub fn textures(&self) -> &GlobeTextures {
        &self.textures
    }

    #[must_use]
    pub fn state(&self) -> &GlobeState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GlobeState {
        &mut self.state
    }

    /// Change the radius, regenerating the mesh.
    pub fn set_radius(&mut self, radius: f64) -> Result<(), GlobeError> {
        self.set_params(self.params.with_radius(radius))
    }

    /// Replace the mesh parameters, regenerating the mesh.
    pub fn set_params(&mut self, params: GlobeMeshParams) -> Result<(), GlobeError> {
        self.mesh = generate_globe_mesh(self.kind, &params)?;
        self.params = params;
        Ok(())
    }

    /// Switch to another projection. The mesh is regenerated and every
    /// texture layer is reset to its placeholder.
    pub fn set_projection(&mut self, kind: ProjectionKind) -> Result<(), GlobeError> {
        if kind == self.kind {
            return Ok(());
        }
        self.mesh = generate_globe_mesh(kind, &self.params)?;
        self.kind = kind;
        self.textures = GlobeTextures::new(kind);
        info!(projection = %kind, "Globe projection changed");
        Ok(())
    }

    /// Reproject an equirectangular image into the globe's projection and
    /// bind it to `layer`.
    pub fn load_layer(
        &mut self,
        layer: TextureLayer,
        image: &RgbaImage,
        options: &ReprojectOptions,
        cancel: &CancellationToken,
    ) -> Result<(), GlobeError> {
        self.textures
            .set_layer_from_mercator(layer, image, options, cancel)?;
        Ok(())
    }

    /// Bind a texture already in the globe's projection to `layer`.
    pub fn set_layer(&mut self, layer: TextureLayer, texture: TaggedTexture) -> Result<(), GlobeError> {
        self.textures.set_layer(layer, texture)?;
        Ok(())
    }

    /// Restore `layer` to its placeholder.
    pub fn clear_layer(&mut self, layer: TextureLayer) {
        self.textures.clear_layer(layer);
    }

    /// Geographic position under a texture coordinate, e.g. from a ray hit
    /// on the mesh.
    #[must_use]
    pub fn pick(&self, tex_coord: RelXY) -> LonLat {
        self.kind.mapper().rel_xy_to_lon_lat(tex_coord)
    }

    /// World-space point on the rotated globe under a texture coordinate.
    #[must_use]
    pub fn pick_world_point(&self, tex_coord: RelXY) -> DVec3 {
        let local = lon_lat_to_surface_point(self.pick(tex_coord)) * self.params.radius;
        self.state.model_matrix().transform_point3(local)
    }

    /// Snapshot of what to draw this frame.
    #[must_use]
    pub fn frame(&self) -> GlobeFrame<'_> {
        GlobeFrame {
            mesh: &self.mesh,
            textures: &self.textures,
            model_matrix: self.state.model_matrix(),
            light_position: self.state.light_position(self.params.radius),
        }
    }
}
