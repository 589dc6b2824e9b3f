//! Projection-tagged textures and the four material layers of a globe.

use globe_projection::ProjectionKind;
use image::{Rgba, RgbaImage};
use tracing::info;

use crate::{CancellationToken, ReprojectOptions, TextureError, reproject};

/// An image together with the projection its pixels are laid out in.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedTexture {
    /// Pixel data.
    pub image: RgbaImage,
    /// Layout of `image`.
    pub projection: ProjectionKind,
}

impl TaggedTexture {
    /// Tag `image` with `projection`, rejecting images without pixels.
    pub fn new(image: RgbaImage, projection: ProjectionKind) -> Result<Self, TextureError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(TextureError::EmptyImage("texture"));
        }
        Ok(Self { image, projection })
    }

    /// A 1×1 texture of a single color.
    #[must_use]
    pub fn solid(color: [u8; 4], projection: ProjectionKind) -> Self {
        Self {
            image: RgbaImage::from_pixel(1, 1, Rgba(color)),
            projection,
        }
    }
}

/// Material layers a renderer samples from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureLayer {
    /// Base color.
    Diffuse,
    /// Self-illumination, visible on the unlit side.
    Ambient,
    /// Specular intensity.
    Specular,
    /// Tangent-space normal map.
    Normal,
}

impl TextureLayer {
    /// Every layer, in declaration order.
    pub const ALL: [TextureLayer; 4] = [
        TextureLayer::Diffuse,
        TextureLayer::Ambient,
        TextureLayer::Specular,
        TextureLayer::Normal,
    ];

    /// Color of the 1×1 placeholder used while the layer is unset.
    #[must_use]
    pub fn default_color(self) -> [u8; 4] {
        match self {
            TextureLayer::Diffuse => [211, 211, 211, 255],
            TextureLayer::Ambient => [0, 0, 0, 255],
            TextureLayer::Specular => [255, 255, 255, 255],
            TextureLayer::Normal => [128, 128, 255, 255],
        }
    }
}

/// The texture layers of one globe, all in the globe's projection.
#[derive(Clone, Debug, PartialEq)]
pub struct GlobeTextures {
    projection: ProjectionKind,
    layers: [TaggedTexture; 4],
}

impl GlobeTextures {
    /// Placeholder layers for a globe in `projection`.
    #[must_use]
    pub fn new(projection: ProjectionKind) -> Self {
        Self {
            projection,
            layers: TextureLayer::ALL.map(|layer| TaggedTexture::solid(layer.default_color(), projection)),
        }
    }

    /// Projection every layer is stored in.
    #[must_use]
    pub fn projection(&self) -> ProjectionKind {
        self.projection
    }

    /// The texture currently bound to `layer`.
    #[must_use]
    pub fn layer(&self, layer: TextureLayer) -> &TaggedTexture {
        &self.layers[layer as usize]
    }

    /// Replace `layer`. The texture must already be in the globe's projection.
    pub fn set_layer(&mut self, layer: TextureLayer, texture: TaggedTexture) -> Result<(), TextureError> {
        if texture.projection != self.projection {
            return Err(TextureError::ProjectionMismatch {
                expected: self.projection,
                actual: texture.projection,
            });
        }
        self.layers[layer as usize] = texture;
        Ok(())
    }

    /// Reproject an equirectangular image into the globe's projection and
    /// bind it to `layer`.
    pub fn set_layer_from_mercator(
        &mut self,
        layer: TextureLayer,
        image: &RgbaImage,
        options: &ReprojectOptions,
        cancel: &CancellationToken,
    ) -> Result<(), TextureError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(TextureError::EmptyImage("source"));
        }
        let converted = if self.projection == ProjectionKind::Mercator {
            image.clone()
        } else {
            reproject(image, self.projection, options, cancel)?
        };
        info!(
            ?layer,
            projection = %self.projection,
            width = converted.width(),
            height = converted.height(),
            "Texture layer updated"
        );
        self.set_layer(layer, TaggedTexture::new(converted, self.projection)?)
    }

    /// Restore `layer` to its placeholder.
    pub fn clear_layer(&mut self, layer: TextureLayer) {
        self.layers[layer as usize] = TaggedTexture::solid(layer.default_color(), self.projection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layers_are_placeholders() {
        let textures = GlobeTextures::new(ProjectionKind::Cubic);
        for layer in TextureLayer::ALL {
            let tex = textures.layer(layer);
            assert_eq!(tex.projection, ProjectionKind::Cubic);
            assert_eq!(tex.image.dimensions(), (1, 1));
            assert_eq!(tex.image.get_pixel(0, 0).0, layer.default_color());
        }
    }

    #[test]
    fn test_mismatched_projection_is_rejected() {
        let mut textures = GlobeTextures::new(ProjectionKind::Dymaxion);
        let tex = TaggedTexture::solid([1, 2, 3, 255], ProjectionKind::Mercator);
        let err = textures.set_layer(TextureLayer::Diffuse, tex).unwrap_err();
        assert!(matches!(
            err,
            TextureError::ProjectionMismatch {
                expected: ProjectionKind::Dymaxion,
                actual: ProjectionKind::Mercator
            }
        ));
        assert_eq!(
            textures.layer(TextureLayer::Diffuse).image.get_pixel(0, 0).0,
            TextureLayer::Diffuse.default_color()
        );
    }

    #[test]
    fn test_set_layer_from_mercator_reprojects() {
        let mut textures = GlobeTextures::new(ProjectionKind::Sinusoidal);
        let source = RgbaImage::from_pixel(40, 20, Rgba([9, 9, 9, 255]));
        textures
            .set_layer_from_mercator(
                TextureLayer::Specular,
                &source,
                &ReprojectOptions::default(),
                &CancellationToken::new(),
            )
            .unwrap();
        let tex = textures.layer(TextureLayer::Specular);
        assert_eq!(tex.projection, ProjectionKind::Sinusoidal);
        assert_eq!(tex.image.dimensions(), (40, 20));
        textures.clear_layer(TextureLayer::Specular);
        assert_eq!(textures.layer(TextureLayer::Specular).image.dimensions(), (1, 1));
    }

    #[test]
    fn test_empty_texture_is_rejected() {
        assert!(matches!(
            TaggedTexture::new(RgbaImage::new(0, 0), ProjectionKind::Mercator),
            Err(TextureError::EmptyImage(_))
        ));
    }
}
