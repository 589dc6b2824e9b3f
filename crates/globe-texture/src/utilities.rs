//! Image helpers: self-illumination maps and cube-face stitching.

use image::{Rgba, RgbaImage};

use crate::TextureError;

/// Default brightness of [`illumination_map`].
pub const DEFAULT_ILLUMINATION_INTENSITY: f32 = 0.15;

/// Derive a self-illumination map from a color map.
///
/// Each pixel's RGB is scaled by `intensity` (clamped to `[0, 1]`) and made
/// opaque, so the night side of the globe shows a dim copy of the surface.
#[must_use]
pub fn illumination_map(color_map: &RgbaImage, intensity: f32) -> RgbaImage {
    let k = intensity.clamp(0.0, 1.0);
    let scale = |c: u8| (f32::from(c) * k).round() as u8;
    RgbaImage::from_fn(color_map.width(), color_map.height(), |x, y| {
        let [r, g, b, _] = color_map.get_pixel(x, y).0;
        Rgba([scale(r), scale(g), scale(b), 255])
    })
}

/// Six cube-face images to be stitched into a cube-map atlas.
///
/// `top`'s bottom edge meets `front`'s top edge and `bottom`'s top edge meets
/// `front`'s bottom edge; `left` and `right` are as seen facing `front`.
#[derive(Clone, Debug)]
pub struct CubeFaces {
    /// Front face.
    pub front: RgbaImage,
    /// Top face.
    pub top: RgbaImage,
    /// Bottom face.
    pub bottom: RgbaImage,
    /// Left face.
    pub left: RgbaImage,
    /// Right face.
    pub right: RgbaImage,
    /// Back face.
    pub back: RgbaImage,
}

impl CubeFaces {
    /// Stitch the faces into a `4s × 2s` atlas, `s` being the front face's
    /// height:
    ///
    /// ```text
    /// +------+------+------+--------+
    /// | top  |             | bottom |
    /// +------+------+------+--------+
    /// | front| right| back | left   |
    /// +------+------+------+--------+
    /// ```
    ///
    /// Each face is resampled nearest-neighbor to `s × s`.
    pub fn to_atlas(&self) -> Result<RgbaImage, TextureError> {
        let named = [
            ("front", &self.front),
            ("top", &self.top),
            ("bottom", &self.bottom),
            ("left", &self.left),
            ("right", &self.right),
            ("back", &self.back),
        ];
        for (name, face) in named {
            if face.width() == 0 || face.height() == 0 {
                return Err(TextureError::EmptyImage(name));
            }
        }
        let s = self.front.height();
        let mut atlas = RgbaImage::new(4 * s, 2 * s);
        let placements = [
            (&self.top, 0, 0),
            (&self.bottom, 3 * s, 0),
            (&self.front, 0, s),
            (&self.right, s, s),
            (&self.back, 2 * s, s),
            (&self.left, 3 * s, s),
        ];
        for (face, x0, y0) in placements {
            paste_resized(face, &mut atlas, x0, y0, s);
        }
        Ok(atlas)
    }
}

fn paste_resized(src: &RgbaImage, dest: &mut RgbaImage, x0: u32, y0: u32, size: u32) {
    let (w, h) = src.dimensions();
    for y in 0..size {
        let sy = (u64::from(y) * u64::from(h) / u64::from(size)) as u32;
        for x in 0..size {
            let sx = (u64::from(x) * u64::from(w) / u64::from(size)) as u32;
            dest.put_pixel(x0 + x, y0 + y, *src.get_pixel(sx, sy));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illumination_scales_rgb_and_forces_opaque() {
        let src = RgbaImage::from_pixel(3, 2, Rgba([200, 100, 20, 0]));
        let lit = illumination_map(&src, DEFAULT_ILLUMINATION_INTENSITY);
        assert_eq!(lit.dimensions(), (3, 2));
        assert_eq!(lit.get_pixel(2, 1).0, [30, 15, 3, 255]);
    }

    #[test]
    fn test_atlas_layout() {
        let face = |v: u8, size: u32| RgbaImage::from_pixel(size, size, Rgba([v, v, v, 255]));
        let faces = CubeFaces {
            front: face(1, 4),
            top: face(2, 8),
            bottom: face(3, 2),
            left: face(4, 4),
            right: face(5, 4),
            back: face(6, 4),
        };
        let atlas = faces.to_atlas().unwrap();
        assert_eq!(atlas.dimensions(), (16, 8));
        let at = |x: u32, y: u32| atlas.get_pixel(x, y).0[0];
        assert_eq!(at(1, 1), 2);
        assert_eq!(at(13, 1), 3);
        assert_eq!(at(1, 5), 1);
        assert_eq!(at(5, 5), 5);
        assert_eq!(at(9, 5), 6);
        assert_eq!(at(13, 5), 4);
        // Unused top-row cells stay transparent.
        assert_eq!(atlas.get_pixel(6, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_empty_face_is_rejected() {
        let ok = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let faces = CubeFaces {
            front: ok.clone(),
            top: ok.clone(),
            bottom: ok.clone(),
            left: RgbaImage::new(0, 2),
            right: ok.clone(),
            back: ok,
        };
        assert!(matches!(faces.to_atlas(), Err(TextureError::EmptyImage("left"))));
    }
}
