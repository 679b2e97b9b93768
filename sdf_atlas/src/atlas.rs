// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font atlas artifact and its construction pipeline.

use thiserror::Error;

use crate::distance::DistanceField;
use crate::glyph::GlyphRasterizer;
use crate::pack::{self, Packing};
use crate::pixmap::Pixmap;
use crate::quantize::quantize;
use crate::resample::resample;
use crate::snapshot::AtlasSnapshot;

/// Edge length of the square working canvas shared by every atlas in the
/// process.
///
/// Requested texture sizes must divide this evenly; the ratio becomes the
/// box-filter scale factor.
pub const ATLAS_SIZE: u16 = 2048;

/// Errors produced while building or restoring a font atlas.
#[derive(Debug, Error)]
pub enum AtlasError {
    /// The requested texture size is zero, exceeds [`ATLAS_SIZE`], or does
    /// not divide it evenly; or a resampling factor does not divide the
    /// source dimensions.
    #[error("unsupported texture size")]
    UnsupportedTextureSize,
    /// A restored atlas' texture byte count does not match its declared
    /// dimensions.
    #[error("atlas texture data does not match its declared dimensions")]
    AtlasNotProperlyInitialized,
    /// The font's glyphs cannot all be placed inside the working canvas.
    #[error("glyphs do not fit into the atlas canvas")]
    CapacityExceeded,
}

/// A normalized texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexCoord {
    /// Horizontal coordinate in `[0, 1]`.
    pub u: f32,
    /// Vertical coordinate in `[0, 1]`.
    pub v: f32,
}

impl TexCoord {
    /// The origin coordinate.
    pub const ZERO: Self = Self { u: 0.0, v: 0.0 };
}

/// Where one glyph's ink landed in the atlas texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphDescriptor {
    /// Glyph id in the source font.
    pub glyph_id: u32,
    /// Top-left corner of the glyph's ink rectangle.
    pub top_left: TexCoord,
    /// Bottom-right corner of the glyph's ink rectangle; equal to
    /// `top_left` for ink-less glyphs.
    pub bottom_right: TexCoord,
}

impl GlyphDescriptor {
    /// Descriptor of an ink-less glyph: a zero-area rectangle at the origin.
    pub fn empty(glyph_id: u32) -> Self {
        Self {
            glyph_id,
            top_left: TexCoord::ZERO,
            bottom_right: TexCoord::ZERO,
        }
    }
}

/// Collaborator that turns finished atlas bytes into a texture resource.
///
/// The factory is passed explicitly to [`FontAtlas::create_texture`]; the
/// atlas never reaches for a process-wide device. Failing to create a
/// texture from well-formed bytes is the factory's concern, reported through
/// its own error type.
pub trait TextureFactory {
    /// The texture resource produced.
    type Texture;
    /// The factory's failure type.
    type Error;

    /// Create a single-channel 8-bit texture from `data`, which holds
    /// exactly `width * height` bytes in row-major order.
    fn create_r8(&mut self, width: u16, height: u16, data: &[u8])
        -> Result<Self::Texture, Self::Error>;
}

/// An immutable signed-distance-field font atlas.
///
/// Built once by [`FontAtlas::build`] and safe to share read-only across
/// renderers afterwards. The texture holds quantized signed distances (128
/// is the glyph edge); [`glyphs`](Self::glyphs) maps each glyph id to the
/// normalized texture rectangle covering its ink.
#[derive(Debug, Clone, PartialEq)]
pub struct FontAtlas {
    font_name: String,
    point_size: f32,
    texture_size: u16,
    texture_data: Vec<u8>,
    glyphs: Vec<GlyphDescriptor>,
}

impl FontAtlas {
    /// Build an atlas for a font at the given texture resolution.
    ///
    /// `point_size` seeds the packer's search for the largest size that
    /// fits; the size actually chosen is recorded in the atlas. The texture
    /// size is validated eagerly, before any rasterization work starts.
    pub fn build<R: GlyphRasterizer>(
        rasterizer: &R,
        font_name: &str,
        point_size: f32,
        texture_size: u16,
    ) -> Result<Self, AtlasError> {
        if texture_size == 0 || texture_size > ATLAS_SIZE || ATLAS_SIZE % texture_size != 0 {
            return Err(AtlasError::UnsupportedTextureSize);
        }

        let mut canvas = Pixmap::new(ATLAS_SIZE, ATLAS_SIZE);
        let Packing { point_size, glyphs } = pack::pack(rasterizer, point_size, &mut canvas)?;
        let field = DistanceField::from_binary(&canvas);
        let scale_factor = usize::from(ATLAS_SIZE / texture_size);
        let scaled = resample(&field, scale_factor)?;
        let spread = 0.5 * pack::estimated_stroke_width(rasterizer, point_size);
        let texture_data = quantize(&scaled, spread);
        log::debug!(
            "built {texture_size}x{texture_size} atlas for {font_name} at {point_size}pt, spread {spread}"
        );

        Ok(Self {
            font_name: font_name.to_owned(),
            point_size,
            texture_size,
            texture_data,
            glyphs,
        })
    }

    /// Reconstruct an atlas from a previously produced snapshot.
    ///
    /// Fails with [`AtlasError::AtlasNotProperlyInitialized`] when the
    /// snapshot's texture byte count does not match its declared dimensions.
    pub fn from_snapshot(snapshot: AtlasSnapshot) -> Result<Self, AtlasError> {
        let AtlasSnapshot {
            font_name,
            point_size,
            texture_size,
            texture_data,
            glyphs,
        } = snapshot;
        if texture_data.len() != usize::from(texture_size) * usize::from(texture_size) {
            return Err(AtlasError::AtlasNotProperlyInitialized);
        }
        Ok(Self {
            font_name,
            point_size,
            texture_size,
            texture_data,
            glyphs,
        })
    }

    /// Restore an atlas from encoded snapshot bytes, falling back to a full
    /// build when the snapshot is missing, malformed, or does not match the
    /// requested font and texture size.
    ///
    /// This is the entry point for cache layers: any problem with the cached
    /// record is a cache miss, never a hard failure. On a hit, the
    /// snapshot's recorded point size wins over `point_size`, since the
    /// stored size is the one the packer fitted.
    pub fn restore_or_build<R: GlyphRasterizer>(
        bytes: Option<&[u8]>,
        rasterizer: &R,
        font_name: &str,
        point_size: f32,
        texture_size: u16,
    ) -> Result<Self, AtlasError> {
        if let Some(bytes) = bytes {
            match AtlasSnapshot::decode(bytes) {
                Ok(snapshot)
                    if snapshot.font_name == font_name
                        && snapshot.texture_size == texture_size =>
                {
                    match Self::from_snapshot(snapshot) {
                        Ok(atlas) => {
                            log::debug!("restored {font_name} atlas from snapshot");
                            return Ok(atlas);
                        }
                        Err(err) => {
                            log::warn!("snapshot for {font_name} is unusable ({err}); rebuilding");
                        }
                    }
                }
                Ok(_) => {
                    log::warn!(
                        "snapshot does not match {font_name} at {texture_size}px; rebuilding"
                    );
                }
                Err(err) => {
                    log::warn!("failed to decode snapshot for {font_name} ({err}); rebuilding");
                }
            }
        }
        Self::build(rasterizer, font_name, point_size, texture_size)
    }

    /// Capture everything needed to reconstruct this atlas.
    pub fn snapshot(&self) -> AtlasSnapshot {
        AtlasSnapshot {
            font_name: self.font_name.clone(),
            point_size: self.point_size,
            texture_size: self.texture_size,
            texture_data: self.texture_data.clone(),
            glyphs: self.glyphs.clone(),
        }
    }

    /// Hand the texture bytes to a texture factory.
    pub fn create_texture<F: TextureFactory>(
        &self,
        factory: &mut F,
    ) -> Result<F::Texture, F::Error> {
        factory.create_r8(self.texture_size, self.texture_size, &self.texture_data)
    }

    /// Name of the font this atlas was built from.
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// The point size the packer settled on.
    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    /// Edge length of the square texture.
    pub fn texture_size(&self) -> u16 {
        self.texture_size
    }

    /// The quantized distance texture, `texture_size²` bytes, row-major.
    pub fn texture_data(&self) -> &[u8] {
        &self.texture_data
    }

    /// One descriptor per glyph id, in ascending id order.
    pub fn glyphs(&self) -> &[GlyphDescriptor] {
        &self.glyphs
    }

    /// Encode the texture as an 8-bit grayscale PNG.
    #[cfg(feature = "png")]
    pub fn texture_to_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        Pixmap::from_parts(self.texture_data.clone(), self.texture_size, self.texture_size)
            .to_png()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_snapshot_validates_texture_length() {
        let snapshot = AtlasSnapshot {
            font_name: "Test".to_owned(),
            point_size: 32.0,
            texture_size: 4,
            texture_data: vec![0; 15],
            glyphs: Vec::new(),
        };
        assert!(matches!(
            FontAtlas::from_snapshot(snapshot),
            Err(AtlasError::AtlasNotProperlyInitialized)
        ));
    }

    #[test]
    fn create_texture_passes_bytes_through() {
        struct Collecting;

        impl TextureFactory for Collecting {
            type Texture = (u16, Vec<u8>);
            type Error = ();

            fn create_r8(
                &mut self,
                width: u16,
                height: u16,
                data: &[u8],
            ) -> Result<Self::Texture, Self::Error> {
                assert_eq!(width, height);
                Ok((width, data.to_vec()))
            }
        }

        let snapshot = AtlasSnapshot {
            font_name: "Test".to_owned(),
            point_size: 32.0,
            texture_size: 2,
            texture_data: vec![1, 2, 3, 4],
            glyphs: Vec::new(),
        };
        let atlas = FontAtlas::from_snapshot(snapshot).unwrap();
        let (size, bytes) = atlas.create_texture(&mut Collecting).unwrap();
        assert_eq!(size, 2);
        assert_eq!(bytes, vec![1, 2, 3, 4]);
    }
}
