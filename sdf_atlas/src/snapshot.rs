// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Versioned binary snapshots of built atlases.
//!
//! A snapshot is an explicit little-endian record: magic, format version,
//! then length-prefixed fields. Decoding validates every field and fails
//! rather than substituting defaults; how the bytes get to and from storage
//! is the caller's business.

use thiserror::Error;

use crate::atlas::{GlyphDescriptor, TexCoord};

/// Magic bytes at the start of every encoded snapshot.
const MAGIC: [u8; 4] = *b"SDFA";
/// Current snapshot format version.
const VERSION: u32 = 1;

/// Everything needed to reconstruct a [`FontAtlas`](crate::FontAtlas)
/// without rebuilding it.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasSnapshot {
    /// Name of the source font.
    pub font_name: String,
    /// The fitted point size the atlas was rendered at.
    pub point_size: f32,
    /// Edge length of the square texture.
    pub texture_size: u16,
    /// The quantized texture, `texture_size²` bytes.
    pub texture_data: Vec<u8>,
    /// Per-glyph texture rectangles, ascending glyph id.
    pub glyphs: Vec<GlyphDescriptor>,
}

/// Failures while decoding a snapshot record.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The record does not start with the snapshot magic.
    #[error("not a font atlas snapshot")]
    InvalidMagic,
    /// The record was written by an unknown format version.
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
    /// The record ends before all declared fields.
    #[error("snapshot record is truncated")]
    UnexpectedEof,
    /// The font name field is not valid UTF-8.
    #[error("font name is not valid UTF-8")]
    InvalidFontName,
    /// The texture size field does not fit the supported range.
    #[error("texture size {0} is out of range")]
    InvalidTextureSize(u32),
    /// Extra bytes follow the last declared field.
    #[error("{0} trailing bytes after snapshot record")]
    TrailingBytes(usize),
}

impl AtlasSnapshot {
    /// Encode the snapshot as a self-contained binary record.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            28 + self.font_name.len() + self.glyphs.len() * 20 + self.texture_data.len(),
        );
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&VERSION.to_le_bytes());
        out.extend_from_slice(&(self.font_name.len() as u32).to_le_bytes());
        out.extend_from_slice(self.font_name.as_bytes());
        out.extend_from_slice(&self.point_size.to_le_bytes());
        out.extend_from_slice(&u32::from(self.texture_size).to_le_bytes());
        out.extend_from_slice(&(self.glyphs.len() as u32).to_le_bytes());
        for glyph in &self.glyphs {
            out.extend_from_slice(&glyph.glyph_id.to_le_bytes());
            out.extend_from_slice(&glyph.top_left.u.to_le_bytes());
            out.extend_from_slice(&glyph.top_left.v.to_le_bytes());
            out.extend_from_slice(&glyph.bottom_right.u.to_le_bytes());
            out.extend_from_slice(&glyph.bottom_right.v.to_le_bytes());
        }
        out.extend_from_slice(&(self.texture_data.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.texture_data);
        out
    }

    /// Decode a record produced by [`encode`](Self::encode).
    pub fn decode(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let mut reader = Reader(bytes);
        if reader.bytes(4)? != &MAGIC[..] {
            return Err(SnapshotError::InvalidMagic);
        }
        let version = reader.u32()?;
        if version != VERSION {
            return Err(SnapshotError::UnsupportedVersion(version));
        }

        let name_len = reader.u32()? as usize;
        let font_name = core::str::from_utf8(reader.bytes(name_len)?)
            .map_err(|_| SnapshotError::InvalidFontName)?
            .to_owned();
        let point_size = reader.f32()?;
        let raw_texture_size = reader.u32()?;
        let texture_size = u16::try_from(raw_texture_size)
            .map_err(|_| SnapshotError::InvalidTextureSize(raw_texture_size))?;

        let glyph_count = reader.u32()? as usize;
        // Each glyph record is 20 bytes, so an absurd count fails on read
        // rather than on allocation.
        let mut glyphs = Vec::with_capacity(glyph_count.min(reader.0.len() / 20));
        for _ in 0..glyph_count {
            let glyph_id = reader.u32()?;
            let top_left = TexCoord {
                u: reader.f32()?,
                v: reader.f32()?,
            };
            let bottom_right = TexCoord {
                u: reader.f32()?,
                v: reader.f32()?,
            };
            glyphs.push(GlyphDescriptor {
                glyph_id,
                top_left,
                bottom_right,
            });
        }

        let texture_len = reader.u32()? as usize;
        let texture_data = reader.bytes(texture_len)?.to_vec();
        if !reader.0.is_empty() {
            return Err(SnapshotError::TrailingBytes(reader.0.len()));
        }

        Ok(Self {
            font_name,
            point_size,
            texture_size,
            texture_data,
            glyphs,
        })
    }
}

struct Reader<'a>(&'a [u8]);

impl<'a> Reader<'a> {
    fn bytes(&mut self, n: usize) -> Result<&'a [u8], SnapshotError> {
        if self.0.len() < n {
            return Err(SnapshotError::UnexpectedEof);
        }
        let (head, tail) = self.0.split_at(n);
        self.0 = tail;
        Ok(head)
    }

    fn u32(&mut self) -> Result<u32, SnapshotError> {
        self.bytes(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn f32(&mut self) -> Result<f32, SnapshotError> {
        self.u32().map(f32::from_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AtlasSnapshot {
        AtlasSnapshot {
            font_name: "Exemplar Sans".to_owned(),
            point_size: 118.0,
            texture_size: 4,
            texture_data: (0..16).collect(),
            glyphs: vec![
                GlyphDescriptor::empty(0),
                GlyphDescriptor {
                    glyph_id: 1,
                    top_left: TexCoord { u: 0.125, v: 0.25 },
                    bottom_right: TexCoord { u: 0.5, v: 0.75 },
                },
            ],
        }
    }

    #[test]
    fn round_trip_is_exact() {
        let snapshot = sample();
        let decoded = AtlasSnapshot::decode(&snapshot.encode()).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = sample().encode();
        bytes[0] = b'X';
        assert!(matches!(
            AtlasSnapshot::decode(&bytes),
            Err(SnapshotError::InvalidMagic)
        ));
    }

    #[test]
    fn rejects_unknown_version() {
        let mut bytes = sample().encode();
        bytes[4] = 0xff;
        assert!(matches!(
            AtlasSnapshot::decode(&bytes),
            Err(SnapshotError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn rejects_truncation_anywhere() {
        let bytes = sample().encode();
        for len in 0..bytes.len() {
            assert!(
                AtlasSnapshot::decode(&bytes[..len]).is_err(),
                "decode succeeded on {len} of {} bytes",
                bytes.len()
            );
        }
    }

    #[test]
    fn rejects_trailing_bytes() {
        let mut bytes = sample().encode();
        bytes.push(0);
        assert!(matches!(
            AtlasSnapshot::decode(&bytes),
            Err(SnapshotError::TrailingBytes(1))
        ));
    }

    #[test]
    fn rejects_invalid_utf8_name() {
        let mut bytes = sample().encode();
        // First name byte sits right after magic, version and length.
        bytes[12] = 0xff;
        assert!(matches!(
            AtlasSnapshot::decode(&bytes),
            Err(SnapshotError::InvalidFontName)
        ));
    }
}
