// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared synthetic glyph sources for the atlas integration tests.
//!
//! The pipeline is tested against fake fonts rather than real font files so
//! the expected geometry stays exact and the repository carries no binary
//! assets.

use sdf_atlas::kurbo::{Affine, Point, Rect, Shape};
use sdf_atlas::{GlyphRasterizer, Pixmap};

/// A fake font whose glyphs are solid squares sitting on the baseline.
///
/// Glyph `i` is a filled square with side `(base + 0.05 · (i % 4)) · size`,
/// so neighboring ids differ a little in footprint. Every eleventh glyph
/// (id ≡ 5 mod 11) carries no ink, standing in for control characters and
/// spaces.
pub struct BlockGlyphs {
    /// Number of glyphs in the fake font.
    pub count: u32,
    /// Base glyph side as a fraction of the point size.
    pub base_fraction: f64,
}

impl BlockGlyphs {
    /// A fake font with `count` glyphs at the default footprint.
    pub fn new(count: u32) -> Self {
        Self {
            count,
            base_fraction: 0.3,
        }
    }

    /// Whether the fake font gives glyph `id` any ink.
    pub fn has_ink(&self, glyph_id: u32) -> bool {
        glyph_id % 11 != 5
    }

    fn side(&self, point_size: f32, glyph_id: u32) -> f64 {
        (self.base_fraction + 0.05 * f64::from(glyph_id % 4)) * f64::from(point_size)
    }
}

impl GlyphRasterizer for BlockGlyphs {
    fn glyph_count(&self) -> u32 {
        self.count
    }

    fn glyph_for_char(&self, c: char) -> Option<u32> {
        (self.count > 0).then(|| u32::from(c) % self.count)
    }

    fn ascent(&self, point_size: f32) -> f32 {
        point_size
    }

    fn descent(&self, point_size: f32) -> f32 {
        0.25 * point_size
    }

    fn advance_width(&self, point_size: f32, glyph_id: u32) -> f32 {
        self.side(point_size, glyph_id) as f32 + 1.0
    }

    fn bounding_box(&self, point_size: f32, glyph_id: u32) -> Option<Rect> {
        if !self.has_ink(glyph_id) {
            return None;
        }
        let side = self.side(point_size, glyph_id);
        Some(Rect::new(0.0, 0.0, side, side))
    }

    fn fill_glyph(
        &self,
        point_size: f32,
        glyph_id: u32,
        baseline: Point,
        canvas: &mut Pixmap,
    ) -> Option<Rect> {
        let bounds = self.bounding_box(point_size, glyph_id)?;
        let transform = Affine::translate((baseline.x, baseline.y)) * Affine::FLIP_Y;
        let ink = transform.transform_rect_bbox(bounds);
        canvas.fill_path(&bounds.to_path(0.1), transform, 255);
        Some(ink)
    }
}

/// Build a pixmap from rows of `.` (outside) and `#` (inside).
pub fn pixmap_from_rows(rows: &[&str]) -> Pixmap {
    let height = rows.len() as u16;
    let width = rows[0].len() as u16;
    let mut data = Vec::with_capacity(usize::from(width) * usize::from(height));
    for row in rows {
        assert_eq!(row.len(), usize::from(width));
        data.extend(row.bytes().map(|b| if b == b'#' { 255 } else { 0 }));
    }
    Pixmap::from_parts(data, width, height)
}
