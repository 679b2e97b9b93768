// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph measurement and rasterization.
//!
//! The atlas pipeline never talks to a font library directly; everything it
//! needs from one is captured by [`GlyphRasterizer`], injected by the caller.
//! With the `text` feature enabled, [`OutlineRasterizer`] implements the
//! trait for real font files.

use peniko::kurbo::{Point, Rect};

use crate::pixmap::Pixmap;

/// Capability for measuring and rasterizing the glyphs of one font.
///
/// Metric queries take the point size explicitly so the packer can probe
/// trial sizes while searching for the largest one that fits. Implementations
/// must fill with a solid, non-antialiased coverage: every canvas pixel ends
/// up fully on or fully off, which is what the distance transform expects.
pub trait GlyphRasterizer {
    /// Number of glyphs in the font; glyph ids run from 0 up to this,
    /// exclusive.
    fn glyph_count(&self) -> u32;

    /// Map a character to its glyph id.
    fn glyph_for_char(&self, c: char) -> Option<u32>;

    /// Typographic ascent at the given point size.
    fn ascent(&self, point_size: f32) -> f32;

    /// Typographic descent at the given point size, as a positive distance
    /// below the baseline.
    fn descent(&self, point_size: f32) -> f32;

    /// Horizontal advance of a glyph at the given point size.
    fn advance_width(&self, point_size: f32, glyph_id: u32) -> f32;

    /// Layout bounding box of a glyph at the given point size, y-up and
    /// relative to a baseline origin, or `None` for an ink-less glyph.
    fn bounding_box(&self, point_size: f32, glyph_id: u32) -> Option<Rect>;

    /// Fill a glyph into `canvas` with its baseline origin placed at
    /// `baseline` (canvas coordinates, y down), returning the tight ink
    /// bounding box in canvas coordinates, or `None` if the glyph has no ink.
    fn fill_glyph(
        &self,
        point_size: f32,
        glyph_id: u32,
        baseline: Point,
        canvas: &mut Pixmap,
    ) -> Option<Rect>;
}

#[cfg(feature = "text")]
pub use outline::OutlineRasterizer;

#[cfg(feature = "text")]
mod outline {
    use peniko::kurbo::{Affine, BezPath, Point, Rect, Shape};
    use peniko::Font;
    use skrifa::instance::{LocationRef, Size};
    use skrifa::outline::{DrawSettings, OutlinePen};
    use skrifa::raw::{FileRef, FontRef, TableProvider};
    use skrifa::{GlyphId, MetadataProvider};

    use super::GlyphRasterizer;
    use crate::pixmap::Pixmap;

    /// A [`GlyphRasterizer`] over the outlines of a font blob.
    ///
    /// Hinting is deliberately left off: the atlas is rendered once at a
    /// large point size and sampled at arbitrary scales, so grid-fitting
    /// would only distort the distance field.
    #[derive(Clone, Debug)]
    pub struct OutlineRasterizer {
        font: Font,
    }

    impl OutlineRasterizer {
        /// Create a rasterizer for the given font.
        ///
        /// Returns `None` when the blob does not parse as a font, or the
        /// collection index is out of range.
        pub fn new(font: Font) -> Option<Self> {
            to_font_ref(&font)?;
            Some(Self { font })
        }

        fn with_font<'a, T>(&'a self, f: impl FnOnce(FontRef<'a>) -> Option<T>) -> Option<T> {
            to_font_ref(&self.font).and_then(f)
        }

        fn outline_path(&self, point_size: f32, glyph_id: u32) -> Option<BezPath> {
            self.with_font(|font| {
                let outlines = font.outline_glyphs();
                let glyph = outlines.get(GlyphId::new(glyph_id))?;
                let mut pen = BezPathPen::default();
                let settings = DrawSettings::unhinted(Size::new(point_size), LocationRef::default());
                glyph.draw(settings, &mut pen).ok()?;
                if pen.0.elements().is_empty() {
                    return None;
                }
                Some(pen.0)
            })
        }
    }

    impl GlyphRasterizer for OutlineRasterizer {
        fn glyph_count(&self) -> u32 {
            self.with_font(|font| font.maxp().ok().map(|maxp| u32::from(maxp.num_glyphs())))
                .unwrap_or(0)
        }

        fn glyph_for_char(&self, c: char) -> Option<u32> {
            self.with_font(|font| font.charmap().map(c).map(|gid| gid.to_u32()))
        }

        fn ascent(&self, point_size: f32) -> f32 {
            self.with_font(|font| {
                Some(
                    font.metrics(Size::new(point_size), LocationRef::default())
                        .ascent,
                )
            })
            .unwrap_or(0.0)
        }

        fn descent(&self, point_size: f32) -> f32 {
            // Font metrics report descent as a negative offset from the
            // baseline; the packer wants a positive distance.
            self.with_font(|font| {
                Some(
                    -font
                        .metrics(Size::new(point_size), LocationRef::default())
                        .descent,
                )
            })
            .unwrap_or(0.0)
        }

        fn advance_width(&self, point_size: f32, glyph_id: u32) -> f32 {
            self.with_font(|font| {
                font.glyph_metrics(Size::new(point_size), LocationRef::default())
                    .advance_width(GlyphId::new(glyph_id))
            })
            .unwrap_or(0.0)
        }

        fn bounding_box(&self, point_size: f32, glyph_id: u32) -> Option<Rect> {
            Some(self.outline_path(point_size, glyph_id)?.bounding_box())
        }

        fn fill_glyph(
            &self,
            point_size: f32,
            glyph_id: u32,
            baseline: Point,
            canvas: &mut Pixmap,
        ) -> Option<Rect> {
            let path = self.outline_path(point_size, glyph_id)?;
            // Outlines are y-up around the baseline; the canvas is y-down.
            let transform = Affine::translate((baseline.x, baseline.y)) * Affine::FLIP_Y;
            let ink = transform.transform_rect_bbox(path.bounding_box());
            canvas.fill_path(&path, transform, u8::MAX);
            Some(ink)
        }
    }

    fn to_font_ref(font: &Font) -> Option<FontRef<'_>> {
        let file_ref = FileRef::new(font.data.as_ref()).ok()?;
        match file_ref {
            FileRef::Font(font_ref) => Some(font_ref),
            FileRef::Collection(collection) => collection.get(font.index).ok(),
        }
    }

    #[derive(Default)]
    struct BezPathPen(BezPath);

    impl OutlinePen for BezPathPen {
        fn move_to(&mut self, x: f32, y: f32) {
            self.0.move_to((f64::from(x), f64::from(y)));
        }

        fn line_to(&mut self, x: f32, y: f32) {
            self.0.line_to((f64::from(x), f64::from(y)));
        }

        fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
            self.0
                .quad_to((f64::from(cx0), f64::from(cy0)), (f64::from(x), f64::from(y)));
        }

        fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
            self.0.curve_to(
                (f64::from(cx0), f64::from(cy0)),
                (f64::from(cx1), f64::from(cy1)),
                (f64::from(x), f64::from(y)),
            );
        }

        fn close(&mut self) {
            self.0.close_path();
        }
    }
}
