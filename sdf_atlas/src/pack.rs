// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph packing: point-size fitting and shelf layout.
//!
//! Packing happens in two stages. First a hill-climb finds the largest point
//! size whose *estimated* total glyph area fits the canvas: grow while the
//! estimate fits, then back off until it does. The estimate is monotonic in
//! the point size but coarse, hence the overshoot-then-back-off shape.
//! Second, the glyphs are laid out row by row (shelf packing) at the chosen
//! size and filled into the canvas without antialiasing.

use peniko::kurbo::Point;

use crate::atlas::{AtlasError, GlyphDescriptor, TexCoord};
use crate::glyph::GlyphRasterizer;
use crate::pixmap::Pixmap;

/// Exemplar used to estimate the average glyph footprint; mixes ascenders,
/// descenders and wide characters.
const EXEMPLAR: &str = "{ǺOJMQYZa@jmqyw";

/// Result of packing a font into the working canvas.
#[derive(Debug)]
pub struct Packing {
    /// The point size at which the glyphs were laid out.
    pub point_size: f32,
    /// One descriptor per glyph id, in ascending id order.
    pub glyphs: Vec<GlyphDescriptor>,
}

/// Estimated stroke width of the font at `point_size`, measured as the
/// advance of the reference glyph `'!'`.
///
/// Used both as the packing margin between glyphs and (halved) as the
/// quantization spread.
pub fn estimated_stroke_width<R: GlyphRasterizer>(rasterizer: &R, point_size: f32) -> f32 {
    match rasterizer.glyph_for_char('!') {
        Some(glyph_id) => rasterizer.advance_width(point_size, glyph_id).ceil(),
        None => (0.1 * point_size).ceil(),
    }
}

/// Estimated average glyph width and height at `point_size`, measured from
/// the exemplar string.
fn estimated_glyph_size<R: GlyphRasterizer>(rasterizer: &R, point_size: f32) -> (f32, f32) {
    let mut total_advance = 0.0;
    let mut count = 0;
    for c in EXEMPLAR.chars() {
        if let Some(glyph_id) = rasterizer.glyph_for_char(c) {
            total_advance += rasterizer.advance_width(point_size, glyph_id);
        }
        count += 1;
    }
    let average_width = (total_advance / count as f32).ceil();
    let height = (rasterizer.ascent(point_size) + rasterizer.descent(point_size)).ceil();
    (average_width, height)
}

/// Whether the estimated total glyph area at `point_size` fits the canvas.
fn is_likely_to_fit<R: GlyphRasterizer>(
    rasterizer: &R,
    point_size: f32,
    canvas_area: f32,
) -> bool {
    let margin = estimated_stroke_width(rasterizer, point_size);
    let (average_width, average_height) = estimated_glyph_size(rasterizer, point_size);
    let estimated_total_area =
        (average_width + margin) * (average_height + margin) * rasterizer.glyph_count() as f32;
    estimated_total_area < canvas_area
}

/// Largest point size whose area estimate fits, starting the climb from the
/// requested size.
fn point_size_that_fits<R: GlyphRasterizer>(
    rasterizer: &R,
    requested: f32,
    canvas_edge: f32,
) -> Result<f32, AtlasError> {
    let canvas_area = canvas_edge * canvas_edge;
    let mut size = requested.max(1.0);
    while size < canvas_edge && is_likely_to_fit(rasterizer, size, canvas_area) {
        size += 1.0;
    }
    while size >= 1.0 && !is_likely_to_fit(rasterizer, size, canvas_area) {
        size -= 1.0;
    }
    if size < 1.0 {
        return Err(AtlasError::CapacityExceeded);
    }
    Ok(size)
}

/// Lay every glyph of the font out on `canvas`, choosing the largest point
/// size whose area estimate fits.
///
/// The canvas must be cleared to zero on entry; glyph ink is filled at 255.
/// Each descriptor records the glyph's tight ink bounding box normalized by
/// the canvas dimensions; ink-less glyphs collapse to a zero-area rectangle
/// at the origin and leave the cursor untouched. Fails with
/// [`AtlasError::CapacityExceeded`] when a placement would extend past the
/// canvas bounds.
pub fn pack<R: GlyphRasterizer>(
    rasterizer: &R,
    requested_point_size: f32,
    canvas: &mut Pixmap,
) -> Result<Packing, AtlasError> {
    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());
    let point_size = point_size_that_fits(rasterizer, requested_point_size, canvas.width() as f32)?;
    let glyph_count = rasterizer.glyph_count();
    log::debug!("packing {glyph_count} glyphs at {point_size}pt");

    let margin = f64::from(estimated_stroke_width(rasterizer, point_size));
    let descent = f64::from(rasterizer.descent(point_size));
    let mut glyphs = Vec::with_capacity(glyph_count as usize);
    let mut origin = Point::new(0.0, f64::from(rasterizer.ascent(point_size)));
    let mut row_bottom = -1.0_f64;

    for glyph_id in 0..glyph_count {
        let Some(bounds) = rasterizer.bounding_box(point_size, glyph_id) else {
            glyphs.push(GlyphDescriptor::empty(glyph_id));
            continue;
        };

        if origin.x + bounds.x1 + margin > width {
            origin.x = 0.0;
            origin.y = row_bottom + margin + descent;
            row_bottom = -1.0;
        }
        if origin.y + bounds.y1 > row_bottom {
            row_bottom = origin.y + bounds.y1;
        }

        // Baseline such that the ink starts half a margin past the cursor.
        let baseline = Point::new(origin.x - bounds.x0 + 0.5 * margin, origin.y + 0.5 * margin);

        // Predicted extent of the placed ink (bounds are y-up around the
        // baseline). Reject instead of writing past the canvas.
        let right = baseline.x + bounds.x1;
        let bottom = baseline.y - bounds.y0;
        if right > width || bottom > height {
            return Err(AtlasError::CapacityExceeded);
        }

        let descriptor = match rasterizer.fill_glyph(point_size, glyph_id, baseline, canvas) {
            Some(ink) => GlyphDescriptor {
                glyph_id,
                top_left: TexCoord {
                    u: (ink.x0 / width).clamp(0.0, 1.0) as f32,
                    v: (ink.y0 / height).clamp(0.0, 1.0) as f32,
                },
                bottom_right: TexCoord {
                    u: (ink.x1 / width).clamp(0.0, 1.0) as f32,
                    v: (ink.y1 / height).clamp(0.0, 1.0) as f32,
                },
            },
            None => GlyphDescriptor::empty(glyph_id),
        };
        glyphs.push(descriptor);

        origin.x += bounds.width() + margin;
    }

    Ok(Packing { point_size, glyphs })
}
