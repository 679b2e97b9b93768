// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An 8-bit grayscale pixmap and non-antialiased path filling.

use peniko::kurbo::{flatten, Affine, BezPath, PathEl, Point};
use smallvec::SmallVec;

/// Tolerance used when flattening outlines to line segments.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// A single-channel 8-bit pixmap.
///
/// Used as the working canvas for glyph packing: pixels are either 0
/// ("outside") or 255 ("inside"), since glyph ink is filled without
/// antialiasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    /// Width of the pixmap in pixels.
    width: u16,
    /// Height of the pixmap in pixels.
    height: u16,
    /// Buffer of the pixmap, one byte per pixel, row-major.
    buf: Vec<u8>,
}

impl Pixmap {
    /// Create a new pixmap with the given width and height in pixels.
    ///
    /// All pixels are initialized to zero.
    pub fn new(width: u16, height: u16) -> Self {
        let buf = vec![0; usize::from(width) * usize::from(height)];
        Self { width, height, buf }
    }

    /// Create a new pixmap with the given data.
    ///
    /// The pixels are in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if the `data` vector is not of length `width * height`.
    pub fn from_parts(data: Vec<u8>, width: u16, height: u16) -> Self {
        assert_eq!(
            data.len(),
            usize::from(width) * usize::from(height),
            "Expected `data` to have length of exactly `width * height`"
        );
        Self {
            width,
            height,
            buf: data,
        }
    }

    /// Return the width of the pixmap.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Return the height of the pixmap.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Returns a reference to the underlying data, in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    /// Returns a mutable reference to the underlying data, in row-major order.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }

    /// Sample a pixel from the pixmap.
    #[inline(always)]
    pub fn sample(&self, x: u16, y: u16) -> u8 {
        self.buf[usize::from(self.width) * usize::from(y) + usize::from(x)]
    }

    /// Set a pixel in the pixmap at the given coordinates.
    ///
    /// The coordinate system has its origin at the top-left corner, with `x`
    /// increasing to the right and `y` increasing downward.
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u16, y: u16, value: u8) {
        self.buf[usize::from(self.width) * usize::from(y) + usize::from(x)] = value;
    }

    /// Consume the pixmap, returning the underlying data.
    pub fn take(self) -> Vec<u8> {
        self.buf
    }

    /// Fill a path with the given value using the non-zero winding rule.
    ///
    /// No antialiasing: a pixel is set exactly when its center lies inside
    /// the transformed path. Geometry outside the pixmap is clipped. Open
    /// subpaths are closed implicitly, matching the fill rule.
    pub fn fill_path(&mut self, path: &BezPath, transform: Affine, value: u8) {
        // Flatten to line segments, closing every subpath.
        let mut lines: Vec<(Point, Point)> = Vec::new();
        let mut start = Point::ZERO;
        let mut last = Point::ZERO;
        let transformed = path.iter().map(|el| transform * el);
        flatten(transformed, FLATTEN_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => {
                if last != start {
                    lines.push((last, start));
                }
                start = p;
                last = p;
            }
            PathEl::LineTo(p) => {
                lines.push((last, p));
                last = p;
            }
            PathEl::ClosePath => {
                lines.push((last, start));
                last = start;
            }
            _ => (),
        });
        if last != start {
            lines.push((last, start));
        }
        if lines.is_empty() {
            return;
        }

        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for &(a, b) in &lines {
            min_y = min_y.min(a.y).min(b.y);
            max_y = max_y.max(a.y).max(b.y);
        }
        let y_first = (min_y.floor().max(0.0)) as usize;
        let y_end = (max_y.ceil().min(f64::from(self.height)).max(0.0)) as usize;

        let width = usize::from(self.width);
        let mut crossings: SmallVec<[(f64, i32); 16]> = SmallVec::new();
        for y in y_first..y_end {
            let sample_y = y as f64 + 0.5;
            crossings.clear();
            for &(a, b) in &lines {
                if a.y == b.y {
                    continue;
                }
                // Half-open span [top, bottom) so shared endpoints of
                // adjacent segments are counted exactly once.
                let (winding, top, bottom) = if b.y > a.y {
                    (1, a.y, b.y)
                } else {
                    (-1, b.y, a.y)
                };
                if sample_y < top || sample_y >= bottom {
                    continue;
                }
                let t = (sample_y - a.y) / (b.y - a.y);
                crossings.push((a.x + t * (b.x - a.x), winding));
            }
            crossings
                .sort_unstable_by(|p, q| p.0.partial_cmp(&q.0).unwrap_or(core::cmp::Ordering::Equal));

            let row = y * width;
            let mut winding = 0;
            let mut span_start = 0.0;
            for &(x, w) in &crossings {
                if winding == 0 {
                    span_start = x;
                }
                winding += w;
                if winding == 0 {
                    // Pixels whose center (px + 0.5) falls in [span_start, x).
                    let first = ((span_start - 0.5).ceil().max(0.0)) as usize;
                    let end = ((x - 0.5).ceil().min(f64::from(self.width)).max(0.0)) as usize;
                    for px in first..end {
                        self.buf[row + px] = value;
                    }
                }
            }
        }
    }

    /// Encode the pixmap as an 8-bit grayscale PNG.
    #[cfg(feature = "png")]
    pub fn to_png(&self) -> Result<Vec<u8>, png::EncodingError> {
        let mut data = Vec::new();
        let mut encoder = png::Encoder::new(&mut data, u32::from(self.width), u32::from(self.height));
        encoder.set_color(png::ColorType::Grayscale);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.buf)?;
        writer.finish().map(|_| data)
    }
}
