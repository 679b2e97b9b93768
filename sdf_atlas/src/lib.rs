// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction of signed-distance-field (SDF) font atlases.
//!
//! Given a font and a target texture resolution, this crate lays every glyph
//! of the font out on a square working canvas, converts the canvas into a
//! signed distance field with the dead-reckoning transform, box-filters the
//! field down to the requested resolution and quantizes it into a
//! single-channel 8-bit texture. The finished [`FontAtlas`] carries the
//! texture bytes together with one normalized texture-coordinate rectangle
//! per glyph, and can be snapshotted to a compact binary record so a cache
//! layer can skip the rebuild entirely.
//!
//! The pipeline runs in four strictly ordered full-image passes:
//!
//! 1. [`pack`] — choose the largest point size whose area estimate fits the
//!    canvas, then shelf-pack the glyphs row by row.
//! 2. [`distance`] — the dead-reckoning signed distance transform.
//! 3. [`resample`] — non-overlapping box-filter downsampling.
//! 4. [`quantize`] — clamp, rescale and round into `u8`.
//!
//! Glyph rasterization itself is an injected capability (the
//! [`GlyphRasterizer`] trait); with the default `text` feature the crate
//! ships [`OutlineRasterizer`], which rasterizes outlines from real font
//! files. GPU texture creation stays behind the [`TextureFactory`]
//! collaborator and is never reached for implicitly.
//!
//! # Features
//!
//! - `text` (enabled by default): rasterize glyphs from font files via
//!   [skrifa].
//! - `png` (enabled by default): export the working canvas and finished
//!   texture as grayscale PNG for debugging.
//! - `multithreading`: run the row-independent pixel passes on a thread
//!   pool. The two dead-reckoning sweeps always stay sequential; they carry
//!   data dependencies along the sweep direction.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![forbid(unsafe_code)]

pub mod atlas;
pub mod distance;
pub mod glyph;
pub mod pack;
pub mod pixmap;
pub mod quantize;
pub mod resample;
pub mod snapshot;

pub use peniko;
pub use peniko::kurbo;

pub use atlas::{AtlasError, FontAtlas, GlyphDescriptor, TexCoord, TextureFactory, ATLAS_SIZE};
pub use distance::DistanceField;
#[cfg(feature = "text")]
pub use glyph::OutlineRasterizer;
pub use glyph::GlyphRasterizer;
pub use pixmap::Pixmap;
pub use snapshot::{AtlasSnapshot, SnapshotError};
