// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box-filter downsampling of distance fields.

use crate::atlas::AtlasError;
use crate::distance::DistanceField;

/// Downsample a field by an integer factor with a non-overlapping box filter.
///
/// The source is partitioned into `scale_factor × scale_factor` tiles and
/// each output value is the arithmetic mean of one tile. Tiles always align
/// exactly, so there is no boundary special-casing; instead the call fails
/// with [`AtlasError::UnsupportedTextureSize`] when `scale_factor` does not
/// evenly divide both source dimensions.
pub fn resample(field: &DistanceField, scale_factor: usize) -> Result<DistanceField, AtlasError> {
    let w = usize::from(field.width());
    let h = usize::from(field.height());
    if scale_factor == 0 || w % scale_factor != 0 || h % scale_factor != 0 {
        return Err(AtlasError::UnsupportedTextureSize);
    }

    let scaled_w = w / scale_factor;
    let scaled_h = h / scale_factor;
    let src = field.data();
    let tile_area = (scale_factor * scale_factor) as f32;
    let mut out = vec![0.0_f32; scaled_w * scaled_h];
    for tile_y in 0..scaled_h {
        for tile_x in 0..scaled_w {
            let mut accum = 0.0_f32;
            for ky in 0..scale_factor {
                let row = (tile_y * scale_factor + ky) * w + tile_x * scale_factor;
                for kx in 0..scale_factor {
                    accum += src[row + kx];
                }
            }
            out[tile_y * scaled_w + tile_x] = accum / tile_area;
        }
    }

    Ok(DistanceField::from_parts(out, scaled_w as u16, scaled_h as u16))
}
