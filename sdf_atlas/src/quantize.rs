// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quantization of distance fields into 8-bit textures.

use crate::distance::DistanceField;

#[cfg(feature = "multithreading")]
use rayon::prelude::*;

/// Quantize a signed distance field into unsigned 8-bit values.
///
/// Every distance is clamped to `[-spread, spread]`, rescaled to `[-1, 1]`
/// and mapped to `[0, 255]` with round-to-nearest, so a distance of zero
/// lands on the midpoint and `±spread` (or anything beyond) saturates the
/// range. `spread` must be positive; it controls how much of the 8-bit range
/// is spent on the near-edge falloff versus fully-inside/outside saturation.
/// There is no error path: out-of-range inputs are clamped, not rejected.
pub fn quantize(field: &DistanceField, spread: f32) -> Vec<u8> {
    let quantize_row = |src: &[f32], dst: &mut [u8]| {
        for (&dist, value) in src.iter().zip(dst.iter_mut()) {
            let clamped = dist.max(-spread).min(spread);
            let scaled = clamped / spread;
            *value = (((scaled + 1.0) / 2.0) * 255.0 + 0.5) as u8;
        }
    };

    let w = usize::from(field.width());
    let mut out = vec![0_u8; field.data().len()];
    if out.is_empty() {
        return out;
    }

    #[cfg(feature = "multithreading")]
    out.par_chunks_mut(w)
        .zip(field.data().par_chunks(w))
        .for_each(|(dst, src)| quantize_row(src, dst));
    #[cfg(not(feature = "multithreading"))]
    for (dst, src) in out.chunks_mut(w).zip(field.data().chunks(w)) {
        quantize_row(src, dst);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantize_one(dist: f32, spread: f32) -> u8 {
        quantize(&DistanceField::from_parts(vec![dist], 1, 1), spread)[0]
    }

    #[test]
    fn endpoints_saturate() {
        assert_eq!(quantize_one(-2.0, 2.0), 0);
        assert_eq!(quantize_one(2.0, 2.0), 255);
        assert_eq!(quantize_one(-100.0, 2.0), 0);
        assert_eq!(quantize_one(100.0, 2.0), 255);
    }

    #[test]
    fn zero_maps_to_midpoint() {
        let mid = quantize_one(0.0, 3.0);
        assert!(mid == 127 || mid == 128, "got {mid}");
    }

    #[test]
    fn output_is_monotonic_in_distance() {
        let spread = 4.0;
        let mut last = 0;
        for i in 0..=80 {
            let dist = -5.0 + 0.125 * i as f32;
            let value = quantize_one(dist, spread);
            assert!(value >= last);
            last = value;
        }
        assert_eq!(last, 255);
    }
}
