// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric properties of the transform, resampling and quantization passes.

use sdf_atlas::distance::DistanceField;
use sdf_atlas::quantize::quantize;
use sdf_atlas::resample::resample;
use sdf_atlas_tests::pixmap_from_rows;

/// A 4×4 canvas with a 2×2 inside block in the center, pushed through the
/// whole pixel pipeline at identity scale.
#[test]
fn center_block_scenario() {
    let image = pixmap_from_rows(&[
        "....", //
        ".##.", //
        ".##.", //
        "....",
    ]);
    let field = DistanceField::from_binary(&image);
    let scaled = resample(&field, 1).unwrap();
    let texture = quantize(&scaled, 2.0);

    for y in 0..4 {
        for x in 0..4 {
            let value = texture[y * 4 + x];
            let center = (1..=2).contains(&x) && (1..=2).contains(&y);
            if center {
                assert!(value > 127, "center pixel ({x}, {y}) got {value}");
            } else {
                assert!(value < 127, "border pixel ({x}, {y}) got {value}");
            }
        }
    }

    // The block sits dead center, so the texture must mirror exactly across
    // both axes.
    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(texture[y * 4 + x], texture[y * 4 + (3 - x)]);
            assert_eq!(texture[y * 4 + x], texture[(3 - y) * 4 + x]);
        }
    }
}

#[test]
fn inside_is_non_negative_outside_is_non_positive() {
    let image = pixmap_from_rows(&[
        "................",
        ".#####..........",
        ".#####....##....",
        ".#####....##....",
        ".#####..........",
        "......##........",
        "......##...####.",
        "...........####.",
        "................",
    ]);
    let field = DistanceField::from_binary(&image);

    for y in 0..image.height() {
        for x in 0..image.width() {
            let value = field.get(x, y);
            if image.sample(x, y) > 0x7f {
                assert!(value >= 0.0, "inside pixel ({x}, {y}) got {value}");
            } else {
                assert!(value <= 0.0, "outside pixel ({x}, {y}) got {value}");
            }
        }
    }
}

#[test]
fn boundary_neighbors_are_exactly_zero() {
    let image = pixmap_from_rows(&[
        "..........",
        "..######..",
        "..######..",
        "..######..",
        "..######..",
        "..........",
    ]);
    let field = DistanceField::from_binary(&image);

    let w = usize::from(image.width());
    let h = usize::from(image.height());
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let inside = |x: usize, y: usize| image.data()[y * w + x] > 0x7f;
            let center = inside(x, y);
            let on_boundary = inside(x - 1, y) != center
                || inside(x + 1, y) != center
                || inside(x, y - 1) != center
                || inside(x, y + 1) != center;
            if on_boundary {
                assert_eq!(field.get(x as u16, y as u16), 0.0, "at ({x}, {y})");
            } else {
                assert_ne!(field.get(x as u16, y as u16), 0.0, "at ({x}, {y})");
            }
        }
    }
}

#[test]
fn resampling_constants_is_lossless() {
    for (edge, scale) in [(16, 2), (16, 4), (12, 3), (12, 1)] {
        let field = DistanceField::from_parts(vec![-1.5; edge * edge], edge as u16, edge as u16);
        let scaled = resample(&field, scale).unwrap();
        assert_eq!(scaled.width(), (edge / scale) as u16);
        assert_eq!(scaled.height(), (edge / scale) as u16);
        assert!(scaled.data().iter().all(|&v| v == -1.5));
    }
}

#[test]
fn quantization_stays_in_range_and_hits_endpoints() {
    let distances: Vec<f32> = vec![-10.0, -3.0, -1.0, 0.0, 1.0, 3.0, 10.0, 0.5];
    let field = DistanceField::from_parts(distances, 8, 1);
    let spread = 3.0;
    let texture = quantize(&field, spread);

    assert_eq!(texture[0], 0); // below -spread
    assert_eq!(texture[1], 0); // exactly -spread
    assert_eq!(texture[6], 255); // above +spread
    assert_eq!(texture[5], 255); // exactly +spread
    let mid = texture[3];
    assert!(mid == 127 || mid == 128);
}
