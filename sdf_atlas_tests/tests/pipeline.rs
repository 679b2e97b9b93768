// Copyright 2026 the SDF Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests of the atlas build pipeline.

use sdf_atlas::{AtlasError, FontAtlas, TexCoord, ATLAS_SIZE};
use sdf_atlas_tests::BlockGlyphs;

#[test]
fn building_twice_is_deterministic() {
    let rasterizer = BlockGlyphs::new(30);
    let first = FontAtlas::build(&rasterizer, "Blocks", 32.0, 256).unwrap();
    let second = FontAtlas::build(&rasterizer, "Blocks", 32.0, 256).unwrap();

    assert_eq!(first.texture_data(), second.texture_data());
    assert_eq!(first.glyphs(), second.glyphs());
    assert_eq!(first.point_size(), second.point_size());
}

#[test]
fn texture_size_must_divide_atlas_size() {
    let rasterizer = BlockGlyphs::new(8);
    for texture_size in [0, 3, 600, 4095, ATLAS_SIZE + 1] {
        assert!(
            matches!(
                FontAtlas::build(&rasterizer, "Blocks", 32.0, texture_size),
                Err(AtlasError::UnsupportedTextureSize)
            ),
            "texture size {texture_size} should be rejected"
        );
    }

    let atlas = FontAtlas::build(&rasterizer, "Blocks", 32.0, 512).unwrap();
    assert_eq!(atlas.texture_size(), 512);
    assert_eq!(atlas.texture_data().len(), 512 * 512);
}

#[test]
fn descriptors_cover_every_glyph_in_order() {
    let rasterizer = BlockGlyphs::new(30);
    let atlas = FontAtlas::build(&rasterizer, "Blocks", 32.0, 256).unwrap();

    assert_eq!(atlas.glyphs().len(), 30);
    for (i, glyph) in atlas.glyphs().iter().enumerate() {
        assert_eq!(glyph.glyph_id, i as u32);
        assert!(glyph.top_left.u <= glyph.bottom_right.u);
        assert!(glyph.top_left.v <= glyph.bottom_right.v);
        assert!((0.0..=1.0).contains(&glyph.bottom_right.u));
        assert!((0.0..=1.0).contains(&glyph.bottom_right.v));
        if rasterizer.has_ink(glyph.glyph_id) {
            assert!(glyph.bottom_right.u > glyph.top_left.u);
        } else {
            assert_eq!(glyph.top_left, TexCoord::ZERO);
            assert_eq!(glyph.bottom_right, TexCoord::ZERO);
        }
    }
}

#[test]
fn texture_spans_the_quantized_range() {
    let rasterizer = BlockGlyphs::new(30);
    let atlas = FontAtlas::build(&rasterizer, "Blocks", 32.0, 256).unwrap();

    // Far from any glyph the field saturates low; deep inside a block it
    // climbs well past the midpoint; near edges it passes through it.
    let min = atlas.texture_data().iter().min().unwrap();
    let max = atlas.texture_data().iter().max().unwrap();
    assert_eq!(*min, 0);
    assert!(*max > 200, "max quantized value {max}");
    let near_edge = atlas
        .texture_data()
        .iter()
        .filter(|&&v| (100..=156).contains(&v))
        .count();
    assert!(near_edge > 0);
}

#[test]
fn overflowing_font_is_rejected() {
    let rasterizer = BlockGlyphs {
        count: 64,
        base_fraction: 5000.0,
    };
    assert!(matches!(
        FontAtlas::build(&rasterizer, "Blocks", 32.0, 256),
        Err(AtlasError::CapacityExceeded)
    ));
}

#[test]
fn chosen_point_size_is_recorded() {
    let rasterizer = BlockGlyphs::new(30);
    let atlas = FontAtlas::build(&rasterizer, "Blocks", 32.0, 256).unwrap();

    // The packer grows the size well past the requested 32 for this few
    // glyphs on a 2048 canvas.
    assert!(atlas.point_size() > 32.0);
    assert_eq!(atlas.font_name(), "Blocks");
}
