//! Tests for grid-to-raster construction.

use grid_common::{GridDefinition, GridError, GridShape};
use renderer::colormap::{BandCount, Color, ColorMapper, DEGENERATE_COLOR};
use renderer::range::analyze;
use renderer::raster::{Orientation, RasterBuilder, RasterFill, PIXEL_ALPHA};
use test_utils::{
    assert_approx_eq, create_constant_grid, create_row_index_grid, create_temperature_grid,
};

fn builder(bands: BandCount, orientation: Orientation) -> RasterBuilder {
    RasterBuilder::new(ColorMapper::new(bands), orientation)
}

// ============================================================================
// Dimensions and fill
// ============================================================================

#[test]
fn test_build_matches_grid_dimensions() {
    let (w, h) = (37, 19);
    let field = create_temperature_grid(w, h);
    let shape = GridShape::new(w, h).unwrap();
    let image = RasterBuilder::default().build(&field, shape, analyze(&field));

    assert_eq!(image.width(), w);
    assert_eq!(image.height(), h);
    assert_eq!(image.as_bytes().len(), w * h * 4);
    assert_eq!(image.fill(), RasterFill::Complete);
    assert!(image.as_bytes().chunks_exact(4).all(|p| p[3] == PIXEL_ALPHA));
}

#[test]
fn test_analyze_temperature_field() {
    let range = analyze(&create_temperature_grid(16, 16));
    assert_approx_eq!(range.min, 250.0, 1e-4);
    assert_approx_eq!(range.max, 306.25, 1e-4);
    assert_approx_eq!(range.span(), 56.25, 1e-4);
}

#[test]
fn test_length_mismatch_leaves_blank_raster() {
    let shape = GridShape::new(3, 2).unwrap();
    let field = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let image = RasterBuilder::default().build(&field, shape, analyze(&field));

    assert_eq!(image.width(), 3);
    assert_eq!(image.height(), 2);
    assert!(image.is_blank());
    assert_eq!(
        image.fill(),
        RasterFill::Blank {
            expected: 6,
            actual: 5
        }
    );
    assert!(image.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_empty_field_renders_blank() {
    let shape = GridShape::new(4, 4).unwrap();
    let image = RasterBuilder::default().build(&[], shape, analyze(&[]));
    assert!(image.is_blank());
    assert!(image.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn test_flat_field_single_color() {
    let field = create_constant_grid(5, 3, 287.5);
    let shape = GridShape::new(5, 3).unwrap();
    let image = RasterBuilder::default().build(&field, shape, analyze(&field));

    let expected = DEGENERATE_COLOR.with_alpha(PIXEL_ALPHA);
    for y in 0..3 {
        for x in 0..5 {
            assert_eq!(image.pixel(x, y), Some(expected));
        }
    }
}

#[test]
fn test_all_nan_field_renders_black() {
    let field = vec![f32::NAN; 4];
    let grid = GridDefinition::lat_lon(2, 2);
    let range = analyze(&field);
    assert!(range.is_empty());

    let image = RasterBuilder::default()
        .build_from_grid(&field, &grid, range)
        .unwrap();

    assert_eq!(image.fill(), RasterFill::Complete);
    let expected = Color::new(0, 0, 0, PIXEL_ALPHA);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(image.pixel(x, y), Some(expected));
        }
    }
}

// ============================================================================
// Reference scenario: 2x2, values 0/10/20/30, eight bands
// ============================================================================

#[test]
fn test_two_by_two_identity() {
    let field = [0.0, 10.0, 20.0, 30.0];
    let shape = GridShape::new(2, 2).unwrap();
    let range = analyze(&field);
    assert_eq!((range.min, range.max), (0.0, 30.0));

    let image = builder(BandCount::Eight, Orientation::Identity).build(&field, shape, range);

    assert_eq!(image.pixel(0, 0), Some(Color::new(0, 0, 128, 254)));
    assert_eq!(image.pixel(1, 0), Some(Color::new(0, 212, 255, 254)));
    assert_eq!(image.pixel(0, 1), Some(Color::new(255, 212, 0, 254)));
    assert_eq!(image.pixel(1, 1), Some(Color::new(128, 0, 0, 254)));
}

#[test]
fn test_two_by_two_flipped() {
    let field = [0.0, 10.0, 20.0, 30.0];
    let shape = GridShape::new(2, 2).unwrap();
    let image =
        builder(BandCount::Eight, Orientation::FlipVertical).build(&field, shape, analyze(&field));

    // Grid row 0 lands on the bottom raster row
    assert_eq!(image.pixel(0, 1), Some(Color::new(0, 0, 128, 254)));
    assert_eq!(image.pixel(1, 1), Some(Color::new(0, 212, 255, 254)));
    assert_eq!(image.pixel(0, 0), Some(Color::new(255, 212, 0, 254)));
    assert_eq!(image.pixel(1, 0), Some(Color::new(128, 0, 0, 254)));
}

// ============================================================================
// Orientation
// ============================================================================

#[test]
fn test_flip_reverses_rows() {
    let (w, h) = (4, 6);
    let field = create_row_index_grid(w, h);
    let shape = GridShape::new(w, h).unwrap();
    let range = analyze(&field);

    let identity = builder(BandCount::Twelve, Orientation::Identity).build(&field, shape, range);
    let flipped = builder(BandCount::Twelve, Orientation::FlipVertical).build(&field, shape, range);

    for y in 0..h {
        for x in 0..w {
            assert_eq!(identity.pixel(x, y), flipped.pixel(x, h - 1 - y));
        }
    }
    // First grid row is dark blue, last is dark red; flipped puts dark red on top
    assert_eq!(flipped.pixel(0, 0), Some(Color::new(128, 0, 0, 254)));
    assert_eq!(flipped.pixel(0, h - 1), Some(Color::new(0, 0, 128, 254)));
}

// ============================================================================
// Grid validation
// ============================================================================

#[test]
fn test_build_from_grid_rejects_unsupported() {
    let field = vec![0.0; 16];
    let grid = GridDefinition::PolarStereographic { nx: 4, ny: 4 };
    let err = RasterBuilder::default()
        .build_from_grid(&field, &grid, analyze(&field))
        .unwrap_err();
    assert!(matches!(err, GridError::UnsupportedGridType { template: 20, .. }));
}

#[test]
fn test_build_from_grid_lat_lon() {
    let field = create_temperature_grid(8, 4);
    let grid = GridDefinition::lat_lon(8, 4);
    let image = RasterBuilder::default()
        .build_from_grid(&field, &grid, analyze(&field))
        .unwrap();
    assert_eq!((image.width(), image.height()), (8, 4));
    assert!(!image.is_blank());
}
