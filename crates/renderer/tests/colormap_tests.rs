//! Tests for the banded colour map.

use renderer::colormap::{map_value, BandCount, ColorMapper, Rgb, DEGENERATE_COLOR};

fn channel_gap(a: Rgb, b: Rgb) -> u8 {
    a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
}

// ============================================================================
// Boundary colours
// ============================================================================

#[test]
fn test_min_maps_to_start_color() {
    for bands in [BandCount::Eight, BandCount::Twelve] {
        let mapper = ColorMapper::new(bands);
        assert_eq!(mapper.map(-40.0, -40.0, 60.0), Rgb::new(0, 0, 128));
        assert_eq!(mapper.map(-40.0, -40.0, 60.0), mapper.start_color());
    }
}

#[test]
fn test_max_maps_to_end_color() {
    for bands in [BandCount::Eight, BandCount::Twelve] {
        let mapper = ColorMapper::new(bands);
        assert_eq!(mapper.map(60.0, -40.0, 60.0), Rgb::new(128, 0, 0));
        assert_eq!(mapper.map(60.0, -40.0, 60.0), mapper.end_color());
    }
}

#[test]
fn test_max_on_awkward_range_hits_end_color() {
    // 233.15..313.15 K does not divide evenly in binary
    let mapper = ColorMapper::new(BandCount::Twelve);
    assert_eq!(mapper.map(313.15, 233.15, 313.15), mapper.end_color());
    let mapper = ColorMapper::new(BandCount::Eight);
    assert_eq!(mapper.map(313.15, 233.15, 313.15), mapper.end_color());
}

// ============================================================================
// Reference values
// ============================================================================

#[test]
fn test_eight_band_reference_values() {
    // part = 3.75
    assert_eq!(map_value(0.0, 0.0, 30.0, BandCount::Eight), Rgb::new(0, 0, 128));
    assert_eq!(map_value(3.75, 0.0, 30.0, BandCount::Eight), Rgb::new(0, 0, 255));
    assert_eq!(map_value(10.0, 0.0, 30.0, BandCount::Eight), Rgb::new(0, 212, 255));
    assert_eq!(map_value(15.0, 0.0, 30.0, BandCount::Eight), Rgb::new(128, 255, 128));
    assert_eq!(map_value(20.0, 0.0, 30.0, BandCount::Eight), Rgb::new(255, 212, 0));
    assert_eq!(map_value(30.0, 0.0, 30.0, BandCount::Eight), Rgb::new(128, 0, 0));
}

#[test]
fn test_twelve_band_reference_values() {
    // part = 1.0
    let m = ColorMapper::new(BandCount::Twelve);
    assert_eq!(m.map(0.0, 0.0, 12.0), Rgb::new(0, 0, 128));
    assert_eq!(m.map(3.5, 0.0, 12.0), Rgb::new(0, 0, 128));
    // EaseIn at f=0.5 -> 0.25 of the way from 128 to 255
    assert_eq!(m.map(4.5, 0.0, 12.0), Rgb::new(0, 0, 159));
    assert_eq!(m.map(5.0, 0.0, 12.0), Rgb::new(0, 0, 255));
    // EaseOut at f=0.5 -> 0.75 of the way from 0 to 128
    assert_eq!(m.map(5.5, 0.0, 12.0), Rgb::new(0, 96, 255));
    assert_eq!(m.map(7.0, 0.0, 12.0), Rgb::new(0, 255, 255));
    assert_eq!(m.map(9.0, 0.0, 12.0), Rgb::new(255, 255, 0));
    assert_eq!(m.map(11.5, 0.0, 12.0), Rgb::new(159, 0, 0));
    assert_eq!(m.map(12.0, 0.0, 12.0), Rgb::new(128, 0, 0));
}

// ============================================================================
// Range and continuity properties
// ============================================================================

#[test]
fn test_in_range_values_are_never_unset() {
    for bands in [BandCount::Eight, BandCount::Twelve] {
        let mapper = ColorMapper::new(bands);
        let (min, max) = (-17.3_f32, 842.9_f32);
        for i in 0..=2000 {
            let v = min + (max - min) * (i as f32 / 2000.0);
            let v = v.min(max);
            let c = mapper.map(v, min, max);
            assert_ne!(c, Rgb::BLACK, "{} bands, value {}", bands, v);
        }
    }
}

#[test]
fn test_channels_continuous_across_band_edges() {
    for bands in [BandCount::Eight, BandCount::Twelve] {
        let mapper = ColorMapper::new(bands);
        let n = bands.count();
        let (min, max) = (0.0_f32, 100.0 * n as f32);
        for k in 1..n {
            let edge = 100.0 * k as f32;
            let below = mapper.map(edge - 0.01, min, max);
            let above = mapper.map(edge + 0.01, min, max);
            assert!(
                channel_gap(below, above) <= 2,
                "{} bands, edge {}: {:?} vs {:?}",
                bands,
                k,
                below,
                above
            );
        }
    }
}

#[test]
fn test_degenerate_range_returns_constant() {
    for bands in [BandCount::Eight, BandCount::Twelve] {
        let mapper = ColorMapper::new(bands);
        for v in [-1.0e6, -3.0, 0.0, 7.0, 7.5, 1.0e9] {
            assert_eq!(mapper.map(v, 7.0, 7.0), DEGENERATE_COLOR);
        }
    }
}

#[test]
fn test_inverted_range_is_unset() {
    for bands in [BandCount::Eight, BandCount::Twelve] {
        let mapper = ColorMapper::new(bands);
        assert_eq!(mapper.map(1.0, 999_999.0, -9_999_999.0), Rgb::BLACK);
        assert_eq!(mapper.map(f32::NAN, 999_999.0, -9_999_999.0), Rgb::BLACK);
        assert_eq!(mapper.map(0.0, 5.0, 1.0), Rgb::BLACK);
    }
}

#[test]
fn test_value_past_max_is_unset() {
    let mapper = ColorMapper::new(BandCount::Eight);
    assert_eq!(mapper.map(30.5, 0.0, 30.0), Rgb::BLACK);
    assert_eq!(mapper.map(f32::NAN, 0.0, 30.0), Rgb::BLACK);
}

#[test]
fn test_value_below_min_uses_start_color() {
    let mapper = ColorMapper::new(BandCount::Twelve);
    assert_eq!(mapper.map(-50.0, 0.0, 30.0), mapper.start_color());
}
