//! Banded "jet" colour map for scalar fields.
//!
//! The value range `[min, max]` is split into N equal-width bands. Each band
//! ramps between two anchor colours with a closed-form curve, and band `k`
//! ends on the anchor band `k + 1` starts from, so every channel is
//! continuous across band boundaries. The sweep runs
//! dark blue → blue → cyan → green → yellow → red → dark red.
//!
//! Two band layouts exist and are selected with [`BandCount`]:
//! - **Twelve**: quadratic ramps, the lower third of the range held at dark blue.
//! - **Eight**: linear ramps across the whole range.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Unset colour, returned for values past the top of the range.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel.
    pub fn with_alpha(self, a: u8) -> Color {
        Color::new(self.r, self.g, self.b, a)
    }
}

/// Colour value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Shape of the ramp inside one band, as a function of the band fraction `f`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ramp {
    /// Hold the start colour.
    Flat,
    /// `f`
    Linear,
    /// `f²`, slow start
    EaseIn,
    /// `1 - (1 - f)²`, slow finish
    EaseOut,
}

impl Ramp {
    fn apply(self, f: f32) -> f32 {
        match self {
            Ramp::Flat => 0.0,
            Ramp::Linear => f,
            Ramp::EaseIn => f * f,
            Ramp::EaseOut => 1.0 - (1.0 - f) * (1.0 - f),
        }
    }
}

/// One colour band: a ramp from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub start: Rgb,
    pub end: Rgb,
    pub ramp: Ramp,
}

impl Band {
    const fn new(start: Rgb, end: Rgb, ramp: Ramp) -> Self {
        Self { start, end, ramp }
    }

    /// Colour at fraction `f` (0 = band start, 1 = band end).
    pub fn color_at(&self, f: f32) -> Rgb {
        let s = self.ramp.apply(f);
        Rgb::new(
            lerp_channel(self.start.r, self.end.r, s),
            lerp_channel(self.start.g, self.end.g, s),
            lerp_channel(self.start.b, self.end.b, s),
        )
    }
}

/// Truncating channel interpolation; `as` saturates to `0..=255`.
fn lerp_channel(a: u8, b: u8, s: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * s) as u8
}

const DARK_BLUE: Rgb = Rgb::new(0, 0, 128);
const BLUE: Rgb = Rgb::new(0, 0, 255);
const AZURE: Rgb = Rgb::new(0, 128, 255);
const CYAN: Rgb = Rgb::new(0, 255, 255);
const GREEN: Rgb = Rgb::new(128, 255, 128);
const YELLOW: Rgb = Rgb::new(255, 255, 0);
const ORANGE: Rgb = Rgb::new(255, 128, 0);
const RED: Rgb = Rgb::new(255, 0, 0);
const DARK_RED: Rgb = Rgb::new(128, 0, 0);

const EIGHT_BANDS: [Band; 8] = [
    Band::new(DARK_BLUE, BLUE, Ramp::Linear),
    Band::new(BLUE, AZURE, Ramp::Linear),
    Band::new(AZURE, CYAN, Ramp::Linear),
    Band::new(CYAN, GREEN, Ramp::Linear),
    Band::new(GREEN, YELLOW, Ramp::Linear),
    Band::new(YELLOW, ORANGE, Ramp::Linear),
    Band::new(ORANGE, RED, Ramp::Linear),
    Band::new(RED, DARK_RED, Ramp::Linear),
];

const TWELVE_BANDS: [Band; 12] = [
    Band::new(DARK_BLUE, DARK_BLUE, Ramp::Flat),
    Band::new(DARK_BLUE, DARK_BLUE, Ramp::Flat),
    Band::new(DARK_BLUE, DARK_BLUE, Ramp::Flat),
    Band::new(DARK_BLUE, DARK_BLUE, Ramp::Flat),
    Band::new(DARK_BLUE, BLUE, Ramp::EaseIn),
    Band::new(BLUE, AZURE, Ramp::EaseOut),
    Band::new(AZURE, CYAN, Ramp::EaseIn),
    Band::new(CYAN, GREEN, Ramp::EaseOut),
    Band::new(GREEN, YELLOW, Ramp::EaseIn),
    Band::new(YELLOW, ORANGE, Ramp::EaseOut),
    Band::new(ORANGE, RED, Ramp::EaseIn),
    Band::new(RED, DARK_RED, Ramp::EaseOut),
];

/// Colour returned for every value of a flat (zero-span) field.
pub const DEGENERATE_COLOR: Rgb = DARK_BLUE;

// Absorb float noise at band edges so boundary samples truncate to the anchor.
const EDGE_EPSILON: f32 = 1e-4;

/// Number of colour bands the value range is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BandCount {
    Eight,
    #[default]
    Twelve,
}

impl BandCount {
    /// Number of bands, N.
    pub fn count(self) -> usize {
        self.bands().len()
    }

    /// The band table for this layout.
    pub fn bands(self) -> &'static [Band] {
        match self {
            BandCount::Eight => &EIGHT_BANDS,
            BandCount::Twelve => &TWELVE_BANDS,
        }
    }
}

impl TryFrom<u8> for BandCount {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            8 => Ok(BandCount::Eight),
            12 => Ok(BandCount::Twelve),
            other => Err(format!("unsupported band count {}, expected 8 or 12", other)),
        }
    }
}

impl From<BandCount> for u8 {
    fn from(bands: BandCount) -> u8 {
        bands.count() as u8
    }
}

impl FromStr for BandCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("invalid band count '{}'", s))?;
        BandCount::try_from(n)
    }
}

impl fmt::Display for BandCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Maps a value within `[min, max]` onto the banded colour scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorMapper {
    bands: BandCount,
}

impl ColorMapper {
    pub fn new(bands: BandCount) -> Self {
        Self { bands }
    }

    pub fn band_count(&self) -> BandCount {
        self.bands
    }

    /// Colour at the very bottom of the scale.
    pub fn start_color(&self) -> Rgb {
        self.bands.bands()[0].start
    }

    /// Colour at the very top of the scale.
    pub fn end_color(&self) -> Rgb {
        self.bands.bands()[self.bands.count() - 1].end
    }

    /// Index of the band containing `value`, or `None` when the value lies
    /// above `max`, is NaN, or the range has no positive span.
    ///
    /// Bands are half-open `[k*part, (k+1)*part)` except the last, which is
    /// closed at `max`. Values below `min` fall in band 0.
    pub fn band_index(&self, value: f32, min: f32, max: f32) -> Option<usize> {
        let span = max - min;
        let offset = value - min;
        if !span.is_finite() || span <= 0.0 || offset.is_nan() || offset > span {
            return None;
        }
        if offset <= 0.0 {
            return Some(0);
        }
        let n = self.bands.count();
        let part = span / n as f32;
        Some(((offset / part) as usize).min(n - 1))
    }

    /// Map `value` to a colour.
    ///
    /// - zero span (flat field): [`DEGENERATE_COLOR`] for every value
    /// - inverted or non-finite range (no comparable samples): [`Rgb::BLACK`]
    /// - below `min`: the start colour
    /// - above `max` or NaN: [`Rgb::BLACK`]
    pub fn map(&self, value: f32, min: f32, max: f32) -> Rgb {
        let span = max - min;
        if span == 0.0 {
            return DEGENERATE_COLOR;
        }

        let Some(k) = self.band_index(value, min, max) else {
            return Rgb::BLACK;
        };

        let offset = value - min;
        if offset <= 0.0 {
            return self.start_color();
        }

        let part = span / self.bands.count() as f32;
        let mut f = ((offset - k as f32 * part) / part).clamp(0.0, 1.0);
        if f < EDGE_EPSILON {
            f = 0.0;
        } else if 1.0 - f < EDGE_EPSILON {
            f = 1.0;
        }

        self.bands.bands()[k].color_at(f)
    }
}

/// Map a single value with the given band layout.
pub fn map_value(value: f32, min: f32, max: f32, bands: BandCount) -> Rgb {
    ColorMapper::new(bands).map(value, min, max)
}
