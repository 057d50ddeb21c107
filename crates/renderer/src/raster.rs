//! Grid-to-raster construction.
//!
//! Walks a row-major field once, colours each cell with a [`ColorMapper`] and
//! writes it into an RGBA buffer. The row written for grid row `y` is decided
//! by an explicit [`Orientation`].

use crate::colormap::{Color, ColorMapper};
use crate::range::ValueRange;
use grid_common::{GridDefinition, GridResult, GridShape};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Alpha written for every coloured pixel.
pub const PIXEL_ALPHA: u8 = 254;

/// Mapping from grid row to raster row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Grid row `y` lands on raster row `height - 1 - y`.
    #[default]
    #[serde(alias = "flip", alias = "flipped")]
    FlipVertical,
    /// Grid row `y` lands on raster row `y`.
    #[serde(alias = "none")]
    Identity,
}

impl Orientation {
    /// Raster row for grid row `y` of a `height`-row grid.
    pub fn output_row(self, y: usize, height: usize) -> usize {
        match self {
            Orientation::FlipVertical => height - 1 - y,
            Orientation::Identity => y,
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flip" | "flip_vertical" | "flipped" => Ok(Orientation::FlipVertical),
            "identity" | "none" => Ok(Orientation::Identity),
            other => Err(format!(
                "invalid orientation '{}', expected 'flip' or 'identity'",
                other
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::FlipVertical => write!(f, "flip"),
            Orientation::Identity => write!(f, "identity"),
        }
    }
}

/// How a raster was filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RasterFill {
    /// Every pixel was coloured from the field.
    Complete,
    /// The field length did not match the grid; every pixel is left at
    /// transparent black.
    Blank { expected: usize, actual: usize },
}

/// RGBA raster, 4 bytes per pixel, row-major with row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    fill: RasterFill,
}

impl RasterImage {
    /// Transparent black raster.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            fill: RasterFill::Complete,
        }
    }

    /// Wrap existing RGBA bytes. Returns `None` if the length is not
    /// `width * height * 4`.
    pub fn from_rgba(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            fill: RasterFill::Complete,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fill(&self) -> RasterFill {
        self.fill
    }

    /// True when the raster was left blank because of a length mismatch.
    pub fn is_blank(&self) -> bool {
        matches!(self.fill, RasterFill::Blank { .. })
    }

    /// RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let i = (y * self.width + x) * 4;
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
        self.pixels[i + 3] = color.a;
    }
}

/// Builds rasters from scalar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterBuilder {
    mapper: ColorMapper,
    orientation: Orientation,
}

impl RasterBuilder {
    pub fn new(mapper: ColorMapper, orientation: Orientation) -> Self {
        Self {
            mapper,
            orientation,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Render `field` into a `shape.width() x shape.height()` raster.
    ///
    /// If `field.len()` is not `width * height` the raster is still allocated
    /// at full size but every pixel stays transparent black, and the result
    /// is marked [`RasterFill::Blank`].
    pub fn build(&self, field: &[f32], shape: GridShape, range: ValueRange) -> RasterImage {
        let (width, height) = (shape.width(), shape.height());
        let mut image = RasterImage::blank(width, height);

        let expected = shape.len();
        if field.len() != expected {
            warn!(
                expected,
                actual = field.len(),
                width,
                height,
                "Field length does not match grid, leaving raster blank"
            );
            image.fill = RasterFill::Blank {
                expected,
                actual: field.len(),
            };
            return image;
        }

        if range.is_degenerate() {
            debug!(value = range.min, "Flat field, rendering a single colour");
        } else if range.is_empty() {
            debug!("No comparable samples, rendering unset colour");
        }

        for y in 0..height {
            let out_y = self.orientation.output_row(y, height);
            let row = &field[y * width..(y + 1) * width];
            for (x, &value) in row.iter().enumerate() {
                let rgb = self.mapper.map(value, range.min, range.max);
                image.set_pixel(x, out_y, rgb.with_alpha(PIXEL_ALPHA));
            }
        }

        image
    }

    /// Validate `grid` and render. Unsupported grid templates fail before
    /// any pixel buffer is allocated.
    pub fn build_from_grid(
        &self,
        field: &[f32],
        grid: &GridDefinition,
        range: ValueRange,
    ) -> GridResult<RasterImage> {
        let shape = grid.shape()?;
        Ok(self.build(field, shape, range))
    }
}
