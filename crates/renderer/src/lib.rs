//! Scalar-field rendering.
//!
//! - [`range`]: min/max detection
//! - [`colormap`]: banded value-to-colour mapping
//! - [`raster`]: grid-to-pixel raster construction
//! - [`png`]: lossless PNG encoding of the result

pub mod colormap;
pub mod png;
pub mod range;
pub mod raster;

pub use colormap::{BandCount, Color, ColorMapper, Rgb};
pub use png::{PngError, PngMode};
pub use range::{analyze, ValueRange};
pub use raster::{Orientation, RasterBuilder, RasterFill, RasterImage, PIXEL_ALPHA};
