//! Grid definitions for decoded fields.
//!
//! Upstream decoders report the grid-definition template a message was
//! encoded with (GRIB2 Code Table 3.1). Only the regular lat/lon template
//! maps directly onto a rectangular row-major raster; every other template
//! is rejected before any pixel work starts.

use crate::{GridError, GridResult};
use serde::{Deserialize, Serialize};

/// Grid definition carried by a decoded field, one variant per template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GridDefinition {
    /// Template 3.0: regular latitude/longitude (equidistant cylindrical).
    LatLon {
        /// Number of points along a parallel
        ni: u32,
        /// Number of points along a meridian
        nj: u32,
    },
    /// Template 3.1: rotated latitude/longitude.
    RotatedLatLon { ni: u32, nj: u32 },
    /// Template 3.10: Mercator.
    Mercator { ni: u32, nj: u32 },
    /// Template 3.20: polar stereographic.
    PolarStereographic { nx: u32, ny: u32 },
    /// Template 3.30: Lambert conformal.
    LambertConformal { nx: u32, ny: u32 },
    /// Template 3.40: Gaussian latitude/longitude.
    Gaussian { ni: u32, nj: u32 },
    /// Any other template number.
    Other { template: u16 },
}

impl GridDefinition {
    /// Regular lat/lon grid of `width` x `height` points.
    pub fn lat_lon(width: u32, height: u32) -> Self {
        GridDefinition::LatLon {
            ni: width,
            nj: height,
        }
    }

    /// GRIB2 grid-definition template number (Table 3.1).
    pub fn template_number(&self) -> u16 {
        match self {
            GridDefinition::LatLon { .. } => 0,
            GridDefinition::RotatedLatLon { .. } => 1,
            GridDefinition::Mercator { .. } => 10,
            GridDefinition::PolarStereographic { .. } => 20,
            GridDefinition::LambertConformal { .. } => 30,
            GridDefinition::Gaussian { .. } => 40,
            GridDefinition::Other { template } => *template,
        }
    }

    /// Short human-readable name of the template.
    pub fn name(&self) -> &'static str {
        match self {
            GridDefinition::LatLon { .. } => "latitude/longitude",
            GridDefinition::RotatedLatLon { .. } => "rotated latitude/longitude",
            GridDefinition::Mercator { .. } => "mercator",
            GridDefinition::PolarStereographic { .. } => "polar stereographic",
            GridDefinition::LambertConformal { .. } => "lambert conformal",
            GridDefinition::Gaussian { .. } => "gaussian latitude/longitude",
            GridDefinition::Other { .. } => "unknown",
        }
    }

    /// Whether this grid can be rendered as a rectangular raster.
    pub fn is_supported(&self) -> bool {
        matches!(self, GridDefinition::LatLon { .. })
    }

    /// Resolve the rectangular raster shape of this grid.
    ///
    /// Fails with [`GridError::UnsupportedGridType`] for every template other
    /// than 3.0, and with [`GridError::InvalidGrid`] when a lat/lon grid
    /// reports a zero dimension.
    pub fn shape(&self) -> GridResult<GridShape> {
        match *self {
            GridDefinition::LatLon { ni, nj } => GridShape::new(ni as usize, nj as usize),
            GridDefinition::RotatedLatLon { .. }
            | GridDefinition::Mercator { .. }
            | GridDefinition::PolarStereographic { .. }
            | GridDefinition::LambertConformal { .. }
            | GridDefinition::Gaussian { .. }
            | GridDefinition::Other { .. } => Err(GridError::UnsupportedGridType {
                template: self.template_number(),
                name: self.name(),
            }),
        }
    }
}

/// Rectangular layout of a row-major field. Both dimensions are positive;
/// the only constructor is [`GridShape::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    width: usize,
    height: usize,
}

impl GridShape {
    /// Create a shape, rejecting zero dimensions.
    pub fn new(width: usize, height: usize) -> GridResult<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells, `width * height`.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false for a validated shape.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Flat row-major index of column `x`, row `y`.
    pub fn flat_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}
