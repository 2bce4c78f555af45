//! Belt Profile Infographics
//!
//! Buckets defect positions into a discretised top-down view of the belt
//! surface. The grid always has [`ROWS`] rows across the belt width; the
//! column count along the belt length is the user's zoom level.
//!
//! - `grid`: cell model and the pure [`compute_grid`] transform
//! - `labels`: axis label density and values
//! - `summary`: tooltip content for a cell
//! - `view`: gated recomputation for a hosting UI

mod grid;
mod labels;
mod summary;
mod view;

pub use grid::{compute_grid, BeltGrid, Cell};
pub use labels::{x_label_stride, AxisLabels, AXIS_CAPTION, Y_LABEL_STRIDE};
pub use summary::CellSummary;
pub use view::InfographicsView;

use crate::model::ConveyorParameters;
use crate::{BeltwatchError, Result};

/// Fixed number of rows across the belt width
pub const ROWS: usize = 10;

/// Column counts selectable by the zoom control
pub const ZOOM_LEVELS: [u32; 14] = [
    10, 20, 30, 40, 50, 100, 150, 200, 250, 300, 350, 400, 450, 500,
];

pub const DEFAULT_ZOOM: u32 = 50;

const MM_PER_KM: f64 = 1_000_000.0;
const MM_PER_M: f64 = 1_000.0;

/// Column count along the belt, restricted to [`ZOOM_LEVELS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoomLevel(u32);

impl ZoomLevel {
    pub fn cols(&self) -> usize {
        self.0 as usize
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Snap an arbitrary slider position to the closest selectable level.
    /// Ties resolve towards the coarser level.
    pub fn snap(value: u32) -> Self {
        let nearest = ZOOM_LEVELS
            .iter()
            .copied()
            .min_by_key(|level| level.abs_diff(value))
            .unwrap_or(DEFAULT_ZOOM);
        Self(nearest)
    }

    pub fn all() -> impl Iterator<Item = ZoomLevel> {
        ZOOM_LEVELS.iter().map(|&v| ZoomLevel(v))
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}

impl TryFrom<u32> for ZoomLevel {
    type Error = BeltwatchError;

    fn try_from(value: u32) -> Result<Self> {
        if ZOOM_LEVELS.contains(&value) {
            Ok(Self(value))
        } else {
            Err(BeltwatchError::InvalidZoom(value))
        }
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Belt size in display units: length in kilometres, width in metres.
///
/// Thickness is kept in millimetres and only gates readiness; it plays no
/// part in the cell geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BeltDimensions {
    pub length_km: f64,
    pub width_m: f64,
    pub thickness_mm: f64,
}

impl BeltDimensions {
    pub fn new(length_km: f64, width_m: f64, thickness_mm: f64) -> Self {
        Self {
            length_km,
            width_m,
            thickness_mm,
        }
    }

    /// Convert server parameters (millimetres) into display units
    pub fn from_parameters(params: &ConveyorParameters) -> Self {
        Self {
            length_km: params.belt_length as f64 / MM_PER_KM,
            width_m: params.belt_width as f64 / MM_PER_M,
            thickness_mm: params.belt_thickness as f64,
        }
    }

    /// True once every dimension is a strictly positive, finite number.
    /// Default (zeroed) dimensions mean the parameters have not loaded yet.
    pub fn is_ready(&self) -> bool {
        [self.length_km, self.width_m, self.thickness_mm]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}
