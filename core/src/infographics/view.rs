use tracing::debug;

use super::{compute_grid, x_label_stride, AxisLabels, BeltDimensions, BeltGrid, ZoomLevel};
use crate::model::{ConveyorParameters, Defect};

/// Holds the current mapper inputs and the grid derived from them.
///
/// Every setter re-runs the mapper over the full input set. The mapper only
/// runs once the defect list is non-empty and the belt dimensions are ready;
/// until then the previously computed grid (initially all empty) stays on
/// display. A failed fetch never reaches the view, so it has the same effect.
#[derive(Debug, Clone)]
pub struct InfographicsView {
    defects: Vec<Defect>,
    dimensions: BeltDimensions,
    zoom: ZoomLevel,
    grid: BeltGrid,
}

impl Default for InfographicsView {
    fn default() -> Self {
        Self::new(ZoomLevel::default())
    }
}

impl InfographicsView {
    pub fn new(zoom: ZoomLevel) -> Self {
        Self {
            defects: Vec::new(),
            dimensions: BeltDimensions::default(),
            zoom,
            grid: BeltGrid::empty(zoom),
        }
    }

    /// Returns whether the grid was recomputed
    pub fn set_defects(&mut self, defects: Vec<Defect>) -> bool {
        self.defects = defects;
        self.refresh()
    }

    pub fn set_dimensions(&mut self, dimensions: BeltDimensions) -> bool {
        self.dimensions = dimensions;
        self.refresh()
    }

    pub fn set_parameters(&mut self, params: &ConveyorParameters) -> bool {
        self.set_dimensions(BeltDimensions::from_parameters(params))
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel) -> bool {
        self.zoom = zoom;
        self.refresh()
    }

    /// Both inputs present and usable
    pub fn is_ready(&self) -> bool {
        !self.defects.is_empty() && self.dimensions.is_ready()
    }

    /// Recompute the grid from the current inputs if they are ready
    pub fn refresh(&mut self) -> bool {
        if !self.is_ready() {
            debug!(
                target: "infographics",
                defects = self.defects.len(),
                dimensions_ready = self.dimensions.is_ready(),
                "Inputs not ready; keeping previous grid"
            );
            return false;
        }
        self.grid = compute_grid(&self.defects, self.dimensions, self.zoom);
        true
    }

    pub fn grid(&self) -> &BeltGrid {
        &self.grid
    }

    pub fn defects(&self) -> &[Defect] {
        &self.defects
    }

    pub fn dimensions(&self) -> BeltDimensions {
        self.dimensions
    }

    /// Requested zoom; may differ from `grid().zoom()` while inputs are not ready
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    /// Label stride for the grid currently on display
    pub fn x_label_stride(&self) -> usize {
        x_label_stride(self.grid.zoom())
    }

    pub fn labels(&self) -> AxisLabels {
        AxisLabels::for_grid(&self.grid)
    }
}
