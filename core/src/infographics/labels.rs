use super::{BeltGrid, ZoomLevel};

/// Rows between Y axis labels, independent of zoom
pub const Y_LABEL_STRIDE: usize = 2;

/// Caption for the corner cell where the two axes meet
pub const AXIS_CAPTION: &str = "Y(m) / X(km)";

/// Columns between X axis labels. Denser grids get sparser labels so the
/// values never overlap.
pub fn x_label_stride(zoom: ZoomLevel) -> usize {
    match zoom.cols() {
        10 | 20 => 1,
        30 | 40 => 2,
        _ => 3,
    }
}

/// Axis label text per column and per row; `None` where no label is drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabels {
    pub x: Vec<Option<String>>,
    pub y: Vec<Option<String>>,
}

impl AxisLabels {
    /// Labels for `grid` at the default strides for its zoom level
    pub fn for_grid(grid: &BeltGrid) -> Self {
        Self::with_strides(grid, x_label_stride(grid.zoom()), Y_LABEL_STRIDE)
    }

    pub fn with_strides(grid: &BeltGrid, x_stride: usize, y_stride: usize) -> Self {
        Self {
            x: axis(grid.cols(), grid.area_width(), x_stride),
            y: axis(grid.rows(), grid.area_height(), y_stride),
        }
    }
}

fn axis(len: usize, area: f64, stride: usize) -> Vec<Option<String>> {
    let stride = stride.max(1);
    (0..len)
        .map(|i| (i % stride == 0).then(|| format!("{:.2}", i as f64 * area)))
        .collect()
}
