use tracing::debug;

use super::{BeltDimensions, ZoomLevel, MM_PER_KM, MM_PER_M, ROWS};
use crate::model::{Criticality, Defect};

/// Content of one grid bucket
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Single(Defect),
    /// Two or more defects, in the order they were placed
    Many(Vec<Defect>),
}

impl Cell {
    /// Add a defect, promoting Empty -> Single -> Many
    pub fn push(&mut self, defect: Defect) {
        *self = match std::mem::take(self) {
            Cell::Empty => Cell::Single(defect),
            Cell::Single(first) => Cell::Many(vec![first, defect]),
            Cell::Many(mut all) => {
                all.push(defect);
                Cell::Many(all)
            }
        };
    }

    pub fn defects(&self) -> &[Defect] {
        match self {
            Cell::Empty => &[],
            Cell::Single(defect) => std::slice::from_ref(defect),
            Cell::Many(all) => all.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.defects().len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Worst criticality among the defects in this cell
    pub fn peak_criticality(&self) -> Option<Criticality> {
        self.defects().iter().map(|d| d.criticality).max()
    }
}

/// Discretised belt surface. Row 0 is the transverse origin, column 0 the
/// longitudinal origin.
#[derive(Debug, Clone, PartialEq)]
pub struct BeltGrid {
    zoom: ZoomLevel,
    cells: Vec<Vec<Cell>>,
    area_width: f64,
    area_height: f64,
}

impl BeltGrid {
    /// All-empty grid with zero cell geometry, shown before any data arrives
    pub fn empty(zoom: ZoomLevel) -> Self {
        Self::blank(zoom, 0.0, 0.0)
    }

    fn blank(zoom: ZoomLevel, area_width: f64, area_height: f64) -> Self {
        Self {
            zoom,
            cells: vec![vec![Cell::Empty; zoom.cols()]; ROWS],
            area_width,
            area_height,
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.zoom.cols()
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    /// Belt length covered by one column, in kilometres
    pub fn area_width(&self) -> f64 {
        self.area_width
    }

    /// Belt width covered by one row, in metres
    pub fn area_height(&self) -> f64 {
        self.area_height
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Rows from the bottom (`0`) up
    pub fn row_slices(&self) -> impl DoubleEndedIterator<Item = (usize, &[Cell])> {
        self.cells.iter().enumerate().map(|(i, r)| (i, r.as_slice()))
    }

    /// Rows in display order: highest index first so row 0 sits next to the X axis
    pub fn rows_top_down(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.row_slices().rev()
    }

    /// `(row, col, cell)` for every non-empty cell
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(col, cell)| (row, col, cell))
        })
    }

    /// Total defects held across all cells
    pub fn placed_count(&self) -> usize {
        self.occupied().map(|(_, _, cell)| cell.len()).sum()
    }
}

/// Map a defect's millimetre position to `(row, col)`, or `None` when it
/// falls outside the grid.
fn locate(defect: &Defect, grid: &BeltGrid) -> Option<(usize, usize)> {
    let longitudinal_km = defect.longitudinal_position as f64 / MM_PER_KM;
    let transverse_m = defect.transverse_position as f64 / MM_PER_M;
    let x = (longitudinal_km / grid.area_width).floor();
    let y = (transverse_m / grid.area_height).floor();

    if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return None;
    }
    let (col, row) = (x as usize, y as usize);
    (row < grid.rows() && col < grid.cols()).then_some((row, col))
}

/// Build the belt grid for a defect list.
///
/// Pure and deterministic: the same inputs always yield the same grid.
/// Defects whose cell lies outside `[0, ROWS) x [0, cols)` are skipped.
/// Callers must only invoke this with ready dimensions (see
/// [`BeltDimensions::is_ready`]); [`super::InfographicsView`] enforces that.
pub fn compute_grid(defects: &[Defect], belt: BeltDimensions, zoom: ZoomLevel) -> BeltGrid {
    let area_width = belt.length_km / zoom.cols() as f64;
    let area_height = belt.width_m / ROWS as f64;
    let mut grid = BeltGrid::blank(zoom, area_width, area_height);

    for defect in defects {
        if let Some((row, col)) = locate(defect, &grid) {
            grid.cells[row][col].push(defect.clone());
        }
    }

    debug!(
        target: "infographics",
        cols = zoom.cols(),
        defects = defects.len(),
        area_width,
        area_height,
        "Belt grid computed"
    );
    grid
}
