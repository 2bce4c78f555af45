//! Plain-text rendering of the belt profile grid

use std::fmt::Write;

use beltwatch_core::infographics::AXIS_CAPTION;
use beltwatch_core::{AxisLabels, BeltGrid, Cell, CellSummary, Criticality};

/// Width reserved for the Y axis column
const Y_AXIS_WIDTH: usize = 7;

fn marker(cell: &Cell) -> char {
    match (cell, cell.peak_criticality()) {
        (Cell::Empty, _) => '.',
        (Cell::Many(_), Some(Criticality::Critical)) => '#',
        (Cell::Many(_), Some(Criticality::Extreme)) => '%',
        (Cell::Many(_), _) => '+',
        (_, Some(Criticality::Critical)) => 'C',
        (_, Some(Criticality::Extreme)) => 'E',
        _ => 'o',
    }
}

/// Draw the grid top row first, the way the belt reads on screen.
///
/// X labels are written on a separate line under the columns they belong to;
/// a label that would overrun the next one is dropped.
pub fn grid(grid: &BeltGrid, labels: &AxisLabels) -> String {
    let mut out = String::new();

    for (row, cells) in grid.rows_top_down() {
        let label = labels.y.get(row).cloned().flatten().unwrap_or_default();
        let _ = write!(out, "{label:>Y_AXIS_WIDTH$} |");
        out.extend(cells.iter().map(marker));
        out.push('\n');
    }

    let _ = writeln!(out, "{:>Y_AXIS_WIDTH$} +{}", "", "-".repeat(grid.cols()));

    let mut axis = vec![' '; grid.cols() + 8];
    let mut next_free = 0;
    for (col, label) in labels.x.iter().enumerate() {
        let Some(label) = label else { continue };
        if col < next_free {
            continue;
        }
        for (i, ch) in label.chars().enumerate() {
            if let Some(slot) = axis.get_mut(col + i) {
                *slot = ch;
            }
        }
        next_free = col + label.len() + 1;
    }
    let axis: String = axis.into_iter().collect();
    let _ = writeln!(out, "{:>Y_AXIS_WIDTH$}  {}", "", axis.trim_end());
    let _ = writeln!(out, "{AXIS_CAPTION}");
    out
}

/// Hover text for every occupied cell, in grid order
pub fn summaries(grid: &BeltGrid) -> String {
    let mut out = String::new();
    for (row, col, cell) in grid.occupied() {
        if let Some(summary) = CellSummary::of(cell) {
            let _ = writeln!(out, "[{row},{col}] {summary}");
        }
    }
    out
}

pub fn legend() -> &'static str {
    ". empty  o/E/C one defect (normal/extreme/critical)  +/%/# several defects"
}

#[cfg(test)]
mod tests {
    use super::*;
    use beltwatch_core::{compute_grid, BeltDimensions, Defect, ZoomLevel};

    fn defect(id: i64, long_mm: i64, trans_mm: i64, criticality: &str) -> Defect {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "timestamp": "2024-05-20T14:00:00",
            "type": "puncture",
            "is_on_belt": true,
            "box_width_in_mm": 35,
            "box_length_in_mm": 80,
            "longitudinal_position": long_mm,
            "transverse_position": trans_mm,
            "probability": 88,
            "criticality": criticality
        }))
        .unwrap()
    }

    #[test]
    fn bottom_row_is_drawn_last() {
        let belt = BeltDimensions::new(1.0, 1.0, 10.0);
        let zoom = ZoomLevel::try_from(10).unwrap();
        let g = compute_grid(
            &[
                defect(1, 0, 0, "critical"),
                defect(2, 950_000, 950, "normal"),
                defect(3, 960_000, 960, "extreme"),
            ],
            belt,
            zoom,
        );
        let text = grid(&g, &AxisLabels::for_grid(&g));
        let lines: Vec<&str> = text.lines().collect();

        // Top row 9 holds two defects, bottom row 0 a single critical one
        assert!(lines[0].ends_with(".........%"));
        assert!(lines[9].ends_with("C........."));
        assert!(lines[9].trim_start().starts_with("0.00"));
        assert_eq!(lines.last(), Some(&AXIS_CAPTION));
    }

    #[test]
    fn summaries_list_occupied_cells() {
        let belt = BeltDimensions::new(1.0, 1.0, 10.0);
        let g = compute_grid(
            &[defect(7, 0, 0, "normal")],
            belt,
            ZoomLevel::try_from(10).unwrap(),
        );
        let text = summaries(&g);
        assert!(text.starts_with("[0,0] Defect Info"));
        assert!(text.contains("ID: 7"));
        assert_eq!(text.lines().filter(|l| l.starts_with('[')).count(), 1);
    }
}
