use super::Cell;
use crate::model::Criticality;

/// Hover content for a grid cell.
///
/// A cell holding one defect describes it; a cell holding several shows the
/// "many defects" indicator with their ids instead of a single-defect marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellSummary {
    Single {
        id: i64,
        defect_type: String,
        /// Longitudinal position in whole metres
        position_m: i64,
        /// Transverse position in whole centimetres
        position_cm: i64,
        box_length_in_mm: i64,
        box_width_in_mm: i64,
        criticality: Criticality,
    },
    Many {
        ids: Vec<i64>,
    },
}

impl CellSummary {
    pub fn of(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Empty => None,
            Cell::Single(d) => Some(CellSummary::Single {
                id: d.id,
                defect_type: d.defect_type.clone(),
                position_m: d.longitudinal_position.div_euclid(1000),
                position_cm: d.transverse_position.div_euclid(10),
                box_length_in_mm: d.box_length_in_mm,
                box_width_in_mm: d.box_width_in_mm,
                criticality: d.criticality,
            }),
            Cell::Many(all) => Some(CellSummary::Many {
                ids: all.iter().map(|d| d.id).collect(),
            }),
        }
    }

    pub fn is_many(&self) -> bool {
        matches!(self, CellSummary::Many { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            CellSummary::Single { .. } => "Defect Info",
            CellSummary::Many { .. } => "Many Defects In Area!",
        }
    }

    /// Body lines under the title
    pub fn lines(&self) -> Vec<String> {
        match self {
            CellSummary::Single {
                id,
                defect_type,
                position_m,
                position_cm,
                box_length_in_mm,
                box_width_in_mm,
                criticality,
            } => vec![
                format!("ID: {id}"),
                format!("Type: {defect_type}"),
                format!("Pos (m, cm): X={position_m}, Y={position_cm}"),
                format!("Size (mm): {box_length_in_mm} x {box_width_in_mm}"),
                format!("Criticality: {criticality}"),
            ],
            CellSummary::Many { ids } => {
                let ids: Vec<String> = ids.iter().map(i64::to_string).collect();
                vec![
                    format!("Count: {}", ids.len()),
                    format!("IDs: {}", ids.join(" ")),
                ]
            }
        }
    }
}

impl std::fmt::Display for CellSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())?;
        for line in self.lines() {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}
