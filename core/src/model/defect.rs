use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Severity class assigned to a defect (and to the conveyor as a whole).
///
/// Ordered by severity, so `max` picks the worst of a group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    #[default]
    Normal,
    Extreme,
    Critical,
}

impl Criticality {
    /// Critical wins over extreme; neither flag means normal.
    pub fn from_flags(is_extreme: bool, is_critical: bool) -> Self {
        if is_critical {
            Criticality::Critical
        } else if is_extreme {
            Criticality::Extreme
        } else {
            Criticality::Normal
        }
    }

    /// `(is_extreme, is_critical)` as the server's set_criticality query expects
    pub fn flags(&self) -> (bool, bool) {
        match self {
            Criticality::Normal => (false, false),
            Criticality::Extreme => (true, false),
            Criticality::Critical => (false, true),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Criticality::Normal => "normal",
            Criticality::Extreme => "extreme",
            Criticality::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected anomaly on the belt surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Defect {
    pub id: i64,
    #[serde(with = "super::timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "type")]
    pub defect_type: String,
    pub is_on_belt: bool,
    pub box_width_in_mm: i64,
    pub box_length_in_mm: i64,
    /// Millimetres along the belt from the origin
    pub longitudinal_position: i64,
    /// Millimetres across the belt from the origin
    pub transverse_position: i64,
    pub probability: i64,
    pub criticality: Criticality,
    #[serde(default)]
    pub base64_photo: String,
}

/// Defect totals per criticality group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefectCount {
    pub total: u64,
    pub extreme: u64,
    pub critical: u64,
}

impl DefectCount {
    pub fn normal(&self) -> u64 {
        self.total.saturating_sub(self.extreme + self.critical)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefectTypes {
    pub count: u64,
    pub types: Vec<String>,
}

/// Operator-facing timestamp, `dd.mm.yyyy - HH:MM:SS`
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%d.%m.%Y - %H:%M:%S").to_string()
}
