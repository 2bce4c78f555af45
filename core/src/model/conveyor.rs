use serde::{Deserialize, Serialize};

use super::Criticality;

/// Physical belt parameters, all in millimetres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConveyorParameters {
    pub belt_length: i64,
    pub belt_width: i64,
    pub belt_thickness: i64,
}

/// Request body for `PUT /conveyor_info/change_parameters`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewConveyorParameters {
    pub new_belt_length: i64,
    pub new_belt_width: i64,
    pub new_belt_thickness: i64,
}

impl From<ConveyorParameters> for NewConveyorParameters {
    fn from(p: ConveyorParameters) -> Self {
        Self {
            new_belt_length: p.belt_length,
            new_belt_width: p.belt_width,
            new_belt_thickness: p.belt_thickness,
        }
    }
}

/// Latest general status of the conveyor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConveyorStatus {
    pub status: Criticality,
}
