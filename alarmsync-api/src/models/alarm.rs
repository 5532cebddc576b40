use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use super::Id;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alarm {
    /// Alarm identifier, unique within a device
    #[serde(rename = "idAlarm")]
    pub id_alarm: Id,
    /// Human-readable label
    pub texto: String,
    /// Whether the alarm is visible and actionable for the device
    pub habilitado: bool,
    /// Armed state as last reported by the backend
    pub armado: bool,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmState {
    Disarmed,
    Armed,
}

impl ArmState {
    /// Numeric status carried by the arm command.
    pub fn code(self) -> u8 {
        match self {
            ArmState::Disarmed => 0,
            ArmState::Armed => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ArmState::Disarmed),
            1 => Some(ArmState::Armed),
            _ => None,
        }
    }

    pub fn is_armed(self) -> bool {
        self == ArmState::Armed
    }
}

impl From<bool> for ArmState {
    fn from(armed: bool) -> Self {
        if armed {
            ArmState::Armed
        } else {
            ArmState::Disarmed
        }
    }
}

impl Display for ArmState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ArmState::Armed => write!(f, "Armada"),
            ArmState::Disarmed => write!(f, "Desarmada"),
        }
    }
}

#[cfg_attr(feature = "docs", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "docs", into_params(parameter_in = Query))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmStatusQuery {
    /// Device identifier
    pub mac: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "docs", into_params(parameter_in = Query))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmQuery {
    /// Device identifier
    pub mac: String,
    /// Target alarm identifier
    pub alarm: Id,
    /// 1 to arm, 0 to disarm
    pub status: u8,
}
