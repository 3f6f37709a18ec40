use std::fmt;

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Priority of an emergency alert. Every alert raised is critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmergencyLevel {
    #[default]
    Critical,
}

impl EmergencyLevel {
    /// Label shown on the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            EmergencyLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for EmergencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmergencyLevel::Critical => f.write_str("Critical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emergency {
    pub id: EntityId,
    /// Wall-clock time of day the alert was raised, as displayed.
    pub time: String,
    #[serde(default)]
    pub status: EmergencyLevel,
}
