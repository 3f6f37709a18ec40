use serde::{Deserialize, Serialize};

use super::EntityId;

/// A registered patient. Linked to appointments by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: String,
}
