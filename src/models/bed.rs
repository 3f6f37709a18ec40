use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of beds in the ward. Beds are never added or removed.
pub const TOTAL_BED_COUNT: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BedId(pub u8);

impl fmt::Display for BedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BedStatus {
    Available,
    Occupied,
}

impl BedStatus {
    pub fn toggled(self) -> Self {
        match self {
            BedStatus::Available => BedStatus::Occupied,
            BedStatus::Occupied => BedStatus::Available,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BedStatus::Available => "Available",
            BedStatus::Occupied => "Occupied",
        }
    }
}

impl fmt::Display for BedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bed {
    pub id: BedId,
    pub status: BedStatus,
}

impl Bed {
    /// Beds `1..=TOTAL_BED_COUNT`, all available.
    pub fn ward() -> Vec<Bed> {
        (1..=TOTAL_BED_COUNT)
            .map(|n| Bed {
                id: BedId(n),
                status: BedStatus::Available,
            })
            .collect()
    }

    pub fn is_available(&self) -> bool {
        self.status == BedStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ward_has_sequential_available_beds() {
        let beds = Bed::ward();
        assert_eq!(beds.len(), TOTAL_BED_COUNT as usize);
        assert_eq!(beds.first().map(|b| b.id), Some(BedId(1)));
        assert_eq!(beds.last().map(|b| b.id), Some(BedId(20)));
        assert!(beds.iter().all(Bed::is_available));
    }

    #[test]
    fn status_wire_names() {
        let json = serde_json::to_string(&Bed { id: BedId(5), status: BedStatus::Occupied }).unwrap();
        assert_eq!(json, r#"{"id":5,"status":"Occupied"}"#);
    }
}
