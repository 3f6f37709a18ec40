use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use super::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoctorStatus {
    Available,
    #[serde(rename = "On Leave")]
    OnLeave,
}

impl DoctorStatus {
    pub fn toggled(self) -> Self {
        match self {
            DoctorStatus::Available => DoctorStatus::OnLeave,
            DoctorStatus::OnLeave => DoctorStatus::Available,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DoctorStatus::Available => "Available",
            DoctorStatus::OnLeave => "On Leave",
        }
    }
}

impl fmt::Display for DoctorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub specialization: String,
    /// Years of experience, kept exactly as entered.
    #[serde(default, deserialize_with = "years_as_entered")]
    pub experience: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub shift: String,
    #[serde(rename = "break", default)]
    pub break_time: String,
    pub status: DoctorStatus,
}

impl Doctor {
    /// The stored image, or the generated avatar when none was recorded.
    pub fn avatar_url(&self) -> String {
        if self.image.is_empty() {
            default_avatar_url(&self.name)
        } else {
            self.image.clone()
        }
    }

    /// The two doctors every fresh installation starts with.
    pub fn defaults() -> Vec<Doctor> {
        vec![
            Doctor {
                id: EntityId(1),
                name: "Dr. Smith".into(),
                specialization: "Cardiology".into(),
                experience: "15".into(),
                address: "123 Medical Lane, Cityville".into(),
                image: "https://i.pravatar.cc/150?img=11".into(),
                shift: "09:00 AM - 05:00 PM".into(),
                break_time: "01:00 PM - 02:00 PM".into(),
                status: DoctorStatus::Available,
            },
            Doctor {
                id: EntityId(2),
                name: "Dr. Johnson".into(),
                specialization: "Neurology".into(),
                experience: "8".into(),
                address: "456 Health Blvd, Metro".into(),
                image: "https://i.pravatar.cc/150?img=5".into(),
                shift: "10:00 AM - 06:00 PM".into(),
                break_time: "02:00 PM - 03:00 PM".into(),
                status: DoctorStatus::OnLeave,
            },
        ]
    }
}

pub fn default_avatar_url(name: &str) -> String {
    format!("https://ui-avatars.com/api/?name={}&background=random", name)
}

/// Form input for registering a doctor.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewDoctor {
    #[validate(length(min = 1, message = "doctor name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "specialization is required"))]
    pub specialization: String,
    pub experience: String,
    pub address: String,
    pub image: Option<String>,
    pub shift: String,
    pub break_time: String,
}

// Stored records hold either the raw form text or a plain number.
fn years_as_entered<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(serde_json::Number),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(years)) => years.to_string(),
        Some(Raw::Text(text)) => text,
        None => String::new(),
    })
}
