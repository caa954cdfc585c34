//! ProfessionalStatus - Whether a practitioner takes new bookings

use serde::{Deserialize, Serialize};

/// Professional availability status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalStatus {
    #[default]
    Active,
    /// Retired from the schedule; history is kept
    Inactive,
}

impl std::fmt::Display for ProfessionalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfessionalStatus::Active => write!(f, "active"),
            ProfessionalStatus::Inactive => write!(f, "inactive"),
        }
    }
}

impl std::str::FromStr for ProfessionalStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ProfessionalStatus::Active),
            "inactive" => Ok(ProfessionalStatus::Inactive),
            _ => Err(format!("Unknown professional status: {}", s)),
        }
    }
}
