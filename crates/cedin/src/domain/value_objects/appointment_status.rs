//! AppointmentStatus - Lifecycle of a booked appointment
//!
//! ```text
//! scheduled ──► confirmed ──► completed
//!     │  \          │
//!     │   └────┐    │
//!     ▼        ▼    ▼
//! cancelled ◄─ no_show
//! ```
//!
//! `completed` and `cancelled` are terminal.

use serde::{Deserialize, Serialize};

/// Appointment status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 5] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// No transition leaves a terminal status
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AppointmentStatus::Completed | AppointmentStatus::Cancelled
        )
    }

    /// Whether an appointment in this status still occupies its slot
    pub fn blocks_slot(self) -> bool {
        self != AppointmentStatus::Cancelled
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        use AppointmentStatus::*;

        match (self, next) {
            (Scheduled, Confirmed) => true,
            (Confirmed, Completed) => true,
            (Scheduled | Confirmed, NoShow) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no_show" => Ok(AppointmentStatus::NoShow),
            _ => Err(format!("Unknown appointment status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AppointmentStatus::*;
    use super::*;

    #[test]
    fn test_forward_path() {
        assert!(Scheduled.can_transition_to(Confirmed));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(!Scheduled.can_transition_to(Completed));
    }

    #[test]
    fn test_cancel_from_non_terminal() {
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Cancelled));
        assert!(NoShow.can_transition_to(Cancelled));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Cancelled));
    }

    #[test]
    fn test_no_show_only_before_attendance() {
        assert!(Scheduled.can_transition_to(NoShow));
        assert!(Confirmed.can_transition_to(NoShow));
        assert!(!Completed.can_transition_to(NoShow));
        assert!(!NoShow.can_transition_to(NoShow));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for next in AppointmentStatus::ALL {
            assert!(!Completed.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_nothing_returns_to_scheduled() {
        for from in AppointmentStatus::ALL {
            assert!(!from.can_transition_to(Scheduled));
        }
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&NoShow).unwrap();
        assert_eq!(json, "\"no_show\"");
        assert_eq!("no_show".parse::<AppointmentStatus>(), Ok(NoShow));
    }
}
