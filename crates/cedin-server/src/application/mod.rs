//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations and coordinates between
//! repositories and supporting services.

mod appointment_service;
mod patient_service;
mod professional_service;
mod user_service;

pub use appointment_service::{AppointmentService, NewAppointment, RescheduleAppointment};
pub use patient_service::{PatientChanges, PatientService};
pub use professional_service::{ProfessionalChanges, ProfessionalService};
pub use user_service::{UserChanges, UserService};
