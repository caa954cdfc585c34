//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - User: Staff account (admin, secretary, professional, developer)
//! - Professional: Practitioner profile, optionally linked to a User
//! - Patient: Care recipient identified by DNI
//! - Appointment: A booked slot between a Patient and a Professional

mod appointment;
mod fields;
mod patient;
mod professional;
mod user;

pub use appointment::*;
pub use patient::*;
pub use professional::*;
pub use user::*;
