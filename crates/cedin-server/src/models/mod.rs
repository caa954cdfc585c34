//! Cedin API Data Models
//!
//! Request/response DTOs for the HTTP layer.
//! - User: Staff accounts
//! - Professional: Practitioners
//! - Patient: Care recipients
//! - Appointment: Bookings

mod appointment;
mod health;
mod patient;
mod professional;
mod user;

pub use appointment::*;
pub use health::*;
pub use patient::*;
pub use professional::*;
pub use user::*;
