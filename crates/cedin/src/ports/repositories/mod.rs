//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod appointment_repository;
mod patient_repository;
mod professional_repository;
mod user_repository;

pub use appointment_repository::*;
pub use patient_repository::*;
pub use professional_repository::*;
pub use user_repository::*;
