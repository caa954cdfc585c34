//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod appointment_status;
mod professional_status;
mod role;

pub use appointment_status::*;
pub use professional_status::*;
pub use role::*;
