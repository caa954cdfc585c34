//! Cedin Manager Domain Library
//!
//! Core domain types and interfaces for the Cedin clinic scheduling system.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture (ports and adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business entities and rules
//!   - `entities/`: User, Professional, Patient, Appointment
//!   - `value_objects/`: Role, ProfessionalStatus, AppointmentStatus
//!   - `services/`: Scheduling rules (overlap detection, status transitions)
//!   - `errors/`: Domain error type
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use cedin::domain::{Appointment, AppointmentStatus};
//! use cedin::ports::AppointmentRepository;
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Appointment, AppointmentStatus, DomainError, Patient, Professional, ProfessionalStatus, Role,
    User,
};
pub use ports::{
    AppointmentFilter, AppointmentRepository, PatientRepository, ProfessionalRepository,
    UserRepository,
};
