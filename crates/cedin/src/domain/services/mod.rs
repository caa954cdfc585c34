//! Domain Services
//!
//! Stateless rules that span more than one entity.

pub mod scheduling;
