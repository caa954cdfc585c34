//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use sqlx::PgPool;

use cedin::{AppointmentRepository, PatientRepository, ProfessionalRepository, UserRepository};

pub use memory::MemoryStore;
pub use postgres::{
    PgAppointmentRepository, PgPatientRepository, PgProfessionalRepository, PgUserRepository,
};

/// One implementation of every repository port, chosen at startup
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub professionals: Arc<dyn ProfessionalRepository>,
    pub patients: Arc<dyn PatientRepository>,
    pub appointments: Arc<dyn AppointmentRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            professionals: Arc::new(PgProfessionalRepository::new(pool.clone())),
            patients: Arc::new(PgPatientRepository::new(pool.clone())),
            appointments: Arc::new(PgAppointmentRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: store.clone(),
            professionals: store.clone(),
            patients: store.clone(),
            appointments: store,
        }
    }
}
