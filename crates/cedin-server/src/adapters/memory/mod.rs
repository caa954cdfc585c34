//! In-memory Repository Implementation
//!
//! A single store backs every repository port so cross-entity rules
//! (foreign keys, one-to-one links, delete restrictions) are checked
//! under one lock. Used when no `DATABASE_URL` is configured and by tests.

mod store;

pub use store::MemoryStore;
