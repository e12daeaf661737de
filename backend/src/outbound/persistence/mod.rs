//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Thin adapters translating between Diesel rows and domain records. Row
//! structs and table definitions stay private to this module. Connections
//! come from a shared `bb8` pool via `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use chromascape_backend::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/chromascape")).await?;
//! let users = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_device_repository;
mod diesel_pattern_repository;
mod diesel_schedule_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_device_repository::DieselDeviceRepository;
pub use diesel_pattern_repository::DieselPatternRepository;
pub use diesel_schedule_repository::DieselScheduleRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
