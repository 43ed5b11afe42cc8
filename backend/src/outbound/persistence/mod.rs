//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain types;
//! row structs and table definitions stay private to this module. Access is
//! async through `diesel-async` over a `bb8` pool, and every database error
//! is mapped to the port's own error enum.
//!
//! # Example
//!
//! ```ignore
//! use jobboard::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/jobboard")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_application_repository;
mod diesel_basic_error_mapping;
mod diesel_job_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, migrate, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
