//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the driven ports backed by PostgreSQL via
//! `diesel-async` and a `bb8` connection pool.
//!
//! - Repository implementations only translate between Diesel rows and
//!   domain types; the shift engine's locking protocol is the one piece of
//!   behaviour that lives here, because it is a property of the store.
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) never
//!   leave this module.
//! - Every driver failure is classified once (see `diesel_error_mapping`)
//!   and then mapped to the port's own error type.
//!
//! # Example
//!
//! ```no_run
//! use rollcall::outbound::persistence::{DbPool, DieselShiftRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rollcall")).await?;
//! let shifts = DieselShiftRepository::new(pool);
//! # let _ = shifts;
//! # Ok(())
//! # }
//! ```

mod diesel_activity_repository;
mod diesel_directory_repository;
mod diesel_error_mapping;
mod diesel_shift_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_activity_repository::DieselActivityRepository;
pub use diesel_directory_repository::DieselDirectoryRepository;
pub use diesel_shift_repository::DieselShiftRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
