//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows (`models.rs`, `schema.rs`) and
//! domain records, and map driver failures onto port errors. They hold no
//! business rules beyond what the schema itself enforces: the unique
//! application pair, unique profile emails and non-negative counters.
//!
//! # Example
//!
//! ```ignore
//! use skillx::outbound::persistence::{DbPool, DieselGigRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/skillx")).await?;
//! let gigs = DieselGigRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_exchange_request_repository;
mod diesel_gig_application_repository;
mod diesel_gig_repository;
mod diesel_skill_exchange_repository;
mod diesel_user_profile_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_exchange_request_repository::DieselExchangeRequestRepository;
pub use diesel_gig_application_repository::DieselGigApplicationRepository;
pub use diesel_gig_repository::DieselGigRepository;
pub use diesel_skill_exchange_repository::DieselSkillExchangeRepository;
pub use diesel_user_profile_repository::DieselUserProfileRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
