//! Outbound adapters implementing the domain's driven ports.
//!
//! - **memory**: in-process store used without a database and in tests
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **stats**: outbox adapters feeding the stats synchronizer
//!
//! Adapters translate between domain records and their storage or transport
//! representation. They contain no business rules.

pub mod memory;
pub mod persistence;
pub mod stats;
