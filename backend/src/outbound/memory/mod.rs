//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP integration tests.
//! One `RwLock` guards all collections, which makes each port method atomic:
//! the duplicate-application check and insert, the status compare-and-set and
//! the counter upsert all happen under a single write guard.

mod store;

pub use store::MemoryStore;

#[cfg(test)]
mod tests;
