//! Deterministic example skill-exchange entries for demonstration purposes.
//!
//! The crate turns a named seed from a JSON registry into a reproducible list
//! of skill-exchange entries. It has no dependency on backend domain types so
//! the backend can convert the generated records at the point of use.
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_entries};
//!
//! let json = r#"{
//!     "version": 1,
//!     "skills": ["Rust", "Guitar", "Spanish"],
//!     "locations": ["Remote", "Lisbon"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "entryCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let entries = generate_example_entries(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(entries.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_entries;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::ExampleExchangeSeed;
