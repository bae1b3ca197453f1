//! Error types for the example-data crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// A skill label is blank once trimmed.
    #[error("blank skill label at index {index}")]
    BlankSkill {
        /// Index of the blank label in the array.
        index: usize,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors raised while generating entries from a seed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A trade needs two distinct skills, so the registry must list at least two.
    #[error("registry lists {available} skills; at least 2 are required")]
    NotEnoughSkills {
        /// Number of skills present in the registry.
        available: usize,
    },
}
