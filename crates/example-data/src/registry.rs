//! Seed registry types and JSON parsing.
//!
//! A registry names the seeds available for generation together with the
//! skill and location vocabularies the generator draws from.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing named seeds and the vocabularies they draw on.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "skills": ["Rust", "Pottery"],
///     "seeds": [{"name": "test", "seed": 42, "entryCount": 5}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// assert!(registry.locations().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    skills: Vec<String>,
    locations: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the JSON is malformed, the version is
    /// unsupported, a skill label is blank, or no seeds are defined.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let skills = raw
            .skills
            .into_iter()
            .enumerate()
            .map(|(index, skill)| {
                let trimmed = skill.trim();
                if trimmed.is_empty() {
                    Err(RegistryError::BlankSkill { index })
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                entry_count: s.entry_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            skills,
            locations: raw.locations,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the skill vocabulary.
    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Returns the location vocabulary; empty means every entry is remote.
    #[must_use]
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named seed definition for deterministic entry generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    entry_count: usize,
}

impl SeedDefinition {
    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of entries to generate.
    #[must_use]
    pub const fn entry_count(&self) -> usize {
        self.entry_count
    }

    /// Returns a copy generating `entry_count` entries from the same seed.
    ///
    /// Entries are drawn in sequence, so a smaller count yields a prefix of
    /// the larger list.
    #[must_use]
    pub fn with_entry_count(&self, entry_count: usize) -> Self {
        Self {
            entry_count,
            ..self.clone()
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    skills: Vec<String>,
    #[serde(default)]
    locations: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    entry_count: usize,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn trims_skill_labels() {
        let json = r#"{
            "version": 1,
            "skills": ["  Rust ", "Knitting"],
            "seeds": [{"name": "a", "seed": 1, "entryCount": 1}]
        }"#;
        let registry = SeedRegistry::from_json(json).expect("valid registry");
        assert_eq!(registry.skills(), ["Rust", "Knitting"]);
    }

    #[rstest]
    fn rejects_blank_skill_labels() {
        let json = r#"{
            "version": 1,
            "skills": ["Rust", "   "],
            "seeds": [{"name": "a", "seed": 1, "entryCount": 1}]
        }"#;
        let result = SeedRegistry::from_json(json);
        assert_eq!(result, Err(RegistryError::BlankSkill { index: 1 }));
    }
}
