//! Startup seeding of sample skill-exchange entries.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use example_data::{ExampleExchangeSeed, GenerationError, RegistryError, SeedRegistry, generate_example_entries};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::Error;
use crate::domain::SkillExchangeSubmission;
use crate::domain::ports::{SkillExchangeCommand, SkillExchangeQuery};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing or seed lookup failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// The registry cannot produce entries for this seed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// The skill-exchange store rejected a count or an insert.
    #[error("example data could not be stored: {0}")]
    Store(#[from] Error),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// What a seeding pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedingOutcome {
    /// Registry seed that was applied.
    pub seed_name: String,
    /// Entries inserted; zero when the collection already had data.
    pub inserted: usize,
}

/// Insert generated skill-exchange entries when enabled and the collection
/// is empty.
///
/// Returns `Ok(None)` when seeding is disabled.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use skillx::domain::{SkillExchangeService, StatsSynchronizer};
/// use skillx::example_data::{ExampleDataSettings, seed_example_data_on_startup};
/// use skillx::outbound::memory::MemoryStore;
/// use skillx::outbound::stats::InlineStatsOutbox;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(MemoryStore::new());
/// let stats = Arc::new(InlineStatsOutbox::new(Arc::new(StatsSynchronizer::new(store.clone()))));
/// let entries = SkillExchangeService::new(store, stats);
/// let settings = ExampleDataSettings {
///     enabled: true,
///     seed_name: Some("mossy-owl".to_owned()),
///     count: Some(3),
///     registry_path: None,
/// };
/// let outcome = seed_example_data_on_startup(&settings, &entries, &entries).await?;
/// assert_eq!(outcome.map(|o| o.inserted), Some(3));
/// # Ok(())
/// # }
/// ```
pub async fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    command: &dyn SkillExchangeCommand,
    query: &dyn SkillExchangeQuery,
) -> Result<Option<SeedingOutcome>, StartupSeedingError> {
    if !settings.enabled {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let existing = query.count().await?;
    if existing > 0 {
        info!(seed_name, existing, "skill exchanges already present; seeding skipped");
        return Ok(Some(SeedingOutcome {
            seed_name: seed_name.to_owned(),
            inserted: 0,
        }));
    }

    let registry = load_registry(&settings.registry_path())?;
    let seed_def = registry.find_seed(seed_name)?;
    let seed_def = match settings.count {
        Some(count) => seed_def.with_entry_count(count),
        None => seed_def.clone(),
    };

    let entries = generate_example_entries(&registry, &seed_def)?;
    for entry in &entries {
        command.create(submission_for(entry)).await?;
    }
    info!(seed_name, inserted = entries.len(), "example data seeding applied");

    Ok(Some(SeedingOutcome {
        seed_name: seed_name.to_owned(),
        inserted: entries.len(),
    }))
}

fn submission_for(entry: &ExampleExchangeSeed) -> SkillExchangeSubmission {
    SkillExchangeSubmission {
        name: entry.name.clone(),
        email: Some(entry.email.clone()),
        skill_offered: entry.skill_offered.clone(),
        skill_wanted: entry.skill_wanted.clone(),
        location: Some(entry.location.clone()),
        match_score: Some(i64::from(entry.match_score)),
    }
}

fn read_error(path: &Path, source: std::io::Error) -> StartupSeedingError {
    StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    }
}

/// Read the registry through a capability handle on its parent directory.
fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        warn!(path = %path.display(), "registry path has no file name");
        return Err(read_error(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "registry path must be a file"),
        ));
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .map_err(|source| read_error(path, source))?;
    let contents = dir
        .read_to_string(Path::new(file_name))
        .map_err(|source| read_error(path, source))?;
    Ok(SeedRegistry::from_json(&contents)?)
}
