//! Deterministic entry generation from seed definitions.
//!
//! The same seed value always produces identical output.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::ExampleExchangeSeed;

/// Location used when the registry provides none.
const FALLBACK_LOCATION: &str = "Remote";

/// Domain used for generated contact addresses.
const EMAIL_DOMAIN: &str = "example.com";

/// Lowest generated match score.
const MIN_MATCH_SCORE: u8 = 60;

/// Highest generated match score.
const MAX_MATCH_SCORE: u8 = 100;

/// Generates example skill-exchange entries from a seed definition.
///
/// Each entry pairs two distinct skills from the registry vocabulary, a
/// generated name with a matching `example.com` address, a location, and a
/// match score between 60 and 100.
///
/// # Errors
///
/// Returns [`GenerationError::NotEnoughSkills`] when the registry lists fewer
/// than two skills.
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_entries};
///
/// let json = r#"{
///     "version": 1,
///     "skills": ["Rust", "Guitar"],
///     "seeds": [{"name": "test", "seed": 7, "entryCount": 4}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let first = generate_example_entries(&registry, seed_def).expect("generated");
/// let second = generate_example_entries(&registry, seed_def).expect("generated");
///
/// assert_eq!(first, second);
/// assert!(first.iter().all(|e| e.skill_offered != e.skill_wanted));
/// ```
pub fn generate_example_entries(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<ExampleExchangeSeed>, GenerationError> {
    let skills = registry.skills();
    if skills.len() < 2 {
        return Err(GenerationError::NotEnoughSkills {
            available: skills.len(),
        });
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let entries = (0..seed_def.entry_count())
        .map(|_| generate_single_entry(&mut rng, registry))
        .collect();
    Ok(entries)
}

fn generate_single_entry(rng: &mut ChaCha8Rng, registry: &SeedRegistry) -> ExampleExchangeSeed {
    let first: String = FirstName(EN).fake_with_rng(rng);
    let last: String = LastName(EN).fake_with_rng(rng);
    let email = contact_email(&first, &last);
    let (skill_offered, skill_wanted) = pick_skill_pair(rng, registry.skills());
    let location = registry
        .locations()
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_LOCATION.to_owned());
    let match_score = rng.random_range(MIN_MATCH_SCORE..=MAX_MATCH_SCORE);

    ExampleExchangeSeed {
        name: format!("{first} {last}"),
        email,
        skill_offered,
        skill_wanted,
        location,
        match_score,
    }
}

/// Picks two different skills; callers guarantee at least two are available.
fn pick_skill_pair(rng: &mut ChaCha8Rng, skills: &[String]) -> (String, String) {
    let offered_index = rng.random_range(0..skills.len());
    let mut wanted_index = rng.random_range(0..skills.len() - 1);
    if wanted_index >= offered_index {
        wanted_index += 1;
    }
    let offered = skills.get(offered_index).cloned().unwrap_or_default();
    let wanted = skills.get(wanted_index).cloned().unwrap_or_default();
    (offered, wanted)
}

fn contact_email(first: &str, last: &str) -> String {
    let local: String = format!("{first}.{last}")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect::<String>()
        .to_ascii_lowercase();
    format!("{local}@{EMAIL_DOMAIN}")
}
