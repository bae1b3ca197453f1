//! Generated entry types.
//!
//! These mirror the backend's skill-exchange draft without depending on it.

use serde::{Deserialize, Serialize};

/// A generated skill-exchange entry.
///
/// # Example
///
/// ```
/// use example_data::ExampleExchangeSeed;
///
/// let entry = ExampleExchangeSeed {
///     name: "Ada Lovelace".to_owned(),
///     email: "ada.lovelace@example.com".to_owned(),
///     skill_offered: "Mathematics".to_owned(),
///     skill_wanted: "Weaving".to_owned(),
///     location: "Remote".to_owned(),
///     match_score: 91,
/// };
///
/// assert_eq!(entry.match_score, 91);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleExchangeSeed {
    /// Display name of the person offering the trade.
    pub name: String,
    /// Contact email derived from the name.
    pub email: String,
    /// Skill the person can teach.
    pub skill_offered: String,
    /// Skill the person wants to learn; never equal to `skill_offered`.
    pub skill_wanted: String,
    /// Where the trade happens.
    pub location: String,
    /// Compatibility score in the inclusive range 0 to 100.
    pub match_score: u8,
}
