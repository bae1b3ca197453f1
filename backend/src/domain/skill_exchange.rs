//! Skill-exchange entries: a person describing the trade they want.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::gig::DEFAULT_LOCATION;
use super::validation::{require_text, text_or_default};
use super::{EmailAddress, Error, SkillExchangeId};

/// Compatibility score between 0 and 100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct MatchScore(u8);

impl MatchScore {
    /// Highest allowed score.
    pub const MAX: u8 = 100;

    /// Validate a score.
    pub fn new(value: i64) -> Result<Self, Error> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| {
                Error::invalid_request("matchScore must be between 0 and 100").with_details(
                    json!({ "field": "matchScore", "value": value, "code": "out_of_range" }),
                )
            })
    }

    /// Raw score.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for MatchScore {
    fn default() -> Self {
        Self(80)
    }
}

impl TryFrom<i64> for MatchScore {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MatchScore> for u8 {
    fn from(value: MatchScore) -> Self {
        value.0
    }
}

/// A stored skill-exchange entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillExchange {
    /// Store-assigned identifier.
    pub id: SkillExchangeId,
    /// Display name of the person offering the trade.
    pub name: String,
    /// Owner identity. Entries created before owners were recorded have none.
    #[serde(rename = "email")]
    pub owner_email: Option<EmailAddress>,
    /// Skill the owner can teach.
    pub skill_offered: String,
    /// Skill the owner wants to learn.
    pub skill_wanted: String,
    /// Where the trade happens.
    pub location: String,
    /// Compatibility score.
    pub match_score: MatchScore,
    /// Creation instant assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillExchangeSubmission {
    /// Display name.
    pub name: String,
    /// Owner identity, raw.
    pub email: Option<String>,
    /// Skill offered.
    pub skill_offered: String,
    /// Skill wanted.
    pub skill_wanted: String,
    /// Location.
    pub location: Option<String>,
    /// Score, defaulting to 80.
    pub match_score: Option<i64>,
}

/// Validated entry ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillExchangeDraft {
    /// Display name.
    pub name: String,
    /// Normalised owner identity.
    pub owner_email: Option<EmailAddress>,
    /// Skill offered.
    pub skill_offered: String,
    /// Skill wanted.
    pub skill_wanted: String,
    /// Location.
    pub location: String,
    /// Score.
    pub match_score: MatchScore,
}

impl TryFrom<SkillExchangeSubmission> for SkillExchangeDraft {
    type Error = Error;

    fn try_from(value: SkillExchangeSubmission) -> Result<Self, Self::Error> {
        let owner_email = value
            .email
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(EmailAddress::parse)
            .transpose()?;
        let match_score = value
            .match_score
            .map(MatchScore::new)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            name: require_text("name", &value.name)?,
            owner_email,
            skill_offered: require_text("skillOffered", &value.skill_offered)?,
            skill_wanted: require_text("skillWanted", &value.skill_wanted)?,
            location: text_or_default(value.location.as_deref(), DEFAULT_LOCATION),
            match_score,
        })
    }
}
