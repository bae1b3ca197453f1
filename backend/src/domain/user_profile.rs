//! Per-user profiles keyed by email, with aggregate activity counters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{optional_text, require_text};
use super::{EmailAddress, Error, UserProfileId};

/// Activity counters kept on a profile.
///
/// Counters are maintained on a best-effort basis by the stats synchronizer
/// and are therefore approximate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    /// Gigs the user currently has posted.
    pub gigs_posted: u32,
    /// Gigs the user completed.
    pub gigs_completed: u32,
    /// Skill exchanges the user listed or requested.
    pub skill_exchanges: u32,
    /// Exchange requests the user accepted.
    pub skill_exchanges_completed: u32,
}

/// Counter addressed by a stats adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatField {
    /// [`ProfileStats::gigs_posted`].
    GigsPosted,
    /// [`ProfileStats::gigs_completed`].
    GigsCompleted,
    /// [`ProfileStats::skill_exchanges`].
    SkillExchanges,
    /// [`ProfileStats::skill_exchanges_completed`].
    SkillExchangesCompleted,
}

impl StatField {
    /// Wire name of the counter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GigsPosted => "gigsPosted",
            Self::GigsCompleted => "gigsCompleted",
            Self::SkillExchanges => "skillExchanges",
            Self::SkillExchangesCompleted => "skillExchangesCompleted",
        }
    }
}

impl std::fmt::Display for StatField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProfileStats {
    /// Read one counter.
    pub const fn get(&self, field: StatField) -> u32 {
        match field {
            StatField::GigsPosted => self.gigs_posted,
            StatField::GigsCompleted => self.gigs_completed,
            StatField::SkillExchanges => self.skill_exchanges,
            StatField::SkillExchangesCompleted => self.skill_exchanges_completed,
        }
    }

    /// Apply a signed delta to one counter, saturating at zero.
    ///
    /// # Examples
    /// ```
    /// use skillx::domain::{ProfileStats, StatField};
    ///
    /// let mut stats = ProfileStats::default();
    /// stats.apply(StatField::GigsPosted, 1);
    /// stats.apply(StatField::GigsPosted, -3);
    /// assert_eq!(stats.gigs_posted, 0);
    /// ```
    pub fn apply(&mut self, field: StatField, delta: i32) {
        let slot = match field {
            StatField::GigsPosted => &mut self.gigs_posted,
            StatField::GigsCompleted => &mut self.gigs_completed,
            StatField::SkillExchanges => &mut self.skill_exchanges,
            StatField::SkillExchangesCompleted => &mut self.skill_exchanges_completed,
        };
        *slot = slot.saturating_add_signed(delta);
    }
}

/// A stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Store-assigned identifier.
    pub id: UserProfileId,
    /// Identity key; unique across profiles.
    pub email: EmailAddress,
    /// Display name; empty for profiles created implicitly by stats updates.
    pub name: String,
    /// Self-described role.
    pub role: Option<String>,
    /// Self-described location.
    pub location: Option<String>,
    /// Free-form biography.
    pub bio: Option<String>,
    /// Distinct skills in the order first listed.
    pub skills: Vec<String>,
    /// Activity counters.
    pub stats: ProfileStats,
    /// Creation instant assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Last update instant assigned by the store.
    pub updated_at: DateTime<Utc>,
}

/// Normalise skill labels: trim, drop blanks and keep the first occurrence
/// of each label.
///
/// # Examples
/// ```
/// use skillx::domain::normalize_skills;
///
/// let skills = normalize_skills([" React", "", "Node ", "React"]);
/// assert_eq!(skills, ["React", "Node"]);
/// ```
pub fn normalize_skills<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut skills: Vec<String> = Vec::new();
    for item in items {
        let trimmed = item.as_ref().trim();
        if !trimmed.is_empty() && !skills.iter().any(|s| s == trimmed) {
            skills.push(trimmed.to_owned());
        }
    }
    skills
}

/// Split a comma-separated skill list and normalise it.
///
/// # Examples
/// ```
/// use skillx::domain::parse_skill_list;
///
/// assert_eq!(parse_skill_list("React, Node"), ["React", "Node"]);
/// assert!(parse_skill_list(" , ").is_empty());
/// ```
pub fn parse_skill_list(csv: &str) -> Vec<String> {
    normalize_skills(csv.split(','))
}

/// Caller-supplied profile fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileSubmission {
    /// Identity key, raw.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Biography.
    pub bio: Option<String>,
    /// Skill labels, already split.
    pub skills: Option<Vec<String>>,
    /// Full replacement for the counters.
    pub stats: Option<ProfileStats>,
}

/// Validated profile upsert.
///
/// `None` fields leave the stored value untouched. Counters are replaced only
/// when `stats` is present, so concurrent stats adjustments survive ordinary
/// profile edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpsert {
    /// Identity key.
    pub email: EmailAddress,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Biography.
    pub bio: Option<String>,
    /// Normalised skills.
    pub skills: Option<Vec<String>>,
    /// Counter replacement.
    pub stats: Option<ProfileStats>,
}

impl TryFrom<ProfileSubmission> for ProfileUpsert {
    type Error = Error;

    fn try_from(value: ProfileSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            email: EmailAddress::parse(&value.email)?,
            name: require_text("name", &value.name)?,
            role: optional_text(value.role.as_deref()),
            location: optional_text(value.location.as_deref()),
            bio: optional_text(value.bio.as_deref()),
            skills: value.skills.map(normalize_skills),
            stats: value.stats,
        })
    }
}
