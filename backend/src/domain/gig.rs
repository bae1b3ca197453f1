//! Posted work offered by an owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::validation::{require_text, text_or_default};
use super::{EmailAddress, Error, GigId};

/// Gig type used when the poster leaves it out.
pub const DEFAULT_GIG_TYPE: &str = "One-time Project";

/// Location used when the poster leaves it out.
pub const DEFAULT_LOCATION: &str = "Remote";

/// Non-negative, finite budget amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Budget(f64);

impl Budget {
    /// Validate a budget amount.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(
                Error::invalid_request("budget must be a non-negative number").with_details(
                    json!({ "field": "budget", "value": amount, "code": "invalid_budget" }),
                ),
            );
        }
        Ok(Self(amount))
    }

    /// Raw amount.
    pub const fn amount(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Budget {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Budget> for f64 {
    fn from(value: Budget) -> Self {
        value.0
    }
}

/// A stored gig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    /// Store-assigned identifier.
    pub id: GigId,
    /// Short headline.
    pub title: String,
    /// Free-form category label.
    pub category: String,
    /// Engagement type, for example "One-time Project".
    #[serde(rename = "type")]
    pub gig_type: String,
    /// Requested skills in the order the poster listed them.
    pub skills: Vec<String>,
    /// Full description.
    pub description: String,
    /// Offered budget.
    pub budget: Budget,
    /// Expected duration, free-form.
    pub duration: String,
    /// Where the work happens.
    pub location: String,
    /// Owner identity; anonymous gigs have none.
    pub posted_by: Option<EmailAddress>,
    /// Creation instant assigned by the store.
    pub created_at: DateTime<Utc>,
    /// Last update instant assigned by the store.
    pub updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new gig, before defaults are applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GigSubmission {
    /// Short headline.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Engagement type.
    pub gig_type: Option<String>,
    /// Requested skills.
    pub skills: Vec<String>,
    /// Full description.
    pub description: String,
    /// Offered budget.
    pub budget: f64,
    /// Expected duration.
    pub duration: String,
    /// Work location.
    pub location: Option<String>,
    /// Owner identity, raw.
    pub posted_by: Option<String>,
}

/// Validated gig ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GigDraft {
    /// Short headline.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Engagement type.
    pub gig_type: String,
    /// Requested skills, trimmed with blanks removed.
    pub skills: Vec<String>,
    /// Full description.
    pub description: String,
    /// Offered budget.
    pub budget: Budget,
    /// Expected duration.
    pub duration: String,
    /// Work location.
    pub location: String,
    /// Normalised owner identity.
    pub posted_by: Option<EmailAddress>,
}

impl TryFrom<GigSubmission> for GigDraft {
    type Error = Error;

    fn try_from(value: GigSubmission) -> Result<Self, Self::Error> {
        let posted_by = value
            .posted_by
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(EmailAddress::parse)
            .transpose()?;
        Ok(Self {
            title: require_text("title", &value.title)?,
            category: require_text("category", &value.category)?,
            gig_type: text_or_default(value.gig_type.as_deref(), DEFAULT_GIG_TYPE),
            skills: value
                .skills
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            description: require_text("description", &value.description)?,
            budget: Budget::new(value.budget)?,
            duration: require_text("duration", &value.duration)?,
            location: text_or_default(value.location.as_deref(), DEFAULT_LOCATION),
            posted_by,
        })
    }
}
