//! Events that move profile counters.
//!
//! Lifecycle services publish a [`StatsEvent`] whenever something countable
//! happens. The stats synchronizer turns each event into a single
//! [`StatAdjustment`] and applies it to the affected profile.

use serde::{Deserialize, Serialize};

use super::{EmailAddress, StatField};

/// Something happened that should move a profile counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StatsEvent {
    /// An owner posted a gig.
    GigPosted {
        /// Gig owner.
        owner: EmailAddress,
    },
    /// An owner's gig was deleted.
    GigRemoved {
        /// Gig owner.
        owner: EmailAddress,
    },
    /// An owner listed a skill-exchange entry.
    ExchangeListed {
        /// Entry owner.
        owner: EmailAddress,
    },
    /// A user sent an exchange request.
    ExchangeRequested {
        /// Request sender.
        sender: EmailAddress,
    },
    /// An exchange request moved into `accepted` from another status.
    ExchangeAccepted {
        /// Request recipient.
        recipient: EmailAddress,
    },
}

/// Signed change to one counter of one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatAdjustment {
    /// Profile key.
    pub email: EmailAddress,
    /// Counter to change.
    pub field: StatField,
    /// Signed amount.
    pub delta: i32,
}

impl StatsEvent {
    /// Translate the event into the counter change it implies.
    ///
    /// # Examples
    /// ```
    /// use skillx::domain::{EmailAddress, StatField, StatsEvent};
    ///
    /// let owner = EmailAddress::new("u1@x.com").expect("valid");
    /// let adjustment = StatsEvent::GigRemoved { owner }.adjustment();
    /// assert_eq!(adjustment.field, StatField::GigsPosted);
    /// assert_eq!(adjustment.delta, -1);
    /// ```
    pub fn adjustment(&self) -> StatAdjustment {
        let (email, field, delta) = match self {
            Self::GigPosted { owner } => (owner, StatField::GigsPosted, 1),
            Self::GigRemoved { owner } => (owner, StatField::GigsPosted, -1),
            Self::ExchangeListed { owner } => (owner, StatField::SkillExchanges, 1),
            Self::ExchangeRequested { sender } => (sender, StatField::SkillExchanges, 1),
            Self::ExchangeAccepted { recipient } => {
                (recipient, StatField::SkillExchangesCompleted, 1)
            }
        };
        StatAdjustment {
            email: email.clone(),
            field,
            delta,
        }
    }
}
