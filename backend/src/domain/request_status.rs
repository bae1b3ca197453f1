//! Lifecycle states shared by exchange requests and gig applications.
//!
//! Both records start `pending` and move to `accepted` or `rejected`. Whether
//! a terminal state may be left again depends on the configured
//! [`TransitionPolicy`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::Error;

/// Status of a request or application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Awaiting a decision from the recipient.
    #[default]
    Pending,
    /// Approved by the recipient.
    Accepted,
    /// Declined by the recipient.
    Rejected,
}

impl RequestStatus {
    /// Lower-case wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the status is a decision rather than `pending`.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::invalid_request("Invalid status").with_details(json!({
                "field": "status",
                "value": other,
                "code": "invalid_status",
                "allowed": ["pending", "accepted", "rejected"],
            }))),
        }
    }
}

/// How strictly terminal states are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Decisions are final; leaving `accepted` or `rejected` is a conflict.
    #[default]
    Strict,
    /// Any valid status may overwrite any other.
    Permissive,
}

impl FromStr for TransitionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(Error::invalid_request(format!(
                "unknown transition policy '{other}'"
            ))),
        }
    }
}

/// Outcome of checking a requested status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransition {
    /// The record already holds the requested status; nothing to write.
    Unchanged,
    /// Persist the new status.
    Apply {
        /// True on a move into `accepted` from another status.
        first_acceptance: bool,
    },
}

impl TransitionPolicy {
    /// Decide whether `current -> next` may be written.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the strict policy forbids leaving a terminal
    /// state.
    ///
    /// # Examples
    /// ```
    /// use skillx::domain::{RequestStatus, StatusTransition, TransitionPolicy};
    ///
    /// let step = TransitionPolicy::Strict
    ///     .plan(RequestStatus::Pending, RequestStatus::Accepted)
    ///     .expect("pending may be decided");
    /// assert_eq!(step, StatusTransition::Apply { first_acceptance: true });
    ///
    /// assert!(TransitionPolicy::Strict
    ///     .plan(RequestStatus::Rejected, RequestStatus::Accepted)
    ///     .is_err());
    /// ```
    pub fn plan(
        self,
        current: RequestStatus,
        next: RequestStatus,
    ) -> Result<StatusTransition, Error> {
        if current == next {
            return Ok(StatusTransition::Unchanged);
        }
        if self == Self::Strict && current.is_terminal() {
            return Err(Error::conflict(format!(
                "status is already {current} and cannot change to {next}"
            ))
            .with_details(json!({
                "field": "status",
                "current": current.as_str(),
                "requested": next.as_str(),
                "code": "terminal_state",
            })));
        }
        Ok(StatusTransition::Apply {
            first_acceptance: next == RequestStatus::Accepted,
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    use RequestStatus::{Accepted, Pending, Rejected};

    #[rstest]
    #[case("pending", Pending)]
    #[case("accepted", Accepted)]
    #[case("rejected", Rejected)]
    fn parses_known_statuses(#[case] raw: &str, #[case] expected: RequestStatus) {
        assert_eq!(raw.parse::<RequestStatus>().expect("known status"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("done")]
    #[case("Accepted")]
    #[case("")]
    fn rejects_unknown_statuses(#[case] raw: &str) {
        let err = raw.parse::<RequestStatus>().expect_err("unknown status");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["value"], raw);
    }

    #[rstest]
    #[case(Pending, Accepted, StatusTransition::Apply { first_acceptance: true })]
    #[case(Pending, Rejected, StatusTransition::Apply { first_acceptance: false })]
    #[case(Accepted, Accepted, StatusTransition::Unchanged)]
    #[case(Rejected, Rejected, StatusTransition::Unchanged)]
    #[case(Pending, Pending, StatusTransition::Unchanged)]
    fn strict_policy_allows_decisions(
        #[case] current: RequestStatus,
        #[case] next: RequestStatus,
        #[case] expected: StatusTransition,
    ) {
        let step = TransitionPolicy::Strict
            .plan(current, next)
            .expect("transition allowed");
        assert_eq!(step, expected);
    }

    #[rstest]
    #[case(Accepted, Rejected)]
    #[case(Accepted, Pending)]
    #[case(Rejected, Accepted)]
    #[case(Rejected, Pending)]
    fn strict_policy_rejects_leaving_terminal_states(
        #[case] current: RequestStatus,
        #[case] next: RequestStatus,
    ) {
        let err = TransitionPolicy::Strict
            .plan(current, next)
            .expect_err("terminal state is final");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case(Accepted, Rejected, false)]
    #[case(Rejected, Accepted, true)]
    #[case(Accepted, Pending, false)]
    fn permissive_policy_reopens(
        #[case] current: RequestStatus,
        #[case] next: RequestStatus,
        #[case] first_acceptance: bool,
    ) {
        let step = TransitionPolicy::Permissive
            .plan(current, next)
            .expect("permissive allows any move");
        assert_eq!(step, StatusTransition::Apply { first_acceptance });
    }

    #[rstest]
    #[case("strict", TransitionPolicy::Strict)]
    #[case(" Permissive ", TransitionPolicy::Permissive)]
    fn parses_policy_names(#[case] raw: &str, #[case] expected: TransitionPolicy) {
        assert_eq!(raw.parse::<TransitionPolicy>().expect("known policy"), expected);
    }
}
