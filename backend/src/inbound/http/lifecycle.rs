//! Request shapes shared by the exchange-request and gig-application
//! endpoints: status updates and the optional `email` listing filter.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{EmailAddress, Error, RequestStatus};
use crate::inbound::http::validation::{FieldName, require_field};

/// Body of a `PATCH` moving a record through its lifecycle.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[schema(value_type = Option<crate::inbound::http::schemas::RequestStatusSchema>)]
    pub status: Option<String>,
}

impl StatusUpdateRequest {
    pub(crate) fn parse(self) -> Result<RequestStatus, Error> {
        let raw = require_field(self.status, FieldName::new("status"))?;
        RequestStatus::from_str(&raw)
    }
}

/// `?email=` filter selecting one user's received and sent records.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Caller identity; omit to list everything.
    pub email: Option<String>,
}

impl EmailQuery {
    /// Normalized caller email, or `None` when absent or blank.
    pub(crate) fn identity(&self) -> Result<Option<EmailAddress>, Error> {
        self.email
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(EmailAddress::parse)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("pending", RequestStatus::Pending)]
    #[case("accepted", RequestStatus::Accepted)]
    #[case("rejected", RequestStatus::Rejected)]
    fn parses_lifecycle_states(#[case] raw: &str, #[case] expected: RequestStatus) {
        let request = StatusUpdateRequest {
            status: Some(raw.to_owned()),
        };
        assert_eq!(request.parse().expect("valid status"), expected);
    }

    #[rstest]
    fn missing_status_names_field() {
        let err = StatusUpdateRequest::default().parse().expect_err("missing");
        assert_eq!(err.details().expect("details")["code"], "missing_field");
    }

    #[rstest]
    #[case("completed")]
    #[case("Accepted")]
    fn unknown_status_is_invalid(#[case] raw: &str) {
        let err = StatusUpdateRequest {
            status: Some(raw.to_owned()),
        }
        .parse()
        .expect_err("invalid");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.details().expect("details")["value"], raw);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  "))]
    fn blank_email_means_no_identity(#[case] raw: Option<&str>) {
        let query = EmailQuery {
            email: raw.map(str::to_owned),
        };
        assert!(query.identity().expect("valid").is_none());
    }

    #[rstest]
    fn email_is_normalized() {
        let query = EmailQuery {
            email: Some(" Ada@X.com ".to_owned()),
        };
        let email = query.identity().expect("valid").expect("present");
        assert_eq!(email.as_str(), "ada@x.com");
    }
}
