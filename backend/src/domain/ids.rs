//! Store-assigned identifiers for marketplace records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Error;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Parse an identifier supplied by a caller.
            pub fn parse(raw: &str) -> Result<Self, Error> {
                Uuid::parse_str(raw.trim()).map(Self).map_err(|_| {
                    Error::invalid_request(concat!($label, " must be a valid UUID"))
                        .with_details(serde_json::json!({
                            "field": "id",
                            "value": raw,
                            "code": "invalid_id",
                        }))
                })
            }

            /// Access the inner UUID.
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_entity_id!(
    /// Identifier of a posted gig.
    GigId,
    "gig id"
);
define_entity_id!(
    /// Identifier of a skill-exchange entry.
    SkillExchangeId,
    "skill exchange id"
);
define_entity_id!(
    /// Identifier of an exchange request.
    ExchangeRequestId,
    "exchange request id"
);
define_entity_id!(
    /// Identifier of a gig application.
    GigApplicationId,
    "gig application id"
);
define_entity_id!(
    /// Identifier of a user profile; the email remains the lookup key.
    UserProfileId,
    "profile id"
);
