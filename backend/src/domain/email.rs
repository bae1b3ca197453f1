//! Caller-asserted identity expressed as a normalised email address.

use serde::{Deserialize, Serialize};

use super::Error;

/// Normalised email address used as the identity key across the marketplace.
///
/// Construction trims surrounding whitespace and lower-cases the value so two
/// spellings of the same address compare equal. No further syntax checks are
/// applied; identity is whatever the caller asserts.
///
/// # Examples
/// ```
/// use skillx::domain::EmailAddress;
///
/// let email = EmailAddress::parse("  Ada@Example.COM ").expect("non-empty");
/// assert_eq!(email.as_str(), "ada@example.com");
/// assert!(EmailAddress::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

/// Validation failure raised for blank addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("email address must not be empty")]
pub struct EmptyEmailError;

impl EmailAddress {
    /// Normalise and validate an address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmptyEmailError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(EmptyEmailError);
        }
        Ok(Self(normalised))
    }

    /// Normalise an address, reporting blanks as a domain validation error.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, Error> {
        Self::new(raw).map_err(|err| Error::invalid_request(err.to_string()))
    }

    /// Borrow the normalised address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmptyEmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}
