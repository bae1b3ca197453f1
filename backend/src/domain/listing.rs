//! Read-side views over requests and applications.

use super::{EmailAddress, GigId};

/// Which slice of exchange requests a caller wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeRequestScope {
    /// Inbox and outbox of one user.
    ForUser(EmailAddress),
    /// Every request, for listing screens without an identity.
    All,
}

/// Which slice of gig applications a caller wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GigApplicationScope {
    /// Applications received by and sent by one user.
    ForUser(EmailAddress),
    /// Applications to one gig.
    ForGig(GigId),
    /// Every application.
    All,
}

/// Result of a listing query, newest first within each sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestListing<T> {
    /// Records split by the caller's role.
    Inbox {
        /// Records where the caller is the recipient or gig owner.
        received: Vec<T>,
        /// Records the caller originated.
        sent: Vec<T>,
    },
    /// Unsplit records.
    All(Vec<T>),
}
