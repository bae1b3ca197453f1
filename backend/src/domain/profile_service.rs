//! Profile read and upsert service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ProfileCommand, ProfileQuery, UserProfileRepository};
use crate::domain::stats_synchronizer::map_profile_error;
use crate::domain::{EmailAddress, Error, ProfileSubmission, ProfileUpsert, UserProfile};

/// Implements the profile driving ports.
#[derive(Clone)]
pub struct ProfileService<P> {
    profiles: Arc<P>,
}

impl<P> ProfileService<P> {
    /// Create a service over the given profile repository.
    pub fn new(profiles: Arc<P>) -> Self {
        Self { profiles }
    }
}

#[async_trait]
impl<P> ProfileCommand for ProfileService<P>
where
    P: UserProfileRepository,
{
    async fn upsert(&self, submission: ProfileSubmission) -> Result<UserProfile, Error> {
        let upsert = ProfileUpsert::try_from(submission)?;
        let profile = self
            .profiles
            .upsert(&upsert)
            .await
            .map_err(map_profile_error)?;
        info!(email = %profile.email, "profile saved");
        Ok(profile)
    }
}

#[async_trait]
impl<P> ProfileQuery for ProfileService<P>
where
    P: UserProfileRepository,
{
    async fn by_email(&self, email: &EmailAddress) -> Result<UserProfile, Error> {
        self.profiles
            .find_by_email(email)
            .await
            .map_err(map_profile_error)?
            .ok_or_else(|| Error::not_found("Profile not found"))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockUserProfileRepository, UserProfileRepositoryError};
    use crate::domain::{ErrorCode, ProfileStats, UserProfileId};

    fn profile_from(upsert: &ProfileUpsert) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: UserProfileId::random(),
            email: upsert.email.clone(),
            name: upsert.name.clone(),
            role: upsert.role.clone(),
            location: upsert.location.clone(),
            bio: upsert.bio.clone(),
            skills: upsert.skills.clone().unwrap_or_default(),
            stats: upsert.stats.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_normalises_before_storage() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_upsert()
            .withf(|upsert| {
                upsert.email.as_str() == "ada@x.com"
                    && upsert.skills.as_deref() == Some(&["Rust".to_owned(), "Go".to_owned()][..])
                    && upsert.stats.is_none()
            })
            .times(1)
            .returning(|upsert| Ok(profile_from(upsert)));

        let service = ProfileService::new(Arc::new(repo));
        let saved = service
            .upsert(ProfileSubmission {
                email: " Ada@X.com".to_owned(),
                name: "Ada".to_owned(),
                skills: Some(vec![
                    "Rust".to_owned(),
                    " Go ".to_owned(),
                    "Rust".to_owned(),
                    String::new(),
                ]),
                ..ProfileSubmission::default()
            })
            .await
            .expect("profile saved");

        assert_eq!(saved.stats, ProfileStats::default());
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_requires_email() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_upsert().never();
        let service = ProfileService::new(Arc::new(repo));

        let err = service
            .upsert(ProfileSubmission {
                name: "Ada".to_owned(),
                ..ProfileSubmission::default()
            })
            .await
            .expect_err("missing email");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Ok(None));
        let service = ProfileService::new(Arc::new(repo));

        let email = EmailAddress::new("nobody@x.com").expect("valid email");
        let err = service.by_email(&email).await.expect_err("absent");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "Profile not found");
    }

    #[rstest]
    #[tokio::test]
    async fn lookup_maps_connection_failures() {
        let mut repo = MockUserProfileRepository::new();
        repo.expect_find_by_email()
            .times(1)
            .return_once(|_| Err(UserProfileRepositoryError::connection("down")));
        let service = ProfileService::new(Arc::new(repo));

        let email = EmailAddress::new("ada@x.com").expect("valid email");
        let err = service.by_email(&email).await.expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
