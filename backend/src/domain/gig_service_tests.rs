//! Tests for the gig service.

use std::sync::Arc;

use chrono::Utc;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockGigRepository, MockStatsOutbox, StatsOutboxError};
use crate::domain::{Budget, EmailAddress, ErrorCode};

#[fixture]
fn submission() -> GigSubmission {
    GigSubmission {
        title: "Landing page".to_owned(),
        category: "Web".to_owned(),
        description: "Build a landing page".to_owned(),
        budget: 300.0,
        duration: "1 week".to_owned(),
        posted_by: Some("U1@x.com".to_owned()),
        ..GigSubmission::default()
    }
}

fn stored(draft: &GigDraft) -> Gig {
    let now = Utc::now();
    Gig {
        id: GigId::random(),
        title: draft.title.clone(),
        category: draft.category.clone(),
        gig_type: draft.gig_type.clone(),
        skills: draft.skills.clone(),
        description: draft.description.clone(),
        budget: draft.budget,
        duration: draft.duration.clone(),
        location: draft.location.clone(),
        posted_by: draft.posted_by.clone(),
        created_at: now,
        updated_at: now,
    }
}

fn owner() -> EmailAddress {
    EmailAddress::new("u1@x.com").expect("valid email")
}

#[rstest]
#[tokio::test]
async fn create_publishes_gig_posted_for_owner(submission: GigSubmission) {
    let mut repo = MockGigRepository::new();
    repo.expect_insert().times(1).returning(|draft| Ok(stored(draft)));
    let mut outbox = MockStatsOutbox::new();
    outbox
        .expect_publish()
        .withf(|event| *event == StatsEvent::GigPosted { owner: owner() })
        .times(1)
        .return_once(|_| Ok(()));

    let service = GigService::new(Arc::new(repo), Arc::new(outbox));
    let gig = service.create(submission).await.expect("gig created");

    assert_eq!(gig.posted_by, Some(owner()));
    assert_eq!(gig.location, "Remote");
}

#[rstest]
#[tokio::test]
async fn create_anonymous_gig_skips_stats(mut submission: GigSubmission) {
    submission.posted_by = None;
    let mut repo = MockGigRepository::new();
    repo.expect_insert().times(1).returning(|draft| Ok(stored(draft)));
    let mut outbox = MockStatsOutbox::new();
    outbox.expect_publish().never();

    let service = GigService::new(Arc::new(repo), Arc::new(outbox));
    service.create(submission).await.expect("gig created");
}

#[rstest]
#[tokio::test]
async fn create_survives_outbox_failure(submission: GigSubmission) {
    let mut repo = MockGigRepository::new();
    repo.expect_insert().times(1).returning(|draft| Ok(stored(draft)));
    let mut outbox = MockStatsOutbox::new();
    outbox
        .expect_publish()
        .times(1)
        .return_once(|_| Err(StatsOutboxError::closed()));

    let service = GigService::new(Arc::new(repo), Arc::new(outbox));
    assert!(service.create(submission).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_submission_before_storage(mut submission: GigSubmission) {
    submission.budget = -5.0;
    let mut repo = MockGigRepository::new();
    repo.expect_insert().never();

    let service = GigService::new(Arc::new(repo), Arc::new(MockStatsOutbox::new()));
    let err = service.create(submission).await.expect_err("invalid budget");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn delete_publishes_gig_removed(submission: GigSubmission) {
    let draft = GigDraft::try_from(submission).expect("valid draft");
    let gig = stored(&draft);
    let id = gig.id;
    let mut repo = MockGigRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(move |_| Ok(Some(gig)));
    let mut outbox = MockStatsOutbox::new();
    outbox
        .expect_publish()
        .withf(|event| *event == StatsEvent::GigRemoved { owner: owner() })
        .times(1)
        .return_once(|_| Ok(()));

    let service = GigService::new(Arc::new(repo), Arc::new(outbox));
    let removed = service.delete(&id).await.expect("gig deleted");
    assert_eq!(removed.id, id);
}

#[rstest]
#[tokio::test]
async fn delete_missing_gig_is_not_found() {
    let mut repo = MockGigRepository::new();
    repo.expect_delete().times(1).return_once(|_| Ok(None));
    let mut outbox = MockStatsOutbox::new();
    outbox.expect_publish().never();

    let service = GigService::new(Arc::new(repo), Arc::new(outbox));
    let err = service
        .delete(&GigId::random())
        .await
        .expect_err("missing gig");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(GigRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(GigRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn get_maps_repository_errors(
    #[case] failure: GigRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockGigRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Err(failure));

    let service = GigService::new(Arc::new(repo), Arc::new(MockStatsOutbox::new()));
    let err = service
        .get(&GigId::random())
        .await
        .expect_err("repository failure");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn get_returns_stored_gig(submission: GigSubmission) {
    let draft = GigDraft::try_from(submission).expect("valid draft");
    let gig = stored(&draft);
    let expected = gig.clone();
    let mut repo = MockGigRepository::new();
    repo.expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(gig)));

    let service = GigService::new(Arc::new(repo), Arc::new(MockStatsOutbox::new()));
    let found = service.get(&expected.id).await.expect("gig found");
    assert_eq!(found, expected);
    assert_eq!(found.budget, Budget::new(300.0).expect("valid budget"));
}
