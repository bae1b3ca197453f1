//! Behaviour of the in-memory store.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::MemoryStore;
use crate::domain::ports::{
    ExchangeRequestRepository, GigApplicationRepository, GigApplicationRepositoryError,
    GigRepository, UserProfileRepository,
};
use crate::domain::{
    Budget, EmailAddress, ExchangeRequestDraft, GigApplicationDraft, GigDraft, GigId,
    ProfileStats, ProfileUpsert, RequestStatus, StatAdjustment, StatField,
};

/// Clock that stands still until told to move.
struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    fn advance_seconds(&self, seconds: i64) {
        let mut now = self.0.lock().expect("clock mutex");
        *now += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

#[fixture]
fn clock() -> Arc<MutableClock> {
    let start = Utc
        .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid instant");
    Arc::new(MutableClock::new(start))
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

fn gig_draft(title: &str) -> GigDraft {
    GigDraft {
        title: title.to_owned(),
        category: "Design".to_owned(),
        gig_type: "One-time Project".to_owned(),
        skills: Vec::new(),
        description: "Work".to_owned(),
        budget: Budget::new(10.0).expect("valid budget"),
        duration: "1 day".to_owned(),
        location: "Remote".to_owned(),
        posted_by: Some(email("u1@x.com")),
    }
}

fn request_draft(from: &str, to: &str) -> ExchangeRequestDraft {
    ExchangeRequestDraft {
        from_email: email(from),
        to_email: email(to),
        message: String::new(),
    }
}

fn application_draft(gig_id: GigId, applicant: &str) -> GigApplicationDraft {
    GigApplicationDraft {
        gig_id,
        gig_title: "Logo".to_owned(),
        gig_owner_email: Some(email("u1@x.com")),
        applicant_email: email(applicant),
        message: None,
    }
}

#[rstest]
#[tokio::test]
async fn gigs_list_newest_first(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock.clone());
    GigRepository::insert(&store, &gig_draft("first"))
        .await
        .expect("insert");
    clock.advance_seconds(5);
    GigRepository::insert(&store, &gig_draft("second"))
        .await
        .expect("insert");

    let titles: Vec<String> = GigRepository::list(&store)
        .await
        .expect("list")
        .into_iter()
        .map(|gig| gig.title)
        .collect();
    assert_eq!(titles, ["second", "first"]);
}

#[rstest]
#[tokio::test]
async fn timestamp_ties_fall_back_to_insertion_order(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock);
    for title in ["a", "b", "c"] {
        GigRepository::insert(&store, &gig_draft(title))
            .await
            .expect("insert");
    }

    let titles: Vec<String> = GigRepository::list(&store)
        .await
        .expect("list")
        .into_iter()
        .map(|gig| gig.title)
        .collect();
    assert_eq!(titles, ["c", "b", "a"]);
}

#[rstest]
#[tokio::test]
async fn delete_returns_removed_gig_once(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock);
    let gig = GigRepository::insert(&store, &gig_draft("gone"))
        .await
        .expect("insert");

    let removed = GigRepository::delete(&store, &gig.id).await.expect("delete");
    assert_eq!(removed.map(|g| g.id), Some(gig.id));
    assert!(
        GigRepository::delete(&store, &gig.id)
            .await
            .expect("delete")
            .is_none()
    );
    assert_eq!(GigRepository::count(&store).await.expect("count"), 0);
}

#[rstest]
#[tokio::test]
async fn received_requests_exclude_self_addressed(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock);
    ExchangeRequestRepository::insert(&store, &request_draft("a@x.com", "a@x.com"))
        .await
        .expect("insert");
    ExchangeRequestRepository::insert(&store, &request_draft("b@x.com", "a@x.com"))
        .await
        .expect("insert");

    let received = ExchangeRequestRepository::list_received(&store, &email("a@x.com"))
        .await
        .expect("received");
    let sent = ExchangeRequestRepository::list_sent(&store, &email("a@x.com"))
        .await
        .expect("sent");

    assert_eq!(received.len(), 1);
    assert_eq!(received[0].from_email, email("b@x.com"));
    assert_eq!(sent.len(), 1);
}

#[rstest]
#[tokio::test]
async fn status_compare_and_set_rejects_stale_expectation(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock.clone());
    let request = ExchangeRequestRepository::insert(&store, &request_draft("a@x.com", "b@x.com"))
        .await
        .expect("insert");
    clock.advance_seconds(1);

    let accepted = ExchangeRequestRepository::update_status(
        &store,
        &request.id,
        RequestStatus::Pending,
        RequestStatus::Accepted,
    )
    .await
    .expect("update")
    .expect("matched");
    assert_eq!(accepted.status, RequestStatus::Accepted);
    assert!(accepted.updated_at > accepted.created_at);

    let stale = ExchangeRequestRepository::update_status(
        &store,
        &request.id,
        RequestStatus::Pending,
        RequestStatus::Rejected,
    )
    .await
    .expect("update");
    assert!(stale.is_none());
}

#[rstest]
#[tokio::test]
async fn duplicate_application_is_refused(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock);
    let gig_id = GigId::random();
    GigApplicationRepository::insert(&store, &application_draft(gig_id, "u2@x.com"))
        .await
        .expect("first application");

    let err = GigApplicationRepository::insert(&store, &application_draft(gig_id, "u2@x.com"))
        .await
        .expect_err("duplicate");
    assert!(matches!(err, GigApplicationRepositoryError::Duplicate { .. }));

    GigApplicationRepository::insert(&store, &application_draft(gig_id, "u3@x.com"))
        .await
        .expect("other applicant");
    let for_gig = GigApplicationRepository::list_for_gig(&store, &gig_id)
        .await
        .expect("list");
    assert_eq!(for_gig.len(), 2);
}

#[rstest]
#[tokio::test]
async fn applications_received_by_gig_owner(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock);
    GigApplicationRepository::insert(&store, &application_draft(GigId::random(), "u2@x.com"))
        .await
        .expect("insert");

    let received = GigApplicationRepository::list_received(&store, &email("u1@x.com"))
        .await
        .expect("received");
    let sent = GigApplicationRepository::list_sent(&store, &email("u1@x.com"))
        .await
        .expect("sent");

    assert_eq!(received.len(), 1);
    assert!(sent.is_empty());
}

#[rstest]
#[tokio::test]
async fn adjust_creates_profile_and_clamps_at_zero(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock);
    let adjustment = |delta| StatAdjustment {
        email: email("new@x.com"),
        field: StatField::GigsPosted,
        delta,
    };

    store.adjust_stat(&adjustment(-1)).await.expect("adjust");
    store.adjust_stat(&adjustment(1)).await.expect("adjust");
    store.adjust_stat(&adjustment(1)).await.expect("adjust");

    let profile = store
        .find_by_email(&email("new@x.com"))
        .await
        .expect("lookup")
        .expect("created implicitly");
    assert_eq!(profile.stats.gigs_posted, 2);
    assert_eq!(profile.name, "");
    assert_eq!(UserProfileRepository::count(&store).await.expect("count"), 1);
}

#[rstest]
#[tokio::test]
async fn upsert_keeps_counters_unless_stats_supplied(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock);
    store
        .adjust_stat(&StatAdjustment {
            email: email("ada@x.com"),
            field: StatField::SkillExchanges,
            delta: 1,
        })
        .await
        .expect("adjust");

    let mut upsert = ProfileUpsert {
        email: email("ada@x.com"),
        name: "Ada".to_owned(),
        role: Some("Engineer".to_owned()),
        location: None,
        bio: None,
        skills: Some(vec!["Rust".to_owned()]),
        stats: None,
    };
    let saved = store.upsert(&upsert).await.expect("upsert");
    assert_eq!(saved.stats.skill_exchanges, 1);
    assert_eq!(saved.role.as_deref(), Some("Engineer"));

    upsert.role = None;
    upsert.stats = Some(ProfileStats {
        gigs_completed: 3,
        ..ProfileStats::default()
    });
    let replaced = store.upsert(&upsert).await.expect("upsert");
    assert_eq!(replaced.stats.skill_exchanges, 0);
    assert_eq!(replaced.stats.gigs_completed, 3);
    assert_eq!(replaced.role.as_deref(), Some("Engineer"));
    assert_eq!(replaced.id, saved.id);
}

#[rstest]
#[tokio::test]
async fn adjust_updates_the_matching_profile_among_many(clock: Arc<MutableClock>) {
    let store = MemoryStore::with_clock(clock);
    let bump = |raw: &str| StatAdjustment {
        email: email(raw),
        field: StatField::SkillExchangesCompleted,
        delta: 1,
    };
    for raw in ["a@x.com", "b@x.com", "c@x.com", "b@x.com"] {
        store.adjust_stat(&bump(raw)).await.expect("adjust");
    }

    for (raw, expected) in [("a@x.com", 1), ("b@x.com", 2), ("c@x.com", 1)] {
        let profile = store
            .find_by_email(&email(raw))
            .await
            .expect("lookup")
            .expect("profile exists");
        assert_eq!(profile.stats.skill_exchanges_completed, expected, "{raw}");
    }
    assert_eq!(UserProfileRepository::count(&store).await.expect("count"), 3);
}
