//! Collections and port implementations for [`MemoryStore`].

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    ExchangeRequestRepository, ExchangeRequestRepositoryError, GigApplicationRepository,
    GigApplicationRepositoryError, GigRepository, GigRepositoryError, SkillExchangeRepository,
    SkillExchangeRepositoryError, UserProfileRepository, UserProfileRepositoryError,
};
use crate::domain::{
    EmailAddress, ExchangeRequest, ExchangeRequestDraft, ExchangeRequestId, Gig, GigApplication,
    GigApplicationDraft, GigApplicationId, GigDraft, GigId, ProfileStats, ProfileUpsert,
    RequestStatus, SkillExchange, SkillExchangeDraft, SkillExchangeId, StatAdjustment,
    UserProfile, UserProfileId,
};

/// A record plus its insertion sequence, used to break timestamp ties.
#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    record: T,
}

#[derive(Debug, Default)]
struct Collections {
    next_seq: u64,
    gigs: Vec<Slot<Gig>>,
    skill_exchanges: Vec<Slot<SkillExchange>>,
    exchange_requests: Vec<Slot<ExchangeRequest>>,
    gig_applications: Vec<Slot<GigApplication>>,
    profiles: Vec<Slot<UserProfile>>,
}

impl Collections {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// Thread-safe in-memory marketplace store.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store stamped by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Empty store stamped by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collections::default())),
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    fn read<E>(
        &self,
        poisoned: impl FnOnce(&'static str) -> E,
    ) -> Result<RwLockReadGuard<'_, Collections>, E> {
        self.inner
            .read()
            .map_err(|_| poisoned("memory store lock poisoned"))
    }

    fn write<E>(
        &self,
        poisoned: impl FnOnce(&'static str) -> E,
    ) -> Result<RwLockWriteGuard<'_, Collections>, E> {
        self.inner
            .write()
            .map_err(|_| poisoned("memory store lock poisoned"))
    }
}

/// Records newest first: by creation instant, then by insertion order.
fn newest_first<'a, T, F>(slots: impl Iterator<Item = &'a Slot<T>>, created_at: F) -> Vec<T>
where
    T: Clone + 'a,
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut selected: Vec<&Slot<T>> = slots.collect();
    selected.sort_by(|a, b| (created_at(&b.record), b.seq).cmp(&(created_at(&a.record), a.seq)));
    selected.into_iter().map(|slot| slot.record.clone()).collect()
}

fn count_of<T>(slots: &[Slot<T>]) -> u64 {
    u64::try_from(slots.len()).unwrap_or(u64::MAX)
}

#[async_trait]
impl GigRepository for MemoryStore {
    async fn insert(&self, draft: &GigDraft) -> Result<Gig, GigRepositoryError> {
        let now = self.now();
        let mut store = self.write(GigRepositoryError::query)?;
        let gig = Gig {
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
        };
        let seq = store.next_seq();
        store.gigs.push(Slot {
            seq,
            record: gig.clone(),
        });
        Ok(gig)
    }

    async fn list(&self) -> Result<Vec<Gig>, GigRepositoryError> {
        let store = self.read(GigRepositoryError::query)?;
        Ok(newest_first(store.gigs.iter(), |g| g.created_at))
    }

    async fn find_by_id(&self, id: &GigId) -> Result<Option<Gig>, GigRepositoryError> {
        let store = self.read(GigRepositoryError::query)?;
        Ok(store
            .gigs
            .iter()
            .find(|slot| slot.record.id == *id)
            .map(|slot| slot.record.clone()))
    }

    async fn delete(&self, id: &GigId) -> Result<Option<Gig>, GigRepositoryError> {
        let mut store = self.write(GigRepositoryError::query)?;
        let position = store.gigs.iter().position(|slot| slot.record.id == *id);
        Ok(position.map(|index| store.gigs.remove(index).record))
    }

    async fn count(&self) -> Result<u64, GigRepositoryError> {
        let store = self.read(GigRepositoryError::query)?;
        Ok(count_of(&store.gigs))
    }
}

#[async_trait]
impl SkillExchangeRepository for MemoryStore {
    async fn insert(
        &self,
        draft: &SkillExchangeDraft,
    ) -> Result<SkillExchange, SkillExchangeRepositoryError> {
        let now = self.now();
        let mut store = self.write(SkillExchangeRepositoryError::query)?;
        let entry = SkillExchange {
            id: SkillExchangeId::random(),
            name: draft.name.clone(),
            owner_email: draft.owner_email.clone(),
            skill_offered: draft.skill_offered.clone(),
            skill_wanted: draft.skill_wanted.clone(),
            location: draft.location.clone(),
            match_score: draft.match_score,
            created_at: now,
        };
        let seq = store.next_seq();
        store.skill_exchanges.push(Slot {
            seq,
            record: entry.clone(),
        });
        Ok(entry)
    }

    async fn list(&self) -> Result<Vec<SkillExchange>, SkillExchangeRepositoryError> {
        let store = self.read(SkillExchangeRepositoryError::query)?;
        Ok(newest_first(store.skill_exchanges.iter(), |e| e.created_at))
    }

    async fn count(&self) -> Result<u64, SkillExchangeRepositoryError> {
        let store = self.read(SkillExchangeRepositoryError::query)?;
        Ok(count_of(&store.skill_exchanges))
    }
}

#[async_trait]
impl ExchangeRequestRepository for MemoryStore {
    async fn insert(
        &self,
        draft: &ExchangeRequestDraft,
    ) -> Result<ExchangeRequest, ExchangeRequestRepositoryError> {
        let now = self.now();
        let mut store = self.write(ExchangeRequestRepositoryError::query)?;
        let request = ExchangeRequest {
            id: ExchangeRequestId::random(),
            from_email: draft.from_email.clone(),
            to_email: draft.to_email.clone(),
            message: draft.message.clone(),
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let seq = store.next_seq();
        store.exchange_requests.push(Slot {
            seq,
            record: request.clone(),
        });
        Ok(request)
    }

    async fn find_by_id(
        &self,
        id: &ExchangeRequestId,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let store = self.read(ExchangeRequestRepositoryError::query)?;
        Ok(store
            .exchange_requests
            .iter()
            .find(|slot| slot.record.id == *id)
            .map(|slot| slot.record.clone()))
    }

    async fn update_status(
        &self,
        id: &ExchangeRequestId,
        expected: RequestStatus,
        next: RequestStatus,
    ) -> Result<Option<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let now = self.now();
        let mut store = self.write(ExchangeRequestRepositoryError::query)?;
        let slot = store
            .exchange_requests
            .iter_mut()
            .find(|slot| slot.record.id == *id && slot.record.status == expected);
        Ok(slot.map(|slot| {
            slot.record.status = next;
            slot.record.updated_at = now;
            slot.record.clone()
        }))
    }

    async fn list_received(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let store = self.read(ExchangeRequestRepositoryError::query)?;
        Ok(newest_first(
            store
                .exchange_requests
                .iter()
                .filter(|slot| slot.record.to_email == *email && slot.record.from_email != *email),
            |r| r.created_at,
        ))
    }

    async fn list_sent(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let store = self.read(ExchangeRequestRepositoryError::query)?;
        Ok(newest_first(
            store
                .exchange_requests
                .iter()
                .filter(|slot| slot.record.from_email == *email),
            |r| r.created_at,
        ))
    }

    async fn list_all(&self) -> Result<Vec<ExchangeRequest>, ExchangeRequestRepositoryError> {
        let store = self.read(ExchangeRequestRepositoryError::query)?;
        Ok(newest_first(store.exchange_requests.iter(), |r| r.created_at))
    }
}

#[async_trait]
impl GigApplicationRepository for MemoryStore {
    async fn insert(
        &self,
        draft: &GigApplicationDraft,
    ) -> Result<GigApplication, GigApplicationRepositoryError> {
        let now = self.now();
        let mut store = self.write(GigApplicationRepositoryError::query)?;
        let taken = store.gig_applications.iter().any(|slot| {
            slot.record.gig_id == draft.gig_id
                && slot.record.applicant_email == draft.applicant_email
        });
        if taken {
            return Err(GigApplicationRepositoryError::duplicate(
                draft.gig_id.to_string(),
                draft.applicant_email.as_str(),
            ));
        }
        let application = GigApplication {
            id: GigApplicationId::random(),
            gig_id: draft.gig_id,
            gig_title: draft.gig_title.clone(),
            gig_owner_email: draft.gig_owner_email.clone(),
            applicant_email: draft.applicant_email.clone(),
            message: draft.message.clone(),
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let seq = store.next_seq();
        store.gig_applications.push(Slot {
            seq,
            record: application.clone(),
        });
        Ok(application)
    }

    async fn find_by_id(
        &self,
        id: &GigApplicationId,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError> {
        let store = self.read(GigApplicationRepositoryError::query)?;
        Ok(store
            .gig_applications
            .iter()
            .find(|slot| slot.record.id == *id)
            .map(|slot| slot.record.clone()))
    }

    async fn find_by_gig_and_applicant(
        &self,
        gig_id: &GigId,
        applicant: &EmailAddress,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError> {
        let store = self.read(GigApplicationRepositoryError::query)?;
        Ok(store
            .gig_applications
            .iter()
            .find(|slot| slot.record.gig_id == *gig_id && slot.record.applicant_email == *applicant)
            .map(|slot| slot.record.clone()))
    }

    async fn update_status(
        &self,
        id: &GigApplicationId,
        expected: RequestStatus,
        next: RequestStatus,
    ) -> Result<Option<GigApplication>, GigApplicationRepositoryError> {
        let now = self.now();
        let mut store = self.write(GigApplicationRepositoryError::query)?;
        let slot = store
            .gig_applications
            .iter_mut()
            .find(|slot| slot.record.id == *id && slot.record.status == expected);
        Ok(slot.map(|slot| {
            slot.record.status = next;
            slot.record.updated_at = now;
            slot.record.clone()
        }))
    }

    async fn list_received(
        &self,
        owner: &EmailAddress,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
        let store = self.read(GigApplicationRepositoryError::query)?;
        Ok(newest_first(
            store
                .gig_applications
                .iter()
                .filter(|slot| slot.record.gig_owner_email.as_ref() == Some(owner)),
            |a| a.created_at,
        ))
    }

    async fn list_sent(
        &self,
        applicant: &EmailAddress,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
        let store = self.read(GigApplicationRepositoryError::query)?;
        Ok(newest_first(
            store
                .gig_applications
                .iter()
                .filter(|slot| slot.record.applicant_email == *applicant),
            |a| a.created_at,
        ))
    }

    async fn list_for_gig(
        &self,
        gig_id: &GigId,
    ) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
        let store = self.read(GigApplicationRepositoryError::query)?;
        Ok(newest_first(
            store
                .gig_applications
                .iter()
                .filter(|slot| slot.record.gig_id == *gig_id),
            |a| a.created_at,
        ))
    }

    async fn list_all(&self) -> Result<Vec<GigApplication>, GigApplicationRepositoryError> {
        let store = self.read(GigApplicationRepositoryError::query)?;
        Ok(newest_first(store.gig_applications.iter(), |a| a.created_at))
    }
}

fn blank_profile(email: &EmailAddress, now: DateTime<Utc>) -> UserProfile {
    UserProfile {
        id: UserProfileId::random(),
        email: email.clone(),
        name: String::new(),
        role: None,
        location: None,
        bio: None,
        skills: Vec::new(),
        stats: ProfileStats::default(),
        created_at: now,
        updated_at: now,
    }
}

/// Find the profile for `email`, creating an empty one when absent.
fn profile_entry<'a>(
    store: &'a mut Collections,
    email: &EmailAddress,
    now: DateTime<Utc>,
) -> Result<&'a mut UserProfile, UserProfileRepositoryError> {
    let existing = store
        .profiles
        .iter()
        .position(|slot| slot.record.email == *email);
    let slot = match existing {
        Some(index) => store.profiles.get_mut(index),
        None => {
            let seq = store.next_seq();
            store.profiles.push(Slot {
                seq,
                record: blank_profile(email, now),
            });
            store.profiles.last_mut()
        }
    };
    slot.map(|slot| &mut slot.record).ok_or_else(|| {
        UserProfileRepositoryError::query(format!("profile slot for {email} is missing"))
    })
}

#[async_trait]
impl UserProfileRepository for MemoryStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserProfile>, UserProfileRepositoryError> {
        let store = self.read(UserProfileRepositoryError::query)?;
        Ok(store
            .profiles
            .iter()
            .find(|slot| slot.record.email == *email)
            .map(|slot| slot.record.clone()))
    }

    async fn upsert(
        &self,
        upsert: &ProfileUpsert,
    ) -> Result<UserProfile, UserProfileRepositoryError> {
        let now = self.now();
        let mut store = self.write(UserProfileRepositoryError::query)?;
        let profile = profile_entry(&mut store, &upsert.email, now)?;
        profile.name.clone_from(&upsert.name);
        if let Some(role) = &upsert.role {
            profile.role = Some(role.clone());
        }
        if let Some(location) = &upsert.location {
            profile.location = Some(location.clone());
        }
        if let Some(bio) = &upsert.bio {
            profile.bio = Some(bio.clone());
        }
        if let Some(skills) = &upsert.skills {
            profile.skills.clone_from(skills);
        }
        if let Some(stats) = upsert.stats {
            profile.stats = stats;
        }
        profile.updated_at = now;
        Ok(profile.clone())
    }

    async fn adjust_stat(
        &self,
        adjustment: &StatAdjustment,
    ) -> Result<(), UserProfileRepositoryError> {
        let now = self.now();
        let mut store = self.write(UserProfileRepositoryError::query)?;
        let profile = profile_entry(&mut store, &adjustment.email, now)?;
        profile.stats.apply(adjustment.field, adjustment.delta);
        profile.updated_at = now;
        Ok(())
    }

    async fn count(&self) -> Result<u64, UserProfileRepositoryError> {
        let store = self.read(UserProfileRepositoryError::query)?;
        Ok(count_of(&store.profiles))
    }
}
