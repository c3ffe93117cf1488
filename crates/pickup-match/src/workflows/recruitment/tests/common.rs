use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::workflows::recruitment::domain::{
    ApplicantProfile, ApplicationId, ApplicationRecord, CapacityPolicy, Posting, PostingDraft,
    PostingId,
};
use crate::workflows::recruitment::memory::{
    InMemoryApplicationRepository, InMemoryNotifications, InMemoryPostingRepository,
};
use crate::workflows::recruitment::repository::{
    ApplicationRepository, Notification, NotificationError, NotificationPublisher,
    PostingRepository, RepositoryError,
};
use crate::workflows::recruitment::service::MatchingService;
use crate::workflows::recruitment::InMemoryMatchingService;

pub(super) type MemoryService = InMemoryMatchingService;

pub(super) fn draft() -> PostingDraft {
    PostingDraft {
        title: "Thursday night futsal".to_string(),
        team_name: "FC Seolleung United".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 7, 15),
        time: NaiveTime::from_hms_opt(19, 0, 0),
        location: "Seolleung Futsal Park".to_string(),
        required_players: 2,
        description: "Friendly match, all levels".to_string(),
        requirements: None,
    }
}

pub(super) fn draft_for_team(team_name: &str, required_players: u8) -> PostingDraft {
    let mut draft = draft();
    draft.team_name = team_name.to_string();
    draft.required_players = required_players;
    draft
}

pub(super) fn applicant(name: &str, manner_temperature: f64) -> ApplicantProfile {
    ApplicantProfile {
        name: name.to_string(),
        age: 28,
        position: "MF".to_string(),
        location: "Gangnam-gu".to_string(),
        manner_temperature,
        total_matches: 10,
        rating: 4.5,
    }
}

pub(super) fn build_service(
    policy: CapacityPolicy,
) -> (
    MemoryService,
    Arc<InMemoryPostingRepository>,
    Arc<InMemoryNotifications>,
) {
    let postings = Arc::new(InMemoryPostingRepository::default());
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let notifications = Arc::new(InMemoryNotifications::default());
    let service = MatchingService::new(
        postings.clone(),
        applications,
        notifications.clone(),
        policy,
    );
    (service, postings, notifications)
}

pub(super) fn posting_with_applicants(
    service: &MemoryService,
    count: usize,
) -> (Posting, Vec<ApplicationRecord>) {
    let posting = service.create_posting(draft()).expect("draft is valid");
    let records = (0..count)
        .map(|index| {
            service
                .submit_application(&posting.id, applicant(&format!("player-{index}"), 37.2))
                .expect("submission accepted")
        })
        .collect();
    let posting = service.get_posting(&posting.id).expect("posting stored");
    (posting, records)
}

pub(super) struct FailingNotifications;

impl NotificationPublisher for FailingNotifications {
    fn publish(&self, _notification: Notification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("push gateway offline".to_string()))
    }
}

pub(super) struct UnavailablePostings;

impl PostingRepository for UnavailablePostings {
    fn insert(&self, _posting: Posting) -> Result<Posting, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _posting: Posting) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &PostingId) -> Result<Option<Posting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<Posting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) struct ReadOnlyApplications;

impl ApplicationRepository for ReadOnlyApplications {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn update(&self, _record: ApplicationRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(None)
    }

    fn for_posting(
        &self,
        _posting_id: &PostingId,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

/// Stores and reads postings but refuses every counter update.
#[derive(Default)]
pub(super) struct FrozenCounters {
    inner: InMemoryPostingRepository,
}

impl PostingRepository for FrozenCounters {
    fn insert(&self, posting: Posting) -> Result<Posting, RepositoryError> {
        self.inner.insert(posting)
    }

    fn update(&self, _posting: Posting) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("counters locked".to_string()))
    }

    fn fetch(&self, id: &PostingId) -> Result<Option<Posting>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn all(&self) -> Result<Vec<Posting>, RepositoryError> {
        self.inner.all()
    }
}
