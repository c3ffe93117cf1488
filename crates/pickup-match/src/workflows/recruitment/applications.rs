use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use super::display::is_fully_booked;
use super::domain::{
    ApplicantProfile, ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSummary,
    CapacityPolicy, Posting, PostingId,
};
use super::error::{MatchingError, NotFoundError};
use super::postings::RecruitmentStore;
use super::repository::{ApplicationRepository, PostingRepository, RepositoryError};

/// Holds applications per posting and drives their approval status.
pub struct ApplicationStore<A, P> {
    repository: Arc<A>,
    postings: Arc<RecruitmentStore<P>>,
    policy: CapacityPolicy,
    sequence: AtomicU64,
}

impl<A, P> ApplicationStore<A, P>
where
    A: ApplicationRepository + 'static,
    P: PostingRepository + 'static,
{
    pub fn new(
        repository: Arc<A>,
        postings: Arc<RecruitmentStore<P>>,
        policy: CapacityPolicy,
    ) -> Self {
        Self {
            repository,
            postings,
            policy,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn policy(&self) -> CapacityPolicy {
        self.policy
    }

    fn next_application_id(&self) -> ApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ApplicationId(format!("app-{id:06}"))
    }

    /// Record a pending application and count it against the posting.
    pub fn submit_application(
        &self,
        posting_id: &PostingId,
        profile: ApplicantProfile,
    ) -> Result<ApplicationRecord, MatchingError> {
        self.submit(posting_id, profile).map(|(record, _)| record)
    }

    /// Same as [`Self::submit_application`], also returning the posting with its new count.
    ///
    /// The counter is raised first and lowered again if the record cannot be stored, so
    /// the stored records and `current_applications` never drift apart.
    pub(crate) fn submit(
        &self,
        posting_id: &PostingId,
        profile: ApplicantProfile,
    ) -> Result<(ApplicationRecord, Posting), MatchingError> {
        let posting = self.postings.get_posting(posting_id)?;

        if self.policy == CapacityPolicy::HardCap && is_fully_booked(&posting) {
            return Err(MatchingError::CapacityExceeded {
                posting_id: posting.id,
                required_players: posting.required_players,
            });
        }

        let counted = self.postings.increment_application_count(&posting.id)?;
        let mut record = ApplicationRecord {
            id: self.next_application_id(),
            posting_id: posting.id.clone(),
            profile,
            applied_at: Utc::now(),
            status: ApplicationStatus::Pending,
        };

        loop {
            match self.repository.insert(record.clone()) {
                Ok(stored) => return Ok((stored, counted)),
                Err(RepositoryError::Conflict) => record.id = self.next_application_id(),
                Err(err) => {
                    if let Err(rollback) = self.postings.decrement_application_count(&posting.id)
                    {
                        warn!(
                            posting_id = %posting.id,
                            error = %rollback,
                            "failed to release application slot"
                        );
                    }
                    return Err(err.into());
                }
            }
        }
    }

    pub fn approve(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, MatchingError> {
        self.transition(application_id, ApplicationStatus::Approved)
    }

    pub fn reject(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, MatchingError> {
        self.transition(application_id, ApplicationStatus::Rejected)
    }

    // Counters are left untouched: capacity tracks submissions, not approvals.
    fn transition(
        &self,
        application_id: &ApplicationId,
        target: ApplicationStatus,
    ) -> Result<ApplicationRecord, MatchingError> {
        let mut record = self.get_application(application_id)?;
        self.postings.get_posting(&record.posting_id)?;

        if record.status != ApplicationStatus::Pending {
            return Err(MatchingError::InvalidState {
                application_id: record.id,
                status: record.status,
            });
        }

        record.status = target;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    pub fn get_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, MatchingError> {
        self.repository
            .fetch(application_id)?
            .ok_or_else(|| NotFoundError::Application(application_id.clone()).into())
    }

    /// Applications for one posting in submission order.
    pub fn list_applications(
        &self,
        posting_id: &PostingId,
    ) -> Result<Vec<ApplicationRecord>, MatchingError> {
        let posting = self.postings.get_posting(posting_id)?;
        Ok(self.repository.for_posting(&posting.id)?)
    }

    pub fn summarize(&self, posting_id: &PostingId) -> Result<ApplicationSummary, MatchingError> {
        let records = self.list_applications(posting_id)?;
        Ok(ApplicationSummary::tally(posting_id.clone(), &records))
    }
}
