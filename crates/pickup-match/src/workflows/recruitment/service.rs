use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::applications::ApplicationStore;
use super::display::{remaining_slots, PostingView};
use super::domain::{
    ApplicantProfile, ApplicationId, ApplicationRecord, ApplicationSummary, CapacityPolicy,
    Posting, PostingDraft, PostingFilter, PostingId,
};
use super::error::MatchingError;
use super::postings::RecruitmentStore;
use super::repository::{
    ApplicationRepository, Notification, NotificationPublisher, PostingRepository,
};

/// Facade composing both stores with the notification hook.
///
/// Mutations are serialized through a single write lock so that a submission's
/// lookup, insert and counter increment are observed as one step.
pub struct MatchingService<P, A, N> {
    postings: Arc<RecruitmentStore<P>>,
    applications: ApplicationStore<A, P>,
    notifications: Arc<N>,
    write_lock: Mutex<()>,
}

impl<P, A, N> MatchingService<P, A, N>
where
    P: PostingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(
        postings: Arc<P>,
        applications: Arc<A>,
        notifications: Arc<N>,
        policy: CapacityPolicy,
    ) -> Self {
        let postings = Arc::new(RecruitmentStore::new(postings));
        let applications = ApplicationStore::new(applications, postings.clone(), policy);
        Self {
            postings,
            applications,
            notifications,
            write_lock: Mutex::new(()),
        }
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.applications.policy()
    }

    fn writer(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create_posting(&self, draft: PostingDraft) -> Result<Posting, MatchingError> {
        let _writer = self.writer();
        let posting = self.postings.create_posting(draft).inspect_err(|err| {
            debug!(error = %err, "posting rejected");
        })?;

        info!(posting_id = %posting.id, team = %posting.team_name, "posting created");
        self.notify(
            "posting_created",
            posting.id.to_string(),
            [
                ("team_name", posting.team_name.clone()),
                ("required_players", posting.required_players.to_string()),
            ],
        );
        Ok(posting)
    }

    pub fn list_postings(&self, filter: &PostingFilter) -> Result<Vec<Posting>, MatchingError> {
        self.postings.list_postings(filter)
    }

    pub fn get_posting(&self, posting_id: &PostingId) -> Result<Posting, MatchingError> {
        self.postings.get_posting(posting_id)
    }

    pub fn posting_view(&self, posting_id: &PostingId) -> Result<PostingView, MatchingError> {
        let posting = self.postings.get_posting(posting_id)?;
        Ok(PostingView::from(&posting))
    }

    pub fn submit_application(
        &self,
        posting_id: &PostingId,
        profile: ApplicantProfile,
    ) -> Result<ApplicationRecord, MatchingError> {
        let _writer = self.writer();
        let (record, posting) = self
            .applications
            .submit(posting_id, profile)
            .inspect_err(|err| {
                debug!(%posting_id, error = %err, "application rejected");
            })?;

        let remaining = remaining_slots(&posting);
        info!(
            application_id = %record.id,
            %posting_id,
            remaining_slots = remaining,
            "application submitted"
        );
        self.notify(
            "application_submitted",
            record.id.to_string(),
            [
                ("posting_id", posting_id.to_string()),
                ("applicant", record.profile.name.clone()),
                ("remaining_slots", remaining.to_string()),
            ],
        );
        Ok(record)
    }

    pub fn approve(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, MatchingError> {
        let _writer = self.writer();
        let record = self.applications.approve(application_id).inspect_err(|err| {
            debug!(%application_id, error = %err, "approve refused");
        })?;
        self.announce_decision("application_approved", &record);
        Ok(record)
    }

    pub fn reject(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, MatchingError> {
        let _writer = self.writer();
        let record = self.applications.reject(application_id).inspect_err(|err| {
            debug!(%application_id, error = %err, "reject refused");
        })?;
        self.announce_decision("application_rejected", &record);
        Ok(record)
    }

    pub fn get_application(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, MatchingError> {
        self.applications.get_application(application_id)
    }

    pub fn list_applications(
        &self,
        posting_id: &PostingId,
    ) -> Result<Vec<ApplicationRecord>, MatchingError> {
        self.applications.list_applications(posting_id)
    }

    pub fn summarize(&self, posting_id: &PostingId) -> Result<ApplicationSummary, MatchingError> {
        self.applications.summarize(posting_id)
    }

    fn announce_decision(&self, template: &str, record: &ApplicationRecord) {
        info!(
            application_id = %record.id,
            posting_id = %record.posting_id,
            status = record.status.label(),
            "application decided"
        );
        self.notify(
            template,
            record.id.to_string(),
            [
                ("posting_id", record.posting_id.to_string()),
                ("applicant", record.profile.name.clone()),
                ("status", record.status.label().to_string()),
            ],
        );
    }

    // A failed notification never undoes the mutation it reports.
    fn notify<const K: usize>(
        &self,
        template: &str,
        subject_id: String,
        details: [(&str, String); K],
    ) {
        let notification = Notification {
            template: template.to_string(),
            subject_id,
            details: details
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect::<BTreeMap<_, _>>(),
        };

        if let Err(err) = self.notifications.publish(notification) {
            warn!(template, error = %err, "notification dispatch failed");
        }
    }
}
