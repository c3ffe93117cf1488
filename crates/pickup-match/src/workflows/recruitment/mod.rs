//! Recruitment postings and the applications players submit against them.
//!
//! Managers create postings through the [`RecruitmentStore`]; players apply through the
//! [`ApplicationStore`], which counts every submission against the posting. The
//! [`MatchingService`] owns both stores, serializes mutations, and publishes a
//! notification for every change so callers can tell users what happened.

use std::sync::Arc;

pub mod applications;
pub mod display;
pub mod domain;
pub mod error;
pub mod memory;
pub mod postings;
pub mod repository;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use applications::ApplicationStore;
pub use display::{
    classify_manner, fill_percent, is_fully_booked, remaining_slots, ApplicationView,
    MannerLevel, PostingView,
};
pub use domain::{
    ApplicantProfile, ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationSummary,
    CapacityPolicy, Posting, PostingDraft, PostingField, PostingFilter, PostingId,
};
pub use error::{MatchingError, NotFoundError, ValidationError};
pub use memory::{InMemoryApplicationRepository, InMemoryNotifications, InMemoryPostingRepository};
pub use postings::RecruitmentStore;
pub use repository::{
    ApplicationRepository, Notification, NotificationError, NotificationPublisher,
    PostingRepository, RepositoryError,
};
pub use service::MatchingService;

/// Service wired to the in-memory repositories.
pub type InMemoryMatchingService = MatchingService<
    InMemoryPostingRepository,
    InMemoryApplicationRepository,
    InMemoryNotifications,
>;

impl InMemoryMatchingService {
    /// Build a service over fresh in-memory stores, returning the notification sink alongside.
    pub fn in_memory(policy: CapacityPolicy) -> (Self, Arc<InMemoryNotifications>) {
        let notifications = Arc::new(InMemoryNotifications::default());
        let service = MatchingService::new(
            Arc::new(InMemoryPostingRepository::default()),
            Arc::new(InMemoryApplicationRepository::default()),
            notifications.clone(),
            policy,
        );
        (service, notifications)
    }
}
