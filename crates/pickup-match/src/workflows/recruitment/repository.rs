use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationId, ApplicationRecord, Posting, PostingId};

/// Storage abstraction for recruitment postings.
pub trait PostingRepository: Send + Sync {
    fn insert(&self, posting: Posting) -> Result<Posting, RepositoryError>;
    fn update(&self, posting: Posting) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PostingId) -> Result<Option<Posting>, RepositoryError>;
    /// Every stored posting in creation order.
    fn all(&self) -> Result<Vec<Posting>, RepositoryError>;
}

/// Storage abstraction for applications so the stores can be exercised in isolation.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    /// Applications for one posting in submission order.
    fn for_posting(&self, posting_id: &PostingId)
        -> Result<Vec<ApplicationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook used to tell players and managers about store changes.
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: Notification) -> Result<(), NotificationError>;
}

/// Notification payload emitted after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub template: String,
    pub subject_id: String,
    pub details: BTreeMap<String, String>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
