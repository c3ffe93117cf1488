use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;

use super::domain::{
    Posting, PostingDraft, PostingFilter, PostingId, DEFAULT_REQUIREMENTS, MAX_REQUIRED_PLAYERS,
    MIN_REQUIRED_PLAYERS,
};
use super::error::{MatchingError, NotFoundError, ValidationError};
use super::repository::{PostingRepository, RepositoryError};

/// Holds recruitment postings and their capacity counters.
///
/// Ids come from a per-store sequence. Ids already taken in a shared repository are skipped.
pub struct RecruitmentStore<R> {
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> RecruitmentStore<R>
where
    R: PostingRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_posting_id(&self) -> PostingId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        PostingId(format!("post-{id:06}"))
    }

    /// Validate a draft and store it as a posting with no applications.
    pub fn create_posting(&self, draft: PostingDraft) -> Result<Posting, MatchingError> {
        let missing = draft.missing_fields();
        let (date, time) = match (draft.date, draft.time) {
            (Some(date), Some(time)) if missing.is_empty() => (date, time),
            _ => return Err(ValidationError::MissingFields(missing).into()),
        };

        if !(MIN_REQUIRED_PLAYERS..=MAX_REQUIRED_PLAYERS).contains(&draft.required_players) {
            return Err(ValidationError::RequiredPlayersOutOfRange {
                min: MIN_REQUIRED_PLAYERS,
                max: MAX_REQUIRED_PLAYERS,
                actual: draft.required_players,
            }
            .into());
        }

        let PostingDraft {
            title,
            team_name,
            location,
            required_players,
            description,
            requirements,
            ..
        } = draft;

        let requirements = match requirements {
            Some(tags) if !tags.is_empty() => tags,
            _ => DEFAULT_REQUIREMENTS.iter().map(|tag| tag.to_string()).collect(),
        };

        let mut posting = Posting {
            id: self.next_posting_id(),
            title: title.trim().to_string(),
            team_name: team_name.trim().to_string(),
            location: location.trim().to_string(),
            description,
            date,
            time,
            required_players,
            current_applications: 0,
            requirements,
            created_at: Utc::now(),
        };

        loop {
            match self.repository.insert(posting.clone()) {
                // Another store sharing the repository already used this id.
                Err(RepositoryError::Conflict) => posting.id = self.next_posting_id(),
                result => return Ok(result?),
            }
        }
    }

    /// Postings in creation order, narrowed by the filter.
    pub fn list_postings(&self, filter: &PostingFilter) -> Result<Vec<Posting>, MatchingError> {
        let postings = self.repository.all()?;
        Ok(postings
            .into_iter()
            .filter(|posting| filter.matches(posting))
            .collect())
    }

    pub fn get_posting(&self, posting_id: &PostingId) -> Result<Posting, MatchingError> {
        self.repository
            .fetch(posting_id)?
            .ok_or_else(|| NotFoundError::Posting(posting_id.clone()).into())
    }

    /// Count one more application against the posting and return the updated posting.
    pub fn increment_application_count(
        &self,
        posting_id: &PostingId,
    ) -> Result<Posting, MatchingError> {
        let mut posting = self.get_posting(posting_id)?;
        posting.current_applications = posting.current_applications.saturating_add(1);
        self.repository.update(posting.clone())?;
        Ok(posting)
    }

    /// Undo one increment, used when the application it counted was never stored.
    pub fn decrement_application_count(
        &self,
        posting_id: &PostingId,
    ) -> Result<Posting, MatchingError> {
        let mut posting = self.get_posting(posting_id)?;
        posting.current_applications = posting.current_applications.saturating_sub(1);
        self.repository.update(posting.clone())?;
        Ok(posting)
    }
}
