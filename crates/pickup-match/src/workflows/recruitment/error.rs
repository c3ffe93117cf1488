use super::domain::{ApplicationId, ApplicationStatus, PostingField, PostingId};
use super::repository::RepositoryError;

/// Error raised by the recruitment and application stores.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error("application {application_id} is already {status}")]
    InvalidState {
        application_id: ApplicationId,
        status: ApplicationStatus,
    },
    #[error("posting {posting_id} is fully booked ({required_players} players)")]
    CapacityExceeded {
        posting_id: PostingId,
        required_players: u8,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Rejected posting draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<PostingField>),
    #[error("required players must be between {min} and {max}, got {actual}")]
    RequiredPlayersOutOfRange { min: u8, max: u8, actual: u8 },
}

/// Lookup against an identifier no store knows about.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotFoundError {
    #[error("posting {0} not found")]
    Posting(PostingId),
    #[error("application {0} not found")]
    Application(ApplicationId),
}

fn join_fields(fields: &[PostingField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let missing = ValidationError::MissingFields(vec![PostingField::Title, PostingField::Time]);
        assert_eq!(missing.to_string(), "missing required fields: title, time");

        let state = MatchingError::InvalidState {
            application_id: ApplicationId("app-000004".to_string()),
            status: ApplicationStatus::Rejected,
        };
        assert_eq!(state.to_string(), "application app-000004 is already rejected");

        let lookup = MatchingError::from(NotFoundError::Posting(PostingId("post-9".to_string())));
        assert_eq!(lookup.to_string(), "posting post-9 not found");
    }
}
