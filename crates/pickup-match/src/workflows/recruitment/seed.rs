use chrono::{NaiveDate, NaiveTime};

use super::domain::{
    ApplicantProfile, ApplicationRecord, CapacityPolicy, Posting, PostingDraft,
};
use super::error::MatchingError;
use super::repository::{ApplicationRepository, NotificationPublisher, PostingRepository};
use super::service::MatchingService;

/// The sample futsal posting managers see on first launch.
pub fn mock_posting_draft() -> PostingDraft {
    PostingDraft {
        title: "Pickup players wanted at Seolleung futsal court".to_string(),
        team_name: "FC Seolleung United".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 7, 15),
        time: NaiveTime::from_hms_opt(19, 0, 0),
        location: "Seolleung Futsal Park, 123 Seolleung-ro, Gangnam-gu".to_string(),
        required_players: 2,
        description: "Good manners welcome, beginners too. Showers and parking on site."
            .to_string(),
        requirements: None,
    }
}

/// Three sample applicants spanning the manner levels.
pub fn mock_applicants() -> Vec<ApplicantProfile> {
    vec![
        ApplicantProfile {
            name: "Lee Seong-woo".to_string(),
            age: 29,
            position: "MF/FW".to_string(),
            location: "Gangnam-gu".to_string(),
            manner_temperature: 38.2,
            total_matches: 12,
            rating: 4.8,
        },
        ApplicantProfile {
            name: "Kim Min-su".to_string(),
            age: 25,
            position: "DF".to_string(),
            location: "Seocho-gu".to_string(),
            manner_temperature: 39.1,
            total_matches: 28,
            rating: 4.9,
        },
        ApplicantProfile {
            name: "Park Jun-ho".to_string(),
            age: 31,
            position: "GK".to_string(),
            location: "Gangnam-gu".to_string(),
            manner_temperature: 35.8,
            total_matches: 8,
            rating: 4.2,
        },
    ]
}

/// Outcome of seeding the mock roster.
#[derive(Debug)]
pub struct SeededRoster {
    pub posting: Posting,
    pub applications: Vec<ApplicationRecord>,
    /// Applicants refused because the posting was already full.
    pub turned_away: Vec<ApplicantProfile>,
}

/// Create the sample posting and submit every sample applicant to it.
pub fn mock_roster<P, A, N>(
    service: &MatchingService<P, A, N>,
) -> Result<SeededRoster, MatchingError>
where
    P: PostingRepository + 'static,
    A: ApplicationRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let posting = service.create_posting(mock_posting_draft())?;
    let mut applications = Vec::new();
    let mut turned_away = Vec::new();

    for profile in mock_applicants() {
        match service.submit_application(&posting.id, profile.clone()) {
            Ok(record) => applications.push(record),
            Err(MatchingError::CapacityExceeded { .. })
                if service.capacity_policy() == CapacityPolicy::HardCap =>
            {
                turned_away.push(profile)
            }
            Err(err) => return Err(err),
        }
    }

    let posting = service.get_posting(&posting.id)?;
    Ok(SeededRoster {
        posting,
        applications,
        turned_away,
    })
}
