//! Pure reputation and capacity rules used when presenting postings and applicants.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ApplicantProfile, ApplicationId, ApplicationRecord, Posting, PostingId};

pub const VERY_GOOD_MANNER: f64 = 38.0;
pub const GOOD_MANNER: f64 = 37.0;
pub const NORMAL_MANNER: f64 = 36.5;

/// Trust bucket derived from a player's manner temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MannerLevel {
    VeryGood,
    Good,
    Normal,
    Caution,
}

impl MannerLevel {
    pub const fn label(self) -> &'static str {
        match self {
            MannerLevel::VeryGood => "very_good",
            MannerLevel::Good => "good",
            MannerLevel::Normal => "normal",
            MannerLevel::Caution => "caution",
        }
    }
}

/// Thresholds are inclusive on the upper side.
pub fn classify_manner(temperature: f64) -> MannerLevel {
    if temperature >= VERY_GOOD_MANNER {
        MannerLevel::VeryGood
    } else if temperature >= GOOD_MANNER {
        MannerLevel::Good
    } else if temperature >= NORMAL_MANNER {
        MannerLevel::Normal
    } else {
        MannerLevel::Caution
    }
}

/// Open slots left on a posting. Negative when the posting is overbooked.
pub fn remaining_slots(posting: &Posting) -> i64 {
    i64::from(posting.required_players) - i64::from(posting.current_applications)
}

pub fn is_fully_booked(posting: &Posting) -> bool {
    remaining_slots(posting) <= 0
}

/// Share of the headcount already applied for, capped at 100.
pub fn fill_percent(posting: &Posting) -> u8 {
    if posting.required_players == 0 {
        return 100;
    }
    let percent =
        u64::from(posting.current_applications) * 100 / u64::from(posting.required_players);
    percent.min(100) as u8
}

/// Serializable projection of a posting with its derived capacity figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingView {
    pub id: PostingId,
    pub title: String,
    pub team_name: String,
    pub location: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub required_players: u8,
    pub current_applications: u32,
    pub remaining_slots: i64,
    pub is_fully_booked: bool,
    pub fill_percent: u8,
    pub requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Posting> for PostingView {
    fn from(posting: &Posting) -> Self {
        Self {
            id: posting.id.clone(),
            title: posting.title.clone(),
            team_name: posting.team_name.clone(),
            location: posting.location.clone(),
            description: posting.description.clone(),
            date: posting.date,
            time: posting.time,
            required_players: posting.required_players,
            current_applications: posting.current_applications,
            remaining_slots: remaining_slots(posting),
            is_fully_booked: is_fully_booked(posting),
            fill_percent: fill_percent(posting),
            requirements: posting.requirements.clone(),
            created_at: posting.created_at,
        }
    }
}

/// Serializable projection of an application with the applicant's manner level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub posting_id: PostingId,
    pub status: &'static str,
    pub applicant: ApplicantProfile,
    pub manner_level: MannerLevel,
    pub applied_at: DateTime<Utc>,
}

impl From<&ApplicationRecord> for ApplicationView {
    fn from(record: &ApplicationRecord) -> Self {
        Self {
            id: record.id.clone(),
            posting_id: record.posting_id.clone(),
            status: record.status.label(),
            applicant: record.profile.clone(),
            manner_level: classify_manner(record.profile.manner_temperature),
            applied_at: record.applied_at,
        }
    }
}
