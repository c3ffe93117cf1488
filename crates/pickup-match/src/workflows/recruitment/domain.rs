use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for recruitment postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostingId(pub String);

impl fmt::Display for PostingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const MIN_REQUIRED_PLAYERS: u8 = 1;
pub const MAX_REQUIRED_PLAYERS: u8 = 10;

/// Tags applied to a posting when the manager does not list any.
pub const DEFAULT_REQUIREMENTS: [&str; 3] = ["manner required", "beginners welcome", "19 or older"];

/// Manager supplied fields for a new posting, prior to validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingDraft {
    pub title: String,
    pub team_name: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub location: String,
    pub required_players: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
}

/// Fields a posting cannot be created without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostingField {
    Title,
    TeamName,
    Date,
    Time,
    Location,
}

impl PostingField {
    pub const fn label(self) -> &'static str {
        match self {
            PostingField::Title => "title",
            PostingField::TeamName => "team_name",
            PostingField::Date => "date",
            PostingField::Time => "time",
            PostingField::Location => "location",
        }
    }
}

impl PostingDraft {
    /// Required fields that are absent or blank, in form order.
    pub fn missing_fields(&self) -> Vec<PostingField> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push(PostingField::Title);
        }
        if self.team_name.trim().is_empty() {
            missing.push(PostingField::TeamName);
        }
        if self.date.is_none() {
            missing.push(PostingField::Date);
        }
        if self.time.is_none() {
            missing.push(PostingField::Time);
        }
        if self.location.trim().is_empty() {
            missing.push(PostingField::Location);
        }
        missing
    }
}

/// A team's request for additional players for a scheduled match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub id: PostingId,
    pub title: String,
    pub team_name: String,
    pub location: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub required_players: u8,
    pub current_applications: u32,
    pub requirements: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Narrows a posting listing, e.g. to the postings of one manager's team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingFilter {
    pub team_name: Option<String>,
}

impl PostingFilter {
    pub fn for_team(team_name: impl Into<String>) -> Self {
        Self {
            team_name: Some(team_name.into()),
        }
    }

    pub fn matches(&self, posting: &Posting) -> bool {
        match &self.team_name {
            Some(team) => posting.team_name == *team,
            None => true,
        }
    }
}

/// Player profile captured at application time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub name: String,
    pub age: u8,
    pub position: String,
    pub location: String,
    pub manner_temperature: f64,
    pub total_matches: u32,
    pub rating: f64,
}

/// Approval state of an application. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A player's application against one posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub posting_id: PostingId,
    pub profile: ApplicantProfile,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
}

/// Per-status application counts shown on the manager screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSummary {
    pub posting_id: PostingId,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl ApplicationSummary {
    pub fn tally(posting_id: PostingId, records: &[ApplicationRecord]) -> Self {
        let mut summary = Self {
            posting_id,
            pending: 0,
            approved: 0,
            rejected: 0,
        };
        for record in records {
            match record.status {
                ApplicationStatus::Pending => summary.pending += 1,
                ApplicationStatus::Approved => summary.approved += 1,
                ApplicationStatus::Rejected => summary.rejected += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}

/// Whether submissions past a posting's headcount are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapacityPolicy {
    /// Keep accepting applications; remaining slots may go negative.
    #[default]
    Overbook,
    /// Reject submissions once the posting is fully booked.
    HardCap,
}

impl CapacityPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            CapacityPolicy::Overbook => "overbook",
            CapacityPolicy::HardCap => "hard-cap",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capacity policy '{0}' (expected 'overbook' or 'hard-cap')")]
pub struct ParseCapacityPolicyError(pub String);

impl FromStr for CapacityPolicy {
    type Err = ParseCapacityPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "overbook" | "allow" => Ok(Self::Overbook),
            "hard-cap" | "hard_cap" | "hardcap" | "cap" => Ok(Self::HardCap),
            _ => Err(ParseCapacityPolicyError(value.to_string())),
        }
    }
}
