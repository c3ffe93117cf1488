use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::recruitment::PostingDraft;

#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) line: u64,
    pub(crate) draft: PostingDraft,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RosterRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let record = result?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or_default();
        let row: RosterRow = record.deserialize(Some(&headers))?;
        records.push(RosterRecord {
            line,
            draft: row.into_draft(),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Team Name", default)]
    team_name: String,
    #[serde(rename = "Date", default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(rename = "Time", default, deserialize_with = "empty_string_as_none")]
    time: Option<String>,
    #[serde(rename = "Location", default)]
    location: String,
    #[serde(
        rename = "Required Players",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    required_players: Option<String>,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(
        rename = "Requirements",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    requirements: Option<String>,
}

impl RosterRow {
    fn into_draft(self) -> PostingDraft {
        PostingDraft {
            title: self.title,
            team_name: self.team_name,
            date: self.date.as_deref().and_then(parse_date),
            time: self.time.as_deref().and_then(parse_time),
            location: self.location,
            required_players: self
                .required_players
                .as_deref()
                .map(parse_headcount)
                .unwrap_or(1),
            description: self.description,
            requirements: self.requirements.as_deref().map(split_requirements),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

// Slot ranges such as "19:00 - 21:00" keep their start time.
fn parse_time(value: &str) -> Option<NaiveTime> {
    let start = value.split('-').next()?.trim();
    NaiveTime::parse_from_str(start, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(start, "%H:%M:%S"))
        .ok()
}

// Unreadable counts become 0 so store validation rejects the row.
fn parse_headcount(value: &str) -> u8 {
    value.trim().parse().unwrap_or(0)
}

fn split_requirements(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn parse_time_for_tests(value: &str) -> Option<NaiveTime> {
    parse_time(value)
}
