mod parser;

use crate::workflows::recruitment::{
    ApplicationRepository, MatchingService, NotificationPublisher, PostingDraft, PostingId,
    PostingRepository,
};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Posting draft read from one CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    /// Line of the row in the source file, header included.
    pub line: u64,
    pub draft: PostingDraft,
}

/// Row that could not be turned into a posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub reason: String,
}

/// Result of loading a roster into the stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub created: Vec<PostingId>,
    pub rejected: Vec<RejectedRow>,
}

/// Loads recruitment postings from a CSV export with the columns
/// `Title, Team Name, Date, Time, Location, Required Players, Description, Requirements`.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RosterEntry>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RosterEntry>, RosterImportError> {
        let entries = parser::parse_records(reader)?
            .into_iter()
            .map(|record| RosterEntry {
                line: record.line,
                draft: record.draft,
            })
            .collect();
        Ok(entries)
    }

    /// Create a posting per entry. Rows the store refuses are reported, not fatal.
    pub fn load_into<P, A, N>(
        service: &MatchingService<P, A, N>,
        entries: Vec<RosterEntry>,
    ) -> ImportReport
    where
        P: PostingRepository + 'static,
        A: ApplicationRepository + 'static,
        N: NotificationPublisher + 'static,
    {
        let mut report = ImportReport::default();

        for RosterEntry { line, draft } in entries {
            match service.create_posting(draft) {
                Ok(posting) => report.created.push(posting.id),
                Err(err) => {
                    warn!(line, error = %err, "roster row skipped");
                    report.rejected.push(RejectedRow {
                        line,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            created = report.created.len(),
            rejected = report.rejected.len(),
            "roster import finished"
        );
        report
    }
}
