use crate::infra::{
    in_memory_service, parse_policy, parse_temperature, print_application, print_notifications,
    print_posting,
};
use clap::Args;
use pickup_match::config::AppConfig;
use pickup_match::error::AppError;
use pickup_match::workflows::recruitment::seed::mock_roster;
use pickup_match::workflows::recruitment::{
    classify_manner, ApplicantProfile, ApplicationStatus, ApplicationSummary, ApplicationView,
    CapacityPolicy, Notification, PostingFilter, PostingView,
};
use pickup_match::workflows::roster::{ImportReport, RejectedRow, RosterImporter};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Capacity policy for the demo stores (overbook | hard-cap). Defaults to APP_CAPACITY_POLICY.
    #[arg(long, value_parser = parse_policy)]
    pub(crate) capacity_policy: Option<CapacityPolicy>,
    /// Print the demo outcome as JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV export with Title, Team Name, Date, Time, Location, Required Players columns.
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Only list postings for this team.
    #[arg(long)]
    pub(crate) team: Option<String>,
    /// Print the import outcome as JSON instead of text.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MannerArgs {
    /// Manner temperature, e.g. 36.5
    #[arg(value_parser = parse_temperature, allow_negative_numbers = true)]
    pub(crate) temperature: f64,
}

#[derive(Debug, Serialize)]
struct DemoOutput {
    capacity_policy: CapacityPolicy,
    imported: Option<ImportReport>,
    posting: PostingView,
    applications: Vec<ApplicationView>,
    turned_away: Vec<ApplicantProfile>,
    summary: ApplicationSummary,
    notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
struct ImportOutput {
    postings: Vec<PostingView>,
    rejected: Vec<RejectedRow>,
}

pub(crate) fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        capacity_policy,
        json,
    } = args;
    let policy = capacity_policy.unwrap_or(config.matching.capacity_policy);
    let (service, notifications) = in_memory_service(policy);
    info!(capacity_policy = policy.label(), "starting demo");

    let imported = match &config.matching.roster_csv {
        Some(path) => {
            let entries = RosterImporter::from_path(path)?;
            Some(RosterImporter::load_into(&service, entries))
        }
        None => None,
    };

    let roster = mock_roster(&service)?;
    let posting_id = roster.posting.id.clone();

    // Manager accepts the first applicant and declines the last one.
    if let Some(first) = roster.applications.first() {
        service.approve(&first.id)?;
    }
    if roster.applications.len() > 1 {
        if let Some(last) = roster.applications.last() {
            service.reject(&last.id)?;
        }
    }

    let posting = service.posting_view(&posting_id)?;
    let applications = service.list_applications(&posting_id)?;
    let summary = service.summarize(&posting_id)?;

    if json {
        let output = DemoOutput {
            capacity_policy: policy,
            imported,
            posting,
            applications: applications.iter().map(ApplicationView::from).collect(),
            turned_away: roster.turned_away,
            summary,
            notifications: notifications.events(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Pickup match demo (capacity policy: {})", policy.label());
    if let Some(report) = &imported {
        println!(
            "Roster seed: {} postings created, {} rows skipped",
            report.created.len(),
            report.rejected.len()
        );
    }
    print_posting(&posting);
    println!("Applications:");
    for record in &applications {
        print_application(record);
    }
    for profile in &roster.turned_away {
        println!("  - {} turned away: posting already full", profile.name);
    }
    println!(
        "Summary: {} pending | {} approved | {} rejected",
        summary.pending, summary.approved, summary.rejected
    );
    let approved: Vec<&str> = applications
        .iter()
        .filter(|record| record.status == ApplicationStatus::Approved)
        .map(|record| record.profile.name.as_str())
        .collect();
    if !approved.is_empty() {
        println!("Confirmed players: {}", approved.join(", "));
    }
    print_notifications(&notifications.events());

    Ok(())
}

pub(crate) fn run_import(args: ImportArgs, config: &AppConfig) -> Result<(), AppError> {
    let ImportArgs { csv, team, json } = args;
    let entries = RosterImporter::from_path(&csv)?;
    let (service, _) = in_memory_service(config.matching.capacity_policy);
    let report = RosterImporter::load_into(&service, entries);

    let filter = PostingFilter { team_name: team };
    let postings: Vec<PostingView> = service
        .list_postings(&filter)?
        .iter()
        .map(PostingView::from)
        .collect();

    if json {
        let output = ImportOutput {
            postings,
            rejected: report.rejected,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "Imported {} postings from {} ({} rows skipped)",
        report.created.len(),
        csv.display(),
        report.rejected.len()
    );
    for view in &postings {
        print_posting(view);
    }
    if !report.rejected.is_empty() {
        println!("Skipped rows:");
        for row in &report.rejected {
            println!("  - line {}: {}", row.line, row.reason);
        }
    }

    Ok(())
}

pub(crate) fn run_manner(args: MannerArgs) -> Result<(), AppError> {
    let level = classify_manner(args.temperature);
    println!("{:.1}°C -> {}", args.temperature, level.label());
    Ok(())
}
