use crate::demo::{run_demo, run_import, run_manner, DemoArgs, ImportArgs, MannerArgs};
use clap::{Parser, Subcommand};
use pickup_match::config::AppConfig;
use pickup_match::error::AppError;
use pickup_match::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Pickup Match",
    about = "Create pickup-game postings, take applications and review them from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed the sample posting and replay the manager flow (default command)
    Demo(DemoArgs),
    /// Load postings from a CSV export and list what was created
    Import(ImportArgs),
    /// Show the manner level for a manner temperature
    Manner(MannerArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, &config),
        Command::Import(args) => run_import(args, &config),
        Command::Manner(args) => run_manner(args),
    }
}
