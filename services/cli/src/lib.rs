mod cli;
mod demo;
mod infra;

use pickup_match::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
