//! Domain core for matching pickup players with team recruitment postings.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
