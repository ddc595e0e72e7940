//! Command-line interface parsing for aquacast
//!
//! This module handles parsing of CLI arguments using clap, including the
//! --report selector choosing which aggregate to print.

use clap::Parser;
use thiserror::Error;

use crate::data::Coordinates;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified report name is not recognized
    #[error("Invalid report: '{0}'. Valid reports: watering, weather, eto, all")]
    InvalidReport(String),
}

/// Aquacast - normalized weather aggregates for irrigation scheduling
#[derive(Parser, Debug)]
#[command(name = "aquacast")]
#[command(about = "Watering, forecast and ETo summaries for a location")]
#[command(version)]
pub struct Cli {
    /// Latitude of the query location in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the query location in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lon: f64,

    /// Which report to print
    ///
    /// Examples:
    ///   aquacast --lat 45.5 --lon -122.7                    # All reports
    ///   aquacast --lat 45.5 --lon -122.7 --report watering  # Watering only
    ///   aquacast --lat 45.5 --lon -122.7 --report eto       # ETo inputs only
    ///
    /// Valid reports: watering, weather, eto, all
    #[arg(long, value_name = "REPORT")]
    pub report: Option<String>,

    /// Forecast horizon in days for the weather report
    #[arg(long, default_value_t = 8)]
    pub days: u8,
}

/// The aggregate(s) a run should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Watering,
    Weather,
    Eto,
    All,
}

impl Report {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "watering" => Some(Report::Watering),
            "weather" | "forecast" => Some(Report::Weather),
            "eto" => Some(Report::Eto),
            "all" => Some(Report::All),
            _ => None,
        }
    }
}

/// Parses a report string argument into a Report enum.
pub fn parse_report_arg(s: &str) -> Result<Report, CliError> {
    Report::from_str(s).ok_or_else(|| CliError::InvalidReport(s.to_string()))
}

/// Configuration derived from CLI arguments for a single run
#[derive(Debug, Clone, Copy)]
pub struct RequestConfig {
    /// Query location
    pub coordinates: Coordinates,
    /// Which report(s) to produce
    pub report: Report,
    /// Forecast horizon in days
    pub forecast_days: u8,
}

impl RequestConfig {
    /// Creates a RequestConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let report = match &cli.report {
            None => Report::All,
            Some(name) => parse_report_arg(name)?,
        };

        Ok(RequestConfig {
            coordinates: Coordinates {
                latitude: cli.lat,
                longitude: cli.lon,
            },
            report,
            forecast_days: cli.days,
        })
    }
}
