pub mod handler;

use crate::models::{ReportStatus, ReportType, StationLocation};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

pub use handler::handle_reports_command;

#[derive(Args)]
pub struct ReportsCommands {
    #[command(subcommand)]
    pub command: ReportsSubcommand,
}

#[derive(Subcommand)]
pub enum ReportsSubcommand {
    /// List reports with server-side filters
    List(ReportListArgs),
    /// Show one report with its stations, treatments and notes
    Show {
        id: u64,
    },
    /// Approve a pending report
    Approve {
        id: u64,
        #[arg(long, help = "Admin notes shown to the PCO")]
        notes: Option<String>,
    },
    /// Decline a pending report (notes are required)
    Decline {
        id: u64,
        #[arg(long, help = "Reason for declining; prompted for when missing")]
        notes: Option<String>,
    },
    /// Set any status on a report
    Status {
        id: u64,
        #[arg(value_parser = parse_status)]
        status: ReportStatus,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Edit report fields, stations and treatments
    Edit(ReportEditArgs),
    /// Download the report PDF
    Download {
        id: u64,
        #[arg(short, long, help = "Output file (defaults to report-<id>.pdf)")]
        output: Option<PathBuf>,
    },
    /// Email the report PDF
    Email {
        id: u64,
        #[arg(long = "to", required = true, help = "Recipient address (repeatable)")]
        recipients: Vec<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Run a backend bulk action over several reports
    Bulk {
        #[arg(help = "Bulk action name, e.g. approve or archive")]
        action: String,
        #[arg(required = true)]
        ids: Vec<u64>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

#[derive(Args)]
pub struct ReportListArgs {
    #[arg(long, value_parser = parse_status)]
    pub status: Option<ReportStatus>,
    #[arg(long = "type", value_parser = parse_type)]
    pub report_type: Option<ReportType>,
    #[arg(long = "pco")]
    pub pco_id: Option<u64>,
    #[arg(long = "client")]
    pub client_id: Option<u64>,
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long, help = "Service date from (YYYY-MM-DD)")]
    pub from: Option<NaiveDate>,
    #[arg(long, help = "Service date to (YYYY-MM-DD)")]
    pub to: Option<NaiveDate>,
    #[arg(long, default_value_t = 1)]
    pub page: u64,
    #[arg(long)]
    pub limit: Option<u64>,
    #[arg(long, help = "Also export the page to a CSV file")]
    pub csv: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReportEditArgs {
    pub id: u64,
    #[arg(long = "type", value_parser = parse_type)]
    pub report_type: Option<ReportType>,
    #[arg(long)]
    pub service_date: Option<String>,
    #[arg(long)]
    pub next_service_date: Option<String>,
    #[arg(long)]
    pub remarks: Option<String>,
    #[arg(long)]
    pub recommendations: Option<String>,
    #[arg(long, value_enum, help = "Append a blank station (repeatable)")]
    pub add_station: Vec<LocationArg>,
    #[arg(long, help = "Remove the station with this number (repeatable)")]
    pub remove_station: Vec<u32>,
    #[arg(long, help = "Append an empty fumigation treatment")]
    pub add_treatment: bool,
    #[arg(long, help = "Remove the treatment at this 1-based position (repeatable)")]
    pub remove_treatment: Vec<usize>,
    #[arg(long, help = "Print the update body without sending it")]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LocationArg {
    Inside,
    Outside,
}

impl From<LocationArg> for StationLocation {
    fn from(location: LocationArg) -> Self {
        match location {
            LocationArg::Inside => StationLocation::Inside,
            LocationArg::Outside => StationLocation::Outside,
        }
    }
}

fn parse_status(raw: &str) -> Result<ReportStatus, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}

fn parse_type(raw: &str) -> Result<ReportType, String> {
    raw.parse().map_err(|err: anyhow::Error| err.to_string())
}
