//! Report records: list summaries and the detailed editable form

use super::fumigation::FumigationTreatment;
use super::lenient;
use super::station::InspectionStation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Inspection,
    Fumigation,
    Both,
}

impl ReportType {
    pub fn includes_inspection(&self) -> bool {
        matches!(self, Self::Inspection | Self::Both)
    }

    pub fn includes_fumigation(&self) -> bool {
        matches!(self, Self::Fumigation | Self::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inspection => "inspection",
            Self::Fumigation => "fumigation",
            Self::Both => "both",
        }
    }
}

impl FromStr for ReportType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inspection" => Ok(Self::Inspection),
            "fumigation" => Ok(Self::Fumigation),
            "both" => Ok(Self::Both),
            other => anyhow::bail!("Unknown report type '{}'", other),
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Draft,
    #[default]
    Pending,
    Approved,
    Declined,
    Archived,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 5] = [
        Self::Draft,
        Self::Pending,
        Self::Approved,
        Self::Declined,
        Self::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
            Self::Archived => "archived",
        }
    }

    /// Only pending reports get the dedicated approve/decline actions
    pub fn awaiting_review(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl FromStr for ReportStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "declined" => Ok(Self::Declined),
            "archived" => Ok(Self::Archived),
            other => anyhow::bail!("Unknown report status '{}'", other),
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report row as returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportSummary {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub id: u64,
    #[serde(deserialize_with = "lenient::parsed_or_default", default)]
    pub report_type: ReportType,
    #[serde(deserialize_with = "lenient::parsed_or_default", default)]
    pub status: ReportStatus,
    #[serde(deserialize_with = "lenient::optional_u64", default)]
    pub client_id: Option<u64>,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub client_name: String,
    #[serde(deserialize_with = "lenient::optional_u64", default)]
    pub pco_id: Option<u64>,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub pco_name: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub pco_number: String,
    #[serde(deserialize_with = "lenient::optional_string", default)]
    pub service_date: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string", default)]
    pub created_at: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string", default)]
    pub submitted_at: Option<String>,
}

/// Full report with its stations and treatments.
///
/// `stations` and `inspection_stations` always hold the same list; older
/// callers read the latter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DetailedReport {
    pub id: u64,
    pub report_type: ReportType,
    pub status: ReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    pub client_name: String,
    pub client_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pco_id: Option<u64>,
    pub pco_name: String,
    pub pco_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_service_date: Option<String>,
    pub general_remarks: String,
    pub recommendations: String,
    pub admin_notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<String>,
    pub stations: Vec<InspectionStation>,
    pub inspection_stations: Vec<InspectionStation>,
    pub fumigation: Vec<FumigationTreatment>,
}

impl DetailedReport {
    /// Replace the station list, keeping both aliases in step
    pub fn set_stations(&mut self, stations: Vec<InspectionStation>) {
        self.inspection_stations = stations.clone();
        self.stations = stations;
    }

    pub fn show_stations_tab(&self) -> bool {
        self.report_type.includes_inspection()
    }

    pub fn show_fumigation_tab(&self) -> bool {
        self.report_type.includes_fumigation()
    }

    pub fn stations_needing_attention(&self) -> usize {
        self.stations.iter().filter(|s| s.needs_attention()).count()
    }
}
