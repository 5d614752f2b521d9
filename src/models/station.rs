//! Inspection station records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a bait/monitoring station is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StationLocation {
    #[default]
    Inside,
    Outside,
}

impl StationLocation {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "inside" | "internal" | "in" => Some(Self::Inside),
            "outside" | "external" | "out" => Some(Self::Outside),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inside => "inside",
            Self::Outside => "outside",
        }
    }
}

/// State of the bait found at a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BaitStatus {
    Clean,
    Eaten,
    PartiallyEaten,
    Wet,
    Old,
    Replaced,
    Missing,
    #[default]
    NotApplicable,
}

impl BaitStatus {
    /// Parse a bait status, accepting the spellings both endpoint families use
    pub fn parse(raw: &str) -> Option<Self> {
        let key = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "clean" | "untouched" | "intact" => Some(Self::Clean),
            "eaten" | "consumed" => Some(Self::Eaten),
            "partially_eaten" | "partial" | "partly_eaten" => Some(Self::PartiallyEaten),
            "wet" | "damp" => Some(Self::Wet),
            "old" | "expired" => Some(Self::Old),
            "replaced" => Some(Self::Replaced),
            "missing" => Some(Self::Missing),
            "not_applicable" | "n/a" | "na" | "none" | "" => Some(Self::NotApplicable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Eaten => "eaten",
            Self::PartiallyEaten => "partially_eaten",
            Self::Wet => "wet",
            Self::Old => "old",
            Self::Replaced => "replaced",
            Self::Missing => "missing",
            Self::NotApplicable => "not_applicable",
        }
    }
}

impl fmt::Display for BaitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numbered bait/monitoring point inspected during a visit.
///
/// Always built through [`crate::normalize::normalize_station`] when read
/// from the backend, so optional text is `""` rather than absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InspectionStation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub station_number: u32,
    pub location: StationLocation,
    pub is_accessible: bool,
    pub access_reason: String,
    pub activity_detected: bool,
    pub activity_type: String,
    pub activity_description: String,
    pub station_condition: Vec<String>,
    pub bait_status: BaitStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical_id: Option<u64>,
    pub chemical_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub batch_number: String,
}

impl InspectionStation {
    /// Blank station with the given number, accessible by default
    pub fn new(station_number: u32, location: StationLocation) -> Self {
        Self {
            station_number,
            location,
            is_accessible: true,
            ..Default::default()
        }
    }

    /// Whether the station needs follow-up on the next visit
    pub fn needs_attention(&self) -> bool {
        !self.is_accessible
            || self.activity_detected
            || matches!(self.bait_status, BaitStatus::Eaten | BaitStatus::Missing | BaitStatus::Wet)
    }
}
