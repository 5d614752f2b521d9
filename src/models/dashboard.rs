use super::lenient;
use super::report::ReportSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardStats {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub total_reports: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub pending_reports: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub approved_reports: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub declined_reports: u64,
    #[serde(alias = "total_pcos", deserialize_with = "lenient::u64_or_zero", default)]
    pub active_pcos: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub total_clients: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub active_chemicals: u64,
    #[serde(default)]
    pub recent_reports: Vec<ReportSummary>,
}
