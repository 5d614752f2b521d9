use super::{AdminService, extract_list};
use crate::api::constants::paths;
use crate::api::envelope::ApiResponse;
use crate::api::transport::ApiRequest;
use crate::models::{DetailedReport, Paginated, Pagination, ReportStatus, ReportSummary, ReportType};
use crate::normalize::{clean_payload, normalize_detailed_report};
use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, info};
use serde::Serialize;
use serde_json::{Value, json};

/// Server-side filters for the report list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilters {
    pub status: Option<ReportStatus>,
    pub report_type: Option<ReportType>,
    pub pco_id: Option<u64>,
    pub client_id: Option<u64>,
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page: u64,
    pub limit: u64,
}

impl ReportFilters {
    pub fn new(limit: u64) -> Self {
        Self {
            page: 1,
            limit,
            ..Default::default()
        }
    }

    fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .param_opt("status", self.status.map(|s| s.as_str()))
            .param_opt("report_type", self.report_type.map(|t| t.as_str()))
            .param_opt("pco_id", self.pco_id)
            .param_opt("client_id", self.client_id)
            .param_opt("search", self.search.as_deref())
            .param_opt("date_from", self.date_from.map(|d| d.format("%Y-%m-%d").to_string()))
            .param_opt("date_to", self.date_to.map(|d| d.format("%Y-%m-%d").to_string()))
            .param("page", self.page.max(1))
            .param("limit", self.limit.max(1))
    }
}

/// Recipients for emailing a report PDF
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmailRequest {
    pub recipients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Passthrough for the backend's bulk report endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkOperation {
    pub action: String,
    pub report_ids: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

impl AdminService {
    pub async fn get_reports(&self, filters: &ReportFilters) -> Result<ApiResponse<Paginated<ReportSummary>>> {
        debug!("Fetching reports with filters: {:?}", filters);
        let request = filters.apply(ApiRequest::get(paths::REPORTS));
        self.send(request).await?.try_map(|data| {
            let (items, pagination) = extract_list::<ReportSummary>(data, &["reports", "data"])?;
            let pagination = pagination
                .unwrap_or_else(|| Pagination::estimate(filters.page, filters.limit, items.len() as u64));
            debug!(
                "Received {} reports (page {} of {})",
                items.len(),
                pagination.current_page,
                pagination.total_pages
            );
            Ok(Paginated { items, pagination })
        })
    }

    /// Fetch one report and normalize whichever response shape arrives
    pub async fn get_report(&self, id: u64) -> Result<ApiResponse<DetailedReport>> {
        debug!("Fetching report {}", id);
        let request = ApiRequest::get(paths::report(id)).with_timeout(self.report_timeout);
        self.send(request)
            .await?
            .try_map(|data| normalize_detailed_report(&data))
    }

    /// Partial update: only non-empty fields of `payload` are sent
    pub async fn edit_report(&self, id: u64, payload: Value) -> Result<ApiResponse> {
        let cleaned = clean_payload(payload);
        let field_count = cleaned.as_object().map_or(0, |m| m.len());
        if field_count == 0 {
            debug!("Edit of report {} carried no changes, skipping request", id);
            return Ok(ApiResponse::failure("No changes to save"));
        }

        info!("Editing report {} ({} fields)", id, field_count);
        self.send(ApiRequest::put(paths::report(id), cleaned)).await
    }

    pub async fn update_report_status(
        &self,
        id: u64,
        status: ReportStatus,
        admin_notes: Option<&str>,
    ) -> Result<ApiResponse> {
        info!("Setting report {} status to {}", id, status);
        let body = json!({
            "status": status.as_str(),
            "admin_notes": admin_notes.unwrap_or_default(),
        });
        self.send(ApiRequest::put(paths::report_status(id), body)).await
    }

    pub async fn download_report_pdf(&self, id: u64) -> Result<Vec<u8>> {
        debug!("Downloading PDF for report {}", id);
        self.transport.download(ApiRequest::get(paths::report_download(id))).await
    }

    pub async fn email_report(&self, id: u64, request: &EmailRequest) -> Result<ApiResponse> {
        if request.recipients.iter().all(|r| r.trim().is_empty()) {
            anyhow::bail!("At least one recipient is required");
        }
        info!("Emailing report {} to {} recipient(s)", id, request.recipients.len());
        self.send(ApiRequest::post(paths::report_email(id), serde_json::to_value(request)?))
            .await
    }

    pub async fn bulk_operation(&self, operation: &BulkOperation) -> Result<ApiResponse> {
        if operation.report_ids.is_empty() {
            anyhow::bail!("Bulk operation needs at least one report id");
        }
        info!("Bulk '{}' on {} report(s)", operation.action, operation.report_ids.len());
        self.send(ApiRequest::post(paths::REPORTS_BULK, serde_json::to_value(operation)?))
            .await
    }
}
