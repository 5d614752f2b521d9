use crate::api::{BulkOperation, ReportFilters};
use crate::console::{ListController, Notifications};
use crate::context::AppContext;
use crate::models::{ReportStatus, ReportSummary};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    Approve,
    Decline,
    ChangeStatus(ReportStatus),
}

impl ReviewAction {
    pub fn target_status(&self) -> ReportStatus {
        match self {
            Self::Approve => ReportStatus::Approved,
            Self::Decline => ReportStatus::Declined,
            Self::ChangeStatus(status) => *status,
        }
    }
}

/// Approve/decline/change-status dialog
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDialog {
    pub report_id: u64,
    pub action: ReviewAction,
    pub admin_notes: String,
}

impl ReviewDialog {
    /// Declining needs an explanation for the PCO
    pub fn can_submit(&self) -> bool {
        match self.action.target_status() {
            ReportStatus::Declined => !self.admin_notes.trim().is_empty(),
            _ => true,
        }
    }
}

pub struct ReportsPage {
    ctx: AppContext,
    pub filters: ReportFilters,
    pub list: ListController<ReportSummary>,
    pub review: Option<ReviewDialog>,
    pub notifications: Notifications,
}

impl ReportsPage {
    pub fn new(ctx: AppContext) -> Self {
        let filters = ReportFilters::new(ctx.page_size);
        Self {
            ctx,
            filters,
            list: ListController::new(),
            review: None,
            notifications: Notifications::new(),
        }
    }

    pub async fn reload(&mut self) -> bool {
        self.list
            .load_page(self.ctx.service.get_reports(&self.filters), &mut self.notifications)
            .await
    }

    /// Replace the server-side filters and go back to the first page
    pub async fn apply_filters(&mut self, filters: ReportFilters) -> bool {
        self.filters = ReportFilters {
            page: 1,
            limit: self.filters.limit,
            ..filters
        };
        self.reload().await
    }

    pub async fn go_to_page(&mut self, page: u64) -> bool {
        self.filters.page = page.max(1);
        self.reload().await
    }

    fn open_review(&mut self, report_id: u64, action: ReviewAction) -> bool {
        // Reports not on the current page are left to the backend to check
        let known_status = self
            .list
            .find(|report| report.id == report_id)
            .map(|report| report.status);
        if let Some(status) = known_status {
            if matches!(action, ReviewAction::Approve | ReviewAction::Decline) && !status.awaiting_review() {
                let message = format!("Report {} is {}, only pending reports can be reviewed", report_id, status);
                self.notifications.error(message);
                return false;
            }
        }
        debug!("Opening {:?} dialog for report {}", action, report_id);
        self.review = Some(ReviewDialog {
            report_id,
            action,
            admin_notes: String::new(),
        });
        true
    }

    pub fn start_approve(&mut self, report_id: u64) -> bool {
        self.open_review(report_id, ReviewAction::Approve)
    }

    pub fn start_decline(&mut self, report_id: u64) -> bool {
        self.open_review(report_id, ReviewAction::Decline)
    }

    pub fn start_status_change(&mut self, report_id: u64, status: ReportStatus) -> bool {
        self.open_review(report_id, ReviewAction::ChangeStatus(status))
    }

    pub fn set_review_notes(&mut self, notes: impl Into<String>) {
        if let Some(review) = self.review.as_mut() {
            review.admin_notes = notes.into();
        }
    }

    pub fn can_submit_review(&self) -> bool {
        self.review.as_ref().is_some_and(ReviewDialog::can_submit)
    }

    pub fn cancel_review(&mut self) {
        self.review = None;
    }

    pub async fn submit_review(&mut self) -> bool {
        let Some(review) = self.review.as_ref() else {
            return false;
        };
        if !review.can_submit() {
            self.notifications.error("Admin notes are required to decline a report");
            return false;
        }

        let status = review.action.target_status();
        let notes = review.admin_notes.trim();
        let notes = (!notes.is_empty()).then_some(notes);
        let outcome = self
            .ctx
            .service
            .update_report_status(review.report_id, status, notes)
            .await;

        if !self.notifications.settle(outcome, &format!("Report {}", status)) {
            return false;
        }
        self.review = None;
        self.reload().await;
        true
    }

    pub async fn bulk(&mut self, action: &str, report_ids: Vec<u64>, admin_notes: Option<String>) -> bool {
        info!("Bulk {} requested for {:?}", action, report_ids);
        let operation = BulkOperation {
            action: action.to_string(),
            report_ids,
            admin_notes,
        };
        let outcome = self.ctx.service.bulk_operation(&operation).await;
        if !self.notifications.settle(outcome, "Bulk operation completed") {
            return false;
        }
        self.reload().await;
        true
    }
}
