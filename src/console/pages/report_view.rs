use crate::api::EmailRequest;
use crate::console::Notifications;
use crate::context::AppContext;
use crate::models::{DetailedReport, Note};
use anyhow::Context;
use log::{info, warn};
use std::fs;
use std::path::Path;

/// Read-only report screen with its review notes and PDF actions
pub struct ReportView {
    ctx: AppContext,
    report_id: u64,
    pub report: Option<DetailedReport>,
    pub notes: Vec<Note>,
    pub note_draft: String,
    pub is_loading: bool,
    pub load_error: Option<String>,
    pub notifications: Notifications,
}

impl ReportView {
    pub fn new(ctx: AppContext, report_id: u64) -> Self {
        Self {
            ctx,
            report_id,
            report: None,
            notes: Vec::new(),
            note_draft: String::new(),
            is_loading: false,
            load_error: None,
            notifications: Notifications::new(),
        }
    }

    pub fn report_id(&self) -> u64 {
        self.report_id
    }

    pub async fn load(&mut self) -> bool {
        self.is_loading = true;
        let outcome = self.ctx.service.get_report(self.report_id).await;
        self.is_loading = false;

        match outcome {
            Ok(response) if response.success => {
                self.report = response.data;
                self.load_error = None;
            }
            Ok(response) => {
                let message = response.error_message();
                self.load_error = Some(message.clone());
                self.notifications.error(message);
                return false;
            }
            Err(err) => {
                let message = format!("{:#}", err);
                self.load_error = Some(message.clone());
                self.notifications.error(message);
                return false;
            }
        }

        self.load_notes().await;
        true
    }

    /// Notes are secondary; a failure here leaves the report on screen
    pub async fn load_notes(&mut self) {
        match self.ctx.service.get_notes(self.report_id).await {
            Ok(response) if response.success => self.notes = response.data.unwrap_or_default(),
            Ok(response) => warn!("Notes for report {} unavailable: {}", self.report_id, response.error_message()),
            Err(err) => warn!("Notes for report {} unavailable: {:#}", self.report_id, err),
        }
    }

    pub async fn add_note(&mut self) -> bool {
        let outcome = self.ctx.service.add_note(self.report_id, &self.note_draft).await;
        if !self.notifications.settle(outcome, "Note added") {
            return false;
        }
        self.note_draft.clear();
        self.load_notes().await;
        true
    }

    pub async fn delete_note(&mut self, note_id: u64) -> bool {
        let outcome = self.ctx.service.delete_note(note_id).await;
        if !self.notifications.settle(outcome, "Note deleted") {
            return false;
        }
        self.load_notes().await;
        true
    }

    /// Save the backend-rendered PDF to `path`
    pub async fn download_pdf(&mut self, path: &Path) -> bool {
        let outcome = self
            .ctx
            .service
            .download_report_pdf(self.report_id)
            .await
            .and_then(|bytes| {
                fs::write(path, &bytes)
                    .with_context(|| format!("Failed to write PDF to: {}", path.display()))?;
                Ok(bytes.len())
            });

        match outcome {
            Ok(size) => {
                info!("Saved report {} PDF ({} bytes) to {}", self.report_id, size, path.display());
                self.notifications.success(format!("PDF saved to {}", path.display()));
                true
            }
            Err(err) => {
                self.notifications.error(format!("{:#}", err));
                false
            }
        }
    }

    pub async fn email(&mut self, request: &EmailRequest) -> bool {
        let outcome = self.ctx.service.email_report(self.report_id, request).await;
        self.notifications.settle(outcome, "Report emailed")
    }
}
