//! Editing screen shared by every report type
//!
//! The loaded report is kept twice: `original` as the backend sent it and
//! `draft` as edited. Saving sends only what differs between the two.

use crate::console::Notifications;
use crate::context::AppContext;
use crate::models::{
    ChemicalUsage, DetailedReport, FumigationTreatment, InspectionStation, ReportType,
    StationLocation,
};
use crate::normalize::report_edit_payload;
use log::debug;
use serde_json::Value;

pub struct ReportEditor {
    ctx: AppContext,
    report_id: u64,
    original: Option<DetailedReport>,
    draft: Option<DetailedReport>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub load_error: Option<String>,
    pub notifications: Notifications,
}

impl ReportEditor {
    pub fn new(ctx: AppContext, report_id: u64) -> Self {
        Self {
            ctx,
            report_id,
            original: None,
            draft: None,
            is_loading: false,
            is_saving: false,
            load_error: None,
            notifications: Notifications::new(),
        }
    }

    pub async fn load(&mut self) -> bool {
        self.is_loading = true;
        let outcome = self.ctx.service.get_report(self.report_id).await;
        self.is_loading = false;

        let message = match outcome {
            Ok(response) if response.success => match response.data {
                Some(report) => {
                    self.draft = Some(report.clone());
                    self.original = Some(report);
                    self.load_error = None;
                    return true;
                }
                None => format!("Report {} came back empty", self.report_id),
            },
            Ok(response) => response.error_message(),
            Err(err) => format!("{:#}", err),
        };
        self.load_error = Some(message.clone());
        self.notifications.error(message);
        false
    }

    pub fn draft(&self) -> Option<&DetailedReport> {
        self.draft.as_ref()
    }

    pub fn show_stations_tab(&self) -> bool {
        self.draft.as_ref().is_some_and(DetailedReport::show_stations_tab)
    }

    pub fn show_fumigation_tab(&self) -> bool {
        self.draft.as_ref().is_some_and(DetailedReport::show_fumigation_tab)
    }

    /// Apply a change to the report's own fields
    pub fn update(&mut self, edit: impl FnOnce(&mut DetailedReport)) {
        if let Some(draft) = self.draft.as_mut() {
            edit(draft);
        }
    }

    pub fn set_report_type(&mut self, report_type: ReportType) {
        self.update(|draft| draft.report_type = report_type);
    }

    fn edit_stations(&mut self, edit: impl FnOnce(&mut Vec<InspectionStation>)) {
        if let Some(draft) = self.draft.as_mut() {
            let mut stations = std::mem::take(&mut draft.stations);
            edit(&mut stations);
            draft.set_stations(stations);
        }
    }

    /// Append a blank station numbered after the highest existing one
    pub fn add_station(&mut self, location: StationLocation) -> Option<u32> {
        let mut added = None;
        self.edit_stations(|stations| {
            let number = stations.iter().map(|s| s.station_number).max().unwrap_or(0) + 1;
            stations.push(InspectionStation::new(number, location));
            added = Some(number);
        });
        added
    }

    pub fn remove_station(&mut self, index: usize) -> bool {
        let mut removed = false;
        self.edit_stations(|stations| {
            if index < stations.len() {
                stations.remove(index);
                removed = true;
            }
        });
        removed
    }

    pub fn update_station(&mut self, index: usize, edit: impl FnOnce(&mut InspectionStation)) -> bool {
        let mut updated = false;
        self.edit_stations(|stations| {
            if let Some(station) = stations.get_mut(index) {
                edit(station);
                updated = true;
            }
        });
        updated
    }

    pub fn add_treatment(&mut self) -> Option<usize> {
        let draft = self.draft.as_mut()?;
        draft.fumigation.push(FumigationTreatment::default());
        Some(draft.fumigation.len() - 1)
    }

    pub fn remove_treatment(&mut self, index: usize) -> bool {
        match self.draft.as_mut() {
            Some(draft) if index < draft.fumigation.len() => {
                draft.fumigation.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn update_treatment(&mut self, index: usize, edit: impl FnOnce(&mut FumigationTreatment)) -> bool {
        match self.draft.as_mut().and_then(|draft| draft.fumigation.get_mut(index)) {
            Some(treatment) => {
                edit(treatment);
                true
            }
            None => false,
        }
    }

    pub fn add_treatment_chemical(&mut self, index: usize, usage: ChemicalUsage) -> bool {
        self.update_treatment(index, |treatment| treatment.chemicals.push(usage))
    }

    /// Partial update body for the current edits
    pub fn payload(&self) -> Option<Value> {
        match (&self.original, &self.draft) {
            (Some(original), Some(draft)) => Some(report_edit_payload(original, draft)),
            _ => None,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.payload()
            .and_then(|payload| payload.as_object().map(|fields| !fields.is_empty()))
            .unwrap_or(false)
    }

    pub async fn save(&mut self) -> bool {
        let Some(payload) = self.payload() else {
            self.notifications.error("Report is not loaded");
            return false;
        };
        if payload.as_object().is_none_or(|fields| fields.is_empty()) {
            self.notifications.info("No changes to save");
            return false;
        }

        debug!("Saving report {}: {}", self.report_id, payload);
        self.is_saving = true;
        let outcome = self.ctx.service.edit_report(self.report_id, payload).await;
        self.is_saving = false;

        if !self.notifications.settle(outcome, "Report updated") {
            return false;
        }
        self.load().await;
        true
    }
}
