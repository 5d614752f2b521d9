use crate::api::ChemicalQuery;
use crate::console::filter::{Choice, Searchable, filter_items};
use crate::console::{ListController, Modal, Notifications, missing_fields_message};
use crate::context::AppContext;
use crate::models::{Chemical, ChemicalCategory, ChemicalForm};
use log::warn;

impl Searchable for Chemical {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.l_number.as_str(),
            self.chemical_type.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChemicalFilter {
    pub search: String,
    pub category: Choice<ChemicalCategory>,
    pub active: Choice<bool>,
}

pub struct ChemicalsPage {
    ctx: AppContext,
    pub list: ListController<Chemical>,
    pub modal: Modal<ChemicalForm>,
    pub filter: ChemicalFilter,
    pub notifications: Notifications,
    /// Second dialog, for removing a deactivated chemical for good
    pending_permanent_delete: Option<u64>,
}

impl ChemicalsPage {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            list: ListController::new(),
            modal: Modal::default(),
            filter: ChemicalFilter::default(),
            notifications: Notifications::new(),
            pending_permanent_delete: None,
        }
    }

    pub async fn reload(&mut self) -> bool {
        let query = ChemicalQuery {
            include_inactive: true,
            ..Default::default()
        };
        self.list
            .load(self.ctx.service.get_chemicals(&query), &mut self.notifications)
            .await
    }

    pub fn visible(&self) -> Vec<&Chemical> {
        let filter = &self.filter;
        filter_items(self.list.items(), &filter.search, |chemical| {
            filter.category.matches(&chemical.category) && filter.active.matches(&chemical.is_active)
        })
    }

    pub fn start_create(&mut self) {
        self.modal.open_create(ChemicalForm::default());
    }

    pub fn start_edit(&mut self, id: u64) -> bool {
        match self.list.find(|chemical| chemical.id == id) {
            Some(chemical) => {
                let form = ChemicalForm::from_chemical(chemical);
                self.modal.open_edit(id, form);
                true
            }
            None => {
                self.notifications.error(format!("Chemical {} is not in the list", id));
                false
            }
        }
    }

    pub async fn submit(&mut self) -> bool {
        let outcome = match &self.modal {
            Modal::Create(form) | Modal::Edit { form, .. } => {
                if let Some(message) = missing_fields_message(&form.missing_fields()) {
                    self.notifications.error(message);
                    return false;
                }
                match &self.modal {
                    Modal::Edit { id, .. } => self.ctx.service.update_chemical(*id, form).await,
                    _ => self.ctx.service.create_chemical(form).await,
                }
            }
            _ => return false,
        };

        if !self.notifications.settle(outcome, "Chemical saved") {
            return false;
        }
        self.modal.close();
        self.reload().await;
        true
    }

    /// First step of a soft delete
    pub fn request_deactivate(&mut self, id: u64) {
        let label = self
            .list
            .find(|chemical| chemical.id == id)
            .map(|chemical| chemical.name.clone())
            .unwrap_or_else(|| format!("chemical {}", id));
        self.modal.confirm_delete(id, label);
    }

    pub async fn confirm_deactivate(&mut self) -> bool {
        let Some(id) = self.modal.pending_delete() else {
            return false;
        };
        let outcome = self.ctx.service.set_chemical_active(id, false).await;
        if !self.notifications.settle(outcome, "Chemical deactivated") {
            return false;
        }
        self.modal.close();
        self.reload().await;
        true
    }

    pub async fn reactivate(&mut self, id: u64) -> bool {
        let outcome = self.ctx.service.set_chemical_active(id, true).await;
        if !self.notifications.settle(outcome, "Chemical reactivated") {
            return false;
        }
        self.reload().await;
        true
    }

    /// First step of a permanent delete; refused for used or active chemicals
    pub fn request_permanent_delete(&mut self, id: u64) -> bool {
        let Some(chemical) = self.list.find(|chemical| chemical.id == id) else {
            self.notifications.error(format!("Chemical {} is not in the list", id));
            return false;
        };
        if let Err(denied) = chemical.check_permanent_delete() {
            warn!("Permanent delete of chemical {} blocked: {}", id, denied);
            let message = format!("Cannot delete '{}': {}", chemical.name, denied);
            self.notifications.error(message);
            return false;
        }
        self.pending_permanent_delete = Some(id);
        true
    }

    pub fn pending_permanent_delete(&self) -> Option<u64> {
        self.pending_permanent_delete
    }

    pub fn cancel_permanent_delete(&mut self) {
        self.pending_permanent_delete = None;
    }

    pub async fn confirm_permanent_delete(&mut self) -> bool {
        let Some(id) = self.pending_permanent_delete else {
            return false;
        };
        let Some(chemical) = self.list.find(|chemical| chemical.id == id).cloned() else {
            self.pending_permanent_delete = None;
            return false;
        };
        let outcome = self.ctx.service.permanent_delete_chemical(&chemical).await;
        if !self.notifications.settle(outcome, "Chemical permanently deleted") {
            return false;
        }
        self.pending_permanent_delete = None;
        self.reload().await;
        true
    }
}
