use crate::api::UserQuery;
use crate::console::filter::{Choice, Searchable, filter_items};
use crate::console::{ListController, Modal, Notifications, missing_fields_message};
use crate::context::AppContext;
use crate::models::{User, UserForm, UserRole};
use log::debug;

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.pco_number.as_str(),
            self.phone.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilter {
    pub search: String,
    pub role: Choice<UserRole>,
    pub status: Choice<String>,
}

pub struct UsersPage {
    ctx: AppContext,
    pub list: ListController<User>,
    pub modal: Modal<UserForm>,
    pub filter: UserFilter,
    pub notifications: Notifications,
}

impl UsersPage {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            list: ListController::new(),
            modal: Modal::default(),
            filter: UserFilter::default(),
            notifications: Notifications::new(),
        }
    }

    pub async fn reload(&mut self) -> bool {
        let query = UserQuery::default();
        self.list
            .load(self.ctx.service.get_users(&query), &mut self.notifications)
            .await
    }

    /// Fetch one user for the details view
    pub async fn fetch_user(&mut self, id: u64) -> Option<User> {
        match self.ctx.service.get_user(id).await {
            Ok(response) if response.success => {
                if response.data.is_none() {
                    self.notifications.error(format!("User {} not found", id));
                }
                response.data
            }
            Ok(response) => {
                self.notifications.error(response.error_message());
                None
            }
            Err(err) => {
                self.notifications.error(format!("{:#}", err));
                None
            }
        }
    }

    pub fn visible(&self) -> Vec<&User> {
        let filter = &self.filter;
        filter_items(self.list.items(), &filter.search, |user| {
            filter.role.matches(&user.role) && filter.status.matches(&user.status)
        })
    }

    pub fn start_create(&mut self) {
        self.modal.open_create(UserForm {
            status: "active".into(),
            ..Default::default()
        });
    }

    pub fn start_edit(&mut self, id: u64) -> bool {
        match self.list.find(|user| user.id == id) {
            Some(user) => {
                let form = UserForm::from_user(user);
                self.modal.open_edit(id, form);
                true
            }
            None => {
                self.notifications.error(format!("User {} is not in the list", id));
                false
            }
        }
    }

    pub async fn submit(&mut self) -> bool {
        let outcome = match &self.modal {
            Modal::Create(form) => {
                if let Some(message) = missing_fields_message(&form.missing_fields(true)) {
                    self.notifications.error(message);
                    return false;
                }
                self.ctx.service.create_user(form).await
            }
            Modal::Edit { id, form } => {
                if let Some(message) = missing_fields_message(&form.missing_fields(false)) {
                    self.notifications.error(message);
                    return false;
                }
                self.ctx.service.update_user(*id, form).await
            }
            _ => return false,
        };

        if !self.notifications.settle(outcome, "User saved") {
            return false;
        }
        self.modal.close();
        self.reload().await;
        true
    }

    pub fn request_delete(&mut self, id: u64) {
        let label = self
            .list
            .find(|user| user.id == id)
            .map(|user| user.name.clone())
            .unwrap_or_else(|| format!("user {}", id));
        self.modal.confirm_delete(id, label);
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.modal.pending_delete() else {
            debug!("Delete confirmed with no pending user");
            return false;
        };
        let outcome = self.ctx.service.delete_user(id).await;
        if !self.notifications.settle(outcome, "User deleted") {
            return false;
        }
        self.modal.close();
        self.reload().await;
        true
    }
}
