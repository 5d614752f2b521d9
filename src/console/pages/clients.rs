use crate::api::ClientQuery;
use crate::console::filter::{Choice, Searchable, filter_items};
use crate::console::{ListController, Modal, Notifications, missing_fields_message};
use crate::context::AppContext;
use crate::models::{AssignmentRequest, Client, ClientForm};

impl Searchable for Client {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.city.as_str(), self.address_line1.as_str()];
        if let Some(pco) = &self.assigned_pco {
            fields.push(pco.name.as_str());
            fields.push(pco.pco_number.as_str());
        }
        if let Some(contact) = self.primary_contact() {
            fields.push(contact.name.as_str());
        }
        fields
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientFilter {
    pub search: String,
    pub status: Choice<String>,
    /// `Only(true)` keeps clients with a PCO, `Only(false)` the unassigned ones
    pub assigned: Choice<bool>,
}

pub struct ClientsPage {
    ctx: AppContext,
    pub query: ClientQuery,
    pub list: ListController<Client>,
    pub modal: Modal<ClientForm>,
    pub filter: ClientFilter,
    pub notifications: Notifications,
}

impl ClientsPage {
    pub fn new(ctx: AppContext) -> Self {
        let query = ClientQuery {
            limit: ctx.page_size,
            ..Default::default()
        };
        Self {
            ctx,
            query,
            list: ListController::new(),
            modal: Modal::default(),
            filter: ClientFilter::default(),
            notifications: Notifications::new(),
        }
    }

    pub async fn reload(&mut self) -> bool {
        self.list
            .load_page(self.ctx.service.get_clients(&self.query), &mut self.notifications)
            .await
    }

    pub async fn go_to_page(&mut self, page: u64) -> bool {
        self.query.page = page.max(1);
        self.reload().await
    }

    /// Fetch one client, whether or not it is on the current page
    pub async fn fetch_client(&mut self, id: u64) -> Option<Client> {
        match self.ctx.service.get_client(id).await {
            Ok(response) if response.success => {
                if response.data.is_none() {
                    self.notifications.error(format!("Client {} not found", id));
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

    pub fn visible(&self) -> Vec<&Client> {
        let filter = &self.filter;
        filter_items(self.list.items(), &filter.search, |client| {
            filter.status.matches(&client.status)
                && filter.assigned.matches(&client.assigned_pco.is_some())
        })
    }

    pub fn start_create(&mut self) {
        self.modal.open_create(ClientForm {
            status: "active".into(),
            ..Default::default()
        });
    }

    pub fn start_edit(&mut self, client: &Client) {
        self.modal.open_edit(client.id, ClientForm::from_client(client));
    }

    pub async fn submit(&mut self) -> bool {
        let outcome = match &self.modal {
            Modal::Create(form) | Modal::Edit { form, .. } => {
                if let Some(message) = missing_fields_message(&form.missing_fields()) {
                    self.notifications.error(message);
                    return false;
                }
                match &self.modal {
                    Modal::Edit { id, .. } => self.ctx.service.update_client(*id, form).await,
                    _ => self.ctx.service.create_client(form).await,
                }
            }
            _ => return false,
        };

        if !self.notifications.settle(outcome, "Client saved") {
            return false;
        }
        self.modal.close();
        self.reload().await;
        true
    }

    pub fn request_delete(&mut self, id: u64) {
        let label = self
            .list
            .find(|client| client.id == id)
            .map(|client| client.name.clone())
            .unwrap_or_else(|| format!("client {}", id));
        self.modal.confirm_delete(id, label);
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.modal.pending_delete() else {
            return false;
        };
        let outcome = self.ctx.service.delete_client(id).await;
        if !self.notifications.settle(outcome, "Client deleted") {
            return false;
        }
        self.modal.close();
        self.reload().await;
        true
    }

    /// Assign clients to a PCO on behalf of the current user
    pub async fn assign(&mut self, client_ids: Vec<u64>, pco_id: u64) -> bool {
        let assigned_by = match self.ctx.require_user_id() {
            Ok(id) => id,
            Err(err) => {
                self.notifications.error(err.to_string());
                return false;
            }
        };
        let request = AssignmentRequest::assign(client_ids, pco_id, assigned_by);
        let outcome = self.ctx.service.assign_clients_to_pco(&request).await;
        if !self.notifications.settle(outcome, "Clients assigned") {
            return false;
        }
        self.reload().await;
        true
    }

    /// Remove the PCO from one client through the direct unassign action
    pub async fn unassign(&mut self, client_id: u64) -> bool {
        let listed = self
            .list
            .find(|client| client.id == client_id)
            .map(|client| client.assigned_pco.as_ref().map(|pco| pco.id));
        let pco_id = match listed {
            Some(pco_id) => pco_id,
            None => match self.fetch_client(client_id).await {
                Some(client) => client.assigned_pco.map(|pco| pco.id),
                None => return false,
            },
        };
        let request = AssignmentRequest::unassign(vec![client_id], pco_id);
        let outcome = self.ctx.service.assign_clients_to_pco(&request).await;
        if !self.notifications.settle(outcome, "Client unassigned") {
            return false;
        }
        self.reload().await;
        true
    }
}
