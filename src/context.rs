//! Explicit application state handed to every page controller

use crate::api::{AdminService, HttpTransport, Transport};
use crate::config::Config;
use crate::models::CurrentUser;
use anyhow::Result;
use log::debug;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub service: AdminService,
    pub current_user: Option<CurrentUser>,
    pub page_size: u64,
}

impl AppContext {
    pub fn new(service: AdminService) -> Self {
        Self {
            service,
            current_user: None,
            page_size: 25,
        }
    }

    /// Build the reqwest-backed context described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.api_url()?;
        debug!("Connecting to {}", base_url);
        let transport = HttpTransport::new(
            base_url,
            config.api_token.clone(),
            config.settings.request_timeout(),
        )?;
        let service = AdminService::new(Arc::new(transport))
            .with_report_timeout(config.settings.report_timeout());

        Ok(Self {
            service,
            current_user: config.current_user.clone(),
            page_size: config.settings.page_size.max(1),
        })
    }

    pub fn with_transport<T: Transport + 'static>(transport: T) -> Self {
        Self::new(AdminService::from_transport(transport))
    }

    pub fn with_current_user(mut self, user: CurrentUser) -> Self {
        self.current_user = Some(user);
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Id recorded as `assigned_by`; assignments need a signed-in admin
    pub fn require_user_id(&self) -> Result<u64> {
        match &self.current_user {
            Some(user) if user.id != 0 => Ok(user.id),
            _ => anyhow::bail!(
                "No current user configured. Run 'pco-admin config set-user <id> <name>' first"
            ),
        }
    }
}
