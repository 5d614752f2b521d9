use crate::console::Notifications;
use crate::context::AppContext;
use crate::models::DashboardStats;

pub struct DashboardPage {
    ctx: AppContext,
    pub stats: Option<DashboardStats>,
    pub is_loading: bool,
    pub notifications: Notifications,
}

impl DashboardPage {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            stats: None,
            is_loading: false,
            notifications: Notifications::new(),
        }
    }

    pub async fn load(&mut self) -> bool {
        self.is_loading = true;
        let outcome = self.ctx.service.get_dashboard_stats().await;
        self.is_loading = false;

        match outcome {
            Ok(response) if response.success => {
                self.stats = Some(response.data.unwrap_or_default());
                true
            }
            Ok(response) => {
                self.notifications.error(response.error_message());
                false
            }
            Err(err) => {
                self.notifications.error(format!("{:#}", err));
                false
            }
        }
    }
}
