use super::AdminService;
use crate::api::constants::paths;
use crate::api::envelope::ApiResponse;
use crate::api::transport::ApiRequest;
use crate::models::DashboardStats;
use anyhow::Result;
use log::debug;

impl AdminService {
    pub async fn get_dashboard_stats(&self) -> Result<ApiResponse<DashboardStats>> {
        debug!("Fetching dashboard stats");
        self.send_typed(ApiRequest::get(paths::DASHBOARD)).await
    }
}
