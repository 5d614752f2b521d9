use super::{AdminService, extract_list};
use crate::api::constants::paths;
use crate::api::envelope::ApiResponse;
use crate::api::transport::ApiRequest;
use crate::models::{Assignment, AssignmentAction, AssignmentRequest};
use anyhow::Result;
use log::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignmentQuery {
    pub client_id: Option<u64>,
    pub pco_id: Option<u64>,
}

impl AdminService {
    pub async fn get_assignments(&self, query: &AssignmentQuery) -> Result<ApiResponse<Vec<Assignment>>> {
        debug!("Fetching assignments: {:?}", query);
        let request = ApiRequest::get(paths::ASSIGNMENTS)
            .param_opt("client_id", query.client_id)
            .param_opt("pco_id", query.pco_id);

        self.send(request)
            .await?
            .try_map(|data| Ok(extract_list::<Assignment>(data, &["assignments", "data"])?.0))
    }

    /// Assign or unassign clients in one call
    pub async fn assign_clients_to_pco(&self, request: &AssignmentRequest) -> Result<ApiResponse> {
        if request.client_ids.is_empty() {
            anyhow::bail!("Select at least one client");
        }
        match &request.action {
            AssignmentAction::Assign { pco_id, assigned_by } => info!(
                "Assigning {} client(s) to PCO {} (by {})",
                request.client_ids.len(),
                pco_id,
                assigned_by
            ),
            AssignmentAction::Unassign { pco_id: Some(pco_id) } => info!(
                "Unassigning {} client(s) from PCO {}",
                request.client_ids.len(),
                pco_id
            ),
            AssignmentAction::Unassign { pco_id: None } => info!(
                "Removing all assignments for {} client(s)",
                request.client_ids.len()
            ),
        }
        self.send(ApiRequest::post(paths::ASSIGNMENTS, request.to_body())).await
    }

    pub async fn delete_assignment(&self, id: u64) -> Result<ApiResponse> {
        info!("Deleting assignment {}", id);
        self.send(ApiRequest::delete(paths::assignment(id))).await
    }
}
