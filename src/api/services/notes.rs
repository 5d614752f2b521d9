use super::{AdminService, extract_list};
use crate::api::constants::paths;
use crate::api::envelope::ApiResponse;
use crate::api::transport::ApiRequest;
use crate::models::Note;
use anyhow::Result;
use log::{debug, info};
use serde_json::json;

impl AdminService {
    pub async fn get_notes(&self, report_id: u64) -> Result<ApiResponse<Vec<Note>>> {
        debug!("Fetching notes for report {}", report_id);
        let request = ApiRequest::get(paths::NOTES).param("report_id", report_id);

        self.send(request)
            .await?
            .try_map(|data| Ok(extract_list::<Note>(data, &["notes", "data"])?.0))
    }

    pub async fn add_note(&self, report_id: u64, content: &str) -> Result<ApiResponse> {
        let content = content.trim();
        if content.is_empty() {
            anyhow::bail!("Note text cannot be empty");
        }
        info!("Adding note to report {}", report_id);
        self.send(ApiRequest::post(
            paths::NOTES,
            json!({ "report_id": report_id, "content": content }),
        ))
        .await
    }

    pub async fn delete_note(&self, id: u64) -> Result<ApiResponse> {
        info!("Deleting note {}", id);
        self.send(ApiRequest::delete(paths::note(id))).await
    }
}
