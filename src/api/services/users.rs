use super::{AdminService, extract_list};
use crate::api::constants::paths;
use crate::api::envelope::ApiResponse;
use crate::api::transport::ApiRequest;
use crate::models::{User, UserForm, UserRole};
use anyhow::Result;
use log::{debug, info};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserQuery {
    pub role: Option<UserRole>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl AdminService {
    pub async fn get_users(&self, query: &UserQuery) -> Result<ApiResponse<Vec<User>>> {
        debug!("Fetching users: {:?}", query);
        let request = ApiRequest::get(paths::USERS)
            .param_opt("role", query.role.map(|r| r.as_str()))
            .param_opt("status", query.status.as_deref())
            .param_opt("search", query.search.as_deref());

        self.send(request)
            .await?
            .try_map(|data| Ok(extract_list::<User>(data, &["users", "data"])?.0))
    }

    pub async fn get_user(&self, id: u64) -> Result<ApiResponse<User>> {
        debug!("Fetching user {}", id);
        self.send_typed(ApiRequest::get(paths::user(id))).await
    }

    pub async fn create_user(&self, form: &UserForm) -> Result<ApiResponse> {
        info!("Creating user {} ({})", form.name, form.role);
        self.send(ApiRequest::post(paths::USERS, serde_json::to_value(form)?)).await
    }

    pub async fn update_user(&self, id: u64, form: &UserForm) -> Result<ApiResponse> {
        info!("Updating user {}", id);
        self.send(ApiRequest::put(paths::user(id), serde_json::to_value(form)?)).await
    }

    pub async fn delete_user(&self, id: u64) -> Result<ApiResponse<Value>> {
        info!("Deleting user {}", id);
        self.send(ApiRequest::delete(paths::user(id))).await
    }
}
