use super::{AdminService, rows_of};
use crate::api::constants::paths;
use crate::api::envelope::ApiResponse;
use crate::api::transport::ApiRequest;
use crate::models::lenient::{canonicalize, value_as_string, value_as_u64};
use crate::models::{AssignedPco, Client, ClientForm, Paginated};
use anyhow::{Context, Result};
use log::{debug, info};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct ClientQuery {
    pub page: u64,
    pub limit: u64,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl Default for ClientQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 25,
            search: None,
            status: None,
        }
    }
}

fn first_of(row: &Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .find(|value| !value.is_null())
        .cloned()
}

/// Build a [`Client`] from a flat backend row, nesting the PCO fields
pub fn client_from_row(row: Value) -> Result<Client> {
    let Value::Object(mut map) = row else {
        anyhow::bail!("Client row is not an object");
    };

    canonicalize(&mut map, "name", &["company_name", "client_name"]);
    canonicalize(&mut map, "address_line1", &["address"]);

    if !matches!(map.get("assigned_pco"), Some(Value::Object(_))) {
        let pco_id = first_of(&map, &["assigned_pco_id", "pco_id"]).and_then(|v| value_as_u64(&v));
        let assigned = pco_id.filter(|id| *id != 0).map(|id| AssignedPco {
            id,
            name: first_of(&map, &["assigned_pco_name", "pco_name"])
                .and_then(|v| value_as_string(&v))
                .unwrap_or_default(),
            pco_number: first_of(&map, &["assigned_pco_number", "pco_number"])
                .and_then(|v| value_as_string(&v))
                .unwrap_or_default(),
        });
        map.insert("assigned_pco".to_string(), serde_json::to_value(assigned)?);
    }

    serde_json::from_value(Value::Object(map)).context("Failed to decode client row")
}

impl AdminService {
    /// List clients, paginated on our side because the endpoint returns everything
    pub async fn get_clients(&self, query: &ClientQuery) -> Result<ApiResponse<Paginated<Client>>> {
        debug!("Fetching clients: {:?}", query);
        let request = ApiRequest::get(paths::CLIENTS)
            .param_opt("search", query.search.as_deref())
            .param_opt("status", query.status.as_deref());

        self.send(request).await?.try_map(|data| {
            let clients = rows_of(data, "clients")
                .into_iter()
                .map(client_from_row)
                .collect::<Result<Vec<_>>>()?;
            let page = Paginated::from_full_list(&clients, query.page, query.limit);
            debug!(
                "Sliced {} of {} clients for page {}",
                page.items.len(),
                clients.len(),
                page.pagination.current_page
            );
            Ok(page)
        })
    }

    pub async fn get_client(&self, id: u64) -> Result<ApiResponse<Client>> {
        debug!("Fetching client {}", id);
        self.send(ApiRequest::get(paths::client(id)))
            .await?
            .try_map(|data| match data {
                Value::Object(mut map) => {
                    let row = map.remove("client").unwrap_or(Value::Object(map));
                    client_from_row(row)
                }
                other => client_from_row(other),
            })
    }

    pub async fn create_client(&self, form: &ClientForm) -> Result<ApiResponse> {
        info!("Creating client {}", form.company_name);
        self.send(ApiRequest::post(paths::CLIENTS, serde_json::to_value(form)?)).await
    }

    pub async fn update_client(&self, id: u64, form: &ClientForm) -> Result<ApiResponse> {
        info!("Updating client {}", id);
        self.send(ApiRequest::put(paths::client(id), serde_json::to_value(form)?)).await
    }

    pub async fn delete_client(&self, id: u64) -> Result<ApiResponse> {
        info!("Deleting client {}", id);
        self.send(ApiRequest::delete(paths::client(id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_row_gets_nested_pco() {
        let client = client_from_row(json!({
            "id": "7",
            "company_name": "Harbour Bakery",
            "pco_id": "3",
            "pco_name": "Lee",
            "pco_number": "PCO-003",
            "contacts": "[{\"name\":\"Ann\",\"phone\":\"555\"}]"
        }))
        .unwrap();

        assert_eq!(client.id, 7);
        assert_eq!(client.name, "Harbour Bakery");
        let pco = client.assigned_pco.unwrap();
        assert_eq!(pco.id, 3);
        assert_eq!(pco.pco_number, "PCO-003");
        assert_eq!(client.contacts[0].number, "555");
    }

    #[test]
    fn test_unassigned_row() {
        let client = client_from_row(json!({"id": 2, "name": "X", "pco_id": null})).unwrap();
        assert!(client.assigned_pco.is_none());
    }
}
