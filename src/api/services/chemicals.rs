use super::{AdminService, rows_of};
use crate::api::constants::paths;
use crate::api::envelope::ApiResponse;
use crate::api::transport::ApiRequest;
use crate::models::lenient::canonicalize;
use crate::models::{Chemical, ChemicalCategory, ChemicalForm};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde_json::{Value, json};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChemicalQuery {
    pub category: Option<ChemicalCategory>,
    pub include_inactive: bool,
}

/// Decode a chemical row, folding the older column names into the current ones
pub fn chemical_from_row(row: Value) -> Result<Chemical> {
    let Value::Object(mut map) = row else {
        anyhow::bail!("Chemical row is not an object");
    };
    canonicalize(&mut map, "chemical_type", &["type"]);
    canonicalize(&mut map, "category", &["usage_type"]);
    canonicalize(&mut map, "quantity_unit", &["unit"]);
    canonicalize(&mut map, "is_active", &["active"]);
    canonicalize(&mut map, "total_usage_count", &["usage_count"]);
    serde_json::from_value(Value::Object(map)).context("Failed to decode chemical row")
}

impl AdminService {
    pub async fn get_chemicals(&self, query: &ChemicalQuery) -> Result<ApiResponse<Vec<Chemical>>> {
        debug!("Fetching chemicals: {:?}", query);
        let mut request = ApiRequest::get(paths::CHEMICALS)
            .param_opt("category", query.category.map(|c| c.as_str()));
        if query.include_inactive {
            request = request.param("include_inactive", 1);
        }

        self.send(request).await?.try_map(|data| {
            rows_of(data, "chemicals")
                .into_iter()
                .map(chemical_from_row)
                .collect()
        })
    }

    pub async fn create_chemical(&self, form: &ChemicalForm) -> Result<ApiResponse> {
        info!("Creating chemical {} ({})", form.name, form.l_number);
        self.send(ApiRequest::post(paths::CHEMICALS, serde_json::to_value(form)?)).await
    }

    pub async fn update_chemical(&self, id: u64, form: &ChemicalForm) -> Result<ApiResponse> {
        info!("Updating chemical {}", id);
        self.send(ApiRequest::put(paths::chemical(id), serde_json::to_value(form)?)).await
    }

    /// Soft delete (deactivate) or reactivate a chemical
    pub async fn set_chemical_active(&self, id: u64, active: bool) -> Result<ApiResponse> {
        info!("{} chemical {}", if active { "Activating" } else { "Deactivating" }, id);
        self.send(ApiRequest::put(paths::chemical_status(id), json!({ "is_active": active })))
            .await
    }

    /// Hard delete; refused locally unless the chemical is unused and inactive
    pub async fn permanent_delete_chemical(&self, chemical: &Chemical) -> Result<ApiResponse> {
        if let Err(denied) = chemical.check_permanent_delete() {
            warn!("Refusing permanent delete of chemical {}: {}", chemical.id, denied);
            anyhow::bail!("Cannot delete '{}': {}", chemical.name, denied);
        }
        info!("Permanently deleting chemical {}", chemical.id);
        self.send(ApiRequest::delete(paths::chemical_permanent(chemical.id))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_column_names() {
        let chemical = chemical_from_row(json!({
            "id": 4,
            "name": "Brodifacoum",
            "type": "Rodenticide",
            "unit": "g",
            "active": 0,
            "usage_count": "0",
            "category": "both"
        }))
        .unwrap();

        assert_eq!(chemical.chemical_type, "Rodenticide");
        assert_eq!(chemical.quantity_unit, "g");
        assert!(!chemical.is_active);
        assert_eq!(chemical.category, ChemicalCategory::Both);
        assert!(chemical.can_permanently_delete());
    }
}
