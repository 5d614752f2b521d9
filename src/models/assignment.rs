use super::lenient;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Join record linking a client to a PCO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Assignment {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub id: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub client_id: u64,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub client_name: String,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub pco_id: u64,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub pco_name: String,
    #[serde(deserialize_with = "lenient::optional_u64", default)]
    pub assigned_by: Option<u64>,
    #[serde(deserialize_with = "lenient::optional_string", default)]
    pub assigned_at: Option<String>,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub status: String,
}

/// What to do with the listed clients.
///
/// Assigning needs both the PCO and the acting admin; unassigning without a
/// PCO removes every assignment the clients have.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentAction {
    Assign { pco_id: u64, assigned_by: u64 },
    Unassign { pco_id: Option<u64> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRequest {
    pub client_ids: Vec<u64>,
    pub action: AssignmentAction,
}

impl AssignmentRequest {
    pub fn assign(client_ids: Vec<u64>, pco_id: u64, assigned_by: u64) -> Self {
        Self {
            client_ids,
            action: AssignmentAction::Assign { pco_id, assigned_by },
        }
    }

    pub fn unassign(client_ids: Vec<u64>, pco_id: Option<u64>) -> Self {
        Self {
            client_ids,
            action: AssignmentAction::Unassign { pco_id },
        }
    }

    pub fn to_body(&self) -> Value {
        match &self.action {
            AssignmentAction::Assign { pco_id, assigned_by } => json!({
                "action": "assign",
                "client_ids": self.client_ids,
                "pco_id": pco_id,
                "assigned_by": assigned_by,
            }),
            AssignmentAction::Unassign { pco_id } => {
                let mut body = json!({
                    "action": "unassign",
                    "client_ids": self.client_ids,
                });
                if let Some(pco_id) = pco_id {
                    body["pco_id"] = json!(pco_id);
                }
                body
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unassign_without_pco_omits_field() {
        let body = AssignmentRequest::unassign(vec![3], None).to_body();
        assert_eq!(body["action"], "unassign");
        assert!(body.get("pco_id").is_none());

        let body = AssignmentRequest::assign(vec![3, 4], 9, 1).to_body();
        assert_eq!(body["pco_id"], 9);
        assert_eq!(body["assigned_by"], 1);
        assert_eq!(body["client_ids"], json!([3, 4]));
    }
}
