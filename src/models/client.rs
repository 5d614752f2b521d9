use super::lenient;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientContact {
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub name: String,
    #[serde(alias = "phone", deserialize_with = "lenient::string_or_empty", default)]
    pub number: String,
    #[serde(deserialize_with = "lenient::optional_string", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// PCO currently responsible for a client (weak reference)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AssignedPco {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub id: u64,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub name: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub pco_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Client {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub id: u64,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub name: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub address_line1: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub address_line2: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub city: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub state: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub postal_code: String,
    #[serde(deserialize_with = "lenient::vec_or_json_string", default)]
    pub contacts: Vec<ClientContact>,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub status: String,
    #[serde(default)]
    pub assigned_pco: Option<AssignedPco>,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub total_reports: u64,
    #[serde(deserialize_with = "lenient::optional_string", default)]
    pub created_at: Option<String>,
}

impl Client {
    /// Single-line address for tables
    pub fn full_address(&self) -> String {
        [
            self.address_line1.as_str(),
            self.address_line2.as_str(),
            self.city.as_str(),
            self.state.as_str(),
            self.postal_code.as_str(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }

    pub fn primary_contact(&self) -> Option<&ClientContact> {
        self.contacts.first()
    }
}

/// Body for creating or updating a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientForm {
    pub company_name: String,
    pub address_line1: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address_line2: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub postal_code: String,
    pub contacts: Vec<ClientContact>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
}

impl ClientForm {
    pub fn from_client(client: &Client) -> Self {
        Self {
            company_name: client.name.clone(),
            address_line1: client.address_line1.clone(),
            address_line2: client.address_line2.clone(),
            city: client.city.clone(),
            state: client.state.clone(),
            postal_code: client.postal_code.clone(),
            contacts: client.contacts.clone(),
            status: client.status.clone(),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.company_name.trim().is_empty() {
            missing.push("company_name");
        }
        if self.address_line1.trim().is_empty() {
            missing.push("address_line1");
        }
        if self.city.trim().is_empty() {
            missing.push("city");
        }
        missing
    }
}
