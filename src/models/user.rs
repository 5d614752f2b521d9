use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Pco,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Pco => "pco",
        }
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "pco" => Ok(Self::Pco),
            other => anyhow::bail!("Unknown role '{}'", other),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub id: u64,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub pco_number: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub name: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub email: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub phone: String,
    #[serde(deserialize_with = "lenient::parsed_or_default", default)]
    pub role: UserRole,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub status: String,
    #[serde(deserialize_with = "lenient::optional_string", default)]
    pub created_at: Option<String>,
}

/// Body for creating or updating a user. The password is only sent when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserForm {
    pub pco_number: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub phone: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            pco_number: user.pco_number.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            status: user.status.clone(),
            password: None,
        }
    }

    pub fn missing_fields(&self, creating: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.pco_number.trim().is_empty() {
            missing.push("pco_number");
        }
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if creating && self.password.as_deref().map_or(true, |p| p.is_empty()) {
            missing.push("password");
        }
        missing
    }
}

/// The signed-in admin, used for audit fields like `assigned_by`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CurrentUser {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}
