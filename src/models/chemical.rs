use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of report a chemical may be recorded against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChemicalCategory {
    #[default]
    Inspection,
    Fumigation,
    Both,
}

impl ChemicalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inspection => "inspection",
            Self::Fumigation => "fumigation",
            Self::Both => "both",
        }
    }
}

impl FromStr for ChemicalCategory {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inspection" => Ok(Self::Inspection),
            "fumigation" => Ok(Self::Fumigation),
            "both" => Ok(Self::Both),
            other => anyhow::bail!("Unknown chemical category '{}'", other),
        }
    }
}

impl fmt::Display for ChemicalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Chemical {
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub id: u64,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub l_number: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub name: String,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub chemical_type: String,
    #[serde(deserialize_with = "lenient::parsed_or_default", default)]
    pub category: ChemicalCategory,
    #[serde(deserialize_with = "lenient::string_or_empty", default)]
    pub quantity_unit: String,
    #[serde(deserialize_with = "lenient::bool_or_false", default)]
    pub is_active: bool,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub total_usage_count: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub inspection_usage_count: u64,
    #[serde(deserialize_with = "lenient::u64_or_zero", default)]
    pub fumigation_usage_count: u64,
    #[serde(deserialize_with = "lenient::optional_string", default)]
    pub created_at: Option<String>,
}

/// Why a permanent delete is refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDenied {
    /// The chemical is referenced by at least one report
    InUse(u64),
    /// Chemicals must be deactivated before they can be removed
    StillActive,
}

impl fmt::Display for DeleteDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InUse(count) => write!(
                f,
                "chemical has been used {} time(s) and cannot be permanently deleted",
                count
            ),
            Self::StillActive => f.write_str("deactivate the chemical before deleting it permanently"),
        }
    }
}

impl Chemical {
    /// Permanent delete is only allowed for unused, deactivated chemicals
    pub fn check_permanent_delete(&self) -> Result<(), DeleteDenied> {
        if self.total_usage_count != 0 {
            return Err(DeleteDenied::InUse(self.total_usage_count));
        }
        if self.is_active {
            return Err(DeleteDenied::StillActive);
        }
        Ok(())
    }

    pub fn can_permanently_delete(&self) -> bool {
        self.check_permanent_delete().is_ok()
    }
}

/// Body for creating or updating a chemical
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChemicalForm {
    pub l_number: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub chemical_type: String,
    pub category: ChemicalCategory,
    pub quantity_unit: String,
}

impl ChemicalForm {
    pub fn from_chemical(chemical: &Chemical) -> Self {
        Self {
            l_number: chemical.l_number.clone(),
            name: chemical.name.clone(),
            chemical_type: chemical.chemical_type.clone(),
            category: chemical.category,
            quantity_unit: chemical.quantity_unit.clone(),
        }
    }

    /// Names of required fields that are still blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.l_number.trim().is_empty() {
            missing.push("l_number");
        }
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.quantity_unit.trim().is_empty() {
            missing.push("quantity_unit");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_permanent_delete_requires_zero_usage() {
        let mut chemical = Chemical {
            id: 1,
            is_active: false,
            total_usage_count: 3,
            ..Default::default()
        };
        assert_eq!(chemical.check_permanent_delete(), Err(DeleteDenied::InUse(3)));

        chemical.total_usage_count = 0;
        assert!(chemical.can_permanently_delete());

        chemical.is_active = true;
        assert_eq!(chemical.check_permanent_delete(), Err(DeleteDenied::StillActive));
    }

    #[test]
    fn test_deserialize_backend_row() {
        let chemical: Chemical = serde_json::from_value(json!({
            "id": "4",
            "l_number": "L1234",
            "name": "Brodifacoum",
            "chemical_type": "Rodenticide",
            "category": "inspection",
            "quantity_unit": "g",
            "is_active": "1",
            "total_usage_count": "12"
        }))
        .unwrap();

        assert_eq!(chemical.id, 4);
        assert_eq!(chemical.chemical_type, "Rodenticide");
        assert_eq!(chemical.quantity_unit, "g");
        assert!(chemical.is_active);
        assert_eq!(chemical.total_usage_count, 12);
    }
}
