//! Fumigation treatment records

use serde::{Deserialize, Serialize};

/// One chemical used during a fumigation treatment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChemicalUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chemical_id: Option<u64>,
    pub chemical_name: String,
    pub quantity: f64,
    pub batch_number: String,
    pub batch_number_note: String,
}

/// A single fumigation event: areas, pests and chemicals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FumigationTreatment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub treated_areas: Vec<String>,
    pub treated_for: Vec<String>,
    pub monitor_replaced: bool,
    pub remarks: String,
    pub chemicals: Vec<ChemicalUsage>,
}

impl FumigationTreatment {
    pub fn is_empty(&self) -> bool {
        self.treated_areas.is_empty()
            && self.treated_for.is_empty()
            && self.chemicals.is_empty()
            && self.remarks.trim().is_empty()
            && !self.monitor_replaced
    }

    /// Total quantity per chemical id, ignoring usages without an id
    pub fn chemical_totals(&self) -> Vec<(u64, f64)> {
        let mut totals: Vec<(u64, f64)> = Vec::new();
        for usage in &self.chemicals {
            let Some(id) = usage.chemical_id else { continue };
            match totals.iter_mut().find(|(existing, _)| *existing == id) {
                Some((_, total)) => *total += usage.quantity,
                None => totals.push((id, usage.quantity)),
            }
        }
        totals
    }
}
