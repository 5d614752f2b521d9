//! Report shape normalization
//!
//! Two backend endpoint families describe the same report differently: the
//! admin endpoint nests the report under `report` with `stations` and
//! `fumigation` as siblings, the older endpoint returns everything flat and
//! calls the list `inspection_stations`. Field names inside stations and
//! treatments drift as well. Everything here turns those payloads into the
//! canonical models; feeding a canonical model back through is a no-op.

use super::lists::normalize_string_list;
use crate::models::lenient::{value_as_bool, value_as_f64, value_as_string, value_as_u64};
use crate::models::{
    BaitStatus, ChemicalUsage, DetailedReport, FumigationTreatment, InspectionStation,
    ReportStatus, ReportType, StationLocation,
};
use anyhow::Result;
use log::{debug, warn};
use serde_json::{Map, Value};

const STATION_LIST_KEYS: [&str; 2] = ["stations", "inspection_stations"];
const FUMIGATION_KEYS: [&str; 4] = ["fumigation", "fumigation_treatments", "treatments", "fumigation_data"];

/// First present, non-null value among `keys`
fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
}

fn text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    field(obj, keys).and_then(value_as_string).unwrap_or_default()
}

fn optional_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    field(obj, keys)
        .and_then(value_as_string)
        .filter(|s| !s.trim().is_empty())
}

fn flag(obj: &Map<String, Value>, keys: &[&str]) -> bool {
    field(obj, keys).and_then(value_as_bool).unwrap_or(false)
}

fn id(obj: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    field(obj, keys).and_then(value_as_u64)
}

/// Accept an array, a single object, or a JSON-encoded string of either
fn as_object_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.iter().filter(|v| v.is_object()).cloned().collect(),
        Value::Object(_) => vec![value.clone()],
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(parsed @ (Value::Array(_) | Value::Object(_))) => as_object_list(&parsed),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Normalize one raw station object
pub fn normalize_station(raw: &Value) -> InspectionStation {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    let location = field(obj, &["location", "station_location", "station_type"])
        .and_then(Value::as_str)
        .and_then(StationLocation::parse)
        .unwrap_or_default();

    let bait_status = match field(obj, &["bait_status", "bait_condition"]).and_then(Value::as_str) {
        Some(raw_status) => BaitStatus::parse(raw_status).unwrap_or_else(|| {
            warn!("Unknown bait status '{}', treating as not applicable", raw_status);
            BaitStatus::NotApplicable
        }),
        None => BaitStatus::NotApplicable,
    };

    InspectionStation {
        id: id(obj, &["id", "station_id"]),
        station_number: id(obj, &["station_number", "number", "station_no"])
            .map(|n| n.min(u32::MAX as u64) as u32)
            .unwrap_or(0),
        location,
        is_accessible: flag(obj, &["is_accessible", "accessible", "station_accessible"]),
        access_reason: text(obj, &["access_reason", "inaccessible_reason", "accessibility_reason"]),
        activity_detected: flag(obj, &["activity_detected", "has_activity", "activity"]),
        activity_type: text(obj, &["activity_type", "activity_other"]),
        activity_description: text(obj, &["activity_description", "activity_details", "activity_notes"]),
        station_condition: field(obj, &["station_condition", "condition", "conditions"])
            .map(normalize_string_list)
            .unwrap_or_default(),
        bait_status,
        chemical_id: id(obj, &["chemical_id", "chemical_used_id"]),
        chemical_name: text(obj, &["chemical_name", "chemical_used"]),
        quantity: field(obj, &["quantity", "quantity_used", "chemical_quantity"]).and_then(value_as_f64),
        batch_number: text(obj, &["batch_number", "batch_no", "chemical_batch"]),
    }
}

/// Normalize a station list; stations without a number get their 1-based position
pub fn normalize_stations(raw: &Value) -> Vec<InspectionStation> {
    as_object_list(raw)
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut station = normalize_station(item);
            if station.station_number == 0 {
                station.station_number = (index + 1) as u32;
            }
            station
        })
        .collect()
}

pub fn normalize_chemical_usage(raw: &Value) -> ChemicalUsage {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    ChemicalUsage {
        chemical_id: id(obj, &["chemical_id", "id"]),
        chemical_name: text(obj, &["chemical_name", "name"]),
        quantity: field(obj, &["quantity", "quantity_used", "amount"])
            .and_then(value_as_f64)
            .unwrap_or(0.0),
        batch_number: text(obj, &["batch_number", "batch_no", "batch"]),
        batch_number_note: text(obj, &["batch_number_note", "batch_note"]),
    }
}

pub fn normalize_treatment(raw: &Value) -> FumigationTreatment {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or(&empty);

    FumigationTreatment {
        id: id(obj, &["id", "treatment_id"]),
        treated_areas: field(obj, &["treated_areas", "areas", "areas_treated"])
            .map(normalize_string_list)
            .unwrap_or_default(),
        treated_for: field(obj, &["treated_for", "target_pests", "pests"])
            .map(normalize_string_list)
            .unwrap_or_default(),
        monitor_replaced: flag(obj, &["monitor_replaced", "monitors_replaced", "insect_monitors_replaced"]),
        remarks: text(obj, &["remarks", "fumigation_remarks", "notes"]),
        chemicals: field(obj, &["chemicals", "chemicals_used", "fumigation_chemicals"])
            .map(|value| as_object_list(value).iter().map(normalize_chemical_usage).collect())
            .unwrap_or_default(),
    }
}

pub fn normalize_treatments(raw: &Value) -> Vec<FumigationTreatment> {
    as_object_list(raw).iter().map(normalize_treatment).collect()
}

/// Turn either report response shape into one [`DetailedReport`].
///
/// This is the only place that inspects which shape arrived.
pub fn normalize_detailed_report(data: &Value) -> Result<DetailedReport> {
    let outer = data
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("Report payload is not an object"))?;

    let core = match outer.get("report") {
        Some(Value::Object(nested)) => {
            debug!("Report payload uses the nested shape");
            nested
        }
        _ => outer,
    };

    let report_id = id(core, &["id", "report_id"])
        .ok_or_else(|| anyhow::anyhow!("Report payload has no id"))?;

    let report_type = match field(core, &["report_type", "type"]).and_then(Value::as_str) {
        Some(raw) => raw.parse::<ReportType>().unwrap_or_else(|e| {
            warn!("Report {}: {}", report_id, e);
            ReportType::default()
        }),
        None => ReportType::default(),
    };

    let status = match field(core, &["status"]).and_then(Value::as_str) {
        Some(raw) => raw.parse::<ReportStatus>().unwrap_or_else(|e| {
            warn!("Report {}: {}", report_id, e);
            ReportStatus::default()
        }),
        None => ReportStatus::default(),
    };

    // Siblings of the nested report win over copies inside it
    let stations = field(outer, &STATION_LIST_KEYS)
        .or_else(|| field(core, &STATION_LIST_KEYS))
        .map(normalize_stations)
        .unwrap_or_default();
    let fumigation = field(outer, &FUMIGATION_KEYS)
        .or_else(|| field(core, &FUMIGATION_KEYS))
        .map(normalize_treatments)
        .unwrap_or_default();

    let mut report = DetailedReport {
        id: report_id,
        report_type,
        status,
        client_id: id(core, &["client_id"]),
        client_name: text(core, &["client_name", "company_name"]),
        client_address: text(core, &["client_address", "address", "address_line1"]),
        pco_id: id(core, &["pco_id"]),
        pco_name: text(core, &["pco_name"]),
        pco_number: text(core, &["pco_number"]),
        service_date: optional_text(core, &["service_date", "date_of_service"]),
        next_service_date: optional_text(core, &["next_service_date"]),
        general_remarks: text(core, &["general_remarks", "remarks"]),
        recommendations: text(core, &["recommendations"]),
        admin_notes: text(core, &["admin_notes"]),
        reviewed_by: optional_text(core, &["reviewed_by", "reviewed_by_name"]),
        reviewed_at: optional_text(core, &["reviewed_at"]),
        created_at: optional_text(core, &["created_at"]),
        submitted_at: optional_text(core, &["submitted_at"]),
        ..Default::default()
    };
    report.set_stations(stations);
    report.fumigation = fumigation;

    debug!(
        "Normalized report {}: {} stations, {} treatments",
        report.id,
        report.stations.len(),
        report.fumigation.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_payload() -> Value {
        json!({
            "report": {
                "id": "17",
                "report_type": "both",
                "status": "pending",
                "client_name": "Acme Foods",
                "pco_name": "Sam",
                "general_remarks": null
            },
            "stations": [
                {
                    "station_number": "3",
                    "location": "outside",
                    "is_accessible": "1",
                    "activity_detected": 0,
                    "station_condition": "[\"cracked\",\"dirty\"]",
                    "bait_status": "partially eaten",
                    "chemical_id": "5",
                    "quantity": "12.5",
                    "batch_number": "B-9"
                }
            ],
            "fumigation": {
                "treated_areas": "Kitchen|Storeroom",
                "treated_for": ["cockroaches"],
                "monitor_replaced": "true",
                "chemicals": [
                    {"chemical_id": 8, "chemical_name": "Cypermethrin", "quantity": 2, "batch_number": "C1"}
                ]
            }
        })
    }

    fn flat_payload() -> Value {
        json!({
            "id": 17,
            "report_type": "inspection",
            "status": "approved",
            "inspection_stations": [
                {"number": 1, "station_location": "inside", "accessible": false, "access_reason": "locked"},
                {"location": "inside", "condition": "good, clean"}
            ]
        })
    }

    #[test]
    fn test_nested_shape() {
        let report = normalize_detailed_report(&nested_payload()).unwrap();
        assert_eq!(report.id, 17);
        assert_eq!(report.report_type, ReportType::Both);
        assert_eq!(report.general_remarks, "");
        assert_eq!(report.stations.len(), 1);
        assert_eq!(report.stations, report.inspection_stations);

        let station = &report.stations[0];
        assert_eq!(station.station_number, 3);
        assert_eq!(station.location, StationLocation::Outside);
        assert!(station.is_accessible);
        assert!(!station.activity_detected);
        assert_eq!(station.station_condition, vec!["cracked", "dirty"]);
        assert_eq!(station.bait_status, BaitStatus::PartiallyEaten);
        assert_eq!(station.chemical_id, Some(5));
        assert_eq!(station.quantity, Some(12.5));
        assert_eq!(station.access_reason, "");

        assert_eq!(report.fumigation.len(), 1);
        let treatment = &report.fumigation[0];
        assert_eq!(treatment.treated_areas, vec!["Kitchen", "Storeroom"]);
        assert!(treatment.monitor_replaced);
        assert_eq!(treatment.chemicals[0].quantity, 2.0);
        assert_eq!(treatment.chemicals[0].batch_number_note, "");
    }

    #[test]
    fn test_flat_shape_with_legacy_names() {
        let report = normalize_detailed_report(&flat_payload()).unwrap();
        assert_eq!(report.status, ReportStatus::Approved);
        assert_eq!(report.stations.len(), 2);
        assert!(!report.stations[0].is_accessible);
        assert_eq!(report.stations[0].access_reason, "locked");
        assert_eq!(report.stations[1].station_number, 2);
        assert_eq!(report.stations[1].station_condition, vec!["good", "clean"]);
        assert!(report.fumigation.is_empty());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        assert!(normalize_detailed_report(&json!({"status": "pending"})).is_err());
        assert!(normalize_detailed_report(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for payload in [nested_payload(), flat_payload()] {
            let once = normalize_detailed_report(&payload).unwrap();
            let again = normalize_detailed_report(&serde_json::to_value(&once).unwrap()).unwrap();
            assert_eq!(once, again);
        }
    }

    #[test]
    fn test_station_defaults() {
        let station = normalize_station(&json!({}));
        assert_eq!(station.station_number, 0);
        assert!(!station.is_accessible);
        assert_eq!(station.activity_description, "");
        assert!(station.station_condition.is_empty());
        assert_eq!(station.quantity, None);
    }
}
