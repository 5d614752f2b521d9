//! Outgoing payload shaping for partial report updates

use crate::models::{DetailedReport, FumigationTreatment, InspectionStation};
use serde_json::{Map, Value, json};

/// Whether a value carries nothing worth transmitting
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Drop top-level keys whose value is null, an empty string or an empty array.
///
/// Non-object payloads are returned untouched.
pub fn clean_payload(payload: Value) -> Value {
    match payload {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, value)| !is_blank(value))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

fn station_body(station: &InspectionStation) -> Value {
    json!({
        "station_number": station.station_number,
        "location": station.location.as_str(),
        "is_accessible": station.is_accessible,
        "access_reason": station.access_reason,
        "activity_detected": station.activity_detected,
        "activity_type": station.activity_type,
        "activity_description": station.activity_description,
        "station_condition": station.station_condition,
        "bait_status": station.bait_status.as_str(),
        "chemical_id": station.chemical_id,
        "quantity": station.quantity,
        "batch_number": station.batch_number,
    })
}

fn treatment_body(treatment: &FumigationTreatment) -> Value {
    json!({
        "treated_areas": treatment.treated_areas,
        "treated_for": treatment.treated_for,
        "monitor_replaced": treatment.monitor_replaced,
        "remarks": treatment.remarks,
        "chemicals": treatment.chemicals.iter().map(|usage| json!({
            "chemical_id": usage.chemical_id,
            "quantity": usage.quantity,
            "batch_number": usage.batch_number,
            "batch_number_note": usage.batch_number_note,
        })).collect::<Vec<_>>(),
    })
}

/// Build the edit body containing only the fields that differ from `original`.
///
/// The result still goes through [`clean_payload`], so a field that was
/// cleared to an empty value is not transmitted.
pub fn report_edit_payload(original: &DetailedReport, edited: &DetailedReport) -> Value {
    let mut body = Map::new();

    if original.report_type != edited.report_type {
        body.insert("report_type".into(), json!(edited.report_type.as_str()));
    }
    if original.service_date != edited.service_date {
        body.insert("service_date".into(), json!(edited.service_date));
    }
    if original.next_service_date != edited.next_service_date {
        body.insert("next_service_date".into(), json!(edited.next_service_date));
    }
    if original.general_remarks != edited.general_remarks {
        body.insert("general_remarks".into(), json!(edited.general_remarks));
    }
    if original.recommendations != edited.recommendations {
        body.insert("recommendations".into(), json!(edited.recommendations));
    }
    if edited.report_type.includes_inspection() && original.stations != edited.stations {
        body.insert(
            "stations".into(),
            Value::Array(edited.stations.iter().map(station_body).collect()),
        );
    }
    if edited.report_type.includes_fumigation() && original.fumigation != edited.fumigation {
        body.insert(
            "fumigation".into(),
            Value::Array(
                edited
                    .fumigation
                    .iter()
                    .filter(|t| !t.is_empty())
                    .map(treatment_body)
                    .collect(),
            ),
        );
    }

    clean_payload(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportType;

    #[test]
    fn test_clean_payload_keeps_only_populated_fields() {
        let cleaned = clean_payload(json!({
            "general_remarks": "ok",
            "recommendations": "",
            "next_service_date": null,
            "stations": [],
            "fumigation": [{"remarks": ""}],
            "monitor_replaced": false,
            "quantity": 0
        }));

        let keys: Vec<&str> = cleaned.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ["general_remarks", "fumigation", "monitor_replaced", "quantity"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
    }

    #[test]
    fn test_edit_payload_only_sends_changes() {
        let original = DetailedReport {
            id: 1,
            report_type: ReportType::Inspection,
            general_remarks: "before".into(),
            recommendations: "seal gaps".into(),
            ..Default::default()
        };
        let mut edited = original.clone();
        edited.general_remarks = "after".into();

        let payload = report_edit_payload(&original, &edited);
        assert_eq!(payload, json!({"general_remarks": "after"}));
    }

    #[test]
    fn test_edit_payload_skips_hidden_tabs() {
        let original = DetailedReport {
            id: 1,
            report_type: ReportType::Inspection,
            ..Default::default()
        };
        let mut edited = original.clone();
        edited.fumigation.push(FumigationTreatment {
            remarks: "should not be sent".into(),
            ..Default::default()
        });

        assert_eq!(report_edit_payload(&original, &edited), json!({}));
    }
}
