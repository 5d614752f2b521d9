//! Service layer against the in-memory transport

use crate::support::MockTransport;
use anyhow::Result;
use pco_admin::api::{
    AdminService, ApiResponse, ChemicalQuery, ClientQuery, EmailRequest, Method, ReportFilters, UserQuery,
};
use pco_admin::models::{
    AssignmentRequest, Chemical, ChemicalCategory, ReportStatus, ReportType, StationLocation, UserRole,
};
use serde_json::{Value, json};
use std::time::Duration;

fn service(mock: &MockTransport) -> AdminService {
    AdminService::from_transport(mock.clone())
}

#[tokio::test]
async fn test_clients_are_paginated_locally() -> Result<()> {
    let mock = MockTransport::new();
    let rows: Vec<Value> = (1..=25)
        .map(|id| json!({ "id": id, "company_name": format!("Client {}", id) }))
        .collect();
    mock.respond(Method::Get, "/clients", ApiResponse::ok(json!(rows)));

    let query = ClientQuery {
        page: 2,
        limit: 10,
        ..Default::default()
    };
    let response = service(&mock).get_clients(&query).await?;
    let page = response.into_result()?;

    let ids: Vec<u64> = page.items.iter().map(|client| client.id).collect();
    assert_eq!(ids, (11..=20).collect::<Vec<_>>());
    assert_eq!(page.pagination.total_pages, 3);
    assert_eq!(page.pagination.total_records, 25);
    assert_eq!(page.items[0].name, "Client 11");

    // Paging never reaches the backend
    let sent = mock.requests_to(Method::Get, "/clients");
    assert_eq!(sent.len(), 1);
    assert!(sent[0].query.iter().all(|(key, _)| key != "page"));
    Ok(())
}

#[tokio::test]
async fn test_report_shapes_normalize_the_same() -> Result<()> {
    let station = json!({ "station_number": "1", "location": "outside", "is_accessible": 1 });

    let nested = MockTransport::new();
    nested.respond(
        Method::Get,
        "/admin/reports/17",
        ApiResponse::ok(json!({
            "report": { "id": 17, "report_type": "inspection", "status": "pending", "client_name": "Acme" },
            "stations": [station.clone()]
        })),
    );
    let flat = MockTransport::new();
    flat.respond(
        Method::Get,
        "/admin/reports/17",
        ApiResponse::ok(json!({
            "id": "17",
            "report_type": "inspection",
            "status": "pending",
            "client_name": "Acme",
            "inspection_stations": [station]
        })),
    );

    let from_nested = service(&nested).get_report(17).await?.into_result()?;
    let from_flat = service(&flat).get_report(17).await?.into_result()?;

    assert_eq!(from_nested, from_flat);
    assert_eq!(from_nested.report_type, ReportType::Inspection);
    assert_eq!(from_nested.stations.len(), 1);
    assert_eq!(from_nested.stations, from_nested.inspection_stations);
    assert_eq!(from_nested.stations[0].location, StationLocation::Outside);
    Ok(())
}

#[tokio::test]
async fn test_report_fetch_uses_its_own_timeout() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(Method::Get, "/admin/reports/3", ApiResponse::ok(json!({ "id": 3 })));

    service(&mock)
        .with_report_timeout(Duration::from_secs(7))
        .get_report(3)
        .await?;

    let sent = mock.requests();
    assert_eq!(sent[0].timeout, Some(Duration::from_secs(7)));
    Ok(())
}

#[tokio::test]
async fn test_edit_report_sends_only_populated_fields() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(Method::Put, "/admin/reports/8", ApiResponse::ok(json!({})));
    let service = service(&mock);

    let response = service
        .edit_report(
            8,
            json!({
                "general_remarks": "Clean",
                "recommendations": "",
                "next_service_date": null,
                "stations": []
            }),
        )
        .await?;
    assert!(response.success);

    let sent = mock.requests_to(Method::Put, "/admin/reports/8");
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, Some(json!({ "general_remarks": "Clean" })));
    Ok(())
}

#[tokio::test]
async fn test_empty_edit_is_not_sent() -> Result<()> {
    let mock = MockTransport::new();

    let response = service(&mock)
        .edit_report(8, json!({ "recommendations": "", "stations": [] }))
        .await?;

    assert!(!response.success);
    assert_eq!(response.message.as_deref(), Some("No changes to save"));
    assert!(mock.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_assignment_bodies() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(Method::Post, "/assignments", ApiResponse::ok(json!({})));
    let service = service(&mock);

    service
        .assign_clients_to_pco(&AssignmentRequest::assign(vec![1, 2], 5, 9))
        .await?;
    service
        .assign_clients_to_pco(&AssignmentRequest::unassign(vec![2], Some(5)))
        .await?;

    let sent = mock.requests_to(Method::Post, "/assignments");
    assert_eq!(
        sent[0].body,
        Some(json!({ "action": "assign", "client_ids": [1, 2], "pco_id": 5, "assigned_by": 9 }))
    );
    assert_eq!(
        sent[1].body,
        Some(json!({ "action": "unassign", "client_ids": [2], "pco_id": 5 }))
    );

    let empty = service
        .assign_clients_to_pco(&AssignmentRequest::assign(Vec::new(), 5, 9))
        .await;
    assert!(empty.is_err());
    assert_eq!(mock.requests().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_permanent_delete_is_refused_locally() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(Method::Delete, "/chemicals/4/permanent", ApiResponse::ok(json!({})));
    let service = service(&mock);

    let used = Chemical {
        id: 4,
        name: "Brodifacoum".into(),
        is_active: false,
        total_usage_count: 3,
        ..Default::default()
    };
    let err = service.permanent_delete_chemical(&used).await.unwrap_err();
    assert!(err.to_string().contains("used 3 time(s)"));

    let active = Chemical {
        is_active: true,
        total_usage_count: 0,
        ..used.clone()
    };
    assert!(service.permanent_delete_chemical(&active).await.is_err());
    assert!(mock.requests().is_empty());

    let retired = Chemical {
        is_active: false,
        total_usage_count: 0,
        ..used
    };
    assert!(service.permanent_delete_chemical(&retired).await?.success);
    assert_eq!(mock.requests_to(Method::Delete, "/chemicals/4/permanent").len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_list_keeps_backend_message() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(Method::Get, "/users", ApiResponse::failure("Admin access required"));

    let response = service(&mock).get_users(&UserQuery::default()).await?;

    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.error_message(), "Admin access required");
    Ok(())
}

#[tokio::test]
async fn test_email_needs_a_recipient() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(Method::Post, "/admin/reports/2/email", ApiResponse::ok(json!({})));
    let service = service(&mock);

    let blank = EmailRequest {
        recipients: vec!["  ".into()],
        ..Default::default()
    };
    assert!(service.email_report(2, &blank).await.is_err());
    assert!(mock.requests().is_empty());

    let request = EmailRequest {
        recipients: vec!["ops@example.com".into()],
        ..Default::default()
    };
    assert!(service.email_report(2, &request).await?.success);
    let body = mock.requests()[0].body.clone().unwrap_or_default();
    assert_eq!(body["recipients"], json!(["ops@example.com"]));
    Ok(())
}

#[tokio::test]
async fn test_odd_enum_values_do_not_break_lists() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/admin/reports",
        ApiResponse::ok(json!([
            { "id": 1, "report_type": "inspection", "status": "pending" },
            { "id": 2, "report_type": "Fumigation", "status": null },
            { "id": 3, "report_type": "termite", "status": "APPROVED" }
        ])),
    );
    mock.respond(
        Method::Get,
        "/chemicals",
        ApiResponse::ok(json!([
            { "id": 1, "name": "A", "category": null },
            { "id": 2, "name": "B", "category": "Both" }
        ])),
    );
    mock.respond(
        Method::Get,
        "/users",
        ApiResponse::ok(json!([
            { "id": 1, "name": "Ada", "role": "Admin" },
            { "id": 2, "name": "Ben", "role": "supervisor" }
        ])),
    );
    let service = service(&mock);

    let reports = service.get_reports(&ReportFilters::new(25)).await?.into_result()?;
    let kinds: Vec<(ReportType, ReportStatus)> = reports
        .items
        .iter()
        .map(|report| (report.report_type, report.status))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ReportType::Inspection, ReportStatus::Pending),
            (ReportType::Fumigation, ReportStatus::Pending),
            (ReportType::Inspection, ReportStatus::Approved),
        ]
    );

    let chemicals = service.get_chemicals(&ChemicalQuery::default()).await?.into_result()?;
    assert_eq!(chemicals[0].category, ChemicalCategory::Inspection);
    assert_eq!(chemicals[1].category, ChemicalCategory::Both);

    let users = service.get_users(&UserQuery::default()).await?.into_result()?;
    assert_eq!(users[0].role, UserRole::Admin);
    assert_eq!(users[1].role, UserRole::Pco);
    Ok(())
}

#[tokio::test]
async fn test_reports_without_pagination_stay_on_requested_page() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/admin/reports",
        ApiResponse::ok(json!([{ "id": 26 }, { "id": 27 }])),
    );

    let filters = ReportFilters {
        page: 2,
        ..ReportFilters::new(25)
    };
    let page = service(&mock).get_reports(&filters).await?.into_result()?;

    assert_eq!(page.pagination.current_page, 2);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.pagination.total_records, 27);
    assert!(page.pagination.has_prev);
    assert!(!page.pagination.has_next);
    Ok(())
}

#[tokio::test]
async fn test_nested_assigned_pco_with_string_id() -> Result<()> {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/clients/5",
        ApiResponse::ok(json!({ "id": 5, "company_name": "Dock 5", "assigned_pco": { "id": "3" } })),
    );

    let client = service(&mock).get_client(5).await?.into_result()?;
    let pco = client.assigned_pco.expect("assigned pco");
    assert_eq!(pco.id, 3);
    assert!(pco.name.is_empty());
    Ok(())
}
