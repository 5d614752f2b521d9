//! Page controller workflows

use crate::support::MockTransport;
use pco_admin::api::{ApiResponse, Method};
use pco_admin::console::pages::{ChemicalsPage, ClientsPage, ReportEditor, ReportView, ReportsPage, UsersPage};
use pco_admin::console::{Choice, ToastKind};
use pco_admin::context::AppContext;
use pco_admin::models::{ChemicalCategory, CurrentUser, ReportType, StationLocation, UserRole};
use serde_json::json;

fn context(mock: &MockTransport) -> AppContext {
    AppContext::with_transport(mock.clone())
}

#[tokio::test]
async fn test_create_chemical_reloads_list() {
    let mock = MockTransport::new();
    mock.respond(Method::Post, "/chemicals", ApiResponse::ok(json!({ "id": 12 })));
    mock.respond(
        Method::Get,
        "/chemicals",
        ApiResponse::ok(json!([{
            "id": 12,
            "l_number": "L1",
            "name": "X",
            "category": "inspection",
            "quantity_unit": "g",
            "is_active": 1
        }])),
    );

    let mut page = ChemicalsPage::new(context(&mock));
    page.start_create();
    if let Some(form) = page.modal.form_mut() {
        form.l_number = "L1".into();
        form.name = "X".into();
        form.category = ChemicalCategory::Inspection;
        form.quantity_unit = "g".into();
    }

    assert!(page.submit().await);
    assert!(!page.modal.is_open());
    assert_eq!(page.list.items().len(), 1);
    assert_eq!(page.list.items()[0].l_number, "L1");

    let toast = page.notifications.last().cloned().unwrap();
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Chemical saved");

    let created = mock.requests_to(Method::Post, "/chemicals");
    let body = created[0].body.clone().unwrap();
    assert_eq!(body["l_number"], "L1");
    assert_eq!(body["category"], "inspection");
    assert_eq!(body["quantity_unit"], "g");
}

#[tokio::test]
async fn test_incomplete_chemical_form_is_not_sent() {
    let mock = MockTransport::new();
    let mut page = ChemicalsPage::new(context(&mock));
    page.start_create();
    if let Some(form) = page.modal.form_mut() {
        form.name = "X".into();
    }

    assert!(!page.submit().await);
    assert!(page.modal.is_open());
    let toast = page.notifications.last().cloned().unwrap();
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Please fill in: l number, quantity unit");
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_permanent_delete_guard() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/chemicals",
        ApiResponse::ok(json!({ "chemicals": [
            { "id": 1, "name": "Used", "is_active": true, "usage_count": 4 },
            { "id": 2, "name": "Retired", "active": false, "usage_count": 0 }
        ]})),
    );
    mock.respond(Method::Delete, "/chemicals/2/permanent", ApiResponse::ok(json!({})));

    let mut page = ChemicalsPage::new(context(&mock));
    assert!(page.reload().await);

    assert!(!page.request_permanent_delete(1));
    assert_eq!(page.pending_permanent_delete(), None);
    assert!(page.notifications.has_errors());

    assert!(page.request_permanent_delete(2));
    assert_eq!(page.pending_permanent_delete(), Some(2));
    assert!(page.confirm_permanent_delete().await);
    assert_eq!(page.pending_permanent_delete(), None);
    assert!(mock.requests_to(Method::Delete, "/chemicals/1/permanent").is_empty());
    assert_eq!(mock.requests_to(Method::Delete, "/chemicals/2/permanent").len(), 1);
}

#[tokio::test]
async fn test_decline_requires_notes() {
    let mock = MockTransport::new();
    mock.respond(Method::Put, "/admin/reports/4/status", ApiResponse::ok(json!({})));
    mock.respond(Method::Get, "/admin/reports", ApiResponse::ok(json!([])));

    let mut page = ReportsPage::new(context(&mock));
    assert!(page.start_decline(4));
    assert!(!page.can_submit_review());
    assert!(!page.submit_review().await);
    assert_eq!(
        page.notifications.last().map(|toast| toast.message.as_str()),
        Some("Admin notes are required to decline a report")
    );
    assert!(mock.requests().is_empty());

    page.set_review_notes("Missing photos of station 3");
    assert!(page.submit_review().await);
    assert!(page.review.is_none());

    let sent = mock.requests_to(Method::Put, "/admin/reports/4/status");
    assert_eq!(
        sent[0].body,
        Some(json!({ "status": "declined", "admin_notes": "Missing photos of station 3" }))
    );
    // List refreshed after the review
    assert_eq!(mock.requests_to(Method::Get, "/admin/reports").len(), 1);
}

#[tokio::test]
async fn test_only_pending_reports_can_be_approved() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/admin/reports",
        ApiResponse::ok(json!({
            "reports": [
                { "id": 1, "status": "approved", "report_type": "inspection" },
                { "id": 2, "status": "pending", "report_type": "both" }
            ],
            "pagination": { "current_page": 1, "per_page": 25, "total_records": 2, "total_pages": 1 }
        })),
    );

    let mut page = ReportsPage::new(context(&mock));
    assert!(page.reload().await);
    assert_eq!(page.list.pagination().map(|p| p.total_records), Some(2));

    assert!(!page.start_approve(1));
    assert!(page.review.is_none());
    assert!(page.start_approve(2));
    assert!(page.can_submit_review());
}

#[tokio::test]
async fn test_failed_first_load_shows_retry_state() {
    let mock = MockTransport::new();
    mock.respond(Method::Get, "/users", ApiResponse::failure("Service unavailable"));

    let mut page = UsersPage::new(context(&mock));
    assert!(!page.reload().await);
    assert_eq!(page.list.load_error(), Some("Service unavailable"));
    assert!(!page.list.is_loading());

    mock.respond(
        Method::Get,
        "/users",
        ApiResponse::ok(json!({ "users": [
            { "id": 1, "name": "Ada", "email": "ada@example.com", "role": "admin", "status": "active" },
            { "id": 2, "name": "Ben", "email": "ben@example.com", "role": "pco", "status": "inactive" }
        ]})),
    );
    assert!(page.reload().await);
    assert_eq!(page.list.load_error(), None);

    // Empty search and `All` choices keep everything
    assert_eq!(page.visible().len(), 2);

    page.filter.role = Choice::Only(UserRole::Pco);
    let names: Vec<&str> = page.visible().iter().map(|user| user.name.as_str()).collect();
    assert_eq!(names, vec!["Ben"]);

    page.filter.role = Choice::All;
    page.filter.search = "ADA@".into();
    assert_eq!(page.visible().len(), 1);
}

#[tokio::test]
async fn test_assign_needs_current_user() {
    let mock = MockTransport::new();
    mock.respond(Method::Post, "/assignments", ApiResponse::ok(json!({})));
    mock.respond(Method::Get, "/clients", ApiResponse::ok(json!([])));

    let mut anonymous = ClientsPage::new(context(&mock));
    assert!(!anonymous.assign(vec![3], 7).await);
    assert!(mock.requests().is_empty());

    let admin = CurrentUser {
        id: 1,
        name: "Ada".into(),
        role: UserRole::Admin,
    };
    let mut page = ClientsPage::new(context(&mock).with_current_user(admin));
    assert!(page.assign(vec![3], 7).await);

    let sent = mock.requests_to(Method::Post, "/assignments");
    assert_eq!(sent[0].body.as_ref().map(|body| body["assigned_by"].clone()), Some(json!(1)));
}

#[tokio::test]
async fn test_unassign_uses_listed_pco() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/clients",
        ApiResponse::ok(json!([{ "id": 3, "company_name": "Harbour Bakery", "pco_id": 7, "pco_name": "Lee" }])),
    );
    mock.respond(Method::Post, "/assignments", ApiResponse::ok(json!({})));

    let mut page = ClientsPage::new(context(&mock));
    assert!(page.reload().await);
    assert!(page.unassign(3).await);

    let sent = mock.requests_to(Method::Post, "/assignments");
    assert_eq!(
        sent[0].body,
        Some(json!({ "action": "unassign", "client_ids": [3], "pco_id": 7 }))
    );
}

#[tokio::test]
async fn test_unassign_stops_when_lookup_fails() {
    let mock = MockTransport::new();
    mock.respond(Method::Get, "/clients/42", ApiResponse::failure("Database unavailable"));
    mock.respond(Method::Post, "/assignments", ApiResponse::ok(json!({})));

    let mut page = ClientsPage::new(context(&mock));
    assert!(!page.unassign(42).await);

    assert!(mock.requests_to(Method::Post, "/assignments").is_empty());
    let messages: Vec<&str> = page
        .notifications
        .toasts()
        .iter()
        .map(|toast| toast.message.as_str())
        .collect();
    assert_eq!(messages, vec!["Database unavailable"]);
}

#[tokio::test]
async fn test_report_editor_tabs_and_station_numbering() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/admin/reports/9",
        ApiResponse::ok(json!({ "id": 9, "report_type": "fumigation", "status": "pending" })),
    );
    mock.respond(Method::Put, "/admin/reports/9", ApiResponse::ok(json!({})));

    let mut editor = ReportEditor::new(context(&mock), 9);
    assert!(editor.load().await);
    assert!(!editor.show_stations_tab());
    assert!(editor.show_fumigation_tab());
    assert!(!editor.has_changes());

    editor.set_report_type(ReportType::Both);
    assert!(editor.show_stations_tab());
    assert_eq!(editor.add_station(StationLocation::Inside), Some(1));
    assert_eq!(editor.add_station(StationLocation::Outside), Some(2));
    assert!(editor.remove_station(0));
    assert_eq!(editor.add_station(StationLocation::Inside), Some(3));

    let draft = editor.draft().cloned().unwrap();
    assert_eq!(draft.stations, draft.inspection_stations);

    assert!(editor.save().await);
    let sent = mock.requests_to(Method::Put, "/admin/reports/9");
    let body = sent[0].body.clone().unwrap();
    assert_eq!(body["report_type"], "both");
    assert_eq!(body["stations"].as_array().map(Vec::len), Some(2));
    assert!(body.get("general_remarks").is_none());
}

#[tokio::test]
async fn test_unchanged_report_is_not_saved() {
    let mock = MockTransport::new();
    mock.respond(
        Method::Get,
        "/admin/reports/9",
        ApiResponse::ok(json!({ "id": 9, "report_type": "inspection" })),
    );

    let mut editor = ReportEditor::new(context(&mock), 9);
    assert!(editor.load().await);
    assert!(!editor.save().await);
    assert_eq!(
        editor.notifications.last().map(|toast| toast.kind),
        Some(ToastKind::Info)
    );
    assert!(mock.requests_to(Method::Put, "/admin/reports/9").is_empty());
}

#[tokio::test]
async fn test_report_view_notes_and_pdf() {
    let mock = MockTransport::new();
    mock.respond(Method::Get, "/admin/reports/5", ApiResponse::ok(json!({ "id": 5 })));
    mock.respond(
        Method::Get,
        "/notes",
        ApiResponse::ok(json!([{ "id": 1, "report_id": 5, "note": "Call client" }])),
    );
    mock.respond(Method::Post, "/notes", ApiResponse::ok(json!({ "id": 2 })));
    mock.serve_pdf(b"%PDF-1.4");

    let mut view = ReportView::new(context(&mock), 5);
    assert!(view.load().await);
    assert_eq!(view.notes.len(), 1);
    assert_eq!(view.notes[0].content, "Call client");

    view.note_draft = "Follow up next week".into();
    assert!(view.add_note().await);
    assert!(view.note_draft.is_empty());
    let posted = mock.requests_to(Method::Post, "/notes");
    assert_eq!(
        posted[0].body,
        Some(json!({ "report_id": 5, "content": "Follow up next week" }))
    );

    let path = std::env::temp_dir().join(format!("pco-admin-report-{}.pdf", uuid::Uuid::new_v4()));
    assert!(view.download_pdf(&path).await);
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    let _ = std::fs::remove_file(&path);
}
