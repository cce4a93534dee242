//! Export scenarios: parameter parity with the listing and failure isolation.

use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use ouvidoria_console::{ExportOrchestrator, FetchOutcome, Severity};
use ouvidoria_core::error::ErrorKind;
use ouvidoria_core::types::{ActionFilter, AuditAction, EntryId};

use crate::helpers::{TestApp, page};

const LOGS: &str = "/api/dashboard/logs";
const EXPORT: &str = "/api/dashboard/logs/export";
const CSV: &str = "id,action,user\n1,delete,maria@example.com\n";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

#[tokio::test]
async fn test_export_reuses_listing_parameters() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[1], "delete", 1)))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(EXPORT))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .insert_header("content-disposition", "attachment; filename=\"logs.csv\"")
                .set_body_string(CSV),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    app.view.set_action(ActionFilter::Only(AuditAction::Delete));
    app.view.set_date_range(NaiveDate::from_ymd_opt(2024, 3, 1), None);
    app.view.set_search("  maria ");
    app.view.refresh(&app.client).await;

    let dir = tempfile::tempdir().unwrap();
    let orchestrator = ExportOrchestrator::new(dir.path());
    let file = app
        .view
        .export(&app.client, &orchestrator, today())
        .await
        .unwrap();

    let requests = app.server.received_requests().await.unwrap();
    let listing = requests.iter().find(|r| r.url.path() == LOGS).unwrap();
    let export = requests.iter().find(|r| r.url.path() == EXPORT).unwrap();
    let strip = |query: &str| {
        query
            .split('&')
            .filter(|p| !p.starts_with("page=") && !p.starts_with("page_size="))
            .collect::<Vec<_>>()
            .join("&")
    };
    assert_eq!(
        export.url.query(),
        Some(strip(listing.url.query().unwrap()).as_str())
    );
    assert_eq!(
        export.url.query(),
        Some("action=delete&date_from=2024-03-01&search=maria")
    );

    assert_eq!(file.path, dir.path().join("audit-log-2024-03-09.csv"));
    assert_eq!(file.suggested_filename.as_deref(), Some("logs.csv"));
    assert_eq!(std::fs::read_to_string(&file.path).unwrap(), CSV);
    let notice = app.view.notifications().latest().unwrap();
    assert_eq!(notice.severity, Severity::Success);
}

#[tokio::test]
async fn test_failed_export_keeps_listing_intact() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[4], "view", 1)))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(EXPORT))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    assert_eq!(app.view.refresh(&app.client).await, FetchOutcome::Applied);

    let dir = tempfile::tempdir().unwrap();
    let err = app
        .view
        .export(&app.client, &ExportOrchestrator::new(dir.path()), today())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Server);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    assert_eq!(app.view.page().unwrap().items[0].id, EntryId::Int(4));
    assert!(app.view.last_error().is_none());
    let notice = app.view.notifications().latest().unwrap();
    assert!(notice.message.starts_with("Export failed"));
}
