//! Listing scenarios: query shape, empty results, failures and cursor recovery.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use ouvidoria_console::FetchOutcome;
use ouvidoria_console::presenter::{ACCESS_DENIED_MESSAGE, EMPTY_STATE_MESSAGE};
use ouvidoria_core::error::ErrorKind;
use ouvidoria_core::types::{ActionFilter, AuditAction, EntryId, PageSize};

use crate::helpers::{TOKEN, TestApp, page};

const LOGS: &str = "/api/dashboard/logs";

#[tokio::test]
async fn test_filtered_listing_sends_canonical_query() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .and(query_param("action", "login"))
        .and(query_param_is_missing("search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[1, 2], "login", 2)))
        .expect(1)
        .mount(&app.server)
        .await;

    app.view.set_action(ActionFilter::Only(AuditAction::Login));
    app.view.set_date_range(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 7),
    );

    assert_eq!(app.view.refresh(&app.client).await, FetchOutcome::Applied);

    let requests = app.server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("action=login&date_from=2024-01-01&date_to=2024-01-07&page=1&page_size=25")
    );
    let shown = app.view.page().unwrap();
    assert_eq!(shown.items.len(), 2);
    assert_eq!(shown.items[0].id, EntryId::Int(1));
    assert_eq!(shown.items[0].actor.as_ref().unwrap().label(), "Maria Souza");
}

#[tokio::test]
async fn test_empty_result_is_not_an_error() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 0, "results": []})))
        .mount(&app.server)
        .await;

    assert_eq!(app.view.refresh(&app.client).await, FetchOutcome::Applied);

    let shown = app.view.page().unwrap();
    assert_eq!(shown.total_pages, 1);
    assert_eq!(shown.total_count, 0);
    assert_eq!(app.view.cache().empty_state(), Some(EMPTY_STATE_MESSAGE));
    assert!(app.view.last_error().is_none());
    assert!(app.view.notifications().is_empty());
}

#[tokio::test]
async fn test_forbidden_shows_access_denied_without_retry() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "forbidden"})))
        .mount(&app.server)
        .await;

    let outcome = app.view.refresh(&app.client).await;

    assert_eq!(outcome, FetchOutcome::Failed(ErrorKind::Authorization));
    assert!(!app.view.is_loading());
    assert!(!app.view.can_retry());
    let notice = app.view.notifications().latest().unwrap();
    assert_eq!(notice.message, ACCESS_DENIED_MESSAGE);
    assert!(!notice.retry);
}

#[tokio::test]
async fn test_server_error_offers_retry_and_keeps_last_page() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[1], "view", 1)))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[2], "view", 1)))
        .mount(&app.server)
        .await;

    app.view.refresh(&app.client).await;
    let outcome = app.view.refresh(&app.client).await;
    assert_eq!(outcome, FetchOutcome::Failed(ErrorKind::Server));
    assert!(app.view.can_retry());
    assert_eq!(app.view.page().unwrap().items[0].id, EntryId::Int(1));

    assert_eq!(app.view.refresh(&app.client).await, FetchOutcome::Applied);
    assert!(!app.view.can_retry());
    assert_eq!(app.view.page().unwrap().items[0].id, EntryId::Int(2));
}

#[tokio::test]
async fn test_shrunk_result_set_returns_to_first_page() {
    let mut app = TestApp::with_page_size(PageSize::try_from(10).unwrap()).await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[1], "view", 50)))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param("page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[], "view", 12)))
        .expect(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[9], "view", 12)))
        .expect(1)
        .mount(&app.server)
        .await;

    app.view.refresh(&app.client).await;
    assert_eq!(app.view.pagination().total_pages(), 5);
    assert!(app.view.go_to_page(5).needs_fetch());

    assert_eq!(app.view.refresh(&app.client).await, FetchOutcome::Applied);
    let shown = app.view.page().unwrap();
    assert_eq!(shown.page, 1);
    assert_eq!(shown.total_pages, 2);
    assert_eq!(shown.items[0].id, EntryId::Int(9));
}

#[tokio::test]
async fn test_failed_refetch_after_shrink_never_shows_stale_page() {
    let mut app = TestApp::with_page_size(PageSize::try_from(10).unwrap()).await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[1], "view", 50)))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param("page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[], "view", 12)))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.server)
        .await;

    app.view.refresh(&app.client).await;
    app.view.go_to_page(5);

    let outcome = app.view.refresh(&app.client).await;
    assert_eq!(outcome, FetchOutcome::Failed(ErrorKind::Server));
    assert_eq!(app.view.pagination().page(), 1);
    let shown = app.view.page().unwrap();
    assert_eq!(shown.page, 1);
    assert!(!shown.has_previous());
    assert!(app.view.can_retry());
}

#[tokio::test]
async fn test_page_size_change_requests_first_page() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[1], "view", 1)))
        .expect(1)
        .mount(&app.server)
        .await;

    app.view.set_page_size(PageSize::try_from(100).unwrap());
    assert_eq!(app.view.refresh(&app.client).await, FetchOutcome::Applied);
}
