//! Out-of-order responses never overwrite newer state.

use std::time::Duration;

use tokio::sync::mpsc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

use ouvidoria_console::FetchOutcome;
use ouvidoria_core::traits::AuditLogSource;
use ouvidoria_core::types::{ActionFilter, AuditAction};

use crate::helpers::{TestApp, page};

const LOGS: &str = "/api/dashboard/logs";

#[tokio::test]
async fn test_slow_older_response_is_discarded() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param_is_missing("action"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(&[1, 2, 3], "view", 3))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGS))
        .and(query_param("action", "login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(&[7], "login", 1)))
        .mount(&app.server)
        .await;

    let first = app.view.begin_fetch().unwrap();
    app.view.set_action(ActionFilter::Only(AuditAction::Login));
    let second = app.view.begin_fetch().unwrap();

    let (tx, mut rx) = mpsc::unbounded_channel();
    for ticket in [first, second] {
        let client = app.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.list(&ticket.query).await;
            let _ = tx.send((ticket, result));
        });
    }
    drop(tx);

    let mut outcomes = Vec::new();
    while let Some((ticket, result)) = rx.recv().await {
        outcomes.push(app.view.complete_fetch(ticket, result));
    }

    assert_eq!(outcomes, vec![FetchOutcome::Applied, FetchOutcome::Discarded]);
    assert!(!app.view.is_loading());
    let shown = app.view.page().unwrap();
    assert_eq!(shown.total_count, 1);
    assert!(shown.items.iter().all(|e| e.action == AuditAction::Login));
}
