//! Summary panel scenarios.

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use ouvidoria_console::FetchOutcome;

use crate::helpers::TestApp;

const SUMMARIES: &str = "/api/dashboard/logs/summaries";

#[tokio::test]
async fn test_summary_panel_averages_daily_rates() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .and(query_param("date_from", "2024-01-01"))
        .and(query_param("date_to", "2024-01-02"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "date": "2024-01-01",
                "total_actions": 40,
                "unique_users": 6,
                "most_common_action": "login",
                "success_rate": 95.2
            },
            {
                "date": "2024-01-02",
                "total_actions": 60,
                "unique_users": 9,
                "most_common_action": "view",
                "success_rate": 98.1
            }
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    app.view.set_date_range(
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 1, 2),
    );
    assert_eq!(app.view.load_summary(&app.client).await, FetchOutcome::Applied);

    let stats = app.view.summary_stats().unwrap();
    assert_eq!(stats.success_rate_label(), "96.7");
    assert_eq!(stats.most_common_action, "login");
    assert_eq!(stats.total_actions, 100);
    assert_eq!(stats.days, 2);
}

#[tokio::test]
async fn test_empty_summary_shows_not_available() {
    let mut app = TestApp::new().await;
    Mock::given(method("GET"))
        .and(path(SUMMARIES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;

    app.view.load_summary(&app.client).await;

    let stats = app.view.summary_stats().unwrap();
    assert_eq!(stats.success_rate_label(), "N/A");
    assert_eq!(stats.most_common_action, "N/A");
}
