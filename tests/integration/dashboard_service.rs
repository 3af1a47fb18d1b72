//! Dashboard proxy tests against a mocked City Health Dashboard.

use axum::http::StatusCode;
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use public_health_api::api::{create_dashboard_router, DashboardState};
use public_health_api::config::Config;
use public_health_api::dashboard::DashboardClient;

use crate::{get, get_json};

const TOKEN: &str = "test-token";

fn app(server: &MockServer) -> Router {
    app_at(&format!("{}/api/data/", server.uri()))
}

fn app_at(base_url: &str) -> Router {
    let config = Config {
        dashboard_api_url: base_url.to_string(),
        dashboard_api_key: Some(TOKEN.to_string()),
        http_timeout_ms: 2_000,
        ..Config::default()
    };
    let client = DashboardClient::new(&config).expect("client builds");
    create_dashboard_router(DashboardState::new(client))
}

/// Mount a successful metric response for one city.
async fn mount_metric(server: &MockServer, metric: u32, city: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/data/metric-data/{metric}")))
        .and(query_param("geo_name", city))
        .and(query_param("geo_level", "city"))
        .and(query_param("token", TOKEN))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn root_greets() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app(&server), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Welcome to the Public Health Data API Program!"]));
}

#[tokio::test]
async fn disease_statistics_passes_upstream_json_through() {
    let server = MockServer::start().await;
    let payload = json!({"metric": "disease", "value": 1234, "rows": [1, 2]});
    mount_metric(&server, 1, "New+York", payload.clone()).await;

    let (status, body) = get_json(app(&server), "/disease-statistics?city_name=New%20York").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, payload);
}

#[tokio::test]
async fn vaccination_rates_use_metric_five() {
    let server = MockServer::start().await;
    mount_metric(&server, 5, "Austin", json!({"value": 88.5})).await;

    let (status, body) = get_json(app(&server), "/vaccination-rates?city_name=Austin").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["value"], 88.5);
}

#[tokio::test]
async fn missing_city_is_rejected() {
    let server = MockServer::start().await;
    let (status, body) = get_json(app(&server), "/vaccination-rates").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("city_name"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn trend_analysis_maps_disease_to_metric() {
    let server = MockServer::start().await;
    mount_metric(&server, 2, "Denver", json!({"trend": [3, 2, 1]})).await;

    let (status, body) = get_json(
        app(&server),
        "/trend-analysis?city_name=Denver&disease=covid",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"trend": [3, 2, 1]}));
}

#[tokio::test]
async fn trend_analysis_rejects_unknown_disease() {
    let server = MockServer::start().await;

    let (status, body) = get_json(
        app(&server),
        "/trend-analysis?city_name=Denver&disease=measles",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Invalid disease name"}));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn upstream_error_becomes_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data/metric-data/1"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bad token"))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/disease-statistics?city_name=Austin").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"detail": "Error fetching data: bad token"}));
}

#[tokio::test]
async fn compare_reports_per_city_results_in_order() {
    let server = MockServer::start().await;
    mount_metric(&server, 1, "Boston", json!({"value": 10})).await;
    mount_metric(&server, 5, "Boston", json!({"value": 90})).await;
    Mock::given(method("GET"))
        .and(query_param("geo_name", "Atlantis"))
        .respond_with(ResponseTemplate::new(404).set_body_string("unknown city"))
        .mount(&server)
        .await;

    let (status, body) = get_json(
        app(&server),
        "/compare?cities=Boston,Atlantis&metrics=all",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["Boston", "Atlantis"]);
    assert_eq!(
        body["Boston"],
        json!({
            "disease_data": {"value": 10},
            "vaccination_data": {"value": 90},
        })
    );
    assert_eq!(
        body["Atlantis"],
        json!({"error": "Error fetching data: unknown city"})
    );
}

#[tokio::test]
async fn compare_keeps_request_order_beyond_concurrency_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"value": 1}))
                .set_delay(std::time::Duration::from_millis(20)),
        )
        .mount(&server)
        .await;

    let cities: Vec<String> = (0..20).map(|i| format!("City{i:02}")).collect();
    let uri = format!("/compare?cities={}", cities.join(","));
    let (status, body) = get_json(app(&server), &uri).await;

    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys, cities.iter().collect::<Vec<_>>());
    assert_eq!(server.received_requests().await.unwrap().len(), 40);
}

#[tokio::test]
async fn risk_assessment_classifies_city() {
    let server = MockServer::start().await;
    mount_metric(&server, 1, "Chicago", json!({"value": 12000})).await;
    mount_metric(&server, 5, "Chicago", json!({"value": 65})).await;

    let (status, body) = get_json(app(&server), "/risk-assessment?city_name=Chicago").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"city": "Chicago", "risk_level": "High"}));
}

#[tokio::test]
async fn risk_assessment_defaults_missing_values_to_low() {
    let server = MockServer::start().await;
    mount_metric(&server, 1, "Fargo", json!({"rows": []})).await;
    mount_metric(&server, 5, "Fargo", json!({})).await;

    let (status, body) = get_json(app(&server), "/risk-assessment?city_name=Fargo").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["risk_level"], "Low");
}

#[tokio::test]
async fn risk_assessment_fails_when_upstream_fails() {
    let server = MockServer::start().await;
    mount_metric(&server, 1, "Reno", json!({"value": 7000})).await;
    Mock::given(method("GET"))
        .and(path("/api/data/metric-data/5"))
        .respond_with(ResponseTemplate::new(502).set_body_string("gateway"))
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/risk-assessment?city_name=Reno").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Error fetching data: gateway");
}

#[tokio::test]
async fn geographies_default_shape_year() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/data/geographies"))
        .and(query_param("state_abbr", "AL"))
        .and(query_param("census_parent_shape_year", "2020"))
        .and(query_param("token", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"geo_name": "Mobile"}])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_json(app(&server), "/geographies?state_abbr=AL").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"geo_name": "Mobile"}]));
}

/// Nothing listens on port 1, so every request fails to connect.
const UNREACHABLE: &str = "http://127.0.0.1:1/api/data/";

#[tokio::test]
async fn connect_failure_does_not_expose_token() {
    let (status, body) = get(app_at(UNREACHABLE), "/risk-assessment?city_name=Austin").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Error fetching data:"), "{body}");
    assert!(!body.contains(TOKEN), "{body}");
    assert!(!body.contains("127.0.0.1"), "{body}");
}

#[tokio::test]
async fn geographies_connect_failure_does_not_expose_token() {
    let (status, body) = get(app_at(UNREACHABLE), "/geographies?state_abbr=TX").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains(TOKEN), "{body}");
}

#[tokio::test]
async fn compare_reports_connect_failure_inline() {
    let (status, body) = get(app_at(UNREACHABLE), "/compare?cities=Austin,Boston").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains(TOKEN), "{body}");

    let body: serde_json::Value = serde_json::from_str(&body).expect("json body");
    for city in ["Austin", "Boston"] {
        let error = body[city]["error"].as_str().expect("inline error");
        assert!(error.starts_with("Error fetching data:"), "{error}");
    }
}
