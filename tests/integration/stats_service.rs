//! Statistics service tests over the CSV fixture.

use axum::http::StatusCode;
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::json;

use public_health_api::api::{create_stats_router, StatsState};
use public_health_api::dataset::HealthDataset;

use crate::{get, get_json};

fn fixture_path() -> String {
    format!(
        "{}/tests/fixtures/global_health_statistics.csv",
        env!("CARGO_MANIFEST_DIR")
    )
}

fn app() -> Router {
    let dataset = HealthDataset::load(fixture_path()).expect("fixture loads");
    create_stats_router(StatsState::new(dataset))
}

#[test]
fn fixture_summary() {
    let dataset = HealthDataset::load(fixture_path()).unwrap();
    let summary = dataset.summary();
    assert_eq!(summary.rows, 10);
    assert_eq!(summary.countries, 4);
    assert_eq!(summary.years, Some((2019, 2021)));
}

#[tokio::test]
async fn root_gives_instructions() {
    let (status, body) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome to the Public Health Data API"));
    assert!(body.contains("Use the /health_data endpoint"));
}

#[tokio::test]
async fn health_data_aggregates_by_default() {
    let (status, body) = get(app(), "/health_data?country=Japan&year=2020").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>Health Data for Japan (2020)</title>"));
    assert!(body.contains("<th>Disease Name</th>"));
    // Aggregated views drop the non-numeric columns.
    assert!(!body.contains("Availability of Vaccines/Treatment"));
    // Influenza sorts before Malaria; Malaria prevalence mean is (2.5 + 3.5) / 2.
    let influenza = body.find("Influenza").unwrap();
    let malaria = body.find("Malaria").unwrap();
    assert!(influenza < malaria);
    assert!(body.contains("<td style=\"text-align: right;\">3</td>"));
    assert!(body.contains("<td style=\"text-align: right;\">500</td>"));
}

#[tokio::test]
async fn health_data_without_aggregation_lists_rows() {
    let (status, body) = get(app(), "/health_data?country=japan&year=2020&aggregate=false").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Availability of Vaccines/Treatment"));
    assert_eq!(body.matches("<td style=\"text-align: left;\">Japan</td>").count(), 3);
    assert!(body.contains("<td style=\"text-align: left;\">No</td>"));
}

#[tokio::test]
async fn health_data_unknown_country_is_404() {
    let (status, body) = get_json(app(), "/health_data?country=FakeCountry&year=2020").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Country or year not found."}));
}

#[tokio::test]
async fn health_data_unknown_year_is_404() {
    let (status, body) = get_json(app(), "/health_data?country=Japan&year=9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Country or year not found.");
}

#[tokio::test]
async fn health_data_requires_year() {
    let (status, body) = get_json(app(), "/health_data?country=Japan").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("year"));

    let (status, _) = get_json(app(), "/health_data?country=Japan&year=twenty").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn health_compare_shows_both_countries() {
    let (status, body) = get(app(), "/health_compare?country1=Russia&country2=Canada&year=2020").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Health Comparison: Russia vs. Canada (2020)"));
    assert!(body.contains("<h2>Russia</h2>"));
    assert!(body.contains("<h2>Canada</h2>"));
    assert_eq!(body.matches("<table>").count(), 2);
}

#[tokio::test]
async fn health_compare_unknown_countries_is_404() {
    let (status, body) = get_json(
        app(),
        "/health_compare?country1=FakeCountry1&country2=FakeCountry2&year=2020",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Countries or year not found.");
}

#[tokio::test]
async fn health_compare_needs_both_sides() {
    let (status, _) = get_json(app(), "/health_compare?country1=Japan&country2=Atlantis&year=2020").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The same country twice fills only the first side.
    let (status, _) = get_json(app(), "/health_compare?country1=Japan&country2=japan&year=2020").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_compare_without_aggregation() {
    let (status, body) = get(
        app(),
        "/health_compare?country1=United%20States&country2=Canada&year=2020&aggregate=false",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("United States"));
    assert!(body.contains("Canada"));
    assert!(body.contains("Disease Name"));
    assert!(body.contains("Availability of Vaccines/Treatment"));
}

#[tokio::test]
async fn health_compare_with_aggregation() {
    let (status, body) = get(
        app(),
        "/health_compare?country1=United%20States&country2=Canada&year=2020&aggregate=true",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("United States"));
    assert!(body.contains("Canada"));
    assert!(body.contains("Disease Name"));
    assert!(!body.contains("Availability of Vaccines/Treatment"));
}
