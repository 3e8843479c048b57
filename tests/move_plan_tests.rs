/// End-to-end derivation tests with mocked geocoding / routing / job
/// collaborators.
use httpmock::prelude::*;
use serde_json::json;
use std::path::Path;

use whatsthemove::config::{
    CitiesConfig, Config, CorsConfig, DatasetsConfig, GeocodingConfig, HousingConfig, JobsConfig,
    MetricsConfig, RoutingConfig, ServerConfig,
};
use whatsthemove::listings::ListingStore;
use whatsthemove::models::job::JobRecord;
use whatsthemove::models::query::{MoveQuery, TransportMode, YearMonth};
use whatsthemove::plan::{build_move_plan, PlanContext};
use whatsthemove::pricing::PricingTables;

fn test_config(collaborator_url: &str) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        },
        geocoding: GeocodingConfig {
            base_url: collaborator_url.to_string(),
            user_agent: "whatsthemove-tests/0.1".to_string(),
            timeout_seconds: 5,
        },
        routing: RoutingConfig {
            base_url: collaborator_url.to_string(),
            timeout_seconds: 5,
        },
        jobs: JobsConfig {
            enabled: false,
            base_url: collaborator_url.to_string(),
            timeout_seconds: 5,
        },
        datasets: DatasetsConfig {
            air_fare_bands: "data/air_fare_bands.csv".to_string(),
            listings: "data/listings.csv".to_string(),
        },
        cities: CitiesConfig {
            known: vec!["Madison, WI".to_string(), "Seattle, WA".to_string()],
        },
        housing: HousingConfig { max_results: 10 },
        metrics: MetricsConfig {
            enabled: false,
            endpoint: "/metrics".to_string(),
        },
        cors: CorsConfig {
            allowed_origins: vec![],
        },
    }
}

fn plane_query() -> MoveQuery {
    MoveQuery {
        origin: "Madison, WI".to_string(),
        destination: "Seattle, WA".to_string(),
        start: YearMonth::new(2025, 6),
        end: YearMonth::new(2025, 8),
        transport: Some(TransportMode::Plane),
        needs_moving_truck: false,
        wants_moving_help: false,
        housing_budget: 1400,
    }
}

fn mock_geocode(server: &MockServer, place: &str, lat: &str, lon: &str) {
    server.mock(|when, then| {
        when.method(GET).path("/search").query_param("q", place);
        then.status(200).json_body(json!([{ "lat": lat, "lon": lon }]));
    });
}

#[tokio::test]
async fn plane_move_plan_prices_carriers_and_housing() {
    let server = MockServer::start_async().await;
    mock_geocode(&server, "Madison, WI", "43.0731", "-89.4012");
    mock_geocode(&server, "Seattle, WA", "47.6062", "-122.3321");

    let config = test_config(&server.base_url());
    let tables = PricingTables::load(Path::new("data/air_fare_bands.csv")).unwrap();
    let listings = ListingStore::load(Path::new("data/listings.csv")).unwrap();
    let http = reqwest::Client::new();
    let ctx = PlanContext {
        config: &config,
        http: &http,
        tables: &tables,
        listings: &listings,
    };

    let plan = build_move_plan(&ctx, &plane_query(), None).await;

    // Great-circle distance, never the routing service.
    assert_eq!(plan.distance.result.straight_line_miles, Some(1617.0));
    assert_eq!(plan.distance.result.driving_miles, None);
    assert!(!plan.distance.used_fallback);

    // Every carrier in the 1500-1999 band is surfaced, cheapest first as
    // the base travel cost: 1617 * 0.1360 (Frontier) = 219.9 -> 220.
    assert_eq!(plan.transportation.travel.options.len(), 8);
    assert!(!plan.transportation.travel.used_fallback);
    assert_eq!(plan.transportation.travel.base_cost, 220);

    // Seattle listings at or under $1400, averaged, times a three-month
    // stay: avg(1295,1150,1380,1340,1120,1310,1230,1275) * 3 = 3787.5.
    assert_eq!(plan.housing.duration_months, 3);
    assert_eq!(plan.housing.results_count, 8);
    assert_eq!(plan.housing.estimated_total, 3788);
    assert!(!plan.housing.used_fallback);

    // Inactive categories contribute nothing.
    assert_eq!(plan.totals.moving_truck, 0);
    assert_eq!(plan.totals.moving_help, 0);
    assert_eq!(plan.totals.total, 3788 + 220);
}

#[tokio::test]
async fn truck_move_plan_forces_travel_to_zero() {
    let server = MockServer::start_async().await;
    mock_geocode(&server, "Madison, WI", "43.0731", "-89.4012");
    mock_geocode(&server, "Seattle, WA", "47.6062", "-122.3321");
    server.mock(|when, then| {
        when.method(GET).path_includes("/route/v1/driving/");
        // 3218680 m = exactly 2000 miles.
        then.status(200)
            .json_body(json!({ "code": "Ok", "routes": [{ "distance": 3218680.0 }] }));
    });

    let config = test_config(&server.base_url());
    let tables = PricingTables::load(Path::new("data/air_fare_bands.csv")).unwrap();
    let listings = ListingStore::load(Path::new("data/listings.csv")).unwrap();
    let http = reqwest::Client::new();
    let ctx = PlanContext {
        config: &config,
        http: &http,
        tables: &tables,
        listings: &listings,
    };

    let mut query = plane_query();
    query.needs_moving_truck = true;
    query.wants_moving_help = true;

    let plan = build_move_plan(&ctx, &query, None).await;

    assert_eq!(plan.distance.result.driving_miles, Some(2000.0));

    // Travel is superseded entirely by the truck.
    assert!(plan.transportation.travel.options.is_empty());
    assert_eq!(plan.transportation.travel.base_cost, 0);
    assert_eq!(plan.totals.travel, 0);

    // Truck: distance-priced option plus the two provider quotes, but the
    // category is opt-in so the base stays zero.
    let truck = &plan.transportation.moving_truck;
    assert!(truck.enabled);
    assert_eq!(truck.category.options.len(), 3);
    assert_eq!(truck.category.options[0].cost, 617); // 2000 * 0.3087
    assert_eq!(truck.category.base_cost, 0);
    assert_eq!(truck.provider_quotes.len(), 2);

    // Moving help defaults to the cheapest crew.
    let help = &plan.transportation.moving_help;
    assert!(help.enabled);
    assert_eq!(help.category.base_cost, 220);
    assert_eq!(plan.totals.moving_help, 220);

    assert_eq!(
        plan.totals.total,
        plan.totals.housing + plan.totals.moving_help
    );
}

#[tokio::test]
async fn failed_geocoding_degrades_to_flat_estimates() {
    let server = MockServer::start_async().await;
    mock_geocode(&server, "Madison, WI", "43.0731", "-89.4012");
    // Destination lookup finds nothing.
    server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("q", "Atlantis, XX");
        then.status(200).json_body(json!([]));
    });

    let config = test_config(&server.base_url());
    let tables = PricingTables::load(Path::new("data/air_fare_bands.csv")).unwrap();
    let listings = ListingStore::load(Path::new("data/listings.csv")).unwrap();
    let http = reqwest::Client::new();
    let ctx = PlanContext {
        config: &config,
        http: &http,
        tables: &tables,
        listings: &listings,
    };

    let mut query = plane_query();
    query.destination = "Atlantis, XX".to_string();

    let plan = build_move_plan(&ctx, &query, None).await;

    // Unknown distance: flat flight estimate, flagged, never an error.
    assert!(plan.distance.result.straight_line_miles.is_none());
    assert!(plan.distance.used_fallback);
    assert!(plan.transportation.travel.used_fallback);
    assert_eq!(plan.transportation.travel.base_cost, 450);

    // No listings for the unknown city either: whole-stay flat estimate.
    assert_eq!(plan.housing.results_count, 0);
    assert!(plan.housing.used_fallback);
    assert_eq!(plan.housing.estimated_total, 3200);

    assert_eq!(plan.totals.total, 3200 + 450);
}

#[tokio::test]
async fn routing_failure_degrades_driving_modes() {
    let server = MockServer::start_async().await;
    mock_geocode(&server, "Madison, WI", "43.0731", "-89.4012");
    mock_geocode(&server, "Seattle, WA", "47.6062", "-122.3321");
    server.mock(|when, then| {
        when.method(GET).path_includes("/route/v1/driving/");
        then.status(200)
            .json_body(json!({ "code": "NoRoute", "routes": [] }));
    });

    let config = test_config(&server.base_url());
    let tables = PricingTables::load(Path::new("data/air_fare_bands.csv")).unwrap();
    let listings = ListingStore::load(Path::new("data/listings.csv")).unwrap();
    let http = reqwest::Client::new();
    let ctx = PlanContext {
        config: &config,
        http: &http,
        tables: &tables,
        listings: &listings,
    };

    let mut query = plane_query();
    query.transport = Some(TransportMode::TrainBus);

    let plan = build_move_plan(&ctx, &query, None).await;

    assert!(plan.distance.result.driving_miles.is_none());
    assert!(plan.transportation.travel.used_fallback);
    assert_eq!(plan.transportation.travel.base_cost, 150);
}

#[tokio::test]
async fn job_summary_rides_along_when_provided() {
    let server = MockServer::start_async().await;
    mock_geocode(&server, "Madison, WI", "43.0731", "-89.4012");
    mock_geocode(&server, "Seattle, WA", "47.6062", "-122.3321");

    let config = test_config(&server.base_url());
    let tables = PricingTables::load(Path::new("data/air_fare_bands.csv")).unwrap();
    let listings = ListingStore::load(Path::new("data/listings.csv")).unwrap();
    let http = reqwest::Client::new();
    let ctx = PlanContext {
        config: &config,
        http: &http,
        tables: &tables,
        listings: &listings,
    };

    let record = JobRecord {
        job_title: Some("Software Engineer Intern".to_string()),
        location: Some("Seattle, WA".to_string()),
        job_start_month: Some(6),
        job_start_year: Some(2025),
        job_end_month: Some(8),
        job_end_year: Some(2025),
    };

    let plan = build_move_plan(&ctx, &plane_query(), Some(record)).await;

    let summary = plan.job_summary.expect("summary should be present");
    assert_eq!(summary.job_title, "Software Engineer Intern");
    assert_eq!(summary.duration_months, "2");

    let without = build_move_plan(&ctx, &plane_query(), None).await;
    assert!(without.job_summary.is_none());
}
