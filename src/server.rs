use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::{net::SocketAddr, path::Path as FsPath, path::PathBuf, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::{
    config::Config,
    handlers::{self, move_plan::AppState},
    listings::ListingStore,
    metrics,
    pricing::PricingTables,
    signals::setup_signal_handlers,
};

/// Start the WhatsTheMove server
///
/// This function:
/// 1. Initializes metrics
/// 2. Loads the pricing tables and the listings dataset
/// 3. Sets up signal handlers for graceful shutdown and config reload
/// 4. Creates the Axum application
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    info!("Initializing Prometheus metrics...");
    let metrics_handle = Arc::new(metrics::init_metrics());

    // Static tables load once per process.
    let tables = Arc::new(PricingTables::load(FsPath::new(
        &config.datasets.air_fare_bands,
    ))?);
    let listings = Arc::new(ListingStore::load(FsPath::new(&config.datasets.listings))?);
    info!(
        flight_rows = tables.flight.len(),
        listings = listings.len(),
        "Loaded pricing tables and listings dataset"
    );

    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    // Setup signal handlers (SIGTERM, SIGINT for shutdown; SIGHUP for reload)
    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path);
    let mut shutdown_rx = shutdown_tx.subscribe();

    let app_state = AppState {
        config: config_swap.clone(),
        http_client: reqwest::Client::new(),
        tables,
        listings,
    };

    let app = create_router(app_state, metrics_handle, &config);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting WhatsTheMove on {}", addr);
    info!(
        "Configuration: {} known cities, geocoder at {}",
        config.cities.known.len(),
        config.geocoding.base_url
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
pub fn create_router(
    app_state: AppState,
    metrics_handle: Arc<metrics_exporter_prometheus::PrometheusHandle>,
    config: &Config,
) -> Router {
    let plan_routes = Router::new()
        .route(
            "/whatsthemove/:from_city/:to_city/:start_month/:end_month/:flags/:transport/:max_cost",
            get(handlers::move_plan::get_move_plan),
        )
        .with_state(app_state);

    Router::new()
        // Public endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/metrics", get(handlers::metrics_handler::metrics))
        .with_state(metrics_handle)
        .merge(plan_routes)
        .layer(build_cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// CORS is open to the configured frontend origins, GET only.
fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        CitiesConfig, CorsConfig, DatasetsConfig, GeocodingConfig, HousingConfig, JobsConfig,
        MetricsConfig, RoutingConfig, ServerConfig,
    };

    fn create_test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                log_level: "info".to_string(),
                log_format: "text".to_string(),
            },
            geocoding: GeocodingConfig {
                base_url: "https://nominatim.openstreetmap.org".to_string(),
                user_agent: "whatsthemove/0.1".to_string(),
                timeout_seconds: 10,
            },
            routing: RoutingConfig {
                base_url: "https://router.project-osrm.org".to_string(),
                timeout_seconds: 10,
            },
            jobs: JobsConfig {
                enabled: false,
                base_url: String::new(),
                timeout_seconds: 20,
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
                enabled: true,
                endpoint: "/metrics".to_string(),
            },
            cors: CorsConfig {
                allowed_origins: vec!["http://localhost:5173".to_string()],
            },
        }
    }

    #[test]
    fn test_create_router() {
        let config = create_test_config();
        let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

        let app_state = AppState {
            config: config_swap,
            http_client: reqwest::Client::new(),
            tables: Arc::new(PricingTables::without_flight_data()),
            listings: Arc::new(ListingStore::default()),
        };

        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let metrics_handle = Arc::new(recorder.handle());

        let _app = create_router(app_state, metrics_handle, &config);
        // Router created successfully - no panic
    }

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        let mut config = create_test_config();
        config.cors.allowed_origins.push("\u{7f}bad".to_string());
        let _layer = build_cors_layer(&config);
    }
}
