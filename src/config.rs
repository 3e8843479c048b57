use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub geocoding: GeocodingConfig,
    pub routing: RoutingConfig,
    pub jobs: JobsConfig,
    pub datasets: DatasetsConfig,
    pub cities: CitiesConfig,
    pub housing: HousingConfig,
    pub metrics: MetricsConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: String,
}

/// Geocoding collaborator (Nominatim-style search API).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodingConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

/// Routing collaborator (OSRM-style route API).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Job-posting analysis collaborator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JobsConfig {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetsConfig {
    /// Flight band table CSV path.
    pub air_fare_bands: String,
    /// Apartment listings CSV path.
    pub listings: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CitiesConfig {
    /// Canonical "City, ST" names the path codec can map slugs back to.
    pub known: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HousingConfig {
    /// Cap on listings returned per plan.
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()))
        .add_source(config::Environment::with_prefix("WHATSTHEMOVE").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.geocoding.base_url.is_empty() {
        anyhow::bail!("Geocoding base URL must be set");
    }
    if cfg.routing.base_url.is_empty() {
        anyhow::bail!("Routing base URL must be set");
    }
    if cfg.jobs.enabled && cfg.jobs.base_url.is_empty() {
        anyhow::bail!("Job analysis is enabled but has no base URL");
    }
    if cfg.datasets.air_fare_bands.is_empty() || cfg.datasets.listings.is_empty() {
        anyhow::bail!("Dataset paths must be set");
    }
    if cfg.housing.max_results == 0 {
        anyhow::bail!("housing.max_results must be at least 1");
    }

    // Known cities must be "City, ST" so slugs round-trip to display names.
    for city in &cfg.cities.known {
        if !city.contains(',') {
            anyhow::bail!("Known city '{}' is not in 'City, ST' form", city);
        }
    }

    Ok(())
}
