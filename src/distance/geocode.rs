use std::time::Duration;

use serde::Deserialize;

use crate::config::GeocodingConfig;
use crate::error::AppError;

/// A geocoded point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One hit from the geocoding API. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

/// Resolve a place name to coordinates via the geocoding collaborator.
pub async fn geocode(
    client: &reqwest::Client,
    config: &GeocodingConfig,
    place: &str,
) -> Result<Coordinates, AppError> {
    let url = format!("{}/search", config.base_url);

    let response = client
        .get(&url)
        .header("User-Agent", &config.user_agent)
        .query(&[("q", place), ("format", "json"), ("limit", "1")])
        .timeout(Duration::from_secs(config.timeout_seconds))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::UpstreamError { status, message });
    }

    let hits: Vec<GeocodeHit> = response.json().await?;
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| AppError::GeocodingFailed(format!("no results for '{place}'")))?;

    let lat: f64 = hit
        .lat
        .parse()
        .map_err(|_| AppError::GeocodingFailed(format!("bad latitude '{}'", hit.lat)))?;
    let lon: f64 = hit
        .lon
        .parse()
        .map_err(|_| AppError::GeocodingFailed(format!("bad longitude '{}'", hit.lon)))?;

    Ok(Coordinates { lat, lon })
}
