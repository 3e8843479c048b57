use std::time::Duration;

use serde::Deserialize;

use crate::config::RoutingConfig;
use crate::error::AppError;

use super::Coordinates;

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    /// Path length in meters.
    distance: f64,
}

/// Fetch the driving-path length in meters from the routing collaborator.
pub async fn driving_distance_meters(
    client: &reqwest::Client,
    config: &RoutingConfig,
    from: Coordinates,
    to: Coordinates,
) -> Result<f64, AppError> {
    // OSRM-style coordinate order: lon,lat pairs separated by ';'.
    let url = format!(
        "{}/route/v1/driving/{},{};{},{}",
        config.base_url, from.lon, from.lat, to.lon, to.lat
    );

    let response = client
        .get(&url)
        .query(&[("overview", "false")])
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

    let body: RouteResponse = response.json().await?;
    if body.code != "Ok" {
        return Err(AppError::GeocodingFailed(format!(
            "routing service returned code '{}'",
            body.code
        )));
    }

    body.routes
        .first()
        .map(|route| route.distance)
        .ok_or_else(|| AppError::GeocodingFailed("routing service returned no routes".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_response_shape() {
        let json = r#"{"code": "Ok", "routes": [{"distance": 3218680.0, "duration": 104000.0}]}"#;
        let body: RouteResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.code, "Ok");
        assert_eq!(body.routes[0].distance, 3_218_680.0);
    }

    #[test]
    fn test_route_response_tolerates_missing_routes() {
        let json = r#"{"code": "NoRoute"}"#;
        let body: RouteResponse = serde_json::from_str(json).unwrap();
        assert!(body.routes.is_empty());
    }
}
