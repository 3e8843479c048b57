//! Distance Resolver.
//!
//! Turns two place names into a driving-path length or a straight-line
//! great-circle length, depending on the transport mode's distance class.
//! Geocoding lookups for origin and destination are independent and are
//! issued concurrently; the route / great-circle step waits on both. Any
//! failed lookup degrades to an empty result and the cost models substitute
//! their flat fallbacks — resolution failure is never fatal.

pub mod geocode;
pub mod routing;

pub use geocode::Coordinates;

use serde::Serialize;
use tracing::warn;

use crate::config::{GeocodingConfig, RoutingConfig};
use crate::models::query::DistanceClass;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Mean Earth radius in miles, as used by the great-circle computation.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Resolved distances for one derivation. At most one field is populated;
/// both stay `None` when geocoding fails for either endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DistanceResult {
    pub driving_miles: Option<f64>,
    pub straight_line_miles: Option<f64>,
}

impl DistanceResult {
    pub fn is_unknown(&self) -> bool {
        self.driving_miles.is_none() && self.straight_line_miles.is_none()
    }
}

/// Great-circle distance in miles between two coordinates (haversine).
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    EARTH_RADIUS_MILES * 2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

fn round1(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

/// Resolve the distance between two place names for the given class.
pub async fn resolve(
    client: &reqwest::Client,
    geocoding: &GeocodingConfig,
    routing_cfg: &RoutingConfig,
    origin: &str,
    destination: &str,
    class: DistanceClass,
) -> DistanceResult {
    if class == DistanceClass::NotNeeded {
        return DistanceResult::default();
    }

    let (origin_coords, destination_coords) = tokio::join!(
        geocode::geocode(client, geocoding, origin),
        geocode::geocode(client, geocoding, destination),
    );

    let (from, to) = match (origin_coords, destination_coords) {
        (Ok(from), Ok(to)) => (from, to),
        (origin_result, destination_result) => {
            if let Err(e) = origin_result {
                warn!(place = origin, error = %e, "Geocoding failed");
            }
            if let Err(e) = destination_result {
                warn!(place = destination, error = %e, "Geocoding failed");
            }
            return DistanceResult::default();
        }
    };

    match class {
        DistanceClass::Flight => DistanceResult {
            driving_miles: None,
            straight_line_miles: Some(round1(haversine_miles(from, to))),
        },
        DistanceClass::Driving => {
            match routing::driving_distance_meters(client, routing_cfg, from, to).await {
                Ok(meters) => DistanceResult {
                    driving_miles: Some(round1(meters / METERS_PER_MILE)),
                    straight_line_miles: None,
                },
                Err(e) => {
                    warn!(origin, destination, error = %e, "Route lookup failed");
                    DistanceResult::default()
                }
            }
        }
        DistanceClass::NotNeeded => unreachable!("handled above"),
    }
}
