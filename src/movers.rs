//! Moving-provider estimates.
//!
//! Static demo quotes standing in for the truck-rental and moving-help
//! collaborators. These are not live prices; they are fixed rows so the
//! service stays deployable without a scraping stack. Long-distance moves
//! (different pickup and dropoff cities) get one-way rates, local moves
//! get in-town rates.

use chrono::{Duration, Utc};
use serde::Serialize;

/// One rentable truck quote.
#[derive(Debug, Clone, Serialize)]
pub struct TruckOption {
    pub truck_type: String,
    pub estimated_base_rate: f64,
    pub estimated_mileage_fees: f64,
    pub estimated_total: f64,
}

/// One moving-help crew quote.
#[derive(Debug, Clone, Serialize)]
pub struct MovingProvider {
    pub name: String,
    pub hours: u32,
    pub crew_size: u32,
    pub estimated_total: f64,
}

/// Loading/unloading window for the help quote; loading today, unloading
/// the next day, matching the upstream demo behavior.
#[derive(Debug, Clone, Serialize)]
pub struct MovingSchedule {
    pub loading_date: String,
    pub unloading_date: String,
}

pub fn demo_schedule() -> MovingSchedule {
    let loading = Utc::now();
    let unloading = loading + Duration::days(1);
    MovingSchedule {
        loading_date: loading.format("%m/%d/%Y").to_string(),
        unloading_date: unloading.format("%m/%d/%Y").to_string(),
    }
}

fn truck(truck_type: &str, base: f64, mileage: f64) -> TruckOption {
    TruckOption {
        truck_type: truck_type.to_string(),
        estimated_base_rate: base,
        estimated_mileage_fees: mileage,
        estimated_total: base + mileage,
    }
}

/// Demo truck quotes. `long_distance` when pickup and dropoff cities
/// differ.
pub fn truck_options(long_distance: bool) -> Vec<TruckOption> {
    if long_distance {
        vec![
            truck("10-foot truck", 450.0, 220.0),
            truck("15-foot truck", 520.0, 240.0),
        ]
    } else {
        vec![
            truck("10-foot truck", 45.0, 40.0),
            truck("15-foot truck", 55.0, 45.0),
        ]
    }
}

/// Demo moving-help crews.
pub fn moving_help_providers() -> Vec<MovingProvider> {
    vec![
        MovingProvider {
            name: "QuickMove Helpers".to_string(),
            hours: 2,
            crew_size: 2,
            estimated_total: 220.0,
        },
        MovingProvider {
            name: "College Movers Co.".to_string(),
            hours: 3,
            crew_size: 2,
            estimated_total: 310.0,
        },
    ]
}
