//! Static pricing tables.
//!
//! Per-mile vehicle rates are fixed constants derived from AAA's published
//! driving-cost classes (sedans for "car", SUV classes for minivan/suv,
//! pickup classes for truck/van). The bus buckets come from long-distance
//! coach cost studies; rates fall on longer routes. The flight band table
//! is tabular data and is loaded once at startup from CSV.

use std::path::Path;

use serde::Serialize;

use super::flight::FlightBandTable;

/// The five rentable vehicle classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Car,
    Minivan,
    Suv,
    Truck,
    Van,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 5] = [
        VehicleClass::Car,
        VehicleClass::Minivan,
        VehicleClass::Suv,
        VehicleClass::Truck,
        VehicleClass::Van,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Minivan => "minivan",
            VehicleClass::Suv => "suv",
            VehicleClass::Truck => "truck",
            VehicleClass::Van => "van",
        }
    }
}

/// Fuel and maintenance cost for one driven mile, in dollars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerMileRate {
    pub fuel: f64,
    pub maintenance: f64,
}

impl PerMileRate {
    pub fn total(self) -> f64 {
        self.fuel + self.maintenance
    }
}

/// Bus/train cost-per-mile by distance bucket, dollars. Longer routes are
/// cheaper per mile.
const BUS_RATE_SHORT: f64 = 0.2794; // [0, 500)
const BUS_RATE_MID: f64 = 0.2413; // [500, 1000)
const BUS_RATE_LONG: f64 = 0.1905; // [1000, inf)

/// All pricing tables used by the mode cost models.
#[derive(Debug, Clone)]
pub struct PricingTables {
    pub flight: FlightBandTable,
}

impl PricingTables {
    /// Load the flight band table from `air_csv`; the vehicle and bus
    /// tables are compiled in.
    pub fn load(air_csv: &Path) -> anyhow::Result<Self> {
        let flight = FlightBandTable::from_csv_path(air_csv)?;
        Ok(Self { flight })
    }

    /// Tables with an empty flight band list; every flight lookup falls
    /// back to the flat estimate.
    pub fn without_flight_data() -> Self {
        Self {
            flight: FlightBandTable::default(),
        }
    }

    pub fn vehicle_rate(&self, class: VehicleClass) -> PerMileRate {
        match class {
            VehicleClass::Car => PerMileRate {
                fuel: 0.1183,
                maintenance: 0.1022,
            },
            VehicleClass::Minivan | VehicleClass::Suv => PerMileRate {
                fuel: 0.1418,
                maintenance: 0.1068,
            },
            VehicleClass::Truck | VehicleClass::Van => PerMileRate {
                fuel: 0.2049,
                maintenance: 0.1038,
            },
        }
    }

    pub fn bus_rate(&self, miles: f64) -> f64 {
        if miles < 500.0 {
            BUS_RATE_SHORT
        } else if miles < 1000.0 {
            BUS_RATE_MID
        } else {
            BUS_RATE_LONG
        }
    }
}
