use serde::{Deserialize, Serialize};

/// A calendar year-month pair, month in 1..=12.
///
/// Ordering is chronological (year first, then month), which the derived
/// `Ord` gives us for free with this field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

/// The six mutually-exclusive transport categories a user can select.
///
/// The array order is the wire order of the six-bit transport segment and
/// must not be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    HaveArrangements,
    DriveOwnCar,
    MovingTruck,
    RentalCar,
    TrainBus,
    Plane,
}

impl TransportMode {
    /// Wire order of the six-bit transport segment.
    pub const ALL: [TransportMode; 6] = [
        TransportMode::HaveArrangements,
        TransportMode::DriveOwnCar,
        TransportMode::MovingTruck,
        TransportMode::RentalCar,
        TransportMode::TrainBus,
        TransportMode::Plane,
    ];

    /// Which kind of distance lookup this mode needs.
    pub fn distance_class(self) -> DistanceClass {
        match self {
            TransportMode::HaveArrangements => DistanceClass::NotNeeded,
            TransportMode::Plane => DistanceClass::Flight,
            TransportMode::DriveOwnCar
            | TransportMode::MovingTruck
            | TransportMode::RentalCar
            | TransportMode::TrainBus => DistanceClass::Driving,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::HaveArrangements => "have-arrangements",
            TransportMode::DriveOwnCar => "drive-own-car",
            TransportMode::MovingTruck => "moving-truck",
            TransportMode::RentalCar => "rental-car",
            TransportMode::TrainBus => "train-bus",
            TransportMode::Plane => "plane",
        }
    }
}

/// Distance lookup kind for a transport mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceClass {
    /// No lookup at all (user supplies their own transport).
    NotNeeded,
    /// Road path length via the routing collaborator.
    Driving,
    /// Great-circle distance between the geocoded endpoints.
    Flight,
}

/// A fully decoded move request, the single internal representation used by
/// every component past the codec boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveQuery {
    /// Origin place name for display and geocoding, e.g. "Madison, WI".
    pub origin: String,
    /// Destination place name, e.g. "Seattle, WA".
    pub destination: String,
    /// First month of the stay; `None` means no date constraint.
    pub start: Option<YearMonth>,
    /// Last month of the stay, inclusive.
    pub end: Option<YearMonth>,
    /// Explicitly selected transport mode, if any. Superseded by
    /// `needs_moving_truck`.
    pub transport: Option<TransportMode>,
    pub needs_moving_truck: bool,
    pub wants_moving_help: bool,
    /// Monthly housing budget ceiling in whole dollars.
    pub housing_budget: u32,
}

/// Upper bound for a plausible monthly housing budget.
pub const MAX_HOUSING_BUDGET: u32 = 100_000;

impl MoveQuery {
    /// The transport mode the derivation actually prices. The moving-truck
    /// flag supersedes any separately selected mode.
    pub fn effective_transport(&self) -> Option<TransportMode> {
        if self.needs_moving_truck {
            Some(TransportMode::MovingTruck)
        } else {
            self.transport
        }
    }

    /// Stay duration in months, inclusive on both ends, clamped to >= 1.
    /// Unknown dates count as a one-month stay.
    pub fn stay_months(&self) -> u32 {
        match (self.start, self.end) {
            (Some(s), Some(e)) => {
                let span = (e.year as i64 - s.year as i64) * 12
                    + (e.month as i64 - s.month as i64)
                    + 1;
                span.max(1) as u32
            }
            _ => 1,
        }
    }

    /// Reject malformed queries before any derivation starts.
    pub fn validate(&self) -> Result<(), String> {
        if self.origin.trim().is_empty() {
            return Err("origin place name is empty".to_string());
        }
        if self.destination.trim().is_empty() {
            return Err("destination place name is empty".to_string());
        }
        if let (Some(s), Some(e)) = (self.start, self.end) {
            if e < s {
                return Err(format!(
                    "end month {}/{} is before start month {}/{}",
                    e.month, e.year, s.month, s.year
                ));
            }
        }
        if self.housing_budget == 0 || self.housing_budget > MAX_HOUSING_BUDGET {
            return Err(format!(
                "housing budget must be between 1 and {}, got {}",
                MAX_HOUSING_BUDGET, self.housing_budget
            ));
        }
        Ok(())
    }
}
