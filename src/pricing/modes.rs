//! Mode cost models.
//!
//! One pure function per transport mode, mapping a resolved distance and
//! the pricing tables to priced, selectable options. Driving-class modes
//! read only the driving distance; plane reads only the straight-line
//! distance. When the needed distance is unknown every model substitutes
//! its flat fallback constant — a "no distance signal available" default,
//! never a live price.

use serde::Serialize;
use uuid::Uuid;

use crate::distance::DistanceResult;
use crate::models::query::TransportMode;

use super::tables::{PricingTables, VehicleClass};

/// Flat fallbacks, whole dollars.
pub const FLAT_OWN_CAR: i64 = 300;
pub const FLAT_RENTAL_CAR: i64 = 600;
pub const FLAT_MOVING_TRUCK: i64 = 600;
pub const FLAT_TRAIN_BUS: i64 = 150;
pub const FLAT_PLANE: i64 = 450;
/// Nominal estimate when the user supplies their own transport (or never
/// picked a mode).
pub const FLAT_ARRANGEMENTS: i64 = 250;

/// Cost categories that carry selectable options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Travel,
    MovingTruck,
    MovingHelp,
}

/// One priced, independently selectable line item.
#[derive(Debug, Clone, Serialize)]
pub struct PricedOption {
    pub id: Uuid,
    pub category: CostCategory,
    pub label: String,
    /// Whole dollars, rounded to the nearest dollar.
    pub cost: i64,
    pub selectable: bool,
}

impl PricedOption {
    pub fn new(category: CostCategory, label: impl Into<String>, cost: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            label: label.into(),
            cost,
            selectable: true,
        }
    }
}

/// Priced options for one category, plus which option backs the category's
/// base cost and whether a flat fallback was substituted.
#[derive(Debug, Clone, Default)]
pub struct ModeEstimate {
    pub options: Vec<PricedOption>,
    pub default_id: Option<Uuid>,
    pub used_fallback: bool,
}

impl ModeEstimate {
    fn single(option: PricedOption, used_fallback: bool) -> Self {
        Self {
            default_id: Some(option.id),
            options: vec![option],
            used_fallback,
        }
    }
}

pub fn round_dollars(amount: f64) -> i64 {
    amount.round() as i64
}

/// First option with the lowest cost.
pub fn cheapest(options: &[PricedOption]) -> Option<&PricedOption> {
    options
        .iter()
        .fold(None, |best: Option<&PricedOption>, option| match best {
            Some(b) if b.cost <= option.cost => Some(b),
            _ => Some(option),
        })
}

/// Cost options for the general travel category.
///
/// `TransportMode::MovingTruck` yields no travel options at all: the truck
/// supersedes general travel and its cost is carried by the moving-truck
/// category, so the travel base is forced to 0.
pub fn travel_estimate(
    mode: Option<TransportMode>,
    distance: &DistanceResult,
    tables: &PricingTables,
) -> ModeEstimate {
    let driving = distance.driving_miles;

    match mode {
        None | Some(TransportMode::HaveArrangements) => ModeEstimate::single(
            PricedOption::new(
                CostCategory::Travel,
                "Own travel arrangements",
                FLAT_ARRANGEMENTS,
            ),
            false,
        ),

        Some(TransportMode::MovingTruck) => ModeEstimate::default(),

        Some(TransportMode::DriveOwnCar) => match driving {
            Some(miles) => {
                let rate = tables.vehicle_rate(VehicleClass::Car).total();
                ModeEstimate::single(
                    PricedOption::new(
                        CostCategory::Travel,
                        "Drive your own car",
                        round_dollars(miles * rate),
                    ),
                    false,
                )
            }
            None => ModeEstimate::single(
                PricedOption::new(CostCategory::Travel, "Drive your own car", FLAT_OWN_CAR),
                true,
            ),
        },

        Some(TransportMode::RentalCar) => match driving {
            Some(miles) => {
                let options: Vec<PricedOption> = VehicleClass::ALL
                    .iter()
                    .map(|class| {
                        PricedOption::new(
                            CostCategory::Travel,
                            format!("Rental car ({})", class.label()),
                            round_dollars(miles * tables.vehicle_rate(*class).total()),
                        )
                    })
                    .collect();
                // The car class is the base, not the cheapest row; this
                // mirrors the upstream behavior (sedan as the common
                // default) and is flagged in DESIGN.md.
                let default_id = options.first().map(|o| o.id);
                ModeEstimate {
                    options,
                    default_id,
                    used_fallback: false,
                }
            }
            None => ModeEstimate::single(
                PricedOption::new(CostCategory::Travel, "Rental car", FLAT_RENTAL_CAR),
                true,
            ),
        },

        Some(TransportMode::TrainBus) => match driving {
            Some(miles) => ModeEstimate::single(
                PricedOption::new(
                    CostCategory::Travel,
                    "Train / bus",
                    round_dollars(miles * tables.bus_rate(miles)),
                ),
                false,
            ),
            None => ModeEstimate::single(
                PricedOption::new(CostCategory::Travel, "Train / bus", FLAT_TRAIN_BUS),
                true,
            ),
        },

        Some(TransportMode::Plane) => {
            let Some(miles) = distance.straight_line_miles else {
                return ModeEstimate::single(
                    PricedOption::new(CostCategory::Travel, "Flight", FLAT_PLANE),
                    true,
                );
            };
            let rows = tables.flight.matches(miles);
            if rows.is_empty() {
                return ModeEstimate::single(
                    PricedOption::new(CostCategory::Travel, "Flight", FLAT_PLANE),
                    true,
                );
            }
            let options: Vec<PricedOption> = rows
                .iter()
                .map(|row| {
                    PricedOption::new(
                        CostCategory::Travel,
                        row.carrier.clone(),
                        round_dollars(miles * row.cost_per_mile),
                    )
                })
                .collect();
            let default_id = cheapest(&options).map(|o| o.id);
            ModeEstimate {
                options,
                default_id,
                used_fallback: false,
            }
        }
    }
}

/// The distance-priced moving-truck line item (the "U-Haul chip").
pub fn moving_truck_estimate(distance: &DistanceResult, tables: &PricingTables) -> ModeEstimate {
    let option = match distance.driving_miles {
        Some(miles) => {
            let rate = tables.vehicle_rate(VehicleClass::Truck).total();
            (
                PricedOption::new(
                    CostCategory::MovingTruck,
                    "U-Haul moving truck",
                    round_dollars(miles * rate),
                ),
                false,
            )
        }
        None => (
            PricedOption::new(
                CostCategory::MovingTruck,
                "U-Haul moving truck",
                FLAT_MOVING_TRUCK,
            ),
            true,
        ),
    };
    // A truck is an opt-in extra line item: no default, so the category
    // contributes 0 until the user toggles an option on.
    ModeEstimate {
        options: vec![option.0],
        default_id: None,
        used_fallback: option.1,
    }
}
