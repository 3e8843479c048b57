pub mod flight;
pub mod modes;
pub mod tables;

pub use flight::FlightBandTable;
pub use modes::{CostCategory, ModeEstimate, PricedOption};
pub use tables::{PricingTables, VehicleClass};
