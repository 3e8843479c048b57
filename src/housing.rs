//! Housing Cost Model.
//!
//! A single month's average rent is not the cost of the move: the projected
//! total scales by how long the person actually stays. Listings without a
//! valid positive price are ignored; with no usable listings at all the
//! model substitutes a whole-stay flat estimate.

use crate::models::listing::Listing;
use crate::pricing::modes::round_dollars;

/// Whole-stay flat estimate when no listing carries a usable price.
pub const FLAT_HOUSING_TOTAL: i64 = 3200;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HousingEstimate {
    pub total: i64,
    pub used_fallback: bool,
}

/// Project the total housing cost for the stay.
pub fn estimate_housing_total(listings: &[Listing], stay_months: u32) -> HousingEstimate {
    let prices: Vec<f64> = listings.iter().filter_map(Listing::valid_price).collect();

    if prices.is_empty() {
        return HousingEstimate {
            total: FLAT_HOUSING_TOTAL,
            used_fallback: true,
        };
    }

    let average = prices.iter().sum::<f64>() / prices.len() as f64;
    HousingEstimate {
        total: round_dollars(average * f64::from(stay_months)),
        used_fallback: false,
    }
}
