use serde::Serialize;
use uuid::Uuid;

use crate::distance::DistanceResult;
use crate::models::job::JobSummary;
use crate::models::listing::ListingOutput;
use crate::movers::{MovingProvider, MovingSchedule, TruckOption};
use crate::pricing::modes::PricedOption;
use crate::selection::GrandTotal;

/// Full move-plan response.
#[derive(Debug, Serialize)]
pub struct MovePlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_summary: Option<JobSummary>,
    pub request: RequestEcho,
    pub distance: DistanceBlock,
    pub transportation: TransportationBlock,
    pub housing: HousingBlock,
    pub totals: GrandTotal,
}

/// Echo of the decoded request, for display.
#[derive(Debug, Serialize)]
pub struct RequestEcho {
    pub from_city: String,
    pub to_city: String,
    pub start_month: String,
    pub end_month: String,
    pub transport: Option<String>,
    pub needs_moving_truck: bool,
    pub wants_moving_help: bool,
    pub housing_budget: u32,
}

#[derive(Debug, Serialize)]
pub struct DistanceBlock {
    #[serde(flatten)]
    pub result: DistanceResult,
    /// True when resolution failed and flat estimates were substituted
    /// downstream.
    pub used_fallback: bool,
}

#[derive(Debug, Serialize)]
pub struct TransportationBlock {
    pub travel: CategoryBlock,
    pub moving_truck: MovingTruckBlock,
    pub moving_help: MovingHelpBlock,
}

/// One selectable category as surfaced to the caller: its options, the
/// base contribution before any explicit selection, and the degradation
/// flag.
#[derive(Debug, Serialize)]
pub struct CategoryBlock {
    pub options: Vec<PricedOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_option_id: Option<Uuid>,
    pub base_cost: i64,
    pub used_fallback: bool,
}

#[derive(Debug, Serialize)]
pub struct MovingTruckBlock {
    pub enabled: bool,
    #[serde(flatten)]
    pub category: CategoryBlock,
    /// Provider quote rows backing the alternative options.
    pub provider_quotes: Vec<TruckOption>,
}

#[derive(Debug, Serialize)]
pub struct MovingHelpBlock {
    pub enabled: bool,
    #[serde(flatten)]
    pub category: CategoryBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<MovingSchedule>,
    pub providers: Vec<MovingProvider>,
}

#[derive(Debug, Serialize)]
pub struct HousingBlock {
    pub destination_city: String,
    pub max_price: u32,
    pub duration_months: u32,
    pub results_count: usize,
    pub apartments: Vec<ListingOutput>,
    pub estimated_total: i64,
    pub used_fallback: bool,
}
