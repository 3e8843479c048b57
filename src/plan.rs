//! Move-plan derivation.
//!
//! One pass per query: resolve the distance, price every active category,
//! project the housing total, then hand the option lists to a fresh
//! [`CostSheet`] for aggregation. Nothing here is shared across requests,
//! so a superseded derivation simply drops with its request and can never
//! leak into another query's state. No upstream failure is fatal — each
//! degraded category carries `used_fallback: true` instead.

use tracing::{debug, info};

use crate::codec;
use crate::config::Config;
use crate::distance;
use crate::housing;
use crate::listings::ListingStore;
use crate::metrics;
use crate::models::job::JobRecord;
use crate::models::listing::Listing;
use crate::models::plan::{
    CategoryBlock, DistanceBlock, HousingBlock, MovePlan, MovingHelpBlock, MovingTruckBlock,
    RequestEcho, TransportationBlock,
};
use crate::models::query::{DistanceClass, MoveQuery};
use crate::movers;
use crate::pricing::modes::{self, round_dollars, CostCategory, PricedOption};
use crate::pricing::PricingTables;
use crate::selection::{CategorySlot, CostSheet};

pub struct PlanContext<'a> {
    pub config: &'a Config,
    pub http: &'a reqwest::Client,
    pub tables: &'a PricingTables,
    pub listings: &'a ListingStore,
}

/// Derive a complete move plan for one query.
pub async fn build_move_plan(
    ctx: &PlanContext<'_>,
    query: &MoveQuery,
    job: Option<JobRecord>,
) -> MovePlan {
    let mode = query.effective_transport();
    let class = mode.map_or(DistanceClass::NotNeeded, |m| m.distance_class());

    let distance_result = distance::resolve(
        ctx.http,
        &ctx.config.geocoding,
        &ctx.config.routing,
        &query.origin,
        &query.destination,
        class,
    )
    .await;

    debug!(
        origin = %query.origin,
        destination = %query.destination,
        mode = mode.map(|m| m.as_str()),
        driving_miles = distance_result.driving_miles,
        straight_line_miles = distance_result.straight_line_miles,
        "Resolved distance"
    );

    // Travel.
    let travel_slot =
        CategorySlot::from_estimate(modes::travel_estimate(mode, &distance_result, ctx.tables));

    // Moving truck (opt-in).
    let (truck_slot, provider_quotes) = if query.needs_moving_truck {
        let mut estimate = modes::moving_truck_estimate(&distance_result, ctx.tables);
        let long_distance = query.origin != query.destination;
        let quotes = movers::truck_options(long_distance);
        estimate.options.extend(quotes.iter().map(|quote| {
            PricedOption::new(
                CostCategory::MovingTruck,
                format!("U-Haul {}", quote.truck_type),
                round_dollars(quote.estimated_total),
            )
        }));
        (CategorySlot::from_estimate(estimate), quotes)
    } else {
        (CategorySlot::inactive(), Vec::new())
    };

    // Moving help.
    let (help_slot, providers, schedule) = if query.wants_moving_help {
        let providers = movers::moving_help_providers();
        let options: Vec<PricedOption> = providers
            .iter()
            .map(|p| {
                PricedOption::new(
                    CostCategory::MovingHelp,
                    p.name.clone(),
                    round_dollars(p.estimated_total),
                )
            })
            .collect();
        let used_fallback = options.is_empty();
        (
            CategorySlot::with_cheapest_default(options, used_fallback),
            providers,
            Some(movers::demo_schedule()),
        )
    } else {
        (CategorySlot::inactive(), Vec::new(), None)
    };

    // Housing.
    let stay_months = query.stay_months();
    let matches: Vec<Listing> = ctx.listings.find_top(
        &query.destination,
        f64::from(query.housing_budget),
        ctx.config.housing.max_results,
    );
    let housing_estimate = housing::estimate_housing_total(&matches, stay_months);

    let sheet = CostSheet::new(
        housing_estimate.total,
        housing_estimate.used_fallback,
        travel_slot,
        truck_slot,
        help_slot,
    );
    let totals = sheet.grand_total();

    for (name, category) in [
        ("travel", CostCategory::Travel),
        ("moving_truck", CostCategory::MovingTruck),
        ("moving_help", CostCategory::MovingHelp),
    ] {
        if sheet.slot(category).used_fallback() {
            metrics::record_fallback(name);
        }
    }
    if housing_estimate.used_fallback {
        metrics::record_fallback("housing");
    }

    info!(
        origin = %query.origin,
        destination = %query.destination,
        stay_months,
        total = totals.total,
        "Derived move plan"
    );

    MovePlan {
        job_summary: job.as_ref().map(crate::jobs::build_job_summary),
        request: request_echo(query),
        distance: DistanceBlock {
            result: distance_result,
            used_fallback: class != DistanceClass::NotNeeded && distance_result.is_unknown(),
        },
        transportation: TransportationBlock {
            travel: category_block(sheet.slot(CostCategory::Travel)),
            moving_truck: MovingTruckBlock {
                enabled: query.needs_moving_truck,
                category: category_block(sheet.slot(CostCategory::MovingTruck)),
                provider_quotes,
            },
            moving_help: MovingHelpBlock {
                enabled: query.wants_moving_help,
                category: category_block(sheet.slot(CostCategory::MovingHelp)),
                schedule,
                providers,
            },
        },
        housing: HousingBlock {
            destination_city: query.destination.clone(),
            max_price: query.housing_budget,
            duration_months: stay_months,
            results_count: matches.len(),
            apartments: matches.iter().map(Listing::to_output).collect(),
            estimated_total: housing_estimate.total,
            used_fallback: housing_estimate.used_fallback,
        },
        totals,
    }
}

fn category_block(slot: &CategorySlot) -> CategoryBlock {
    CategoryBlock {
        options: slot.options().to_vec(),
        default_option_id: slot.default_id(),
        base_cost: slot.contribution(),
        used_fallback: slot.used_fallback(),
    }
}

fn month_segment(ym: Option<crate::models::query::YearMonth>) -> String {
    ym.and_then(|ym| codec::month_name(ym.month))
        .unwrap_or(codec::UNKNOWN_MONTH)
        .to_string()
}

fn request_echo(query: &MoveQuery) -> RequestEcho {
    RequestEcho {
        from_city: query.origin.clone(),
        to_city: query.destination.clone(),
        start_month: month_segment(query.start),
        end_month: month_segment(query.end),
        transport: query.transport.map(|m| m.as_str().to_string()),
        needs_moving_truck: query.needs_moving_truck,
        wants_moving_help: query.wants_moving_help,
        housing_budget: query.housing_budget,
    }
}
