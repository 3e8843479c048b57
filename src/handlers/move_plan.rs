use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use crate::{
    codec,
    config::Config,
    error::AppError,
    jobs,
    listings::ListingStore,
    metrics,
    models::job::JobRecord,
    models::plan::MovePlan,
    plan::{self, PlanContext},
    pricing::PricingTables,
};

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<arc_swap::ArcSwap<Config>>,
    pub http_client: reqwest::Client,
    pub tables: Arc<PricingTables>,
    pub listings: Arc<ListingStore>,
}

#[derive(Debug, Deserialize)]
pub struct PlanParams {
    pub job_url: Option<String>,
}

/// Handle the move-plan endpoint:
///
/// `GET /whatsthemove/{from}/{to}/{start}/{end}/{flags}/{transport}/{max_cost}`
///
/// The seven path segments are the encoded move request (see the codec
/// module); an optional `job_url` query parameter asks the job-analysis
/// collaborator for a posting summary.
pub async fn get_move_plan(
    State(state): State<AppState>,
    Path((from_city, to_city, start_month, end_month, flags, transport, max_cost)): Path<(
        String,
        String,
        String,
        String,
        String,
        String,
        String,
    )>,
    Query(params): Query<PlanParams>,
) -> Result<Json<MovePlan>, AppError> {
    let started = Instant::now();
    let config = state.config.load_full();

    // Decode the path into the internal query; bit strings stop here.
    let decoded = codec::decode(
        &from_city,
        &to_city,
        &start_month,
        &end_month,
        &flags,
        &transport,
        &max_cost,
        Utc::now().year(),
    )?;

    let registry = codec::CityRegistry::new(&config.cities.known);
    let mut query = decoded;
    query.origin = registry.display_name(&query.origin);
    query.destination = registry.display_name(&query.destination);
    query.validate().map_err(AppError::InvalidRequest)?;

    metrics::record_request("/whatsthemove");
    tracing::info!(
        origin = %query.origin,
        destination = %query.destination,
        transport = query.effective_transport().map(|m| m.as_str()),
        needs_moving_truck = query.needs_moving_truck,
        "Handling move-plan request"
    );

    // Job analysis is best-effort: a failed or disabled lookup degrades to
    // an all-NA summary / no summary, never a failed plan.
    let job = match params.job_url.as_deref() {
        Some(job_url) if config.jobs.enabled => {
            match jobs::analyze_job_url(&state.http_client, &config.jobs, job_url).await {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(job_url, error = %e, "Job analysis failed");
                    Some(JobRecord::default())
                }
            }
        }
        Some(_) => {
            debug!("Job analysis requested but disabled in configuration");
            None
        }
        None => None,
    };

    let ctx = PlanContext {
        config: &config,
        http: &state.http_client,
        tables: &state.tables,
        listings: &state.listings,
    };
    let move_plan = plan::build_move_plan(&ctx, &query, job).await;

    metrics::record_duration("/whatsthemove", started.elapsed());

    Ok(Json(move_plan))
}
