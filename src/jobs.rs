//! Job-analysis collaborator.
//!
//! The posting extractor is an external service (black box) that turns a
//! job URL into a structured [`JobRecord`]. This module wraps the HTTP
//! call and shapes the record into the compact summary surfaced at the top
//! of a move plan. A failed analysis never fails the plan.

use std::time::Duration;

use crate::config::JobsConfig;
use crate::error::AppError;
use crate::models::job::{JobRecord, JobSummary};

/// Fetch the structured record for a job posting URL.
pub async fn analyze_job_url(
    client: &reqwest::Client,
    config: &JobsConfig,
    job_url: &str,
) -> Result<JobRecord, AppError> {
    let url = format!("{}/analyze", config.base_url);

    let response = client
        .get(&url)
        .query(&[("job_url", job_url)])
        .timeout(Duration::from_secs(config.timeout_seconds))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(AppError::UpstreamError { status, message });
    }

    Ok(response.json().await?)
}

/// Month difference like 5/2026 -> 8/2026 => 3, or `None` when any part is
/// missing.
fn month_span(
    start_month: Option<u32>,
    start_year: Option<i32>,
    end_month: Option<u32>,
    end_year: Option<i32>,
) -> Option<i64> {
    let (sm, sy, em, ey) = (start_month?, start_year?, end_month?, end_year?);
    Some((ey as i64 - sy as i64) * 12 + (em as i64 - sm as i64))
}

fn month_year_or_na(month: Option<u32>, year: Option<i32>) -> String {
    match (month, year) {
        (Some(m), Some(y)) => format!("{m}/{y}"),
        _ => "NA".to_string(),
    }
}

/// Shape a job record into the response summary, with "NA" for anything
/// the extractor could not find.
pub fn build_job_summary(record: &JobRecord) -> JobSummary {
    let duration = month_span(
        record.job_start_month,
        record.job_start_year,
        record.job_end_month,
        record.job_end_year,
    );

    JobSummary {
        job_title: record
            .job_title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "NA".to_string()),
        move_to_destination: record
            .location
            .clone()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| "NA".to_string()),
        start_month: month_year_or_na(record.job_start_month, record.job_start_year),
        end_month: month_year_or_na(record.job_end_month, record.job_end_year),
        duration_months: duration.map_or_else(|| "NA".to_string(), |d| d.to_string()),
    }
}
