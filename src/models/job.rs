use serde::{Deserialize, Serialize};

/// Structured job record returned by the job-analysis collaborator.
///
/// Every field is optional; the upstream extractor returns nulls for
/// anything it could not find in the posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub job_start_month: Option<u32>,
    pub job_start_year: Option<i32>,
    pub job_end_month: Option<u32>,
    pub job_end_year: Option<i32>,
}

/// Compact job summary surfaced at the top of the move-plan response.
/// Missing values are rendered as "NA".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    pub job_title: String,
    pub move_to_destination: String,
    pub start_month: String,
    pub end_month: String,
    pub duration_months: String,
}
