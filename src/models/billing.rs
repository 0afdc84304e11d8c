use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Period totals of the master billing report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSummary {
    pub total_jobs: u64,
    pub total_tokens: u64,
}

/// Per-model aggregation row of the master report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelUsage {
    pub model_name: String,
    pub total_jobs: u64,
    pub total_tokens: u64,
}

/// Master report: `GET /billing/report/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingReport {
    pub summary: BillingSummary,
    #[serde(default)]
    pub by_model: Vec<ModelUsage>,
}

/// One processed job, as itemized by the detailed report. These rows feed
/// the spreadsheet export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingJob {
    pub timestamp: DateTime<Utc>,
    pub account_name: String,
    pub user_name: String,
    pub job_id: i64,
    pub prompt_name: String,
    pub model_name: String,
    pub cost: Decimal,
}

/// Detailed report: `GET /billing/report/detailed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedBillingReport {
    #[serde(default)]
    pub breakdown: Vec<BillingJob>,
}

/// Query parameters common to both report endpoints. Dates are inclusive
/// and serialized as `YYYY-MM-DD`, the format the API expects.
#[derive(Debug, Clone, Serialize)]
pub struct ReportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
}
