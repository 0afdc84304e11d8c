use reqwest::Method;

use super::AdminClient;
use crate::errors::AdminError;
use crate::models::{BillingReport, DetailedBillingReport, ReportQuery};

impl AdminClient {
    /// Aggregated report for a period: totals plus a per-model breakdown.
    pub async fn billing_report(&self, query: &ReportQuery) -> Result<BillingReport, AdminError> {
        let resp = self
            .execute(self.request(Method::GET, "/billing/report/").query(query))
            .await?;
        Self::read_json(resp).await
    }

    /// Per-job rows for the spreadsheet export. The API requires an
    /// account filter here; callers validate that before reaching us.
    pub async fn detailed_billing_report(
        &self,
        query: &ReportQuery,
    ) -> Result<DetailedBillingReport, AdminError> {
        let resp = self
            .execute(self.request(Method::GET, "/billing/report/detailed").query(query))
            .await?;
        Self::read_json(resp).await
    }
}
