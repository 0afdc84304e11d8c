//! Spreadsheet export of the detailed billing report.
//!
//! The artifact is built entirely in memory and handed to the caller as
//! bytes; writing it somewhere is the view's job. CSV is the only
//! persisted format.

use crate::errors::AdminError;
use crate::models::BillingJob;

/// Column set of the exported artifact. Fixed by the report consumers;
/// do not reorder.
const HEADER: [&str; 7] = [
    "timestamp",
    "account",
    "user",
    "job_id",
    "prompt",
    "model",
    "cost",
];

/// Render the per-job breakdown as CSV bytes, one row per processed job.
pub fn billing_csv(rows: &[BillingJob]) -> Result<Vec<u8>, AdminError> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(HEADER)?;
        for row in rows {
            writer.write_record([
                row.timestamp.to_rfc3339(),
                row.account_name.clone(),
                row.user_name.clone(),
                row.job_id.to_string(),
                row.prompt_name.clone(),
                row.model_name.clone(),
                row.cost.to_string(),
            ])?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(buf)
}

// ── Tests ─────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn sample_row() -> BillingJob {
        BillingJob {
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap(),
            account_name: "Cartório A".to_string(),
            user_name: "Ana Souza".to_string(),
            job_id: 991,
            prompt_name: "escritura".to_string(),
            model_name: "sonnet".to_string(),
            cost: Decimal::new(275, 4), // 0.0275
        }
    }

    #[test]
    fn empty_report_is_header_only() {
        let bytes = billing_csv(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim(), "timestamp,account,user,job_id,prompt,model,cost");
    }

    #[test]
    fn rows_render_in_order_with_decimal_cost() {
        let bytes = billing_csv(&[sample_row()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        lines.next(); // header
        assert_eq!(
            lines.next().unwrap(),
            "2025-06-01T09:30:00+00:00,Cartório A,Ana Souza,991,escritura,sonnet,0.0275"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let mut row = sample_row();
        row.account_name = "Cartório A, Comarca B".to_string();
        let bytes = billing_csv(&[row]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Cartório A, Comarca B\""));
    }
}
