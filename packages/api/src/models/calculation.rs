//! `calculations` row.
//!
//! Dates are stored as `DATE` and sent to the client as `YYYY-MM-DD`; the
//! creation timestamp goes out as RFC 3339 in UTC.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::FromRow;
use store::{Calculation, CalculationKind};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, FromRow)]
pub struct CalculationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub client_name: String,
    pub birth_date: NaiveDate,
    pub partner_name: Option<String>,
    pub partner_birth_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub results: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl CalculationRow {
    /// Fails only for a `kind` this build does not know.
    pub fn to_calculation(&self) -> Result<Calculation, ApiError> {
        let kind = CalculationKind::parse(&self.kind).ok_or_else(|| {
            ApiError::InvalidInput(format!("Unknown calculation kind: {}", self.kind))
        })?;
        Ok(Calculation {
            id: self.id.to_string(),
            kind,
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            client_name: self.client_name.clone(),
            birth_date: format_date(self.birth_date),
            partner_name: self.partner_name.clone(),
            partner_birth_date: self.partner_birth_date.map(format_date),
            target_date: self.target_date.map(format_date),
            results: self.results.clone(),
        })
    }
}

/// Project a listing, skipping rows whose `kind` this build does not know.
pub fn calculations_from_rows(rows: &[CalculationRow]) -> Vec<Calculation> {
    rows.iter()
        .filter_map(|row| match row.to_calculation() {
            Ok(calculation) => Some(calculation),
            Err(e) => {
                tracing::warn!(calculation_id = %row.id, "skipping calculation: {}", e);
                None
            }
        })
        .collect()
}
