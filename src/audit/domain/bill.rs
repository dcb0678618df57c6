use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static BILL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_bill_id() -> String {
    let id = BILL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("bill-{id:06}")
}

/// A captured utility bill. Usage and cost figures come from the bill scan or
/// manual entry; every annualized quantity is derived on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBill {
    pub id: String,
    pub billing_period_start: Option<NaiveDate>,
    pub billing_period_end: Option<NaiveDate>,
    pub total_kwh: f64,
    pub total_cost: f64,
    pub rate_per_kwh: Option<f64>,
    pub utility_name: Option<String>,
    pub raw_ocr_text: Option<String>,
    pub created_at: Option<NaiveDate>,
}

impl EnergyBill {
    pub fn new(total_kwh: f64, total_cost: f64) -> Self {
        Self {
            id: next_bill_id(),
            billing_period_start: None,
            billing_period_end: None,
            total_kwh,
            total_cost,
            rate_per_kwh: None,
            utility_name: None,
            raw_ocr_text: None,
            created_at: None,
        }
    }

    /// Number of days in the billing period, when both dates are known.
    pub fn billing_days(&self) -> Option<i64> {
        let start = self.billing_period_start?;
        let end = self.billing_period_end?;
        Some((end - start).num_days())
    }

    /// Daily average kWh usage over the billing period.
    pub fn daily_average_kwh(&self) -> Option<f64> {
        let days = self.billing_days()?;
        if days <= 0 {
            return None;
        }
        Some(self.total_kwh / days as f64)
    }

    /// Annualized kWh extrapolated from this billing period.
    pub fn annualized_kwh(&self) -> Option<f64> {
        Some(self.daily_average_kwh()? * 365.0)
    }

    /// Rate resolution precedence: explicit rate, then cost / kWh, then the
    /// supplied default.
    pub fn computed_rate(&self, default_rate: f64) -> f64 {
        if let Some(explicit) = self.rate_per_kwh {
            if explicit > 0.0 {
                return explicit;
            }
        }
        if self.total_kwh > 0.0 && self.total_cost > 0.0 {
            return self.total_cost / self.total_kwh;
        }
        default_rate
    }
}
