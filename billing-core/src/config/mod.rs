use std::env;

use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct BillingConfig {
    /// Days between an invoice's issue date and its due date.
    pub payment_terms_days: u32,
    /// How long a swish payment may sit Pending before
    /// `PaymentLedger::pending_expired` reports it as stale. `None` means
    /// pending payments wait indefinitely.
    pub swish_pending_ttl_minutes: Option<u32>,
}

impl BillingConfig {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let payment_terms_days = env::var("BILLING_PAYMENT_TERMS_DAYS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()?;
        let swish_pending_ttl_minutes = match env::var("BILLING_SWISH_PENDING_TTL_MINUTES") {
            Ok(value) => Some(value.parse()?),
            Err(_) => None,
        };

        Ok(Self {
            payment_terms_days,
            swish_pending_ttl_minutes,
        })
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            payment_terms_days: 30,
            swish_pending_ttl_minutes: None,
        }
    }
}
