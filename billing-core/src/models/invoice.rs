//! Invoice model with computed totals.

use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::line_item::LineItem;
use crate::error::BillingError;

/// Invoice status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Cancelled,
    Refunded,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
            InvoiceStatus::Refunded => "refunded",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "paid" => InvoiceStatus::Paid,
            "cancelled" => InvoiceStatus::Cancelled,
            "refunded" => InvoiceStatus::Refunded,
            _ => InvoiceStatus::Pending,
        }
    }

    /// Status only advances along these edges; the explicit refund path is
    /// the one way back out of Paid.
    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        matches!(
            (self, next),
            (InvoiceStatus::Pending, InvoiceStatus::Paid)
                | (InvoiceStatus::Pending, InvoiceStatus::Cancelled)
                | (InvoiceStatus::Paid, InvoiceStatus::Refunded)
        )
    }
}

/// An invoice for exactly one booking.
///
/// Totals are always derived from the line items, never stored, so stored
/// state cannot drift from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub line_items: Vec<LineItem>,
    /// Tax rate in `[0, 1]`.
    pub tax_rate: Decimal,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub created_utc: DateTime<Utc>,
}

fn round_money(value: Decimal) -> Decimal {
    // round-half-up to öre
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl Invoice {
    pub fn subtotal(&self) -> Decimal {
        round_money(self.line_items.iter().map(|item| item.amount()).sum())
    }

    pub fn tax(&self) -> Decimal {
        round_money(self.subtotal() * self.tax_rate)
    }

    pub fn total(&self) -> Decimal {
        round_money(self.subtotal() + self.tax())
    }

    pub fn set_status(&mut self, next: InvoiceStatus) -> Result<(), BillingError> {
        if !self.status.can_transition_to(next) {
            return Err(BillingError::IllegalStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}

/// Due-date arithmetic, pure: `issue_date + payment_terms_days`.
pub fn due_date(issue_date: NaiveDate, payment_terms_days: u32) -> NaiveDate {
    issue_date + Days::new(u64::from(payment_terms_days))
}
