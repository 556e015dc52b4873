//! Common test utilities for billing-core tests.
#![allow(dead_code)]

use std::str::FromStr;

use anyhow::anyhow;
use async_trait::async_trait;
use billing_core::{
    BillingConfig, CardDetails, GatewayCharge, Invoice, InvoiceEngine, LineItem, Payment,
    PaymentGateway, PaymentLedger,
};
use chrono::{Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use scheduling_core::{Booking, BookingStatus, TimeSlot};
use uuid::Uuid;

pub fn money(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal")
}

pub fn issue_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub fn booking_with_status(status: BookingStatus) -> Booking {
    Booking {
        booking_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        resource_id: Uuid::new_v4(),
        slot: TimeSlot::new(
            issue_date(),
            NaiveTime::from_hms_opt(10, 0, 0).expect("valid time"),
            60,
        ),
        status,
        created_utc: Utc::now(),
    }
}

pub fn confirmed_booking() -> Booking {
    booking_with_status(BookingStatus::Confirmed)
}

/// The standard fixture: 2×100.00 + 1×50.00 + 3×25.00 at 25% tax,
/// totalling 406.25.
pub fn line_items() -> Vec<LineItem> {
    vec![
        LineItem::new("Driving lesson", 2, money("100.0")),
        LineItem::new("Theory material", 1, money("50.0")),
        LineItem::new("Practice session", 3, money("25.0")),
    ]
}

pub fn engine() -> InvoiceEngine {
    InvoiceEngine::new(BillingConfig::default())
}

pub fn pending_invoice() -> Invoice {
    engine()
        .create(&confirmed_booking(), line_items(), money("0.25"), issue_date())
        .expect("Failed to create invoice")
}

/// Card details that pass the CVV and expiry checks.
pub fn valid_card() -> CardDetails {
    CardDetails {
        cvv_token: Some("tok_4242".to_string()),
        expiry: Utc::now().date_naive() + Days::new(365),
    }
}

/// Gateway stub scripted to return a fixed outcome.
pub struct StubGateway {
    pub outcome: GatewayCharge,
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn charge(
        &self,
        _payment: &Payment,
        _card: Option<&CardDetails>,
    ) -> anyhow::Result<GatewayCharge> {
        Ok(self.outcome.clone())
    }
}

/// Gateway stub that always fails at the transport level.
pub struct FailingGateway;

#[async_trait]
impl PaymentGateway for FailingGateway {
    async fn charge(
        &self,
        _payment: &Payment,
        _card: Option<&CardDetails>,
    ) -> anyhow::Result<GatewayCharge> {
        Err(anyhow!("gateway timeout"))
    }
}

pub fn ledger(outcome: GatewayCharge) -> PaymentLedger<StubGateway> {
    PaymentLedger::new(StubGateway { outcome }, BillingConfig::default())
}

pub fn settling_ledger() -> PaymentLedger<StubGateway> {
    ledger(GatewayCharge::Settled)
}
