//! Cross-crate workflow tests library.
//!
//! Wires the scheduling and billing cores together the way a service layer
//! would, so tests can walk the full booking → invoice → payment → refund
//! chain and race concurrent admissions against one shared calendar.

use std::str::FromStr;
use std::sync::Once;

use anyhow::Result;
use async_trait::async_trait;
use billing_core::{
    BillingConfig, CardDetails, GatewayCharge, InvoiceEngine, LineItem, Payment, PaymentGateway,
    PaymentLedger,
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use scheduling_core::{BookingService, MemoryBookingStore, SchedulingConfig, TimeSlot};

static TRACING: Once = Once::new();

/// Install a fmt subscriber once per test binary; respects `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Gateway that behaves like a well-functioning provider: synchronous
/// methods settle in the call, asynchronous ones are accepted and wait for
/// their webhook.
pub struct EchoGateway;

#[async_trait]
impl PaymentGateway for EchoGateway {
    async fn charge(
        &self,
        payment: &Payment,
        _card: Option<&CardDetails>,
    ) -> Result<GatewayCharge> {
        if payment.method.is_synchronous() {
            Ok(GatewayCharge::Settled)
        } else {
            Ok(GatewayCharge::Accepted)
        }
    }
}

/// Both cores wired over in-memory collaborators.
pub struct WorkflowContext {
    pub bookings: BookingService<MemoryBookingStore>,
    pub invoices: InvoiceEngine,
    pub ledger: PaymentLedger<EchoGateway>,
}

impl WorkflowContext {
    pub fn new() -> Self {
        init_tracing();
        Self {
            bookings: BookingService::new(MemoryBookingStore::new(), SchedulingConfig::default()),
            invoices: InvoiceEngine::new(BillingConfig::default()),
            ledger: PaymentLedger::new(EchoGateway, BillingConfig::default()),
        }
    }
}

impl Default for WorkflowContext {
    fn default() -> Self {
        Self::new()
    }
}

pub fn money(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal")
}

pub fn lesson_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub fn lesson_slot(hour: u32, minute: u32, duration_minutes: u32) -> TimeSlot {
    TimeSlot::new(
        lesson_date(),
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time"),
        duration_minutes,
    )
}

/// A single 90-minute lesson at 25% tax: 450.00 + 112.50 = 562.50.
pub fn lesson_line_items() -> Vec<LineItem> {
    vec![LineItem::new("Driving lesson, 90 min", 1, money("450.00"))]
}

pub fn lesson_total() -> Decimal {
    money("562.50")
}
