//! Financial-state core for driving-school billing.
//!
//! Turns a confirmed booking into an invoice with computed totals, and
//! records payments and refunds against that invoice while keeping the
//! invoice status consistent: completing a payment is the single point that
//! drives an invoice to Paid, and a full refund the single point that drives
//! it to Refunded.
//!
//! Settlement itself is delegated to a [`PaymentGateway`] collaborator;
//! asynchronous methods (swish, pay-by-invoice) are advanced later by a
//! webhook event the ledger consumes.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::BillingConfig;
pub use error::BillingError;
pub use models::{
    due_date, CardDetails, Invoice, InvoiceStatus, LineItem, Payment, PaymentMethod,
    PaymentStatus, Refund,
};
pub use services::{
    GatewayCharge, InvoiceEngine, PaymentGateway, PaymentLedger, WebhookEvent, WebhookEventType,
};
