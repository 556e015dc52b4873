use chrono::NaiveDate;
use rust_decimal::Decimal;
use scheduling_core::BookingStatus;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{InvoiceStatus, PaymentStatus};

/// Business-rule violations raised by the billing core.
///
/// Each variant carries the expected-versus-received context the caller
/// needs; no invalid transition is ever coerced silently. Gateway transport
/// failures pass through as [`BillingError::Gateway`] and are never retried.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Invoice must contain at least one line item")]
    EmptyInvoice,

    #[error("Booking {booking_id} cannot be invoiced in status {}", .status.as_str())]
    BookingNotBillable {
        booking_id: Uuid,
        status: BookingStatus,
    },

    #[error("Booking {booking_id} already has active invoice {invoice_id}")]
    ActiveInvoiceExists { booking_id: Uuid, invoice_id: Uuid },

    #[error("Illegal invoice status transition: {} -> {}", .from.as_str(), .to.as_str())]
    IllegalStatusTransition {
        from: InvoiceStatus,
        to: InvoiceStatus,
    },

    #[error("Amount mismatch: expected {expected}, received {received}")]
    AmountMismatch { expected: Decimal, received: Decimal },

    #[error("Invoice {invoice_id} is not pending (status {})", .status.as_str())]
    InvoiceNotPending {
        invoice_id: Uuid,
        status: InvoiceStatus,
    },

    #[error("Invoice {invoice_id} already has a completed payment")]
    AlreadyPaid { invoice_id: Uuid },

    #[error("Card payment requires a CVV token")]
    MissingCvv,

    #[error("Card expired on {expiry}")]
    ExpiredCard { expiry: NaiveDate },

    #[error("Refund total {refund_amount} exceeds paid amount {paid_amount}")]
    RefundExceedsPayment {
        paid_amount: Decimal,
        refund_amount: Decimal,
    },

    #[error("Refund amount must be positive, got {amount}")]
    NonPositiveRefund { amount: Decimal },

    #[error("Payment {payment_id} is not completed (status {})", .status.as_str())]
    PaymentNotCompleted {
        payment_id: Uuid,
        status: PaymentStatus,
    },

    #[error("Payment {payment_id} is already settled as {}", .status.as_str())]
    PaymentAlreadySettled {
        payment_id: Uuid,
        status: PaymentStatus,
    },

    #[error("Unknown payment {payment_id}")]
    UnknownPayment { payment_id: Uuid },

    #[error("Payment {payment_id} does not belong to invoice {invoice_id}")]
    PaymentInvoiceMismatch { payment_id: Uuid, invoice_id: Uuid },

    #[error("Gateway error: {0}")]
    Gateway(#[from] anyhow::Error),
}
