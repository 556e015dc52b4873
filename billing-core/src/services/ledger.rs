//! Payment and refund recording against invoices.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::models::{
    CardDetails, Invoice, InvoiceStatus, Payment, PaymentMethod, PaymentStatus, Refund,
};
use crate::services::gateway::{GatewayCharge, PaymentGateway, WebhookEvent, WebhookEventType};

/// Records payment attempts and refunds, and is the single place where
/// payment state and invoice state are kept consistent: completing a payment
/// drives the invoice to Paid, a full refund drives it to Refunded.
///
/// Mutations for one invoice are serialized by the `&mut Invoice` in every
/// signature; the ledger's own maps are concurrency-safe.
pub struct PaymentLedger<G> {
    gateway: G,
    config: BillingConfig,
    payments: DashMap<Uuid, Payment>,
    refunds: DashMap<Uuid, Vec<Refund>>,
}

impl<G: PaymentGateway> PaymentLedger<G> {
    pub fn new(gateway: G, config: BillingConfig) -> Self {
        Self {
            gateway,
            config,
            payments: DashMap::new(),
            refunds: DashMap::new(),
        }
    }

    pub fn payment(&self, payment_id: Uuid) -> Option<Payment> {
        self.payments.get(&payment_id).map(|p| p.clone())
    }

    /// All recorded attempts against an invoice, oldest first.
    pub fn payments_for_invoice(&self, invoice_id: Uuid) -> Vec<Payment> {
        let mut payments: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.invoice_id == invoice_id)
            .map(|p| p.clone())
            .collect();
        payments.sort_by_key(|p| p.created_utc);
        payments
    }

    /// Sum of refunds recorded against a payment.
    pub fn refunded_total(&self, payment_id: Uuid) -> Decimal {
        self.refunds
            .get(&payment_id)
            .map(|refunds| refunds.iter().map(|r| r.amount).sum())
            .unwrap_or(Decimal::ZERO)
    }

    /// Record a payment attempt against a pending invoice.
    ///
    /// The amount must equal the invoice total exactly; partial payments are
    /// not modeled. Card and bank transfer settle within this call and drive
    /// the invoice to Paid. Swish is handed to the gateway and left Pending
    /// for the webhook; pay-by-invoice never reaches the gateway at all. A
    /// gateway decline is recorded as a Failed attempt and returned, while a
    /// gateway transport error surfaces unmodified with nothing recorded.
    #[instrument(skip(self, invoice, card), fields(invoice_id = %invoice.invoice_id))]
    pub async fn record_payment(
        &self,
        invoice: &mut Invoice,
        amount: Decimal,
        method: PaymentMethod,
        card: Option<CardDetails>,
    ) -> Result<Payment, BillingError> {
        if invoice.status != InvoiceStatus::Pending {
            return Err(BillingError::InvoiceNotPending {
                invoice_id: invoice.invoice_id,
                status: invoice.status,
            });
        }
        if self.completed_payment_for(invoice.invoice_id).is_some() {
            return Err(BillingError::AlreadyPaid {
                invoice_id: invoice.invoice_id,
            });
        }
        let expected = invoice.total();
        if amount != expected {
            return Err(BillingError::AmountMismatch {
                expected,
                received: amount,
            });
        }
        if method == PaymentMethod::Card {
            self.validate_card(card.as_ref())?;
        }

        let mut payment = Payment {
            payment_id: Uuid::new_v4(),
            invoice_id: invoice.invoice_id,
            amount,
            method,
            status: if method.is_synchronous() {
                PaymentStatus::Processing
            } else {
                PaymentStatus::Pending
            },
            created_utc: Utc::now(),
        };

        if method != PaymentMethod::Invoice {
            match self.gateway.charge(&payment, card.as_ref()).await? {
                GatewayCharge::Settled => {
                    payment.status = PaymentStatus::Completed;
                    invoice.set_status(InvoiceStatus::Paid)?;
                }
                GatewayCharge::Accepted => {
                    payment.status = PaymentStatus::Pending;
                }
                GatewayCharge::Declined(reason) => {
                    warn!(payment_id = %payment.payment_id, %reason, "Gateway declined payment");
                    payment.status = PaymentStatus::Failed;
                }
            }
        }

        self.payments.insert(payment.payment_id, payment.clone());
        info!(
            payment_id = %payment.payment_id,
            method = method.as_str(),
            status = payment.status.as_str(),
            "Payment recorded"
        );
        Ok(payment)
    }

    /// Consume a gateway webhook for an asynchronous payment.
    ///
    /// `payment.completed` advances an open payment to Completed and drives
    /// the invoice to Paid; `payment.failed` marks it Failed. Events for a
    /// payment that already settled are rejected, not re-applied.
    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.invoice_id))]
    pub fn apply_webhook(
        &self,
        event: &WebhookEvent,
        invoice: &mut Invoice,
    ) -> Result<Payment, BillingError> {
        let mut payment =
            self.payments
                .get_mut(&event.payment_id)
                .ok_or(BillingError::UnknownPayment {
                    payment_id: event.payment_id,
                })?;
        if payment.invoice_id != invoice.invoice_id {
            return Err(BillingError::PaymentInvoiceMismatch {
                payment_id: event.payment_id,
                invoice_id: invoice.invoice_id,
            });
        }
        if !payment.status.is_open() {
            return Err(BillingError::PaymentAlreadySettled {
                payment_id: payment.payment_id,
                status: payment.status,
            });
        }

        match event.event_type {
            WebhookEventType::PaymentCompleted => {
                payment.status = PaymentStatus::Completed;
                invoice.set_status(InvoiceStatus::Paid)?;
            }
            WebhookEventType::PaymentFailed => {
                payment.status = PaymentStatus::Failed;
            }
        }

        info!(
            payment_id = %payment.payment_id,
            status = payment.status.as_str(),
            "Webhook applied"
        );
        Ok(payment.clone())
    }

    /// Record a refund against a completed payment.
    ///
    /// The running refund total may never exceed the payment amount. A
    /// refund that reaches the full amount moves the payment and the invoice
    /// to Refunded.
    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.invoice_id))]
    pub fn record_refund(
        &self,
        payment_id: Uuid,
        invoice: &mut Invoice,
        amount: Decimal,
        reason: &str,
    ) -> Result<Refund, BillingError> {
        if amount <= Decimal::ZERO {
            return Err(BillingError::NonPositiveRefund { amount });
        }

        let mut payment = self
            .payments
            .get_mut(&payment_id)
            .ok_or(BillingError::UnknownPayment { payment_id })?;
        if payment.invoice_id != invoice.invoice_id {
            return Err(BillingError::PaymentInvoiceMismatch {
                payment_id,
                invoice_id: invoice.invoice_id,
            });
        }
        if payment.status != PaymentStatus::Completed {
            return Err(BillingError::PaymentNotCompleted {
                payment_id,
                status: payment.status,
            });
        }

        let already_refunded = self.refunded_total(payment_id);
        if already_refunded + amount > payment.amount {
            return Err(BillingError::RefundExceedsPayment {
                paid_amount: payment.amount,
                refund_amount: already_refunded + amount,
            });
        }

        let refund = Refund {
            refund_id: Uuid::new_v4(),
            payment_id,
            amount,
            reason: reason.to_string(),
            created_utc: Utc::now(),
        };
        self.refunds
            .entry(payment_id)
            .or_default()
            .push(refund.clone());

        if already_refunded + amount == payment.amount {
            payment.status = PaymentStatus::Refunded;
            invoice.set_status(InvoiceStatus::Refunded)?;
        }

        info!(
            refund_id = %refund.refund_id,
            payment_id = %payment_id,
            amount = %amount,
            "Refund recorded"
        );
        Ok(refund)
    }

    /// Whether an asynchronous payment has sat Pending longer than the
    /// configured TTL. The ledger never expires a payment on its own; an
    /// outer reaper decides what to do with a stale one.
    pub fn pending_expired(&self, payment: &Payment, now: DateTime<Utc>) -> bool {
        match self.config.swish_pending_ttl_minutes {
            Some(ttl_minutes) => {
                payment.status == PaymentStatus::Pending
                    && now - payment.created_utc > Duration::minutes(i64::from(ttl_minutes))
            }
            None => false,
        }
    }

    fn validate_card(&self, card: Option<&CardDetails>) -> Result<(), BillingError> {
        let details = card.ok_or(BillingError::MissingCvv)?;
        if details.cvv_token.is_none() {
            return Err(BillingError::MissingCvv);
        }
        if details.expiry < Utc::now().date_naive() {
            return Err(BillingError::ExpiredCard {
                expiry: details.expiry,
            });
        }
        Ok(())
    }

    fn completed_payment_for(&self, invoice_id: Uuid) -> Option<Payment> {
        self.payments
            .iter()
            .find(|p| p.invoice_id == invoice_id && p.status == PaymentStatus::Completed)
            .map(|p| p.clone())
    }
}
