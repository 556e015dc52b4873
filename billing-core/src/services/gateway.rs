//! Payment gateway collaborator seam.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CardDetails, Payment};

/// Outcome of a charge attempt as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCharge {
    /// Funds captured within the call (card, bank transfer).
    Settled,
    /// Accepted for asynchronous settlement; a webhook event follows.
    Accepted,
    /// Rejected by the gateway with a human-readable reason.
    Declined(String),
}

/// External settlement collaborator.
///
/// Transport failures (timeouts, 5xx) surface to the caller unmodified; the
/// ledger never retries a charge.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(
        &self,
        payment: &Payment,
        card: Option<&CardDetails>,
    ) -> Result<GatewayCharge>;
}

/// Webhook event type delivered by the gateway for asynchronous methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEventType {
    #[serde(rename = "payment.completed")]
    PaymentCompleted,
    #[serde(rename = "payment.failed")]
    PaymentFailed,
}

/// Webhook event consumed by [`PaymentLedger::apply_webhook`].
///
/// Signature verification happens upstream; by the time an event reaches the
/// ledger it is trusted.
///
/// [`PaymentLedger::apply_webhook`]: crate::services::ledger::PaymentLedger::apply_webhook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    pub payment_id: Uuid,
}
