pub mod gateway;
pub mod invoicing;
pub mod ledger;

pub use gateway::{GatewayCharge, PaymentGateway, WebhookEvent, WebhookEventType};
pub use invoicing::InvoiceEngine;
pub use ledger::PaymentLedger;
