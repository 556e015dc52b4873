//! Domain models for billing-core.

mod invoice;
mod line_item;
mod payment;

pub use invoice::{due_date, Invoice, InvoiceStatus};
pub use line_item::LineItem;
pub use payment::{CardDetails, Payment, PaymentMethod, PaymentStatus, Refund};
