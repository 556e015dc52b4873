//! Invoice creation and status lifecycle.

use chrono::{NaiveDate, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use scheduling_core::Booking;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::BillingConfig;
use crate::error::BillingError;
use crate::models::{due_date, Invoice, InvoiceStatus, LineItem};

/// Creates invoices for confirmed bookings and enforces the status
/// lifecycle: Pending → Paid, Pending → Cancelled, Paid → Refunded.
///
/// A booking holds at most one active (non-cancelled) invoice at a time;
/// cancelling an invoice frees the booking for re-invoicing.
pub struct InvoiceEngine {
    config: BillingConfig,
    // booking_id -> active invoice_id
    active: DashMap<Uuid, Uuid>,
}

impl InvoiceEngine {
    pub fn new(config: BillingConfig) -> Self {
        Self {
            config,
            active: DashMap::new(),
        }
    }

    #[instrument(skip(self, booking, line_items), fields(booking_id = %booking.booking_id))]
    pub fn create(
        &self,
        booking: &Booking,
        line_items: Vec<LineItem>,
        tax_rate: Decimal,
        issue_date: NaiveDate,
    ) -> Result<Invoice, BillingError> {
        if line_items.is_empty() {
            return Err(BillingError::EmptyInvoice);
        }
        if !booking.status.holds_slot() {
            return Err(BillingError::BookingNotBillable {
                booking_id: booking.booking_id,
                status: booking.status,
            });
        }

        let invoice_id = Uuid::new_v4();
        match self.active.entry(booking.booking_id) {
            Entry::Occupied(existing) => {
                return Err(BillingError::ActiveInvoiceExists {
                    booking_id: booking.booking_id,
                    invoice_id: *existing.get(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(invoice_id);
            }
        }

        let invoice = Invoice {
            invoice_id,
            booking_id: booking.booking_id,
            user_id: booking.user_id,
            line_items,
            tax_rate,
            status: InvoiceStatus::Pending,
            issue_date,
            due_date: due_date(issue_date, self.config.payment_terms_days),
            created_utc: Utc::now(),
        };

        info!(
            invoice_id = %invoice.invoice_id,
            total = %invoice.total(),
            due_date = %invoice.due_date,
            "Invoice created"
        );
        Ok(invoice)
    }

    /// Validated status transition. All illegal edges, Paid → Pending
    /// included, fail with [`BillingError::IllegalStatusTransition`].
    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.invoice_id))]
    pub fn set_status(
        &self,
        invoice: &mut Invoice,
        next: InvoiceStatus,
    ) -> Result<(), BillingError> {
        invoice.set_status(next)?;

        if next == InvoiceStatus::Cancelled {
            self.active.remove(&invoice.booking_id);
        }

        info!(status = next.as_str(), "Invoice status changed");
        Ok(())
    }
}
