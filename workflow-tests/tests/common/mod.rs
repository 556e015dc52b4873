//! Common utilities for workflow tests.
#![allow(dead_code)]

use scheduling_core::{Booking, CreateBooking};
use uuid::Uuid;
use workflow_tests::{lesson_slot, WorkflowContext};

/// Fresh context per test; also installs the tracing subscriber.
pub fn setup() -> WorkflowContext {
    WorkflowContext::new()
}

/// Request and confirm a 90-minute lesson at 10:00 for a fresh user.
pub async fn confirmed_lesson(ctx: &WorkflowContext, resource_id: Uuid) -> Booking {
    let booking = ctx
        .bookings
        .request(CreateBooking {
            user_id: Uuid::new_v4(),
            resource_id,
            slot: lesson_slot(10, 0, 90),
        })
        .await
        .expect("Failed to request booking");
    ctx.bookings
        .confirm(booking.booking_id)
        .await
        .expect("Failed to confirm booking")
}
