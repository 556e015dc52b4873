//! Common test utilities for scheduling-core tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use scheduling_core::{
    Booking, BookingService, CreateBooking, MemoryBookingStore, SchedulingConfig, TimeSlot,
};
use uuid::Uuid;

/// A Monday well inside the test calendar.
pub fn lesson_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

/// Slot on the standard test date.
pub fn slot(hour: u32, minute: u32, duration_minutes: u32) -> TimeSlot {
    TimeSlot::new(
        lesson_date(),
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time"),
        duration_minutes,
    )
}

/// Booking service over a fresh in-memory store with default config
/// (08:00-18:00, 30-240 minute lessons).
pub fn service() -> BookingService<MemoryBookingStore> {
    BookingService::new(MemoryBookingStore::new(), SchedulingConfig::default())
}

/// Create a Requested booking for a fresh user.
pub async fn request(
    service: &BookingService<MemoryBookingStore>,
    resource_id: Uuid,
    slot: TimeSlot,
) -> Booking {
    service
        .request(CreateBooking {
            user_id: Uuid::new_v4(),
            resource_id,
            slot,
        })
        .await
        .expect("Failed to request booking")
}

/// Create a Requested booking for a specific user.
pub async fn request_for_user(
    service: &BookingService<MemoryBookingStore>,
    user_id: Uuid,
    resource_id: Uuid,
    slot: TimeSlot,
) -> Booking {
    service
        .request(CreateBooking {
            user_id,
            resource_id,
            slot,
        })
        .await
        .expect("Failed to request booking")
}

/// Request and confirm a booking in one step.
pub async fn confirmed(
    service: &BookingService<MemoryBookingStore>,
    resource_id: Uuid,
    slot: TimeSlot,
) -> Booking {
    let booking = request(service, resource_id, slot).await;
    service
        .confirm(booking.booking_id)
        .await
        .expect("Failed to confirm booking")
}
