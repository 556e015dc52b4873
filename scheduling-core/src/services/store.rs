//! Persistence/query collaborator for bookings.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::Booking;

/// Query and persistence seam for bookings.
///
/// Failures are surfaced to the caller unmodified as `anyhow::Error`; the
/// core never retries them.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn get(&self, booking_id: Uuid) -> Result<Option<Booking>>;

    /// All bookings held by `resource_id` on `date`, regardless of status.
    async fn list_for_resource(&self, resource_id: Uuid, date: NaiveDate) -> Result<Vec<Booking>>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>>;

    /// Insert or replace a booking record.
    async fn save(&self, booking: &Booking) -> Result<()>;
}

/// In-memory store backing tests and local tooling.
#[derive(Clone, Default)]
pub struct MemoryBookingStore {
    bookings: Arc<DashMap<Uuid, Booking>>,
}

impl MemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn get(&self, booking_id: Uuid) -> Result<Option<Booking>> {
        Ok(self.bookings.get(&booking_id).map(|b| b.clone()))
    }

    async fn list_for_resource(&self, resource_id: Uuid, date: NaiveDate) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.resource_id == resource_id && b.slot.date == date)
            .map(|b| b.clone())
            .collect();
        bookings.sort_by_key(|b| b.slot.start());
        Ok(bookings)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| b.clone())
            .collect();
        bookings.sort_by_key(|b| b.slot.start());
        Ok(bookings)
    }

    async fn save(&self, booking: &Booking) -> Result<()> {
        self.bookings.insert(booking.booking_id, booking.clone());
        Ok(())
    }
}
