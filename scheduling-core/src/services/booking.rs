//! Booking state machine and slot admission.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::SchedulingConfig;
use crate::error::SchedulingError;
use crate::models::{overlaps, Booking, BookingStatus, CreateBooking, TimeSlot};
use crate::services::availability::{check_availability, list_available_slots};
use crate::services::store::BookingStore;

type AdmissionKey = (Uuid, NaiveDate);

/// Governs the booking lifecycle:
/// Requested → Confirmed → {Rescheduled, Cancelled}; Rescheduled →
/// {Rescheduled, Cancelled}; Cancelled is terminal.
///
/// Admission (the availability check plus the committing write) runs under a
/// mutex keyed by `(resource, date)`, so concurrent confirmations for
/// overlapping slots on one resource serialize and exactly one is admitted.
///
/// Every status change additionally holds a per-booking mutex, taken before
/// the admission lock. The status is read and checked only under that lock,
/// so a cancel racing a confirm serializes with it and a booking that
/// reached the terminal Cancelled state can never be revived by an
/// in-flight admission.
pub struct BookingService<S> {
    store: S,
    config: SchedulingConfig,
    admission_locks: DashMap<AdmissionKey, Arc<Mutex<()>>>,
    booking_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl<S: BookingStore> BookingService<S> {
    pub fn new(store: S, config: SchedulingConfig) -> Self {
        Self {
            store,
            config,
            admission_locks: DashMap::new(),
            booking_locks: DashMap::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SchedulingConfig {
        &self.config
    }

    /// Create a booking in the initial Requested state. The slot is only
    /// validated for well-formedness here; admission happens on confirm.
    #[instrument(skip(self))]
    pub async fn request(&self, input: CreateBooking) -> Result<Booking, SchedulingError> {
        input.slot.validate()?;

        let booking = Booking {
            booking_id: Uuid::new_v4(),
            user_id: input.user_id,
            resource_id: input.resource_id,
            slot: input.slot,
            status: BookingStatus::Requested,
            created_utc: Utc::now(),
        };
        self.store.save(&booking).await?;

        info!(booking_id = %booking.booking_id, "Booking requested");
        Ok(booking)
    }

    #[instrument(skip(self))]
    pub async fn confirm(&self, booking_id: Uuid) -> Result<Booking, SchedulingError> {
        self.admit(booking_id, None, BookingStatus::Confirmed).await
    }

    /// Re-run the full admission against `new_slot`; on success the slot is
    /// replaced and the booking moves to Rescheduled.
    #[instrument(skip(self))]
    pub async fn reschedule(
        &self,
        booking_id: Uuid,
        new_slot: TimeSlot,
    ) -> Result<Booking, SchedulingError> {
        self.admit(booking_id, Some(new_slot), BookingStatus::Rescheduled)
            .await
    }

    /// Legal from any non-terminal state. Cancelling twice fails with
    /// [`SchedulingError::AlreadyCancelled`] so callers can detect duplicate
    /// cancel requests.
    #[instrument(skip(self))]
    pub async fn cancel(&self, booking_id: Uuid) -> Result<Booking, SchedulingError> {
        let state_lock = self.booking_lock(booking_id);
        let _state_guard = state_lock.lock().await;

        let mut booking = self.load(booking_id).await?;
        if booking.status.is_terminal() {
            return Err(SchedulingError::AlreadyCancelled { booking_id });
        }

        booking.status = BookingStatus::Cancelled;
        self.store.save(&booking).await?;

        info!(booking_id = %booking.booking_id, "Booking cancelled");
        Ok(booking)
    }

    /// Free slots of `duration_minutes` for a resource on `date`, at the
    /// configured granularity, ordered by ascending start time.
    #[instrument(skip(self))]
    pub async fn available_slots(
        &self,
        resource_id: Uuid,
        date: NaiveDate,
        duration_minutes: u32,
    ) -> Result<Vec<TimeSlot>, SchedulingError> {
        let calendar: Vec<TimeSlot> = self
            .store
            .list_for_resource(resource_id, date)
            .await?
            .into_iter()
            .filter(|b| b.status.holds_slot())
            .map(|b| b.slot)
            .collect();
        list_available_slots(
            date,
            &calendar,
            duration_minutes,
            self.config.slot_granularity_minutes,
            &self.config.business_hours,
        )
    }

    /// Check-then-commit admission, as one atomic unit. `new_slot` is
    /// `None` when the booking keeps its current slot (confirm).
    ///
    /// The booking's state lock is taken first, then the `(resource, date)`
    /// lock; both are held across the calendar read and the committing write
    /// and released on every exit path when the guards drop. The status is
    /// loaded and checked only under the state lock, so a transition
    /// committed by a concurrent caller is always observed.
    async fn admit(
        &self,
        booking_id: Uuid,
        new_slot: Option<TimeSlot>,
        next: BookingStatus,
    ) -> Result<Booking, SchedulingError> {
        let state_lock = self.booking_lock(booking_id);
        let _state_guard = state_lock.lock().await;

        let mut booking = self.load(booking_id).await?;
        if !booking.status.can_transition_to(next) {
            return Err(SchedulingError::IllegalTransition {
                from: booking.status,
                to: next,
            });
        }
        let slot = new_slot.unwrap_or(booking.slot);
        self.validate_slot(&slot)?;

        let lock = self.admission_lock(booking.resource_id, slot.date);
        let _guard = lock.lock().await;

        let calendar: Vec<TimeSlot> = self
            .store
            .list_for_resource(booking.resource_id, slot.date)
            .await?
            .into_iter()
            .filter(|b| b.booking_id != booking.booking_id && b.status.holds_slot())
            .map(|b| b.slot)
            .collect();
        let availability = check_availability(&slot, &calendar)?;
        if !availability.available {
            return Err(SchedulingError::SlotConflict {
                conflicts: availability.conflicts,
            });
        }

        // The rule against a user overlapping their own bookings holds across
        // all resources and is reported as a distinct error.
        let mut own_conflicts = Vec::new();
        for other in self.store.list_for_user(booking.user_id).await? {
            if other.booking_id == booking.booking_id || !other.status.holds_slot() {
                continue;
            }
            if overlaps(&slot, &other.slot)? {
                own_conflicts.push(other.slot);
            }
        }
        if !own_conflicts.is_empty() {
            return Err(SchedulingError::UserDoubleBooked {
                conflicts: own_conflicts,
            });
        }

        booking.slot = slot;
        booking.status = next;
        self.store.save(&booking).await?;

        info!(
            booking_id = %booking.booking_id,
            status = booking.status.as_str(),
            "Booking admitted"
        );
        Ok(booking)
    }

    fn validate_slot(&self, slot: &TimeSlot) -> Result<(), SchedulingError> {
        slot.validate()?;

        if slot.duration_minutes < self.config.min_duration_minutes
            || slot.duration_minutes > self.config.max_duration_minutes
        {
            return Err(SchedulingError::DurationOutOfRange {
                duration_minutes: slot.duration_minutes,
                min_minutes: self.config.min_duration_minutes,
                max_minutes: self.config.max_duration_minutes,
            });
        }
        if !self.config.business_hours.contains_slot(slot) {
            return Err(SchedulingError::OutsideBusinessHours {
                open: self.config.business_hours.open,
                close: self.config.business_hours.close,
            });
        }
        Ok(())
    }

    fn admission_lock(&self, resource_id: Uuid, date: NaiveDate) -> Arc<Mutex<()>> {
        self.admission_locks
            .entry((resource_id, date))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn booking_lock(&self, booking_id: Uuid) -> Arc<Mutex<()>> {
        self.booking_locks
            .entry(booking_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    async fn load(&self, booking_id: Uuid) -> Result<Booking, SchedulingError> {
        self.store
            .get(booking_id)
            .await?
            .ok_or(SchedulingError::BookingNotFound { booking_id })
    }
}
