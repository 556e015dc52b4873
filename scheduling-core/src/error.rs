use chrono::NaiveTime;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{BookingStatus, TimeSlot};

/// Business-rule violations raised by the scheduling core.
///
/// Every rejected operation maps to a distinct variant carrying the context
/// a caller needs to render a precise message. Collaborator failures pass
/// through as [`SchedulingError::Store`] and are never retried here, since
/// retrying a non-idempotent admission could double-book.
#[derive(Debug, Error)]
pub enum SchedulingError {
    #[error("Invalid interval: duration must be positive, got {duration_minutes} minutes")]
    InvalidInterval { duration_minutes: u32 },

    #[error("Invalid granularity: step must be positive, got {granularity_minutes} minutes")]
    InvalidGranularity { granularity_minutes: u32 },

    #[error("Slot conflicts with {} existing booking(s)", .conflicts.len())]
    SlotConflict { conflicts: Vec<TimeSlot> },

    #[error("User already holds {} overlapping booking(s)", .conflicts.len())]
    UserDoubleBooked { conflicts: Vec<TimeSlot> },

    #[error("Duration of {duration_minutes} minutes is outside the allowed {min_minutes}-{max_minutes} minute range")]
    DurationOutOfRange {
        duration_minutes: u32,
        min_minutes: u32,
        max_minutes: u32,
    },

    #[error("Slot falls outside business hours ({open}-{close})")]
    OutsideBusinessHours { open: NaiveTime, close: NaiveTime },

    #[error("Illegal booking transition: {} -> {}", .from.as_str(), .to.as_str())]
    IllegalTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Booking {booking_id} is already cancelled")]
    AlreadyCancelled { booking_id: Uuid },

    #[error("Booking {booking_id} not found")]
    BookingNotFound { booking_id: Uuid },

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}
