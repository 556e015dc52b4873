//! Booking model for scheduling-core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::slot::TimeSlot;

/// Booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Requested,
    Confirmed,
    Rescheduled,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Requested => "requested",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Rescheduled => "rescheduled",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "rescheduled" => BookingStatus::Rescheduled,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Requested,
        }
    }

    /// Cancelled is the only terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled)
    }

    /// Whether a booking in this status occupies its slot on the calendar.
    /// Only these bookings count against availability.
    pub fn holds_slot(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Rescheduled)
    }

    /// Legal lifecycle edges: Requested → Confirmed, slot-holding states →
    /// Rescheduled, and any non-terminal state → Cancelled.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        match next {
            BookingStatus::Requested => false,
            BookingStatus::Confirmed => *self == BookingStatus::Requested,
            BookingStatus::Rescheduled => self.holds_slot(),
            BookingStatus::Cancelled => !self.is_terminal(),
        }
    }
}

/// A booking of a resource (instructor or vehicle) by a user.
///
/// Mutated only through the booking state machine; a cancelled booking is
/// retained as a record, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub resource_id: Uuid,
    pub slot: TimeSlot,
    pub status: BookingStatus,
    pub created_utc: DateTime<Utc>,
}

/// Input for creating a booking request.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub user_id: Uuid,
    pub resource_id: Uuid,
    pub slot: TimeSlot,
}
