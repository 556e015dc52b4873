//! Scheduling-conflict core for a driving-school booking calendar.
//!
//! Decides whether a proposed lesson slot is free, governs the booking
//! lifecycle (Requested → Confirmed → Rescheduled/Cancelled), and makes the
//! availability-check-then-commit admission atomic per `(resource, date)` so
//! concurrent confirmations for overlapping slots admit exactly one booking.
//!
//! Persistence is delegated to a [`BookingStore`] collaborator; this crate
//! performs no I/O of its own.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::{BusinessHours, SchedulingConfig};
pub use error::SchedulingError;
pub use models::{overlaps, Booking, BookingStatus, CreateBooking, TimeSlot};
pub use services::{
    check_availability, list_available_slots, Availability, BookingService, BookingStore,
    MemoryBookingStore,
};
