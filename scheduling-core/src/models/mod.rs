//! Domain models for scheduling-core.

mod booking;
mod slot;

pub use booking::{Booking, BookingStatus, CreateBooking};
pub use slot::{overlaps, TimeSlot};
