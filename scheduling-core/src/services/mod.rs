pub mod availability;
pub mod booking;
pub mod store;

pub use availability::{check_availability, list_available_slots, Availability};
pub use booking::BookingService;
pub use store::{BookingStore, MemoryBookingStore};
