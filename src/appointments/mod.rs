//! Appointment slot lookup and booking.
//!
//! Both operations run against fixed placeholder data: slots come from a
//! hardcoded table keyed by speciality substrings, and bookings are never
//! stored. They are exposed to the agent as tools.

mod booking;
mod slots;

pub use booking::Booking;
pub use slots::{get_available_slots, parse_day, SlotError, SlotLookup, DATE_FORMAT, SLOT_TABLE};
