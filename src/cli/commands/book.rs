//! Book command: run the booking tool directly.

use crate::appointments::Booking;
use crate::cli::Output;

/// Run the book command.
pub fn run_book(speciality: &str, day: &str, time: &str, patient_name: &str) -> anyhow::Result<()> {
    let booking = Booking::new(speciality, day, time, patient_name);
    Output::success(&booking.confirm());
    Output::info("Bookings are not stored.");
    Ok(())
}
