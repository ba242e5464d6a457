//! Slots command: run the slot lookup tool directly.

use crate::appointments::{get_available_slots, SlotLookup};
use crate::cli::Output;
use chrono::Local;

/// Run the slots command.
pub fn run_slots(speciality: &str, day: &str) -> anyhow::Result<()> {
    let lookup = get_available_slots(speciality, day, Local::now().date_naive());

    match &lookup {
        SlotLookup::Available(slots) => {
            Output::header(&format!("{} on {}", speciality, day));
            for slot in slots {
                Output::list_item(slot);
            }
        }
        SlotLookup::NoSlots { .. } => {
            for line in lookup.lines() {
                Output::warning(&line);
            }
        }
        SlotLookup::Rejected(err) => {
            Output::error(&err.to_string());
        }
    }

    Ok(())
}
