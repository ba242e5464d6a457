//! Available slot lookup.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

/// Day format accepted by the slot lookup (DD-MM-YYYY).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Speciality keys and their slots. Checked in order; the first key contained
/// in the requested speciality wins.
pub const SLOT_TABLE: &[(&str, &[&str])] = &[
    ("Cardiology", &["10:00 AM", "11:00 AM", "02:00 PM"]),
    ("Dermatology", &["09:00 AM", "01:00 PM", "03:30 PM"]),
    ("Neurology", &["09:30 AM", "12:00 PM", "04:00 PM"]),
];

/// Reasons a slot lookup is rejected.
///
/// The messages are sent to the model verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Error: Date format should be DD-MM-YYYY.")]
    InvalidDateFormat,

    #[error("Error: I can book only future date appointments.")]
    PastDate,
}

/// Outcome of a slot lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotLookup {
    /// Slots offered for the matched speciality.
    Available(Vec<String>),
    /// The speciality matched nothing in the table.
    NoSlots { speciality: String, day: String },
    /// The request was rejected.
    Rejected(SlotError),
}

impl SlotLookup {
    /// Lines shown to the model, one per slot or a single message.
    pub fn lines(&self) -> Vec<String> {
        match self {
            SlotLookup::Available(slots) => slots.clone(),
            SlotLookup::NoSlots { speciality, day } => {
                vec![format!("No slots available for {} on {}.", speciality, day)]
            }
            SlotLookup::Rejected(err) => vec![err.to_string()],
        }
    }

    /// Render as a JSON array of strings.
    pub fn render(&self) -> String {
        serde_json::Value::from(self.lines()).to_string()
    }

    /// Whether any slot was offered.
    pub fn has_slots(&self) -> bool {
        matches!(self, SlotLookup::Available(slots) if !slots.is_empty())
    }
}

/// Shape of a day string: 1-2 digit day and month, 4 digit year.
fn day_shape() -> &'static Regex {
    static DAY_SHAPE: OnceLock<Regex> = OnceLock::new();
    DAY_SHAPE.get_or_init(|| {
        Regex::new(r"^[0-9]{1,2}-[0-9]{1,2}-[0-9]{4}$").expect("Invalid day regex")
    })
}

/// Parse a day in DD-MM-YYYY format.
///
/// chrono alone accepts signs, padding whitespace and short years, so the
/// shape is checked first.
pub fn parse_day(day: &str) -> Result<NaiveDate, SlotError> {
    if !day_shape().is_match(day) {
        return Err(SlotError::InvalidDateFormat);
    }
    NaiveDate::parse_from_str(day, DATE_FORMAT).map_err(|_| SlotError::InvalidDateFormat)
}

/// Look up available slots for a speciality on a given day.
///
/// `today` is the reference date for rejecting past days; today itself is
/// bookable.
pub fn get_available_slots(speciality: &str, day: &str, today: NaiveDate) -> SlotLookup {
    info!("Fetching available slots for speciality: {} on day: {}", speciality, day);

    let requested = match parse_day(day) {
        Ok(date) => date,
        Err(e) => return SlotLookup::Rejected(e),
    };

    if requested < today {
        return SlotLookup::Rejected(SlotError::PastDate);
    }

    SLOT_TABLE
        .iter()
        .find(|(key, _)| speciality.contains(key))
        .map(|(_, slots)| SlotLookup::Available(slots.iter().map(|s| s.to_string()).collect()))
        .unwrap_or_else(|| SlotLookup::NoSlots {
            speciality: speciality.to_string(),
            day: day.to_string(),
        })
}
