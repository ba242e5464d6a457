//! Tool definitions and implementations for the agent system.

use super::model::ToolDefinition;
use crate::appointments::{get_available_slots, Booking};
use crate::error::{MedAppointError, Result};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

pub const GET_AVAILABLE_SLOTS: &str = "get_available_slots";
pub const BOOK_APPOINTMENT: &str = "book_appointment";

/// Available tools for the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    /// List open slots for a speciality on a day.
    GetAvailableSlots { speciality: String, day: String },

    /// Book an appointment.
    BookAppointment(Booking),
}

#[derive(Deserialize)]
struct SlotArgs {
    speciality: String,
    day: String,
}

/// Tool execution context.
///
/// Holds the reference date used to reject past days. When unset, the local
/// date at execution time is used.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    today: Option<NaiveDate>,
}

impl ToolContext {
    /// Create a context that follows the local clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the reference date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Reference date for this execution.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Execute a tool call and return the text sent back to the model.
    ///
    /// Neither tool can fail; rejected requests are reported in the text.
    pub fn execute(&self, tool: &ToolCall) -> String {
        match tool {
            ToolCall::GetAvailableSlots { speciality, day } => {
                get_available_slots(speciality, day, self.today()).render()
            }
            ToolCall::BookAppointment(booking) => booking.confirm(),
        }
    }
}

/// Tool definitions advertised to the model.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_AVAILABLE_SLOTS.to_string(),
            description: "Get the available appointment slots for a medical speciality on a given day. \
                The day must be in DD-MM-YYYY format."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "speciality": {
                        "type": "string",
                        "description": "Medical speciality, e.g. Cardiology, Dermatology, Neurology"
                    },
                    "day": {
                        "type": "string",
                        "description": "Day of the appointment in DD-MM-YYYY format"
                    }
                },
                "required": ["speciality", "day"]
            }),
        },
        ToolDefinition {
            name: BOOK_APPOINTMENT.to_string(),
            description: "Book an appointment for a patient with a speciality at a given day and time. \
                Use a slot returned by get_available_slots."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "speciality": {
                        "type": "string",
                        "description": "Medical speciality"
                    },
                    "day": {
                        "type": "string",
                        "description": "Day of the appointment in DD-MM-YYYY format"
                    },
                    "time": {
                        "type": "string",
                        "description": "Slot time, e.g. 10:00 AM"
                    },
                    "patient_name": {
                        "type": "string",
                        "description": "Full name of the patient"
                    }
                },
                "required": ["speciality", "day", "time", "patient_name"]
            }),
        },
    ]
}

/// Parse a tool call from the model's name and JSON arguments.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    match name {
        GET_AVAILABLE_SLOTS => {
            let args: SlotArgs = serde_json::from_str(arguments)
                .map_err(|e| MedAppointError::ToolArguments(format!("{}: {}", name, e)))?;
            Ok(ToolCall::GetAvailableSlots {
                speciality: args.speciality,
                day: args.day,
            })
        }
        BOOK_APPOINTMENT => {
            let booking: Booking = serde_json::from_str(arguments)
                .map_err(|e| MedAppointError::ToolArguments(format!("{}: {}", name, e)))?;
            Ok(ToolCall::BookAppointment(booking))
        }
        _ => Err(MedAppointError::Agent(format!("Unknown tool: {}", name))),
    }
}
