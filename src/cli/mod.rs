//! CLI module for MedAppoint.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// MedAppoint - appointment booking assistant
///
/// Serves a chat API where an LLM agent looks up slots and books appointments,
/// and exposes the same agent and tools from the command line.
#[derive(Parser, Debug)]
#[command(name = "medappoint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP chat API
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Send a single message to the agent
    Ask {
        /// The message to send
        message: String,

        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Start an interactive chat session (each message is handled independently)
    Chat {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List available slots for a speciality on a day
    Slots {
        /// Medical speciality (e.g. Cardiology)
        speciality: String,

        /// Day in DD-MM-YYYY format
        day: String,
    },

    /// Book an appointment
    Book {
        /// Medical speciality
        speciality: String,

        /// Day in DD-MM-YYYY format
        day: String,

        /// Slot time (e.g. "10:00 AM")
        time: String,

        /// Patient name
        patient_name: String,
    },

    /// Check configuration and environment
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
