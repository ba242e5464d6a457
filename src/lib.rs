//! MedAppoint - appointment booking chat API
//!
//! An HTTP service whose chat endpoint hands each user message to an LLM agent.
//! The agent can look up appointment slots and book appointments through two
//! tools backed by placeholder data.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `appointments` - Slot lookup and booking
//! - `agent` - Tool-calling agent loop and the chat model seam
//! - `server` - HTTP routes
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use medappoint::agent::Agent;
//! use medappoint::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let agent = Agent::from_settings(&settings, None)?;
//!
//!     let response = agent.run("Any cardiology slots on 20-03-2030?").await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod appointments;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod server;

pub use error::{MedAppointError, Result};
