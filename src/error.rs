//! Error types for MedAppoint.

use thiserror::Error;

/// Library-level error type for MedAppoint operations.
#[derive(Error, Debug)]
pub enum MedAppointError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid tool arguments: {0}")]
    ToolArguments(String),

    #[error("Agent error: {0}")]
    Agent(String),
}

impl MedAppointError {
    /// Whether the failure came from the model provider rather than from us.
    pub fn is_upstream(&self) -> bool {
        matches!(self, MedAppointError::OpenAI(_) | MedAppointError::Http(_))
    }
}

/// Result type alias for MedAppoint operations.
pub type Result<T> = std::result::Result<T, MedAppointError>;
