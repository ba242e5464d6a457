//! Pre-flight checks before operations that need the model.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail on the first request.

use crate::config::Settings;
use crate::error::{MedAppointError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving the chat API requires an API key and a valid CORS origin.
    Serve,
    /// Talking to the agent requires an API key.
    Chat,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Serve => {
            check_api_key()?;
            check_origin(settings)?;
        }
        Operation::Chat => {
            check_api_key()?;
        }
    }
    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(MedAppointError::Config(
            "OPENAI_API_KEY is empty. Set it in .env or with: export OPENAI_API_KEY='sk-...'"
                .to_string(),
        )),
        Err(_) => Err(MedAppointError::Config(
            "OPENAI_API_KEY not set. Set it in .env or with: export OPENAI_API_KEY='sk-...'"
                .to_string(),
        )),
    }
}

/// Check that the CORS origin is a usable header value.
fn check_origin(settings: &Settings) -> Result<()> {
    let origin = &settings.server.allowed_origin;
    if origin.starts_with("http://") || origin.starts_with("https://") {
        Ok(())
    } else {
        Err(MedAppointError::Config(format!(
            "server.allowed_origin must start with http:// or https://, got '{}'",
            origin
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_origin() {
        let mut settings = Settings::default();
        assert!(check_origin(&settings).is_ok());

        settings.server.allowed_origin = "localhost:3000".to_string();
        assert!(check_origin(&settings).is_err());
    }
}
