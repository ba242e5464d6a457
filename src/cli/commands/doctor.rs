//! Doctor command - verify environment and configuration.

use crate::cli::Output;
use crate::config::{Prompts, Settings};
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(config_path: &Path, settings: &Settings) -> anyhow::Result<()> {
    Output::header("MedAppoint Doctor");
    println!();
    println!("Checking environment and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let api_check = check_openai_api_key(std::env::var("OPENAI_API_KEY").ok().as_deref());
    api_check.print();
    checks.push(api_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_checks = vec![
        check_config_file(config_path),
        check_allowed_origin(&settings.server.allowed_origin),
        check_max_iterations(settings.agent.max_iterations),
        check_prompts(settings),
    ];
    for check in &config_checks {
        check.print();
    }
    checks.extend(config_checks);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before starting MedAppoint.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! MedAppoint is ready to use.");
    }

    Ok(())
}

/// Check if OpenAI API key is configured.
fn check_openai_api_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(key) if key.starts_with("sk-") && key.len() > 20 => {
            let head: String = key.chars().take(7).collect();
            let tail: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            let masked = format!("{}...{}", head, tail);
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", masked))
        }
        Some("") => CheckResult::error(
            "OPENAI_API_KEY",
            "empty",
            "Set it in .env or with: export OPENAI_API_KEY='sk-...'",
        ),
        Some(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        None => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set it in .env or with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: medappoint config edit",
        )
    }
}

fn check_allowed_origin(origin: &str) -> CheckResult {
    if origin.parse::<axum::http::HeaderValue>().is_err() {
        return CheckResult::error(
            "CORS origin",
            &format!("'{}' is not a valid header value", origin),
            "Set server.allowed_origin to e.g. http://localhost:3000",
        );
    }
    if origin.starts_with("http://") || origin.starts_with("https://") {
        CheckResult::ok("CORS origin", origin)
    } else {
        CheckResult::warning(
            "CORS origin",
            &format!("'{}' has no scheme", origin),
            "Browsers send origins as scheme://host[:port]",
        )
    }
}

fn check_max_iterations(max: usize) -> CheckResult {
    if max == 0 {
        CheckResult::error(
            "Agent iterations",
            "max_iterations is 0, every request will fail",
            "Set agent.max_iterations to at least 2",
        )
    } else if max == 1 {
        CheckResult::warning(
            "Agent iterations",
            "max_iterations is 1, tool results can never be used",
            "Set agent.max_iterations to at least 2",
        )
    } else {
        CheckResult::ok("Agent iterations", &format!("up to {} model calls", max))
    }
}

fn check_prompts(settings: &Settings) -> CheckResult {
    match Prompts::load(
        settings.prompts.custom_dir.as_deref(),
        Some(&settings.prompts.variables),
    ) {
        Ok(_) if settings.prompts.custom_dir.is_some() => CheckResult::ok("Prompts", "custom prompts loaded"),
        Ok(_) => CheckResult::ok("Prompts", "built-in"),
        Err(e) => CheckResult::error(
            "Prompts",
            &format!("failed to load: {}", e),
            "Check agent.toml in prompts.custom_dir",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_check_result_error() {
        let result = CheckResult::error("test", "failed", "fix it");
        assert_eq!(result.status, CheckStatus::Error);
        assert_eq!(result.hint, Some("fix it".to_string()));
    }

    #[test]
    fn test_api_key_checks() {
        assert_eq!(check_openai_api_key(None).status, CheckStatus::Error);
        assert_eq!(check_openai_api_key(Some("")).status, CheckStatus::Error);
        assert_eq!(check_openai_api_key(Some("abc")).status, CheckStatus::Warning);

        let ok = check_openai_api_key(Some("sk-abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(ok.status, CheckStatus::Ok);
        assert_eq!(ok.message, "configured (sk-abcd...wxyz)");
    }

    #[test]
    fn test_api_key_mask_non_ascii() {
        let result = check_openai_api_key(Some("sk-aéééééééééééééééé"));
        assert_eq!(result.status, CheckStatus::Ok);
        assert_eq!(result.message, "configured (sk-aééé...éééé)");
    }

    #[test]
    fn test_origin_checks() {
        assert_eq!(check_allowed_origin("http://localhost:3000").status, CheckStatus::Ok);
        assert_eq!(check_allowed_origin("localhost:3000").status, CheckStatus::Warning);
        assert_eq!(check_allowed_origin("bad\norigin").status, CheckStatus::Error);
    }

    #[test]
    fn test_iteration_checks() {
        assert_eq!(check_max_iterations(0).status, CheckStatus::Error);
        assert_eq!(check_max_iterations(1).status, CheckStatus::Warning);
        assert_eq!(check_max_iterations(10).status, CheckStatus::Ok);
    }

    #[test]
    fn test_missing_custom_prompt_dir_is_fine() {
        let mut settings = Settings::default();
        settings.prompts.custom_dir = Some("/nonexistent/medappoint-prompts".to_string());
        assert_eq!(check_prompts(&settings).status, CheckStatus::Ok);
    }
}
