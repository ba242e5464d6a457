//! Prompt templates for MedAppoint.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for the appointment agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are the MedAppoint.io assistant. You help patients find and book medical appointments.

Today's date is {{today}}.

You have two tools:
- 'get_available_slots' lists open slots for a speciality on a day
- 'book_appointment' books a slot for a patient

Guidelines:
- Dates must be passed to tools in DD-MM-YYYY format; convert what the patient says
- Only future dates can be booked
- Check available slots before booking, and only book a slot that was offered
- Ask for the patient's full name before booking
- If a tool returns an error, explain it plainly and ask the patient how to proceed
- Keep replies short and friendly"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_has_today_placeholder() {
        let prompts = Prompts::default();
        assert!(prompts.agent.system.contains("{{today}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, today is {{today}}.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("today".to_string(), "15-03-2026".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, today is 15-03-2026.");
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("clinic".to_string(), "Northside".to_string());
        custom.insert("today".to_string(), "stale".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("today".to_string(), "15-03-2026".to_string());

        let result = prompts.render_with_custom("{{clinic}} on {{today}}", &vars);
        assert_eq!(result, "Northside on 15-03-2026");
    }

    #[test]
    fn test_load_custom_agent_prompt() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("agent.toml"), "system = \"Custom prompt\"\n").unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.agent.system, "Custom prompt");
    }
}
