//! Interactive chat command.
//!
//! Each line is sent as its own request; nothing is remembered between lines,
//! matching the HTTP endpoint.

use crate::agent::Agent;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Chat, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'medappoint doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let agent = Agent::from_settings(&settings, model.as_deref())?;

    println!("\n{}", style("MedAppoint Chat").bold().cyan());
    println!("{}\n", style("Type your message, or 'exit' to quit.").dim());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        match agent.run(input).await {
            Ok(response) => {
                for call in &response.tool_calls {
                    Output::tool_call(&call.name, &call.arguments);
                }
                println!("\n{} {}\n", style("MedAppoint:").cyan().bold(), response.content);
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
