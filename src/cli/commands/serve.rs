//! Serve command: run the chat API.

use crate::agent::Agent;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::server::{router, AppState};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Run the HTTP API server.
pub async fn run_serve(host: Option<String>, port: Option<u16>, mut settings: Settings) -> Result<()> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    if let Err(e) = preflight::check(Operation::Serve, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'medappoint doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let agent = Agent::from_settings(&settings, None)?;
    let model = agent.model_name().to_string();
    let app = router(Arc::new(AppState::new(agent)), &settings)?;

    let addr = settings.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{} (model: {})", addr, model);

    Output::header("MedAppoint API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    Output::kv("Model", &model);
    Output::kv("Allowed origin", &settings.server.allowed_origin);
    println!();
    println!("Endpoints:");
    Output::kv("Welcome", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Chat", "POST /chat");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Output::info("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
