//! HTTP API: welcome, health and chat endpoints.

use crate::agent::Agent;
use crate::config::Settings;
use crate::error::{MedAppointError, Result};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Payload returned by `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to the MedAppoint.io API! We are running Fine";

/// Shared application state. Read-only across requests.
pub struct AppState {
    pub agent: Agent,
}

impl AppState {
    pub fn new(agent: Agent) -> Self {
        Self { agent }
    }
}

// === Request/Response Types ===

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Build the router with CORS restricted to the configured origin.
pub fn router(state: Arc<AppState>, settings: &Settings) -> Result<Router> {
    let origin: HeaderValue = settings.server.allowed_origin.parse().map_err(|_| {
        MedAppointError::Config(format!(
            "Invalid allowed_origin: {}",
            settings.server.allowed_origin
        ))
    })?;

    // Wildcards are not allowed together with credentials, so mirror instead.
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Ok(Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(cors)
        .with_state(state))
}

// === Handlers ===

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": WELCOME_MESSAGE }))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(State(state): State<Arc<AppState>>, Json(req): Json<ChatRequest>) -> impl IntoResponse {
    let request_id = Uuid::new_v4();

    if req.message.trim().is_empty() {
        warn!(%request_id, "Rejected empty chat message");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Message must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let span = info_span!("chat", %request_id);
    match state.agent.run(&req.message).instrument(span).await {
        Ok(response) => {
            info!(%request_id, iterations = response.iterations, tool_calls = response.tool_calls.len(), "Chat completed");
            Json(ChatResponse {
                response: response.content,
            })
            .into_response()
        }
        Err(e) => {
            error!(%request_id, "Chat failed: {}", e);
            let status = if e.is_upstream() {
                StatusCode::BAD_GATEWAY
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::ScriptedModel;
    use crate::agent::{Message, ToolCallRequest, ToolContext};
    use chrono::NaiveDate;

    async fn spawn_server(model: ScriptedModel) -> String {
        let tools = ToolContext::new().with_today(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        let agent = Agent::new(Arc::new(model), tools);
        let app = router(Arc::new(AppState::new(agent)), &Settings::default()).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_root_returns_welcome() {
        let base = spawn_server(ScriptedModel::new(Vec::new())).await;

        let body: serde_json::Value = reqwest::Client::new()
            .get(&base)
            .header("X-Anything", "ignored")
            .body("ignored body")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body, serde_json::json!({ "message": WELCOME_MESSAGE }));
    }

    #[tokio::test]
    async fn test_chat_runs_agent() {
        let model = ScriptedModel::new(vec![
            Message::assistant_tool_calls(vec![ToolCallRequest::new(
                "call_1",
                "get_available_slots",
                r#"{"speciality":"Cardiology","day":"20-03-2026"}"#,
            )]),
            Message::assistant("Available: 10:00 AM, 11:00 AM, 02:00 PM."),
        ]);
        let base = spawn_server(model).await;

        let response = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .json(&ChatRequest {
                message: "Cardiology slots on 20-03-2026?".to_string(),
            })
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: ChatResponse = response.json().await.unwrap();
        assert_eq!(body.response, "Available: 10:00 AM, 11:00 AM, 02:00 PM.");
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected() {
        let base = spawn_server(ScriptedModel::new(Vec::new())).await;

        for message in ["", "   "] {
            let response = reqwest::Client::new()
                .post(format!("{}/chat", base))
                .json(&serde_json::json!({ "message": message }))
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_model_failure_is_bad_gateway() {
        let base = spawn_server(ScriptedModel::new(Vec::new())).await;

        let response = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .json(&serde_json::json!({ "message": "hello" }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("script exhausted"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_client_error() {
        let base = spawn_server(ScriptedModel::new(Vec::new())).await;

        let response = reqwest::Client::new()
            .post(format!("{}/chat", base))
            .header("content-type", "application/json")
            .body(r#"{"text": "no message field"}"#)
            .send()
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin_only() {
        let base = spawn_server(ScriptedModel::new(Vec::new())).await;
        let client = reqwest::Client::new();

        let allowed = client
            .request(reqwest::Method::OPTIONS, format!("{}/chat", base))
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type")
            .send()
            .await
            .unwrap();
        let headers = allowed.headers();
        assert_eq!(headers["access-control-allow-origin"], "http://localhost:3000");
        assert_eq!(headers["access-control-allow-credentials"], "true");

        let other = client
            .get(&base)
            .header("Origin", "http://evil.example")
            .send()
            .await
            .unwrap();
        assert!(other.headers().get("access-control-allow-origin").is_none());
    }

    #[test]
    fn test_invalid_origin_is_config_error() {
        let mut settings = Settings::default();
        settings.server.allowed_origin = "bad\norigin".to_string();
        let agent = Agent::new(Arc::new(ScriptedModel::new(Vec::new())), ToolContext::new());

        match router(Arc::new(AppState::new(agent)), &settings) {
            Err(err) => assert!(matches!(err, MedAppointError::Config(_))),
            Ok(_) => panic!("Expected invalid origin to be rejected"),
        }
    }
}
