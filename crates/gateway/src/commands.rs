//! Browser command endpoints.
//!
//! Placeholder surface for the extension's automation commands. Commands are
//! validated and acknowledged; nothing is executed server-side.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use axum::{
    Router,
    extract::Query,
    extract::rejection::JsonRejection,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::SharedState;
use crate::error::ApiError;

/// A browser action the extension can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserCommand {
    Scroll,
    Click,
    Navigate,
    Extract,
    Fill,
    Submit,
    Screenshot,
}

impl BrowserCommand {
    pub const ALL: [BrowserCommand; 7] = [
        BrowserCommand::Scroll,
        BrowserCommand::Click,
        BrowserCommand::Navigate,
        BrowserCommand::Extract,
        BrowserCommand::Fill,
        BrowserCommand::Submit,
        BrowserCommand::Screenshot,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BrowserCommand::Scroll => "scroll",
            BrowserCommand::Click => "click",
            BrowserCommand::Navigate => "navigate",
            BrowserCommand::Extract => "extract",
            BrowserCommand::Fill => "fill",
            BrowserCommand::Submit => "submit",
            BrowserCommand::Screenshot => "screenshot",
        }
    }

    /// Acknowledgement text for this command with the given parameters.
    pub fn acknowledge(self, params: &HashMap<String, Value>) -> String {
        let param = |key: &str, default: &str| -> String {
            params
                .get(key)
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| default.to_string())
        };

        match self {
            BrowserCommand::Scroll => format!("Scrolled {}", param("direction", "down")),
            BrowserCommand::Click => format!("Clicked element: {}", param("selector", "unknown")),
            BrowserCommand::Navigate => format!("Navigated to: {}", param("url", "unknown")),
            BrowserCommand::Extract => format!("Extracted {} from page", param("type", "text")),
            BrowserCommand::Fill => format!("Filled field '{}' with value", param("field", "unknown")),
            BrowserCommand::Submit => format!("Submitted form: {}", param("form", "unknown")),
            BrowserCommand::Screenshot => "Screenshot captured successfully".into(),
        }
    }

    pub fn supported() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl fmt::Display for BrowserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrowserCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Invalid command: {s}"))
    }
}

pub fn commands_router() -> Router<SharedState> {
    Router::new()
        .route("/commands", get(list_commands_handler))
        .route("/run", post(run_command_handler))
        .route("/validate", post(validate_command_handler))
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub params: Option<HashMap<String, Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub result: String,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandListResponse {
    pub commands: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ValidateParams {
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub command: String,
    pub valid: bool,
    pub message: String,
}

async fn list_commands_handler() -> Json<CommandListResponse> {
    let commands: Vec<String> = BrowserCommand::supported()
        .into_iter()
        .map(String::from)
        .collect();
    Json(CommandListResponse {
        count: commands.len(),
        commands,
    })
}

async fn run_command_handler(
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let Json(request) = payload?;
    if request.command.is_empty() {
        return Err(ApiError::bad_request("command must not be empty"));
    }
    info!(command = %request.command, "Command execution request");

    let response = match request.command.parse::<BrowserCommand>() {
        Ok(command) => CommandResponse {
            result: command.acknowledge(&request.params.unwrap_or_default()),
            success: true,
            error: None,
        },
        Err(result) => {
            warn!(command = %request.command, "Invalid command");
            CommandResponse {
                result,
                success: false,
                error: Some(format!(
                    "Supported commands: {}",
                    BrowserCommand::supported().join(", ")
                )),
            }
        }
    };

    Ok(Json(response))
}

async fn validate_command_handler(Query(params): Query<ValidateParams>) -> Json<ValidateResponse> {
    let valid = params.command.parse::<BrowserCommand>().is_ok();
    Json(ValidateResponse {
        command: params.command,
        valid,
        message: if valid {
            "Command is supported".into()
        } else {
            "Command is not supported".into()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::app_without_key;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[test]
    fn parse_known_and_unknown() {
        assert_eq!("scroll".parse::<BrowserCommand>(), Ok(BrowserCommand::Scroll));
        assert!("fly".parse::<BrowserCommand>().is_err());
        assert!("Scroll".parse::<BrowserCommand>().is_err());
    }

    #[test]
    fn acknowledge_uses_params_or_defaults() {
        let mut params = HashMap::new();
        params.insert("url".to_string(), Value::String("https://x.com".into()));
        assert_eq!(
            BrowserCommand::Navigate.acknowledge(&params),
            "Navigated to: https://x.com"
        );
        assert_eq!(
            BrowserCommand::Scroll.acknowledge(&HashMap::new()),
            "Scrolled down"
        );
    }

    #[tokio::test]
    async fn list_commands() {
        let req = Request::builder()
            .uri("/api/commands")
            .body(Body::empty())
            .unwrap();
        let response = app_without_key().oneshot(req).await.unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let list: CommandListResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(list.count, 7);
        assert!(list.commands.contains(&"screenshot".to_string()));
    }

    #[tokio::test]
    async fn run_unknown_command_reports_supported_list() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/run")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"command":"fly"}"#))
            .unwrap();
        let response = app_without_key().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let result: CommandResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("scroll"));
    }

    #[tokio::test]
    async fn run_known_command() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/run")
            .header("content-type", "application/json")
            .body(Body::from(r##"{"command":"click","params":{"selector":"#go"}}"##))
            .unwrap();
        let response = app_without_key().oneshot(req).await.unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let result: CommandResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(result.success);
        assert_eq!(result.result, "Clicked element: #go");
    }

    #[tokio::test]
    async fn validate_by_query_string() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/validate?command=extract")
            .body(Body::empty())
            .unwrap();
        let response = app_without_key().oneshot(req).await.unwrap();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let result: ValidateResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(result.valid);
        assert_eq!(result.message, "Command is supported");
    }
}
