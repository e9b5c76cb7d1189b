//! Route handlers.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use gurobi_classifier::{classify, Label, StatusCategory};

use crate::server::AppState;
use crate::types::HealthResponse;

pub const ROOT_ROUTE: &str = "/";
pub const COMMAND_ROUTE: &str = "/:command";
pub const HEALTH_ROUTE: &str = "/api/v1/health";

/// `GET /`
pub async fn welcome(State(state): State<AppState>) -> &'static str {
    state.logger.invocation(ROOT_ROUTE, None);
    "Welcome!"
}

/// `GET /:command` — classify the path segment and answer with the bare label.
pub async fn classify_command(
    State(state): State<AppState>,
    command: Result<Path<String>, PathRejection>,
) -> Response {
    let command = match command {
        Ok(Path(command)) => command,
        Err(rejection) => {
            // Undecodable segments are malformed input, not a routing failure.
            state.logger.invocation(COMMAND_ROUTE, None);
            tracing::debug!("Rejected path segment: {}", rejection);
            return (StatusCode::BAD_REQUEST, Label::Invalid.as_str()).into_response();
        }
    };

    state.logger.invocation(COMMAND_ROUTE, Some(command.as_str()));

    let outcome = classify(&command);
    state.logger.classified(&command, &outcome);

    if outcome.status == StatusCategory::ServerError {
        state
            .logger
            .fault(COMMAND_ROUTE, outcome.error.as_deref().unwrap_or("unknown"));
    }

    let status = StatusCode::from_u16(outcome.status.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, outcome.label.as_str()).into_response()
}

/// `GET /api/v1/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    state.logger.invocation(HEALTH_ROUTE, None);
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
