//! HTTP request handlers

use super::types::{
    ErrorResponse, SendMessageRequest, SendMessageResponse, TopicInfo, TopicsResponse,
    VersionResponse,
};
use super::AppState;
use crate::relay::RelayError;
use crate::topics::all_topics;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Message relay
        .route("/api/sendMessage", post(send_message))
        // Topic catalog
        .route("/api/topics", get(list_topics))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Message Relay
// ============================================================

#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected malformed relay request");
        RelayError::InvalidRequest(rejection.body_text())
    })?;

    let response = state.relay.relay(request).await.inspect_err(|e| {
        if e.status().is_client_error() {
            tracing::info!(code = e.code(), "Relay request failed validation");
        }
    })?;

    Ok(Json(SendMessageResponse { response }))
}

// ============================================================
// Topic Catalog
// ============================================================

async fn list_topics() -> Json<TopicsResponse> {
    let topics = all_topics()
        .iter()
        .map(|t| TopicInfo {
            id: t.id.to_string(),
            display_name: t.display_name.to_string(),
            description: t.description.to_string(),
            system_prompt: t.system_prompt.to_string(),
        })
        .collect();
    Json(TopicsResponse { topics })
}

async fn get_version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION"),
        model: state.relay.model_id().to_string(),
    })
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    BadRequest { code: &'static str, message: String },
    Internal { code: &'static str, message: String },
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        let code = err.code();
        let message = err.to_string();
        if err.status().is_client_error() {
            AppError::BadRequest { code, message }
        } else {
            AppError::Internal { code, message }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::Internal { code, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, code, message)
            }
        };

        let body = Json(ErrorResponse::new(message).with_code(code));
        (status, body).into_response()
    }
}
