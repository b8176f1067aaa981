use axum::Json;
use axum::http::StatusCode;
use ps_core::ScribeError;
use ps_core::error::{ConversationError, HealthError, StatusCheckError, TranslateError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: &'static str,
    pub message: String,
    pub correlation_id: Option<String>,
}

/// Maps a failure to its HTTP status and a caller-safe envelope. Server
/// errors are logged here with their full cause; the envelope only carries a
/// fixed description.
pub fn map_error(
    err: &ScribeError,
    correlation_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, code, message) = match err {
        ScribeError::Translate(translate) => map_translate_error(translate),
        ScribeError::StatusCheck(status) => map_status_check_error(status),
        ScribeError::Conversation(conversation) => map_conversation_error(conversation),
        ScribeError::Health(health) => map_health_error(health),
        ScribeError::Internal { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Internal server error".to_string(),
        ),
    };

    if status.is_server_error() {
        tracing::error!(
            status = status.as_u16(),
            correlation_id = correlation_id.as_deref().unwrap_or("-"),
            error = %err,
            "request failed"
        );
    }

    (
        status,
        Json(ErrorEnvelope {
            code,
            message,
            correlation_id,
        }),
    )
}

fn map_translate_error(err: &TranslateError) -> (StatusCode, &'static str, String) {
    match err {
        TranslateError::InvalidRequest { message } => {
            (StatusCode::BAD_REQUEST, "invalid_input", message.clone())
        }
    }
}

fn map_status_check_error(err: &StatusCheckError) -> (StatusCode, &'static str, String) {
    match err {
        StatusCheckError::Persistence { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Failed to access status checks".to_string(),
        ),
    }
}

fn map_conversation_error(err: &ConversationError) -> (StatusCode, &'static str, String) {
    match err {
        ConversationError::NotFound => (
            StatusCode::NOT_FOUND,
            "not_found",
            "Conversation not found".to_string(),
        ),
        ConversationError::Persistence { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
            "Failed to access conversation history".to_string(),
        ),
    }
}

fn map_health_error(err: &HealthError) -> (StatusCode, &'static str, String) {
    match err {
        HealthError::Unavailable { .. } => (
            StatusCode::SERVICE_UNAVAILABLE,
            "service_unavailable",
            "Service unavailable".to_string(),
        ),
    }
}
