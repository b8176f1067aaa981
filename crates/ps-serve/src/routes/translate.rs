use crate::middleware::correlation::CorrelationId;
use crate::routes::error::map_error;
use crate::{AppState, sse};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Extension, Json, Router};
use ps_core::ScribeError;
use utoipa::ToSchema;

#[derive(Debug, serde::Deserialize, ToSchema)]
pub struct TranslateInput {
    prompt: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/translate", post(translate))
        .with_state(state)
}

/// Streams generated Python code for a natural-language prompt.
///
/// Failures after the stream has started arrive as a final
/// `data: {"error": ..}` frame; the status stays 200.
#[utoipa::path(
    post,
    path = "/api/translate",
    request_body = TranslateInput,
    responses(
        (status = 200, description = "Server-sent events carrying `content` or `error`", content_type = "text/event-stream", body = String),
        (status = 400, description = "Prompt is empty")
    )
)]
pub(crate) async fn translate(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<TranslateInput>,
) -> Response {
    match state.relay.relay(&input.prompt) {
        Ok(events) => {
            tracing::info!(correlation_id = %correlation.0, "relaying translation");
            sse::relay_response(events)
        }
        Err(err) => map_error(&ScribeError::from(err), Some(correlation.0)).into_response(),
    }
}
