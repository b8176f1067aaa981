use crate::middleware::correlation::CorrelationId;
use crate::routes::error::map_error;
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Extension, Json, Router};
use ps_core::error::ConversationError;
use ps_core::types::{
    ConversationFilter, ConversationId, ConversationRecord, CreateConversationInput,
};
use ps_core::{Scribe, ScribeError};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/conversation",
            post(save_conversation).get(list_conversations),
        )
        .route("/conversation/{id}", delete(delete_conversation))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/conversation",
    request_body = CreateConversationInput,
    responses((status = 200, body = ConversationRecord))
)]
pub(crate) async fn save_conversation(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<CreateConversationInput>,
) -> Response {
    let result = state
        .pool
        .run(move |store| Scribe::new(store).conversations().save(input))
        .await;
    match result {
        Ok(record) => Json(record).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/conversation",
    params(ConversationFilter),
    responses((status = 200, description = "Newest first", body = Vec<ConversationRecord>))
)]
pub(crate) async fn list_conversations(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Query(filter): Query<ConversationFilter>,
) -> Response {
    let result = state
        .pool
        .run(move |store| Scribe::new(store).conversations().list(filter))
        .await;
    match result {
        Ok(records) => Json(records).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/api/conversation/{id}",
    params(("id" = String, Path, description = "Conversation ID")),
    responses(
        (status = 200, body = DeletedResponse),
        (status = 404, description = "No conversation with this id")
    )
)]
pub(crate) async fn delete_conversation(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Path(id): Path<String>,
) -> Response {
    // An id that cannot exist matches nothing.
    let Ok(id) = id.parse::<ConversationId>() else {
        let err = ScribeError::from(ConversationError::NotFound);
        return map_error(&err, Some(correlation.0)).into_response();
    };
    let result = state
        .pool
        .run(move |store| Scribe::new(store).conversations().delete(&id))
        .await;
    match result {
        Ok(()) => Json(DeletedResponse {
            message: "Conversation deleted successfully".to_string(),
        })
        .into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}
