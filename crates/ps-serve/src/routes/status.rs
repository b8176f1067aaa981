use crate::middleware::correlation::CorrelationId;
use crate::routes::error::map_error;
use crate::AppState;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use ps_core::Scribe;
use ps_core::ScribeError;
use ps_core::types::{CreateStatusCheckInput, StatusCheck};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(list_status_checks).post(create_status_check))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/status",
    request_body = CreateStatusCheckInput,
    responses((status = 200, body = StatusCheck))
)]
pub(crate) async fn create_status_check(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
    Json(input): Json<CreateStatusCheckInput>,
) -> Response {
    let result = state
        .pool
        .run(move |store| Scribe::new(store).status_checks().create(input.client_name))
        .await;
    match result {
        Ok(check) => Json(check).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses((status = 200, body = Vec<StatusCheck>))
)]
pub(crate) async fn list_status_checks(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Response {
    let result: Result<Vec<StatusCheck>, ScribeError> = state
        .pool
        .run(|store| Scribe::new(store).status_checks().list(None))
        .await;
    match result {
        Ok(checks) => Json(checks).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}
