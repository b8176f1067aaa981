use crate::middleware::correlation::CorrelationId;
use crate::routes::error::map_error;
use crate::AppState;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use ps_core::Scribe;
use ps_core::types::HealthReport;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Greeting {
    message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(state)
}

#[utoipa::path(get, path = "/api/", responses((status = 200, body = Greeting)))]
pub(crate) async fn root() -> Json<Greeting> {
    Json(Greeting {
        message: "Hello World".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, body = HealthReport),
        (status = 503, description = "Document store unreachable")
    )
)]
pub(crate) async fn health(
    State(state): State<AppState>,
    Extension(correlation): Extension<CorrelationId>,
) -> Response {
    let result = state
        .pool
        .run(|store| Scribe::new(store).health().check())
        .await;
    match result {
        Ok(report) => Json(report).into_response(),
        Err(err) => map_error(&err, Some(correlation.0)).into_response(),
    }
}
