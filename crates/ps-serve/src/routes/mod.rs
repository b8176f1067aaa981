pub mod conversations;
pub mod error;
pub mod health;
pub mod status;
pub mod translate;

use crate::middleware::correlation::correlation_middleware;
use crate::{AppState, openapi};
use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(health::router(state.clone()))
        .merge(status::router(state.clone()))
        .merge(conversations::router(state.clone()))
        .merge(translate::router(state))
        .merge(openapi::router())
        .route_layer(middleware::from_fn(correlation_middleware));

    // A nested "/" only answers "/api", so the greeting is mounted here for
    // both spellings.
    Router::new()
        .route("/api", get(health::root))
        .route("/api/", get(health::root))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
