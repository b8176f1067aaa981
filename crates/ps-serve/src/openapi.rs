use crate::routes::conversations::DeletedResponse;
use crate::routes::health::Greeting;
use crate::routes::translate::TranslateInput;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ps_core::types::{
    ConversationFilter, ConversationId, ConversationRecord, CreateConversationInput,
    CreateStatusCheckInput, HealthReport, ServiceStatus, StatusCheck, StatusCheckId, StreamEvent,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::root,
        crate::routes::health::health,
        crate::routes::status::create_status_check,
        crate::routes::status::list_status_checks,
        crate::routes::conversations::save_conversation,
        crate::routes::conversations::list_conversations,
        crate::routes::conversations::delete_conversation,
        crate::routes::translate::translate
    ),
    components(schemas(
        StatusCheck,
        CreateStatusCheckInput,
        ConversationRecord,
        CreateConversationInput,
        ConversationFilter,
        DeletedResponse,
        HealthReport,
        ServiceStatus,
        Greeting,
        TranslateInput,
        StreamEvent,
        StatusCheckId,
        ConversationId
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_ui))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> impl IntoResponse {
    let html = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Pyscribe API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: '/api/openapi.json', dom_id: '#swagger-ui' });
    </script>
  </body>
</html>
"#;
    axum::response::Html(html)
}
