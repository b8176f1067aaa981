use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use ps_db::DbPool;
use ps_relay::{
    ChatRequest, CompletionLines, CompletionStreamClient, Relay, RelayError, RelaySettings,
};
use ps_serve::{AppState, app};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

struct ScriptedClient {
    lines: Vec<String>,
    reject_with: Option<u16>,
    connects: AtomicUsize,
}

struct ScriptedLines(VecDeque<String>);

#[async_trait]
impl CompletionLines for ScriptedLines {
    async fn next_line(&mut self) -> Result<Option<String>, RelayError> {
        Ok(self.0.pop_front())
    }
}

#[async_trait]
impl CompletionStreamClient for ScriptedClient {
    async fn connect(
        &self,
        _request: &ChatRequest,
    ) -> Result<Box<dyn CompletionLines>, RelayError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = self.reject_with {
            return Err(RelayError::UpstreamStatus {
                status,
                body: "rate limited".to_string(),
            });
        }
        Ok(Box::new(ScriptedLines(self.lines.iter().cloned().collect())))
    }
}

fn delta(text: &str) -> String {
    format!(
        "data: {}",
        json!({"choices": [{"delta": {"content": text}}]})
    )
}

struct Harness {
    router: Router,
    pool: DbPool,
    client: Arc<ScriptedClient>,
}

fn harness_with(client: ScriptedClient) -> Harness {
    let pool = DbPool::open_in_memory("pyscribe_test").unwrap();
    let client = Arc::new(client);
    let settings = RelaySettings {
        timeout: Duration::from_secs(5),
        ..RelaySettings::default()
    };
    let relay = Relay::new(client.clone(), settings);
    Harness {
        router: app(AppState::new(pool.clone(), relay)),
        pool,
        client,
    }
}

fn harness() -> Harness {
    harness_with(ScriptedClient {
        lines: vec![
            delta("print("),
            String::new(),
            delta("'hi')"),
            "data: [DONE]".to_string(),
        ],
        reject_with: None,
        connects: AtomicUsize::new(0),
    })
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send_json(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(router, request).await;
    (status, serde_json::from_slice(&body).unwrap())
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn data_payloads(body: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(body)
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|payload| serde_json::from_str(payload.trim()).unwrap())
        .collect()
}

#[tokio::test]
async fn root_says_hello() {
    let h = harness();
    for uri in ["/api/", "/api"] {
        let (status, body) = send_json(&h.router, get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({"message": "Hello World"}));
    }
}

#[tokio::test]
async fn translate_streams_content_events() {
    let h = harness();
    let response = h
        .router
        .clone()
        .oneshot(post("/api/translate", &json!({"prompt": "print hi"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/event-stream"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        data_payloads(&body),
        vec![json!({"content": "print("}), json!({"content": "'hi')"})]
    );
    assert_eq!(h.client.connects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_prompt_is_rejected_before_streaming() {
    let h = harness();
    let (status, body) = send_json(&h.router, post("/api/translate", &json!({"prompt": "  "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_input");
    assert_eq!(body["message"], "Prompt is required");
    assert_eq!(h.client.connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn upstream_rejection_arrives_in_stream() {
    let h = harness_with(ScriptedClient {
        lines: Vec::new(),
        reject_with: Some(429),
        connects: AtomicUsize::new(0),
    });
    let (status, body) = send(&h.router, post("/api/translate", &json!({"prompt": "x"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data_payloads(&body), vec![json!({"error": "API Error: 429"})]);
}

#[tokio::test]
async fn status_checks_are_recorded_in_order() {
    let h = harness();
    for name in ["alpha", "beta"] {
        let (status, body) =
            send_json(&h.router, post("/api/status", &json!({"client_name": name}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["client_name"], name);
        assert!(body["id"].as_str().unwrap().starts_with("chk_"));
    }

    let (status, body) = send_json(&h.router, get("/api/status")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|check| check["client_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alpha", "beta"]);
}

#[tokio::test]
async fn conversations_save_list_and_delete() {
    let h = harness();
    let (status, saved) = send_json(
        &h.router,
        post(
            "/api/conversation",
            &json!({"user_input": "add 1 and 2", "python_output": "print(1 + 2)", "session_id": "s1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["generated_output"], "print(1 + 2)");
    assert_eq!(saved["session_id"], "s1");

    send_json(
        &h.router,
        post(
            "/api/conversation",
            &json!({"user_input": "other", "generated_output": "pass"}),
        ),
    )
    .await;

    let (_, all) = send_json(&h.router, get("/api/conversation")).await;
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["user_input"], "other");

    let (_, scoped) = send_json(&h.router, get("/api/conversation?session_id=s1")).await;
    assert_eq!(scoped.as_array().unwrap().len(), 1);

    let (_, limited) = send_json(&h.router, get("/api/conversation?limit=1")).await;
    assert_eq!(limited.as_array().unwrap().len(), 1);

    let id = saved["id"].as_str().unwrap();
    let uri = format!("/api/conversation/{id}");
    let (status, body) = send_json(&h.router, delete(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Conversation deleted successfully"}));

    let (status, body) = send_json(&h.router, delete(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn malformed_conversation_id_is_not_found() {
    let h = harness();
    let (status, body) = send_json(&h.router, delete("/api/conversation/not-an-id")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn health_tracks_store_availability() {
    let h = harness();
    let (status, body) = send_json(&h.router, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"], "connected");
    assert_eq!(body["services"]["openrouter"], "configured");

    h.pool.close().unwrap();
    let (status, body) = send_json(&h.router, get("/api/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "service_unavailable");
}

#[tokio::test]
async fn closed_store_fails_writes_with_internal_error() {
    let h = harness();
    h.pool.close().unwrap();
    let (status, body) =
        send_json(&h.router, post("/api/status", &json!({"client_name": "late"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "internal_error");
}

#[tokio::test]
async fn correlation_id_is_echoed_or_generated() {
    let h = harness();
    let request = Request::builder()
        .uri("/api/health")
        .header("x-correlation-id", "trace-42")
        .body(Body::empty())
        .unwrap();
    let response = h.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-correlation-id"], "trace-42");

    let response = h.router.clone().oneshot(get("/api/health")).await.unwrap();
    let generated = response.headers()["x-correlation-id"].to_str().unwrap();
    assert!(generated.starts_with("req_"));
}

#[tokio::test]
async fn error_envelope_carries_correlation_id() {
    let h = harness();
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/conversation/bogus")
        .header("x-correlation-id", "trace-7")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send_json(&h.router, request).await;
    assert_eq!(body["correlation_id"], "trace-7");
}

#[tokio::test]
async fn openapi_document_lists_routes() {
    let h = harness();
    let (status, body) = send_json(&h.router, get("/api/openapi.json")).await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/translate"));
    assert!(paths.contains_key("/api/conversation/{id}"));
}
