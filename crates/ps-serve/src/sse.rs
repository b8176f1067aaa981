use axum::http::header;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use ps_core::types::StreamEvent;
use ps_relay::EventStream;
use std::convert::Infallible;

/// Writes relay events as `data: {"content": ..}` / `data: {"error": ..}`
/// frames. The response ends when the relay stream does.
pub fn relay_response(events: EventStream) -> Response {
    let stream = events.map(|event| Ok::<Event, Infallible>(to_event(&event)));
    ([(header::CACHE_CONTROL, "no-cache")], Sse::new(stream)).into_response()
}

pub fn to_event(event: &StreamEvent) -> Event {
    let json = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    Event::default().data(json)
}
