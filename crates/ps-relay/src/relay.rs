use crate::error::RelayError;
use crate::framing::{Frame, parse_line};
use crate::request::{ChatRequest, RelaySettings};
use crate::upstream::CompletionStreamClient;
use async_stream::stream;
use futures::Stream;
use ps_core::error::TranslateError;
use ps_core::types::StreamEvent;
use std::pin::Pin;
use std::sync::Arc;
use tokio::time::timeout;

pub type EventStream = Pin<Box<dyn Stream<Item = StreamEvent> + Send>>;

/// Turns a prompt into a stream of relayed completion events.
#[derive(Clone)]
pub struct Relay {
    client: Arc<dyn CompletionStreamClient>,
    settings: RelaySettings,
}

impl Relay {
    pub fn new(client: Arc<dyn CompletionStreamClient>, settings: RelaySettings) -> Self {
        Self { client, settings }
    }

    /// Validates `prompt` and returns the lazy event stream.
    ///
    /// Nothing is sent upstream until the stream is first polled. The stream
    /// yields `Content` events in upstream order and ends after the sentinel,
    /// after the body ends, or right after its single `Error` event. Dropping
    /// it early drops the upstream connection.
    ///
    /// The timeout bounds each upstream wait (connect, then every line), not
    /// the whole completion.
    pub fn relay(&self, prompt: &str) -> Result<EventStream, TranslateError> {
        if prompt.trim().is_empty() {
            return Err(TranslateError::InvalidRequest {
                message: "Prompt is required".to_string(),
            });
        }
        let request = ChatRequest::translation(&self.settings, prompt);
        let client = Arc::clone(&self.client);
        let budget = self.settings.timeout;

        Ok(Box::pin(stream! {
            let mut lines = match timeout(budget, client.connect(&request)).await {
                Ok(Ok(lines)) => lines,
                Ok(Err(err)) => {
                    yield failure(&err);
                    return;
                }
                Err(_) => {
                    yield failure(&RelayError::Timeout);
                    return;
                }
            };

            let mut relayed = 0_usize;
            loop {
                let line = match timeout(budget, lines.next_line()).await {
                    Ok(Ok(Some(line))) => line,
                    Ok(Ok(None)) => {
                        tracing::debug!(relayed, "upstream ended without sentinel");
                        break;
                    }
                    Ok(Err(err)) => {
                        yield failure(&err);
                        break;
                    }
                    Err(_) => {
                        yield failure(&RelayError::Timeout);
                        break;
                    }
                };
                match parse_line(&line) {
                    Frame::Delta(text) => {
                        relayed += 1;
                        yield StreamEvent::Content(text);
                    }
                    Frame::Done => {
                        tracing::debug!(relayed, "upstream stream complete");
                        break;
                    }
                    // Silently dropped; a format change upstream would only show up here.
                    Frame::Malformed(reason) => {
                        tracing::debug!(%reason, "skipping malformed upstream chunk");
                    }
                    Frame::Skip => {}
                }
            }
        }))
    }
}

fn failure(err: &RelayError) -> StreamEvent {
    match err {
        RelayError::UpstreamStatus { status, body } => {
            tracing::error!(status, %body, "upstream completion request rejected");
        }
        RelayError::Timeout => tracing::error!("upstream completion timed out"),
        RelayError::Network { message } => {
            tracing::error!(error = %message, "upstream completion network failure");
        }
        RelayError::Unexpected { message } => {
            tracing::error!(error = %message, "upstream completion failed");
        }
    }
    StreamEvent::Error(err.client_message())
}
