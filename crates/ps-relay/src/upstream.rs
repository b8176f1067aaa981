use crate::error::RelayError;
use crate::request::ChatRequest;
use async_trait::async_trait;

/// An open upstream completion body, read one line at a time.
///
/// Dropping the reader closes the upstream connection.
#[async_trait]
pub trait CompletionLines: Send {
    /// The next complete line, or `None` once the body has ended.
    async fn next_line(&mut self) -> Result<Option<String>, RelayError>;
}

/// Opens streaming chat completions.
#[async_trait]
pub trait CompletionStreamClient: Send + Sync {
    /// Sends `request` and returns the body reader. A non-success status is
    /// reported as [`RelayError::UpstreamStatus`] after reading the error body.
    async fn connect(&self, request: &ChatRequest) -> Result<Box<dyn CompletionLines>, RelayError>;
}
