use serde::Serialize;
use utoipa::ToSchema;

/// One item of a relayed completion. The stream ending is the done signal;
/// nothing is written to the wire for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StreamEvent {
    Content(String),
    Error(String),
}

impl StreamEvent {
    pub fn content(text: impl Into<String>) -> Self {
        Self::Content(text.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}
