//! Relays natural-language-to-Python completions from an OpenRouter-style
//! streaming chat endpoint as a flat sequence of [`StreamEvent`]s.
//!
//! [`StreamEvent`]: ps_core::types::StreamEvent

pub mod error;
pub mod framing;
pub mod http;
pub mod relay;
pub mod request;
pub mod upstream;

pub use error::RelayError;
pub use http::{HttpCompletionClient, UpstreamConfig};
pub use relay::{EventStream, Relay};
pub use request::{ChatRequest, RelaySettings};
pub use upstream::{CompletionLines, CompletionStreamClient};
