use crate::error::RelayError;
use crate::framing::LineBuffer;
use crate::request::ChatRequest;
use crate::upstream::{CompletionLines, CompletionStreamClient};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_REFERER: &str = "http://localhost:3000";
pub const DEFAULT_TITLE: &str = "English to Python Translator";

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub referer: String,
    pub title: String,
}

impl UpstreamConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// OpenRouter-compatible `chat/completions` over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: reqwest::Client,
    config: UpstreamConfig,
}

impl HttpCompletionClient {
    pub fn new(client: reqwest::Client, config: UpstreamConfig) -> Self {
        Self { client, config }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionStreamClient for HttpCompletionClient {
    async fn connect(&self, request: &ChatRequest) -> Result<Box<dyn CompletionLines>, RelayError> {
        let url = self.endpoint();
        tracing::debug!(%url, model = %request.model, "opening upstream stream");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(err) => {
                    tracing::warn!(status = status.as_u16(), error = %err, "failed to read upstream error body");
                    String::new()
                }
            };
            return Err(RelayError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(Box::new(HttpLines::new(response.bytes_stream().boxed())))
    }
}

pub struct HttpLines {
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    buffer: LineBuffer,
    ended: bool,
}

impl HttpLines {
    fn new(body: BoxStream<'static, reqwest::Result<Bytes>>) -> Self {
        Self {
            body,
            buffer: LineBuffer::new(),
            ended: false,
        }
    }
}

#[async_trait]
impl CompletionLines for HttpLines {
    async fn next_line(&mut self) -> Result<Option<String>, RelayError> {
        loop {
            if let Some(line) = self.buffer.next_line() {
                return Ok(Some(line));
            }
            if self.ended {
                return Ok(self.buffer.finish());
            }
            match self.body.next().await {
                Some(Ok(chunk)) => self.buffer.push(&chunk),
                Some(Err(err)) => return Err(err.into()),
                None => self.ended = true,
            }
        }
    }
}

impl Drop for HttpLines {
    fn drop(&mut self) {
        tracing::debug!(ended = self.ended, "upstream stream released");
    }
}
