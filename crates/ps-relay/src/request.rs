use serde::Serialize;
use std::time::Duration;

pub const SYSTEM_PROMPT: &str = "You are an expert Python programmer. Translate the user's natural \
language description into clean, efficient, complete Python code.

Guidelines:
- Produce working code, not pseudo-code
- Document the code with docstrings and comments
- Follow Python best practices and clean coding standards
- Add a short usage example when it helps
- Give classes a proper __init__ method
- Handle edge cases
- Use meaningful names
- Keep prose to a minimum unless asked for an explanation";

pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-experimental";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fixed knobs applied to every relayed request.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaySettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Budget for the whole upstream call, from connect to the last line.
    pub timeout: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl ChatRequest {
    pub fn translation(settings: &RelaySettings, prompt: &str) -> Self {
        Self {
            model: settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            stream: true,
            max_tokens: settings.max_tokens,
            temperature: settings.temperature,
        }
    }
}
