//! Line framing for OpenAI-style streaming chat completions.
//!
//! The upstream body is a sequence of `data: <json>` lines separated by blank
//! lines and terminated by `data: [DONE]`. Bytes arrive in arbitrary chunks,
//! so [`LineBuffer`] reassembles complete lines before [`parse_line`] looks at
//! them.

use serde::Deserialize;

pub const DATA_MARKER: &str = "data:";
pub const DONE_SENTINEL: &str = "[DONE]";

/// Accumulates raw body bytes and hands out complete lines.
///
/// Splitting happens on bytes, so a UTF-8 sequence cut in half by a chunk
/// boundary is decoded only once both halves are present.
#[derive(Debug, Default)]
pub struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    /// Pops the next `\n`-terminated line without its terminator.
    pub fn next_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|byte| *byte == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        Some(decode(line))
    }

    /// Drains whatever is left once the body has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        Some(decode(std::mem::take(&mut self.pending)))
    }
}

fn decode(mut line: Vec<u8>) -> String {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    String::from_utf8_lossy(&line).into_owned()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Not a data line, or a chunk without text.
    Skip,
    /// The end-of-stream sentinel.
    Done,
    /// A data line whose payload is not a chunk record.
    Malformed(String),
    Delta(String),
}

#[derive(Debug, Deserialize)]
struct Chunk {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    delta: Option<Delta>,
}

#[derive(Debug, Deserialize)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

pub fn parse_line(line: &str) -> Frame {
    let Some(payload) = line.strip_prefix(DATA_MARKER) else {
        return Frame::Skip;
    };
    let payload = payload.strip_prefix(' ').unwrap_or(payload);
    if payload.trim() == DONE_SENTINEL {
        return Frame::Done;
    }
    let chunk: Chunk = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(err) => return Frame::Malformed(err.to_string()),
    };
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta)
        .and_then(|delta| delta.content)
        .filter(|content| !content.is_empty())
        .map_or(Frame::Skip, Frame::Delta)
}
