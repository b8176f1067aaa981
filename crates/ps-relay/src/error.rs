use thiserror::Error;

/// Failures once a relay is under way. These never reach the caller as
/// errors; each one becomes the single terminal `Error` event of a stream.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("upstream returned status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("upstream timed out")]
    Timeout,
    #[error("network error: {message}")]
    Network { message: String },
    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl RelayError {
    /// The message placed in the terminal `Error` event.
    pub fn client_message(&self) -> String {
        match self {
            Self::UpstreamStatus { status, .. } => format!("API Error: {status}"),
            Self::Timeout => "timeout".to_string(),
            Self::Network { .. } => "network error".to_string(),
            Self::Unexpected { .. } => "unexpected error".to_string(),
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() || err.is_request() || err.is_body() {
            Self::Network {
                message: err.to_string(),
            }
        } else {
            Self::Unexpected {
                message: err.to_string(),
            }
        }
    }
}
