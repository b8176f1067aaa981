use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
}

#[derive(Debug, Error)]
pub enum StatusCheckError {
    #[error("persistence failed: {message}")]
    Persistence { message: String },
}

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("conversation not found")]
    NotFound,
    #[error("persistence failed: {message}")]
    Persistence { message: String },
}

#[derive(Debug, Error)]
pub enum HealthError {
    #[error("service unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Debug, Error)]
pub enum ScribeError {
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error(transparent)]
    StatusCheck(#[from] StatusCheckError),
    #[error(transparent)]
    Conversation(#[from] ConversationError),
    #[error(transparent)]
    Health(#[from] HealthError),
    #[error("internal error: {message}")]
    Internal { message: String },
}
