use actix_web::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Failure of a single generation attempt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("Generation API key is not configured")]
    MissingApiKey,

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("API quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Generation API returned an empty response")]
    EmptyResponse,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Generation API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not extract JSON from AI response")]
    InvalidAiResponse { raw: String },

    #[error("AI response has an unexpected shape: {0}")]
    UnexpectedShape(String),

    #[error("AI response has no valid items: {0}")]
    NoValidItems(String),

    #[error("AI response rejected, item {index} is invalid: {reason}")]
    BatchRejected { index: usize, reason: String },
}

/// Stable classification surfaced to callers once retries are exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    MissingApiKey,
    InvalidApiKey,
    QuotaExceeded,
    EmptyResponse,
    InvalidResponseFormat,
    NoValidItems,
    AiGenerationError,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::InvalidApiKey => StatusCode::UNAUTHORIZED,
            ErrorKind::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::InvalidResponseFormat | ErrorKind::NoValidItems => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ErrorKind::EmptyResponse | ErrorKind::AiGenerationError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Retrying cannot fix a bad or absent key; the configuration is identical
    /// on every attempt.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, ErrorKind::MissingApiKey | ErrorKind::InvalidApiKey)
    }
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::MissingApiKey => ErrorKind::MissingApiKey,
            GenerationError::InvalidApiKey(_) => ErrorKind::InvalidApiKey,
            GenerationError::QuotaExceeded(_) => ErrorKind::QuotaExceeded,
            GenerationError::EmptyResponse => ErrorKind::EmptyResponse,
            GenerationError::InvalidAiResponse { .. }
            | GenerationError::UnexpectedShape(_)
            | GenerationError::BatchRejected { .. } => ErrorKind::InvalidResponseFormat,
            GenerationError::NoValidItems(_) => ErrorKind::NoValidItems,
            GenerationError::Transport(message) | GenerationError::Api { message, .. } => {
                classify_message(message)
            }
        }
    }
}

/// Provider errors arrive as free text; known substrings pick the kind.
pub fn classify_message(message: &str) -> ErrorKind {
    let lowered = message.to_lowercase();
    if lowered.contains("api key") {
        ErrorKind::InvalidApiKey
    } else if lowered.contains("quota") {
        ErrorKind::QuotaExceeded
    } else if lowered.contains("json") {
        ErrorKind::InvalidResponseFormat
    } else {
        ErrorKind::AiGenerationError
    }
}

/// Request-level failure, produced once the retry budget is spent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationFailure {
    pub message: String,
    pub kind: ErrorKind,
    #[serde(skip)]
    pub attempts: u32,
}

impl GenerationFailure {
    pub fn from_error(error: &GenerationError, attempts: u32) -> Self {
        Self {
            message: error.to_string(),
            kind: error.kind(),
            attempts,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
