//! Error Types

/// Failures talking to the auth service
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Token missing, expired or rejected
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("auth service returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("invalid auth response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SessionError::Decode(err.to_string())
        } else {
            SessionError::Network(err.to_string())
        }
    }
}

/// Startup and configuration errors
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Supabase URL or Key is missing")]
    MissingBackend,
    #[error("invalid bind address {0:?}")]
    InvalidBindAddr(String),
    #[error("invalid public path pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
