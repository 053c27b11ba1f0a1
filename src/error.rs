//! CyberStream Error Types
//!
//! Every upstream problem is one of three kinds: the request never produced
//! a usable response (transport/status), the response lacked a field we
//! needed (shape), or it was well formed but held nothing (empty).

use thiserror::Error;

/// Central error type for CyberStream
#[derive(Error, Debug)]
pub enum CyberError {
    #[error("Request failed: {0}")]
    Transport(String),

    /// Transport failure with a user-facing message
    #[error("{0}")]
    Unavailable(String),

    #[error("Upstream returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("{0}")]
    Shape(String),

    #[error("{0}")]
    Empty(String),

    #[error("{0} endpoint is not configured")]
    NotConfigured(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CyberError {
    /// Short label used in log lines so failures can be told apart
    pub fn kind(&self) -> &'static str {
        match self {
            CyberError::Transport(_) | CyberError::Unavailable(_) | CyberError::Status { .. } => {
                "transport"
            }
            CyberError::Shape(_) | CyberError::Json(_) => "shape",
            CyberError::Empty(_) => "empty",
            CyberError::NotConfigured(_) | CyberError::Config(_) => "config",
            CyberError::Session(_) | CyberError::Io(_) => "local",
            CyberError::Other(_) => "other",
        }
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        CyberError::Shape(msg.into())
    }

    pub fn empty(msg: impl Into<String>) -> Self {
        CyberError::Empty(msg.into())
    }
}

impl From<reqwest::Error> for CyberError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return CyberError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if err.is_decode() {
            return CyberError::Shape(format!("Malformed upstream response: {err}"));
        }
        CyberError::Transport(err.to_string())
    }
}

/// Result type alias for CyberStream operations
pub type CyberResult<T> = Result<T, CyberError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(CyberError::Transport("x".into()).kind(), "transport");
        assert_eq!(
            CyberError::Status {
                status: 502,
                url: "http://a".into()
            }
            .kind(),
            "transport"
        );
        assert_eq!(CyberError::shape("missing").kind(), "shape");
        assert_eq!(CyberError::empty("none").kind(), "empty");
    }

    #[test]
    fn test_not_configured_message() {
        let err = CyberError::NotConfigured("Downloader");
        assert_eq!(err.to_string(), "Downloader endpoint is not configured");
    }
}
