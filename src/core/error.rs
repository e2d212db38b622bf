use crate::infrastructure::browser::BrowserError;
use thiserror::Error;

/// Why a navigation attempt ended without a confirmed profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavReason {
    /// The page never became reachable within the configured timeout.
    Timeout,
    /// A login wall was detected and the mobile fallback failed as well.
    Redirect,
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Browser or proxy setup failed. The only error that aborts a run
    /// before any navigation; everything downstream degrades instead.
    #[error("session init error: {0}")]
    SessionInit(String),

    #[error("navigation failed: {reason:?}")]
    Nav { reason: NavReason },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;
