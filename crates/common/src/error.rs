use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Non-success HTTP status or transport failure.
    #[error("{0}")]
    Fetch(String),

    /// Response body did not have the expected JSON shape.
    #[error("{0}")]
    Format(String),

    /// Chat channel resolution or message send failed.
    #[error("Publish error: {0}")]
    Publish(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Short, stable label for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Format(_) => "format",
            AppError::Publish(_) => "publish",
            AppError::Io(_) => "io",
            AppError::Serialization(_) => "serialization",
            AppError::Config(_) => "config",
        }
    }
}
