//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Local file check failed; never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// Normalized backend or transport failure. The payload is the message
    /// shown to the user as-is.
    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Timeout(String),

    #[error("An upload is already in progress")]
    UploadInProgress,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

impl AnalyzerError {
    /// Message suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Transport-level failures. Timeouts keep their own variant so callers can
/// tell them apart; everything else is surfaced with the transport message.
impl From<reqwest::Error> for AnalyzerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AnalyzerError::Timeout(format!("Request timed out: {}", err))
        } else {
            AnalyzerError::Api(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_display_the_bare_message() {
        let err = AnalyzerError::Api("File too large".to_string());
        assert_eq!(err.user_message(), "File too large");
    }

    #[test]
    fn validation_errors_display_the_bare_message() {
        let err = AnalyzerError::Validation("File size exceeds 10MB limit.".to_string());
        assert_eq!(err.to_string(), "File size exceeds 10MB limit.");
    }
}
