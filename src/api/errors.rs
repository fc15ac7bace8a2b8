use thiserror::Error;

/// Failures talking to the OTP endpoints.
///
/// Server rejections are not errors: they arrive as decoded replies with
/// `ok != true`. Only transport problems and bodies that cannot be decoded end
/// up here.
#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid URL: {0}")]
    Url(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Malformed response ({status}): {message}")]
    MalformedResponse { status: u16, message: String },
    #[error("Request error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Message shown inline next to the form that issued the request.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::MalformedResponse { .. } => {
                "Unexpected response from server. Please try again."
            }
            _ => "Network error. Please try again.",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout("Request timed out. Please try again.".to_string())
        } else if err.is_builder() {
            AppError::Serialization(format!("Failed to build request: {err}"))
        } else {
            AppError::Network(format!("Unable to reach the server: {err}"))
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Url(err.to_string())
    }
}
