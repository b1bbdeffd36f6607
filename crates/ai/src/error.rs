//! AI error types.

use mismetas_core::Error as CoreError;
use thiserror::Error;

/// AI errors.
#[derive(Debug, Error)]
pub enum AiError {
    /// Invalid input or request.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing API key for a provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider name not recognised.
    #[error("Unknown AI provider: {0}")]
    UnknownProvider(String),

    /// Provider error (from rig-core or API).
    #[error("Provider error: {0}")]
    Provider(String),

    /// The model answered, but not with the JSON we asked for.
    #[error("Invalid AI response format: {0}")]
    InvalidResponse(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new provider error.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

/// Error code for programmatic handling.
impl AiError {
    pub fn code(&self) -> &'static str {
        match self {
            AiError::InvalidInput(_) => "INVALID_INPUT",
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::UnknownProvider(_) => "UNKNOWN_PROVIDER",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::InvalidResponse(_) => "INVALID_RESPONSE",
            AiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<AiError> for CoreError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::InvalidInput(msg) => CoreError::Validation(
                mismetas_core::errors::ValidationError::InvalidInput(msg),
            ),
            other => CoreError::Ai(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_core_conversion() {
        let err = AiError::MissingApiKey("anthropic".to_string());
        assert_eq!(err.code(), "MISSING_API_KEY");
        assert!(matches!(CoreError::from(err), CoreError::Ai(_)));

        let err = AiError::invalid_input("Goal text is required");
        assert!(matches!(CoreError::from(err), CoreError::Validation(_)));
    }
}
