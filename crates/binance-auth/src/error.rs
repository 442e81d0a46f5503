//! Error types for authentication operations

use binance_types::CodecError;

/// Errors that can occur while preparing signed requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A signed request was built but no credentials are configured
    #[error("Missing credentials: signed endpoint requires an API key and secret")]
    MissingCredentials,

    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Request parameters could not be re-encoded after signing
    #[error("Encoding error: {0}")]
    Encoding(#[from] CodecError),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("BINANCE_API_KEY".to_string());
        assert!(err.to_string().contains("BINANCE_API_KEY"));
    }

    #[test]
    fn test_missing_credentials_display() {
        assert!(AuthError::MissingCredentials
            .to_string()
            .contains("Missing credentials"));
    }
}
