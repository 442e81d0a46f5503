//! Error types for REST API operations

use binance_auth::AuthError;
use binance_types::error_codes::{ExchangeError, RecoveryStrategy};
use binance_types::CodecError;

use crate::decode::DecodeError;
use crate::transport::TransportError;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Signed endpoint called without credentials
    #[error("Authentication required for this endpoint")]
    MissingCredentials,

    /// Credential or signing failure
    #[error("Auth error: {0}")]
    Auth(AuthError),

    /// Network, TLS or DNS failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The exchange rejected the request
    #[error("Exchange error {0}")]
    Exchange(#[from] ExchangeError),

    /// Body matched neither the error payload nor the declared shape
    #[error("Malformed response: {reason}")]
    MalformedResponse {
        /// What did not match
        reason: String,
        /// Raw response body
        body: String,
    },

    /// Request rejected before any I/O
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl From<AuthError> for RestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => Self::MissingCredentials,
            other => Self::Auth(other),
        }
    }
}

impl From<DecodeError> for RestError {
    fn from(err: DecodeError) -> Self {
        Self::MalformedResponse {
            reason: err.reason,
            body: err.body,
        }
    }
}

impl From<CodecError> for RestError {
    fn from(err: CodecError) -> Self {
        Self::InvalidParameter(err.to_string())
    }
}

impl RestError {
    /// The exchange error, if this is one
    pub fn exchange_error(&self) -> Option<&ExchangeError> {
        match self {
            Self::Exchange(e) => Some(e),
            _ => None,
        }
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Exchange(error) => error.recovery_strategy(),
            Self::Transport(_) => RecoveryStrategy::Retry {
                max_attempts: 3,
                delay_ms: 1000,
            },
            Self::MissingCredentials | Self::Auth(_) => RecoveryStrategy::Fatal,
            Self::MalformedResponse { .. } | Self::InvalidParameter(_) => RecoveryStrategy::Fatal,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Exchange(error) if error.is_rate_limit())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
