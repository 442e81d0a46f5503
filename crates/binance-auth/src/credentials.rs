//! API credentials for Binance signed endpoints
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Keeps it out of `Debug` output
//! - Requires an explicit `expose_secret()` to read

use secrecy::{ExposeSecret, SecretBox};

use crate::error::{AuthError, AuthResult};
use crate::signer;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
/// Environment variable holding the secret key
pub const SECRET_KEY_ENV: &str = "BINANCE_SECRET_KEY";

/// API key and secret used for signed requests
pub struct Credentials {
    /// API key (sent in the clear as a header)
    api_key: String,
    /// Secret key (zeroized on drop)
    secret_key: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create credentials from an API key and secret key
    ///
    /// Both must be non-empty, and the API key must be printable ASCII since
    /// it travels in an HTTP header.
    pub fn new(api_key: impl Into<String>, secret_key: impl AsRef<str>) -> AuthResult<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.as_ref();

        if api_key.is_empty() {
            return Err(AuthError::InvalidCredentials("API key is empty".to_string()));
        }
        if !api_key.chars().all(|c| c.is_ascii_graphic()) {
            return Err(AuthError::InvalidCredentials(
                "API key contains characters not allowed in a header".to_string(),
            ));
        }
        if secret_key.is_empty() {
            return Err(AuthError::InvalidCredentials(
                "Secret key is empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            secret_key: SecretBox::new(Box::new(secret_key.as_bytes().to_vec())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BINANCE_API_KEY` and `BINANCE_SECRET_KEY`.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_KEY_ENV.to_string()))?;

        Self::new(api_key, secret_key)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a payload with the secret key
    pub fn sign(&self, payload: &str) -> String {
        signer::sign(payload, self.secret_key.expose_secret())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret_key: SecretBox::new(Box::new(self.secret_key.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", &self.api_key[..8.min(self.api_key.len())]),
            )
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
    const SECRET: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

    #[test]
    fn test_credentials_creation() {
        let creds = Credentials::new(API_KEY, SECRET).unwrap();
        assert_eq!(creds.api_key(), API_KEY);
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(matches!(
            Credentials::new("", SECRET),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new(API_KEY, ""),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_api_key_must_be_header_safe() {
        assert!(Credentials::new("key with spaces", SECRET).is_err());
        assert!(Credentials::new("key\n", SECRET).is_err());
    }

    #[test]
    fn test_sign_uses_secret() {
        let creds = Credentials::new(API_KEY, SECRET).unwrap();
        assert_eq!(creds.sign("timestamp=1"), signer::sign("timestamp=1", SECRET));
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = Credentials::new(API_KEY, SECRET).unwrap();
        let cloned = creds.clone();
        assert_eq!(cloned.sign("a=1"), creds.sign("a=1"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new(API_KEY, SECRET).unwrap();
        let debug = format!("{:?}", creds);

        assert!(debug.contains("vmPUZE6m..."));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains(SECRET));
        assert!(!debug.contains(API_KEY));
    }
}
