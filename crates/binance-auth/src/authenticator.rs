//! Signing of outgoing requests
//!
//! A request is signed if and only if it carries a `timestamp` parameter,
//! in the query or in the form body. Signing attaches, in order:
//!
//! 1. the `X-MBX-APIKEY` header,
//! 2. `recvWindow` as a query parameter,
//! 3. `signature` as the final query parameter, computed over the
//!    percent-decoded query string immediately followed by the body.
//!
//! The signature covers every other parameter and never itself.

use std::time::Duration;

use binance_types::codec::duration_to_millis;
use binance_types::{HttpRequest, API_KEY_HEADER, RECV_WINDOW, SIGNATURE, TIMESTAMP};
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::{AuthError, AuthResult};

/// Default receive window in milliseconds
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;

/// Tolerance between a request's timestamp and the server clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiveWindow(Duration);

impl ReceiveWindow {
    pub fn new(duration: Duration) -> Self {
        Self(duration)
    }

    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    /// Wire value in whole milliseconds
    pub fn as_millis(&self) -> u64 {
        duration_to_millis(self.0)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for ReceiveWindow {
    fn default() -> Self {
        Self::from_millis(DEFAULT_RECV_WINDOW_MS)
    }
}

impl From<Duration> for ReceiveWindow {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

/// Returns true if the request carries a timestamp and must be signed
pub fn requires_authentication(request: &HttpRequest) -> bool {
    request.has_param(TIMESTAMP)
}

/// The exact string the signature is computed over
pub fn signable_payload(request: &HttpRequest) -> String {
    let mut payload = request.decoded_query();
    payload.push_str(&request.body);
    payload
}

/// Produce the signed form of `request`
///
/// Requests without a timestamp come back unchanged, whether or not
/// credentials are configured. The caller's request is never modified.
pub fn authenticate(
    request: &HttpRequest,
    credentials: Option<&Credentials>,
    recv_window: ReceiveWindow,
) -> AuthResult<HttpRequest> {
    if !requires_authentication(request) {
        return Ok(request.clone());
    }

    let credentials = credentials.ok_or(AuthError::MissingCredentials)?;

    let mut signed = request.clone();
    signed
        .query
        .retain(|(k, _)| k != RECV_WINDOW && k != SIGNATURE);
    signed
        .headers
        .retain(|(k, _)| !k.eq_ignore_ascii_case(API_KEY_HEADER));

    signed
        .headers
        .push((API_KEY_HEADER.to_string(), credentials.api_key().to_string()));
    signed
        .query
        .push((RECV_WINDOW.to_string(), recv_window.as_millis().to_string()));

    let signature = credentials.sign(&signable_payload(&signed));
    signed.query.push((SIGNATURE.to_string(), signature));

    debug!(
        method = %signed.method,
        path = %signed.path,
        recv_window_ms = recv_window.as_millis(),
        "Signed request"
    );

    Ok(signed)
}

/// Credentials and receive window bundled for repeated signing
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    credentials: Option<Credentials>,
    recv_window: ReceiveWindow,
}

impl Authenticator {
    /// Authenticator for public endpoints only
    pub fn public() -> Self {
        Self::default()
    }

    pub fn new(credentials: Option<Credentials>, recv_window: ReceiveWindow) -> Self {
        Self {
            credentials,
            recv_window,
        }
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::new(Some(credentials), ReceiveWindow::default())
    }

    pub fn with_recv_window(mut self, recv_window: ReceiveWindow) -> Self {
        self.recv_window = recv_window;
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn recv_window(&self) -> ReceiveWindow {
        self.recv_window
    }

    /// Sign `request` if it needs it
    pub fn authenticate(&self, request: &HttpRequest) -> AuthResult<HttpRequest> {
        authenticate(request, self.credentials.as_ref(), self.recv_window)
    }
}
