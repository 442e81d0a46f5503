//! Request signing and credentials for the Binance REST API
//!
//! Signed endpoints are recognised by the `timestamp` parameter they carry.
//! [`authenticate`] turns such a request into its signed form; anything else
//! passes through untouched.
//!
//! # Example
//!
//! ```no_run
//! use binance_auth::{Authenticator, Credentials};
//! use binance_types::{HttpRequest, Method, Params, TIMESTAMP};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load credentials from environment
//!     let creds = Credentials::from_env()?;
//!     let auth = Authenticator::with_credentials(creds);
//!
//!     let mut params = Params::new();
//!     params.push("symbol", "BNBBTC").push(TIMESTAMP, chrono::Utc::now());
//!     let request = HttpRequest::from_params(Method::Get, "v3/openOrders", &params)?;
//!
//!     let signed = auth.authenticate(&request)?;
//!     println!("{:?}", signed);
//!
//!     Ok(())
//! }
//! ```

mod authenticator;
mod credentials;
mod error;
pub mod signer;

pub use authenticator::{
    authenticate, requires_authentication, signable_payload, Authenticator, ReceiveWindow,
    DEFAULT_RECV_WINDOW_MS,
};
pub use binance_types::API_KEY_HEADER;
pub use credentials::{Credentials, API_KEY_ENV, SECRET_KEY_ENV};
pub use error::{AuthError, AuthResult};
pub use signer::sign;
