//! REST API client for the Binance cryptocurrency exchange
//!
//! This crate ties the signing layer ([`binance_auth`]) and the shared wire
//! types ([`binance_types`]) to an HTTP transport, and decodes the exchange's
//! four response layouts into typed values.
//!
//! # Features
//!
//! - **General**: Ping, server time
//! - **Market Data**: Depth, aggregate trades, klines, 24h ticker, all prices, book tickers
//! - **Trading**: New/test order, query, cancel, open and historical orders
//! - **Account**: Account information, trade list
//!
//! # Authentication
//!
//! Endpoints that carry a `timestamp` are signed with HMAC-SHA256 over the
//! query string and body. Calling one without credentials fails with
//! [`RestError::MissingCredentials`] before any I/O.
//!
//! # Example
//!
//! ```no_run
//! use binance_rest::{BinanceRestClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BinanceRestClient::new()?;
//!     let prices = client.all_prices().await?;
//!     println!("ETH/BTC: {:?}", prices.price("ETHBTC"));
//!
//!     // Signed endpoints (credentials from BINANCE_API_KEY / BINANCE_SECRET_KEY)
//!     let auth_client = BinanceRestClient::with_config(ClientConfig::from_env()?)?;
//!     let account = auth_client.account_information().await?;
//!     println!("Balances: {:?}", account.balances);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod decode;
pub mod endpoints;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{BinanceRestClient, ClientConfig, DEFAULT_BASE_URL};
pub use decode::{decode, DecodeError, Decoded, ResponseShape};
pub use endpoints::{BinanceRequest, EndpointDescriptor};
pub use error::{RestError, RestResult};
pub use transport::{HttpResponse, ReqwestTransport, Transport, TransportError};

pub use binance_auth::{Authenticator, Credentials, ReceiveWindow};
pub use binance_types::{
    CandlestickInterval, ExchangeError, OrderSide, OrderStatus, OrderType, TimeInForce,
};

// Re-export endpoint-specific types
pub use types::{Candlestick, DepthLevel, Empty, Order};
