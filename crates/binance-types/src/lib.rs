//! Shared types for the Binance REST API
//!
//! This crate holds everything the signing and decoding layers agree on:
//! how domain values are spelled on the wire, what an outgoing request looks
//! like before and after authentication, and how exchange error codes are
//! classified. It performs no I/O.
//!
//! # Key Types
//!
//! - [`codec`] - Decimal, timestamp and duration wire conversions
//! - [`Params`], [`ParamValue`] - Ordered request parameters
//! - [`HttpRequest`], [`Method`] - Wire-level request handed to a transport
//! - [`OrderSide`], [`OrderType`], [`TimeInForce`], [`CandlestickInterval`] - Exchange enums
//! - [`ExchangeError`], [`BinanceErrorCode`] - Exchange error mapping with recovery hints

pub mod codec;
pub mod enums;
pub mod error_codes;
pub mod request;

pub use codec::{CodecError, CodecResult};
pub use enums::*;
pub use error_codes::*;
pub use request::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
