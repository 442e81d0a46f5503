//! Endpoint catalog
//!
//! Every endpoint is a request type implementing [`BinanceRequest`]: a static
//! [`EndpointDescriptor`] (path, method, response shape) plus the ordered
//! parameters it sends. Signing and decoding are driven entirely by that
//! data; no endpoint carries its own I/O.

pub mod account;
pub mod general;
pub mod market;
pub mod trading;

pub use account::{AccountInfo, AccountInformation, AccountTrade, AccountTrades, Balance};
pub use general::{Ping, ServerTime, ServerTimeResponse};
pub use market::{
    AggregateTrade, AggregateTrades, AllBookTickers, AllPrices, BookTicker, BookTickerMap,
    Candlesticks, Depth, DepthSnapshot, PriceMap, SymbolPrice, Ticker24h, Ticker24hStats,
};
pub use trading::{
    AllOrders, CancelOrder, CancelOrderAck, NewOrder, NewOrderAck, OpenOrders, QueryOrder,
    TestNewOrder,
};

use binance_types::{HttpRequest, Method, Params, TIMESTAMP};
use serde::de::DeserializeOwned;

use crate::decode::ResponseShape;
use crate::error::RestResult;

/// Static description of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Path relative to the API base (e.g. `v3/order`)
    pub path: &'static str,
    pub method: Method,
    /// Layout of a successful response
    pub shape: ResponseShape,
}

impl EndpointDescriptor {
    pub const fn new(method: Method, path: &'static str, shape: ResponseShape) -> Self {
        Self {
            path,
            method,
            shape,
        }
    }

    pub const fn get(path: &'static str, shape: ResponseShape) -> Self {
        Self::new(Method::Get, path, shape)
    }

    pub const fn post(path: &'static str, shape: ResponseShape) -> Self {
        Self::new(Method::Post, path, shape)
    }

    pub const fn delete(path: &'static str, shape: ResponseShape) -> Self {
        Self::new(Method::Delete, path, shape)
    }
}

/// A request to one Binance endpoint
pub trait BinanceRequest {
    /// Decoded success payload
    type Response: DeserializeOwned;

    /// Where and how the request is sent
    const ENDPOINT: EndpointDescriptor;

    /// Parameters in wire order, zero sentinels already dropped
    fn params(&self) -> Params;

    /// Reject parameter combinations the exchange would refuse
    fn validate(&self) -> RestResult<()> {
        Ok(())
    }

    /// Lower the request into an unsigned wire request
    fn to_http_request(&self) -> RestResult<HttpRequest> {
        self.validate()?;
        let params = self.params();
        Ok(HttpRequest::from_params(
            Self::ENDPOINT.method,
            Self::ENDPOINT.path,
            &params,
        )?)
    }

    /// Returns true if the request will be signed
    fn is_signed(&self) -> bool {
        self.params().contains(TIMESTAMP)
    }
}
