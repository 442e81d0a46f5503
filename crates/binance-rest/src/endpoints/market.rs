//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use std::collections::HashMap;

use binance_types::codec;
use binance_types::{CandlestickInterval, Params};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{BinanceRequest, EndpointDescriptor};
use crate::decode::ResponseShape;
use crate::types::{Candlestick, DepthLevel};

// ============================================================================
// Order Book
// ============================================================================

/// Order book depth for a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Depth {
    pub symbol: String,
    /// Default 100; `Some(0)` is treated as unset
    pub limit: Option<u32>,
}

impl Depth {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl BinanceRequest for Depth {
    type Response = DepthSnapshot;
    const ENDPOINT: EndpointDescriptor = EndpointDescriptor::get("v1/depth", ResponseShape::Object);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push_nonzero("limit", self.limit);
        params
    }
}

/// Order book snapshot
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthSnapshot {
    pub last_update_id: u64,
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
}

impl DepthSnapshot {
    /// Get the best bid
    pub fn best_bid(&self) -> Option<&DepthLevel> {
        self.bids.first()
    }

    /// Get the best ask
    pub fn best_ask(&self) -> Option<&DepthLevel> {
        self.asks.first()
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }
}

// ============================================================================
// Trades
// ============================================================================

/// Compressed, aggregate trades
///
/// When both `start_time` and `end_time` are set the window must be under
/// 24 hours. With neither nor `from_id`, the most recent trades are returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateTrades {
    pub symbol: String,
    /// Aggregate trade id to start from, inclusive
    pub from_id: Option<u64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Default 500; max 500
    pub limit: Option<u32>,
}

impl AggregateTrades {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            from_id: None,
            start_time: None,
            end_time: None,
            limit: None,
        }
    }

    pub fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl BinanceRequest for AggregateTrades {
    type Response = Vec<AggregateTrade>;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v1/aggTrades", ResponseShape::ObjectArray);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push_nonzero("fromId", self.from_id)
            .push_opt("startTime", self.start_time)
            .push_opt("endTime", self.end_time)
            .push_nonzero("limit", self.limit);
        params
    }
}

/// One aggregate trade
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AggregateTrade {
    #[serde(rename = "a")]
    pub aggregate_trade_id: u64,
    #[serde(rename = "p", with = "codec::decimal")]
    pub price: Decimal,
    #[serde(rename = "q", with = "codec::decimal")]
    pub quantity: Decimal,
    #[serde(rename = "f")]
    pub first_trade_id: u64,
    #[serde(rename = "l")]
    pub last_trade_id: u64,
    #[serde(rename = "T", with = "codec::millis")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "m")]
    pub maker_is_buyer: bool,
    #[serde(rename = "M")]
    pub match_is_best: bool,
}

// ============================================================================
// Klines
// ============================================================================

/// Kline/candlestick bars, identified by open time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candlesticks {
    pub symbol: String,
    pub interval: CandlestickInterval,
    /// Default 500; max 500
    pub limit: Option<u32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl Candlesticks {
    pub fn new(symbol: impl Into<String>, interval: CandlestickInterval) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            limit: None,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }
}

impl BinanceRequest for Candlesticks {
    type Response = Vec<Candlestick>;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v1/klines", ResponseShape::TupleArray);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push("interval", self.interval)
            .push_nonzero("limit", self.limit)
            .push_opt("startTime", self.start_time)
            .push_opt("endTime", self.end_time);
        params
    }
}

// ============================================================================
// Tickers
// ============================================================================

/// 24 hour rolling price statistics for a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker24h {
    pub symbol: String,
}

impl Ticker24h {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

impl BinanceRequest for Ticker24h {
    type Response = Ticker24hStats;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v1/ticker/24hr", ResponseShape::Object);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.push("symbol", &self.symbol);
        params
    }
}

/// 24 hour ticker statistics
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24hStats {
    #[serde(with = "codec::decimal")]
    pub price_change: Decimal,
    #[serde(with = "codec::decimal")]
    pub price_change_percent: Decimal,
    #[serde(with = "codec::decimal")]
    pub weighted_avg_price: Decimal,
    #[serde(with = "codec::decimal")]
    pub prev_close_price: Decimal,
    #[serde(with = "codec::decimal")]
    pub last_price: Decimal,
    #[serde(with = "codec::decimal")]
    pub bid_price: Decimal,
    #[serde(with = "codec::decimal")]
    pub ask_price: Decimal,
    #[serde(with = "codec::decimal")]
    pub open_price: Decimal,
    #[serde(with = "codec::decimal")]
    pub high_price: Decimal,
    #[serde(with = "codec::decimal")]
    pub low_price: Decimal,
    #[serde(with = "codec::millis")]
    pub open_time: DateTime<Utc>,
    #[serde(with = "codec::millis")]
    pub close_time: DateTime<Utc>,
    pub first_id: u64,
    pub last_id: u64,
    pub count: u64,
}

impl Ticker24hStats {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.bid_price + self.ask_price) / Decimal::TWO
    }
}

/// Latest price for every symbol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllPrices;

impl BinanceRequest for AllPrices {
    type Response = PriceMap;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v1/ticker/allPrices", ResponseShape::SymbolMap);

    fn params(&self) -> Params {
        Params::new()
    }
}

/// Latest price of one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SymbolPrice {
    #[serde(with = "codec::decimal")]
    pub price: Decimal,
}

/// Symbol to latest price
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct PriceMap(pub HashMap<String, SymbolPrice>);

impl PriceMap {
    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.0.get(symbol).map(|p| p.price)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.price))
    }
}

/// Best bid/ask on the book for every symbol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllBookTickers;

impl BinanceRequest for AllBookTickers {
    type Response = BookTickerMap;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v1/ticker/allBookTickers", ResponseShape::SymbolMap);

    fn params(&self) -> Params {
        Params::new()
    }
}

/// Best bid/ask of one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTicker {
    #[serde(with = "codec::decimal")]
    pub bid_price: Decimal,
    #[serde(rename = "bidQty", with = "codec::decimal")]
    pub bid_quantity: Decimal,
    #[serde(with = "codec::decimal")]
    pub ask_price: Decimal,
    #[serde(rename = "askQty", with = "codec::decimal")]
    pub ask_quantity: Decimal,
}

impl BookTicker {
    pub fn spread(&self) -> Decimal {
        self.ask_price - self.bid_price
    }
}

/// Symbol to best bid/ask
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct BookTickerMap(pub HashMap<String, BookTicker>);

impl BookTickerMap {
    pub fn get(&self, symbol: &str) -> Option<&BookTicker> {
        self.0.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use rust_decimal_macros::dec;

    #[test]
    fn test_depth_zero_limit_omitted() {
        let request = Depth {
            symbol: "ETHBTC".to_string(),
            limit: Some(0),
        }
        .to_http_request()
        .unwrap();
        assert_eq!(request.decoded_query(), "symbol=ETHBTC");

        let request = Depth::new("ETHBTC").with_limit(5).to_http_request().unwrap();
        assert_eq!(request.decoded_query(), "symbol=ETHBTC&limit=5");
    }

    #[test]
    fn test_depth_snapshot() {
        let body = br#"{
            "lastUpdateId": 1027024,
            "bids": [["4.00000000", "431.00000000", []]],
            "asks": [["4.00000200", "12.00000000", []]]
        }"#;
        let snapshot = decode::<DepthSnapshot>(body, Depth::ENDPOINT.shape)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(snapshot.last_update_id, 1027024);
        assert_eq!(snapshot.spread(), Some(dec!(0.000002)));
    }

    #[test]
    fn test_aggregate_trade_params() {
        let start = DateTime::from_timestamp_millis(1_498_793_709_153).unwrap();
        let end = DateTime::from_timestamp_millis(1_498_793_709_999).unwrap();
        let request = AggregateTrades::new("BNBBTC")
            .from_id(0)
            .between(start, end)
            .to_http_request()
            .unwrap();
        assert_eq!(
            request.decoded_query(),
            "symbol=BNBBTC&startTime=1498793709153&endTime=1498793709999"
        );
    }

    #[test]
    fn test_aggregate_trade_renames() {
        let body = br#"[{"a": 26129, "p": "0.01633102", "q": "4.70443515", "f": 27781, "l": 27781, "T": 1498793709153, "m": true, "M": true}]"#;
        let trades = decode::<Vec<AggregateTrade>>(body, AggregateTrades::ENDPOINT.shape)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(trades[0].aggregate_trade_id, 26129);
        assert_eq!(trades[0].price, dec!(0.01633102));
        assert!(trades[0].maker_is_buyer);
    }

    #[test]
    fn test_candlestick_params() {
        let request = Candlesticks::new("ETHBTC", CandlestickInterval::Hour1)
            .with_limit(10)
            .to_http_request()
            .unwrap();
        assert_eq!(request.decoded_query(), "symbol=ETHBTC&interval=1h&limit=10");
        assert_eq!(Candlesticks::ENDPOINT.shape, ResponseShape::TupleArray);
    }

    #[test]
    fn test_all_prices_symbol_map() {
        let body = br#"[{"symbol": "ETHBTC", "price": "0.07946600"}, {"symbol": "LTCBTC", "price": "0.01850000"}]"#;
        let prices = decode::<PriceMap>(body, AllPrices::ENDPOINT.shape)
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.price("ETHBTC"), Some(dec!(0.079466)));
        assert_eq!(prices.price("BNBBTC"), None);
    }

    #[test]
    fn test_book_tickers_symbol_map() {
        let body = br#"[{"symbol": "LTCBTC", "bidPrice": "4.00000000", "bidQty": "431.00000000", "askPrice": "4.00000200", "askQty": "9.00000000"}]"#;
        let tickers = decode::<BookTickerMap>(body, AllBookTickers::ENDPOINT.shape)
            .unwrap()
            .into_result()
            .unwrap();
        let ltc = tickers.get("LTCBTC").unwrap();
        assert_eq!(ltc.bid_quantity, dec!(431));
        assert_eq!(ltc.ask_quantity, dec!(9));
        assert_eq!(ltc.spread(), dec!(0.000002));
    }
}
