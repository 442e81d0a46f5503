//! Common test utilities and fixtures for integration tests
//!
//! Contains sample JSON bodies in the shapes the Binance REST API returns,
//! and an in-memory transport that records requests and replays canned
//! responses.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use binance_rest::{
    Authenticator, BinanceRestClient, Credentials, HttpResponse, ReceiveWindow, Transport,
    TransportError,
};
use binance_types::HttpRequest;

pub const API_KEY: &str = "vmPUZE6mv9SD5VNHk4HlWFsOr6aKE2zvsw0MuIgwCIPy6utIco14y7Ju91duEh8A";
pub const SECRET_KEY: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";

/// A fixed request timestamp (2017-07-12T02:41:59.559Z)
pub const TIMESTAMP_MS: i64 = 1_499_827_319_559;

/// Sample error body
pub const INVALID_SYMBOL: &str = r#"{"code": -1121, "msg": "Invalid symbol."}"#;

/// Sample clock-skew rejection
pub const TIMESTAMP_OUTSIDE_WINDOW: &str =
    r#"{"code": -1021, "msg": "Timestamp for this request is outside of the recvWindow."}"#;

/// Sample ping response
pub const PING: &str = "{}";

/// Sample server time response
pub const SERVER_TIME: &str = r#"{"serverTime": 1499827319559}"#;

/// Sample depth snapshot
pub const DEPTH: &str = r#"{
    "lastUpdateId": 1027024,
    "bids": [
        ["4.00000000", "431.00000000", []],
        ["3.99000000", "9.00000000", []]
    ],
    "asks": [
        ["4.00000200", "12.00000000", []]
    ]
}"#;

/// Sample klines response
pub const KLINES: &str = r#"[
    [1499040000000, "0.01634790", "0.80000000", "0.01575800", "0.01577100", "148976.11427815", 1499644799999, "2434.19055334", 308, "1756.87402397", "28.46694368", "17928899.62484339"],
    [1499644800000, "0.01577100", "0.01600000", "0.01500000", "0.01590000", "1000.00000000", 1500249599999, "15.90000000", 42, "500.00000000", "7.95000000"]
]"#;

/// Sample allPrices response
pub const ALL_PRICES: &str = r#"[
    {"symbol": "ETHBTC", "price": "0.07946600"},
    {"symbol": "LTCBTC", "price": "0.01850000"},
    {"symbol": "BNBBTC", "price": "0.00000100"}
]"#;

/// Sample allBookTickers response
pub const ALL_BOOK_TICKERS: &str = r#"[
    {"symbol": "LTCBTC", "bidPrice": "4.00000000", "bidQty": "431.00000000", "askPrice": "4.00000200", "askQty": "9.00000000"},
    {"symbol": "ETHBTC", "bidPrice": "0.07946700", "bidQty": "9.00000000", "askPrice": "100000.00000000", "askQty": "1000.00000000"}
]"#;

/// Sample 24hr ticker
pub const TICKER_24H: &str = r#"{
    "priceChange": "-94.99999800",
    "priceChangePercent": "-95.960",
    "weightedAvgPrice": "0.29628482",
    "prevClosePrice": "0.10002000",
    "lastPrice": "4.00000200",
    "bidPrice": "4.00000000",
    "askPrice": "4.00000200",
    "openPrice": "99.00000000",
    "highPrice": "100.00000000",
    "lowPrice": "0.10000000",
    "volume": "8913.30000000",
    "openTime": 1499783499040,
    "closeTime": 1499869899040,
    "firstId": 28385,
    "lastId": 28460,
    "count": 76
}"#;

/// Sample new order acknowledgement
pub const NEW_ORDER_ACK: &str = r#"{
    "symbol": "LTCBTC",
    "orderId": 28,
    "clientOrderId": "6gCrw2kRUAF9CvJDGP16IP",
    "transactTime": 1507725176595
}"#;

/// Sample order query response
pub const ORDER: &str = r#"{
    "symbol": "LTCBTC",
    "orderId": 1,
    "clientOrderId": "myOrder1",
    "price": "0.1",
    "origQty": "1.0",
    "executedQty": "0.0",
    "status": "NEW",
    "timeInForce": "GTC",
    "type": "LIMIT",
    "side": "BUY",
    "stopPrice": "0.0",
    "icebergQty": "0.0",
    "time": 1499827319559
}"#;

/// Sample cancel acknowledgement
pub const CANCEL_ACK: &str = r#"{
    "symbol": "LTCBTC",
    "origClientOrderId": "myOrder1",
    "orderId": 1,
    "clientOrderId": "cancelMyOrder1"
}"#;

/// Sample account information
pub const ACCOUNT: &str = r#"{
    "makerCommission": 15,
    "takerCommission": 15,
    "buyerCommission": 0,
    "sellerCommission": 0,
    "canTrade": true,
    "canWithdraw": true,
    "canDeposit": true,
    "balances": [
        {"asset": "BTC", "free": "4723846.89208129", "locked": "0.00000000"},
        {"asset": "LTC", "free": "4763368.68006011", "locked": "0.00000000"},
        {"asset": "XRP", "free": "0.00000000", "locked": "0.00000000"}
    ]
}"#;

/// Transport that records every request and replays queued responses
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queue a transport failure
    pub fn fail(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// All requests seen so far
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError::Other(message)),
            None => Err(TransportError::Other("no response queued".to_string())),
        }
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, SECRET_KEY).expect("valid test credentials")
}

/// Client without credentials over the given transport
pub fn public_client(transport: RecordingTransport) -> BinanceRestClient<RecordingTransport> {
    BinanceRestClient::with_transport(transport, Authenticator::public())
}

/// Client with test credentials over the given transport
pub fn signed_client(transport: RecordingTransport) -> BinanceRestClient<RecordingTransport> {
    BinanceRestClient::with_transport(
        transport,
        Authenticator::new(Some(credentials()), ReceiveWindow::default()),
    )
}
