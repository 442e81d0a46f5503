//! Main REST client implementation

use std::sync::Arc;
use std::time::Duration;

use binance_auth::{AuthError, Authenticator, Credentials, ReceiveWindow};
use binance_types::{CandlestickInterval, SIGNATURE};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

use crate::decode::{decode, Decoded};
use crate::endpoints::{
    AccountInfo, AccountInformation, AccountTrade, AccountTrades, AggregateTrade,
    AggregateTrades, AllBookTickers, AllOrders, AllPrices, BinanceRequest, BookTickerMap,
    CancelOrder, CancelOrderAck, Candlesticks, Depth, DepthSnapshot, NewOrder, NewOrderAck,
    OpenOrders, Ping, PriceMap, QueryOrder, ServerTime, ServerTimeResponse, TestNewOrder,
    Ticker24h, Ticker24hStats,
};
use crate::error::{RestError, RestResult};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Candlestick, Empty, Order};

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.binance.com/api/";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the receive window
pub const RECV_WINDOW_ENV: &str = "BINANCE_RECV_WINDOW_MS";

/// Binance REST API client
///
/// Every call runs the same pipeline: build the wire request, sign it if it
/// carries a timestamp, send it, then decode the body as either an exchange
/// error or the endpoint's declared response. Nothing is retried.
///
/// # Example
///
/// ```no_run
/// use binance_rest::{BinanceRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BinanceRestClient::new()?;
///     let depth = client.depth("ETHBTC", Some(5)).await?;
///
///     // With authentication for signed endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BinanceRestClient::with_credentials(creds)?;
///     let account = auth_client.account_information().await?;
///
///     Ok(())
/// }
/// ```
pub struct BinanceRestClient<T = ReqwestTransport> {
    transport: Arc<T>,
    authenticator: Authenticator,
}

impl BinanceRestClient<ReqwestTransport> {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> RestResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    pub fn with_credentials(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> RestResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(
                config
                    .user_agent
                    .as_deref()
                    .unwrap_or(concat!("binance-rest/", env!("CARGO_PKG_VERSION"))),
            )
            .build()
            .map_err(crate::transport::TransportError::from)?;

        info!(base_url = %config.base_url, "Created Binance REST client");

        let transport = ReqwestTransport::new(http_client, config.base_url);
        let authenticator = Authenticator::new(config.credentials, config.recv_window);
        Ok(Self::with_transport(transport, authenticator))
    }
}

impl<T: Transport> BinanceRestClient<T> {
    /// Create a client over any transport
    pub fn with_transport(transport: T, authenticator: Authenticator) -> Self {
        Self {
            transport: Arc::new(transport),
            authenticator,
        }
    }

    /// Check if the client has credentials for signed endpoints
    pub fn has_credentials(&self) -> bool {
        self.authenticator.has_credentials()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn recv_window(&self) -> ReceiveWindow {
        self.authenticator.recv_window()
    }

    /// Send one request and decode its response
    #[instrument(skip(self, request), fields(method = %R::ENDPOINT.method, path = R::ENDPOINT.path))]
    pub async fn send<R: BinanceRequest>(&self, request: &R) -> RestResult<R::Response> {
        let unsigned = request.to_http_request()?;
        let wire = self.authenticator.authenticate(&unsigned)?;
        debug!(signed = wire.has_param(SIGNATURE), "Dispatching request");

        let response = self.transport.execute(wire).await?;

        match decode::<R::Response>(&response.body, R::ENDPOINT.shape) {
            Ok(Decoded::Success(value)) => Ok(value),
            Ok(Decoded::Error(error)) => {
                debug!(status = response.status, code = error.code, msg = %error.message, "Exchange rejected request");
                Err(RestError::Exchange(error))
            }
            Err(error) => {
                warn!(
                    status = response.status,
                    reason = %error.reason,
                    body = %error.body,
                    "Malformed response"
                );
                Err(error.into())
            }
        }
    }

    // ========================================================================
    // General Endpoints
    // ========================================================================

    /// Test connectivity
    pub async fn ping(&self) -> RestResult<Empty> {
        self.send(&Ping).await
    }

    /// Get server time
    pub async fn server_time(&self) -> RestResult<ServerTimeResponse> {
        self.send(&ServerTime).await
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get orderbook depth for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Trading pair (e.g., "ETHBTC")
    /// * `limit` - Number of price levels; `None` or `Some(0)` uses the default
    pub async fn depth(&self, symbol: &str, limit: Option<u32>) -> RestResult<DepthSnapshot> {
        self.send(&Depth {
            symbol: symbol.to_string(),
            limit,
        })
        .await
    }

    /// Get compressed, aggregate trades
    pub async fn aggregate_trades(
        &self,
        request: &AggregateTrades,
    ) -> RestResult<Vec<AggregateTrade>> {
        self.send(request).await
    }

    /// Get the most recent klines for a symbol
    pub async fn candlesticks(
        &self,
        symbol: &str,
        interval: CandlestickInterval,
        limit: Option<u32>,
    ) -> RestResult<Vec<Candlestick>> {
        let mut request = Candlesticks::new(symbol, interval);
        request.limit = limit;
        self.send(&request).await
    }

    /// Get 24 hour statistics for a symbol
    pub async fn ticker_24h(&self, symbol: &str) -> RestResult<Ticker24hStats> {
        self.send(&Ticker24h::new(symbol)).await
    }

    /// Get the latest price of every symbol
    pub async fn all_prices(&self) -> RestResult<PriceMap> {
        self.send(&AllPrices).await
    }

    /// Get the best bid/ask of every symbol
    pub async fn all_book_tickers(&self) -> RestResult<BookTickerMap> {
        self.send(&AllBookTickers).await
    }

    // ========================================================================
    // Signed Trading Endpoints
    // ========================================================================

    /// Place a new order
    pub async fn new_order(&self, order: &NewOrder) -> RestResult<NewOrderAck> {
        self.send(order).await
    }

    /// Validate an order without placing it
    pub async fn test_new_order(&self, order: &NewOrder) -> RestResult<Empty> {
        self.send(&TestNewOrder(order.clone())).await
    }

    /// Check an order's status
    pub async fn query_order(&self, query: &QueryOrder) -> RestResult<Order> {
        self.send(query).await
    }

    /// Cancel an order by exchange id
    pub async fn cancel_order(&self, symbol: &str, order_id: u64) -> RestResult<CancelOrderAck> {
        self.send(&CancelOrder::by_order_id(symbol, order_id)).await
    }

    /// Get all open orders on a symbol
    pub async fn open_orders(&self, symbol: &str) -> RestResult<Vec<Order>> {
        self.send(&OpenOrders::new(symbol)).await
    }

    /// Get all orders on a symbol
    pub async fn all_orders(&self, request: &AllOrders) -> RestResult<Vec<Order>> {
        self.send(request).await
    }

    // ========================================================================
    // Signed Account Endpoints
    // ========================================================================

    /// Get account information and non-zero balances
    pub async fn account_information(&self) -> RestResult<AccountInfo> {
        self.send(&AccountInformation::new()).await
    }

    /// Get this account's trades on a symbol
    pub async fn account_trades(&self, symbol: &str) -> RestResult<Vec<AccountTrade>> {
        self.send(&AccountTrades::new(symbol)).await
    }
}

impl<T> Clone for BinanceRestClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            authenticator: self.authenticator.clone(),
        }
    }
}

impl<T> std::fmt::Debug for BinanceRestClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceRestClient")
            .field("has_credentials", &self.authenticator.has_credentials())
            .field("recv_window_ms", &self.authenticator.recv_window().as_millis())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Receive window for signed requests
    pub recv_window: ReceiveWindow,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            recv_window: ReceiveWindow::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the environment
    ///
    /// Credentials are read from `BINANCE_API_KEY` / `BINANCE_SECRET_KEY`
    /// when both are set; the receive window from `BINANCE_RECV_WINDOW_MS`.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::default();

        match Credentials::from_env() {
            Ok(credentials) => config.credentials = Some(credentials),
            Err(AuthError::EnvVarNotSet(var)) => {
                debug!(%var, "No credentials in environment");
            }
            Err(e) => return Err(e.into()),
        }

        if let Ok(raw) = std::env::var(RECV_WINDOW_ENV) {
            let millis = raw.trim().parse::<u64>().map_err(|e| {
                RestError::InvalidParameter(format!("{}={:?}: {}", RECV_WINDOW_ENV, raw, e))
            })?;
            config.recv_window = ReceiveWindow::from_millis(millis);
        }

        Ok(config)
    }

    /// Set the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the receive window
    pub fn with_recv_window(mut self, recv_window: ReceiveWindow) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
