//! Order entry and order query endpoints (signed)
//!
//! Every request here carries a `timestamp`, which is what marks it for
//! signing. It defaults to the time of construction; override it with
//! `with_timestamp` for reproducible requests.

use binance_types::codec;
use binance_types::{OrderSide, OrderType, Params, TimeInForce, TIMESTAMP};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{BinanceRequest, EndpointDescriptor};
use crate::decode::ResponseShape;
use crate::error::{RestError, RestResult};
use crate::types::{Empty, Order};

// ============================================================================
// New Order
// ============================================================================

/// Place a new order
///
/// Price is only sent for order types that rest at a limit price, and time
/// in force only for types that accept one, so a market order never carries
/// either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub time_in_force: Option<TimeInForce>,
    /// Generated by the exchange if not sent
    pub new_client_order_id: Option<String>,
    /// Used with stop orders
    pub stop_price: Option<Decimal>,
    /// Used with iceberg orders
    pub iceberg_quantity: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

impl NewOrder {
    pub fn new(
        symbol: impl Into<String>,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity,
            price: None,
            time_in_force: None,
            new_client_order_id: None,
            stop_price: None,
            iceberg_quantity: None,
            timestamp: Utc::now(),
        }
    }

    /// Market order
    pub fn market(symbol: impl Into<String>, side: OrderSide, quantity: Decimal) -> Self {
        Self::new(symbol, side, OrderType::Market, quantity)
    }

    /// Limit order
    pub fn limit(
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
        time_in_force: TimeInForce,
    ) -> Self {
        Self::new(symbol, side, OrderType::Limit, quantity)
            .with_price(price)
            .with_time_in_force(time_in_force)
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn with_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    pub fn with_stop_price(mut self, stop_price: Decimal) -> Self {
        self.stop_price = Some(stop_price);
        self
    }

    pub fn with_iceberg_quantity(mut self, quantity: Decimal) -> Self {
        self.iceberg_quantity = Some(quantity);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The same order sent to the validation-only endpoint
    pub fn test(self) -> TestNewOrder {
        TestNewOrder(self)
    }

    fn check(&self) -> RestResult<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(RestError::InvalidParameter(format!(
                "quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.order_type.requires_price() && self.price.is_none() {
            return Err(RestError::InvalidParameter(format!(
                "{} order requires a price",
                self.order_type
            )));
        }
        if self.order_type.requires_time_in_force() && self.time_in_force.is_none() {
            return Err(RestError::InvalidParameter(format!(
                "{} order requires a time in force",
                self.order_type
            )));
        }
        Ok(())
    }

    fn order_params(&self) -> Params {
        let price = self.price.filter(|_| self.order_type.requires_price());
        let time_in_force = self
            .time_in_force
            .filter(|_| self.order_type.requires_time_in_force());

        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push("side", self.side)
            .push("type", self.order_type)
            .push_opt("timeInForce", time_in_force)
            .push("quantity", self.quantity)
            .push_opt("price", price)
            .push_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .push_opt("stopPrice", self.stop_price)
            .push_opt("icebergQty", self.iceberg_quantity)
            .push(TIMESTAMP, self.timestamp);
        params
    }
}

impl BinanceRequest for NewOrder {
    type Response = NewOrderAck;
    const ENDPOINT: EndpointDescriptor = EndpointDescriptor::post("v3/order", ResponseShape::Object);

    fn params(&self) -> Params {
        self.order_params()
    }

    fn validate(&self) -> RestResult<()> {
        self.check()
    }
}

/// Acknowledgement of a new order
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderAck {
    pub symbol: String,
    pub order_id: u64,
    pub client_order_id: String,
    #[serde(with = "codec::millis")]
    pub transact_time: DateTime<Utc>,
}

/// Validate a new order without sending it to the matching engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestNewOrder(pub NewOrder);

impl BinanceRequest for TestNewOrder {
    type Response = Empty;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::post("v3/order/test", ResponseShape::Object);

    fn params(&self) -> Params {
        self.0.order_params()
    }

    fn validate(&self) -> RestResult<()> {
        self.0.check()
    }
}

// ============================================================================
// Query / Cancel
// ============================================================================

fn require_order_reference(order_id: Option<u64>, client_id: Option<&str>) -> RestResult<()> {
    let has_id = codec::omit_zero(order_id).is_some();
    let has_client_id = client_id.map_or(false, |id| !id.is_empty());
    if has_id || has_client_id {
        Ok(())
    } else {
        Err(RestError::InvalidParameter(
            "either orderId or origClientOrderId must be provided".to_string(),
        ))
    }
}

/// Check an order's status
///
/// Either `order_id` (non-zero) or `orig_client_order_id` must be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOrder {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub orig_client_order_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl QueryOrder {
    pub fn by_order_id(symbol: impl Into<String>, order_id: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn by_client_order_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl BinanceRequest for QueryOrder {
    type Response = Order;
    const ENDPOINT: EndpointDescriptor = EndpointDescriptor::get("v3/order", ResponseShape::Object);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push_nonzero("orderId", self.order_id)
            .push_opt("origClientOrderId", self.orig_client_order_id.as_deref())
            .push(TIMESTAMP, self.timestamp);
        params
    }

    fn validate(&self) -> RestResult<()> {
        require_order_reference(self.order_id, self.orig_client_order_id.as_deref())
    }
}

/// Cancel an active order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelOrder {
    pub symbol: String,
    pub order_id: Option<u64>,
    pub orig_client_order_id: Option<String>,
    /// Identifies this cancel; generated by the exchange if not sent
    pub new_client_order_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl CancelOrder {
    pub fn by_order_id(symbol: impl Into<String>, order_id: u64) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: Some(order_id),
            orig_client_order_id: None,
            new_client_order_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn by_client_order_id(symbol: impl Into<String>, client_order_id: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            orig_client_order_id: Some(client_order_id.into()),
            new_client_order_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_new_client_order_id(mut self, id: impl Into<String>) -> Self {
        self.new_client_order_id = Some(id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl BinanceRequest for CancelOrder {
    type Response = CancelOrderAck;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::delete("v3/order", ResponseShape::Object);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push_nonzero("orderId", self.order_id)
            .push_opt("origClientOrderId", self.orig_client_order_id.as_deref())
            .push_opt("newClientOrderId", self.new_client_order_id.as_deref())
            .push(TIMESTAMP, self.timestamp);
        params
    }

    fn validate(&self) -> RestResult<()> {
        require_order_reference(self.order_id, self.orig_client_order_id.as_deref())
    }
}

/// Acknowledgement of a cancel
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderAck {
    pub symbol: String,
    pub orig_client_order_id: String,
    pub order_id: u64,
    pub client_order_id: String,
}

// ============================================================================
// Order Lists
// ============================================================================

/// All open orders on a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenOrders {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
}

impl OpenOrders {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl BinanceRequest for OpenOrders {
    type Response = Vec<Order>;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v3/openOrders", ResponseShape::ObjectArray);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push(TIMESTAMP, self.timestamp);
        params
    }
}

/// All orders on a symbol: active, cancelled or filled
///
/// With `order_id` set, returns orders with id >= `order_id`; otherwise the
/// most recent orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllOrders {
    pub symbol: String,
    pub order_id: Option<u64>,
    /// Default 500; max 500
    pub limit: Option<u32>,
    pub timestamp: DateTime<Utc>,
}

impl AllOrders {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            order_id: None,
            limit: None,
            timestamp: Utc::now(),
        }
    }

    pub fn from_order_id(mut self, order_id: u64) -> Self {
        self.order_id = Some(order_id);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl BinanceRequest for AllOrders {
    type Response = Vec<Order>;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v3/allOrders", ResponseShape::ObjectArray);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push_nonzero("orderId", self.order_id)
            .push_nonzero("limit", self.limit)
            .push(TIMESTAMP, self.timestamp);
        params
    }
}
