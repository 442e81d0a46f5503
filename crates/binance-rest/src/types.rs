//! Response types shared across endpoints

use binance_types::codec::{self, WireDecimal, WireMillis};
use binance_types::{OrderSide, OrderStatus, OrderType, TimeInForce};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================================================
// Empty Response
// ============================================================================

/// Response with no fields (`{}`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

// ============================================================================
// Orders
// ============================================================================

/// An order as reported by the order query endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub symbol: String,
    pub order_id: u64,
    pub client_order_id: String,
    #[serde(with = "codec::decimal")]
    pub price: Decimal,
    #[serde(rename = "origQty", with = "codec::decimal")]
    pub original_quantity: Decimal,
    #[serde(rename = "executedQty", with = "codec::decimal")]
    pub executed_quantity: Decimal,
    pub status: OrderStatus,
    pub time_in_force: TimeInForce,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub side: OrderSide,
    #[serde(with = "codec::decimal")]
    pub stop_price: Decimal,
    #[serde(rename = "icebergQty", with = "codec::decimal")]
    pub iceberg_quantity: Decimal,
    #[serde(with = "codec::millis")]
    pub time: DateTime<Utc>,
}

impl Order {
    /// Quantity still open on the book
    pub fn remaining_quantity(&self) -> Decimal {
        self.original_quantity - self.executed_quantity
    }

    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order({}, {}, {})",
            self.symbol, self.order_id, self.client_order_id
        )
    }
}

// ============================================================================
// Positional Types
// ============================================================================

/// One price level of an order book, sent as `["price", "qty", ...]`
///
/// Trailing elements beyond quantity are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl DepthLevel {
    /// Notional value at this level
    pub fn notional(&self) -> Decimal {
        self.price * self.quantity
    }
}

impl<'de> Deserialize<'de> for DepthLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelVisitor;

        impl<'de> Visitor<'de> for LevelVisitor {
            type Value = DepthLevel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a [price, quantity] array")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let WireDecimal(price) = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let WireDecimal(quantity) = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(DepthLevel { price, quantity })
            }
        }

        deserializer.deserialize_seq(LevelVisitor)
    }
}

/// A kline/candlestick bar
///
/// Sent as a 12-element positional array; the last element is unused by the
/// exchange and may be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candlestick {
    pub open_time: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub asset_volume: Decimal,
    pub close_time: DateTime<Utc>,
    pub quote_volume: Decimal,
    pub trades: u64,
    pub taker_buy_asset_volume: Decimal,
    pub taker_buy_quote_volume: Decimal,
    pub ignored: Option<String>,
}

impl Candlestick {
    /// High minus low
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// Close above open
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

impl<'de> Deserialize<'de> for Candlestick {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CandlestickVisitor;

        impl CandlestickVisitor {
            fn required<'de, A, T>(&self, seq: &mut A, index: usize) -> Result<T, A::Error>
            where
                A: SeqAccess<'de>,
                T: Deserialize<'de>,
            {
                seq.next_element()?
                    .ok_or_else(|| de::Error::invalid_length(index, self))
            }
        }

        impl<'de> Visitor<'de> for CandlestickVisitor {
            type Value = Candlestick;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a kline array of 11 or 12 elements")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let WireMillis(open_time) = self.required(&mut seq, 0)?;
                let WireDecimal(open) = self.required(&mut seq, 1)?;
                let WireDecimal(high) = self.required(&mut seq, 2)?;
                let WireDecimal(low) = self.required(&mut seq, 3)?;
                let WireDecimal(close) = self.required(&mut seq, 4)?;
                let WireDecimal(asset_volume) = self.required(&mut seq, 5)?;
                let WireMillis(close_time) = self.required(&mut seq, 6)?;
                let WireDecimal(quote_volume) = self.required(&mut seq, 7)?;
                let trades: u64 = self.required(&mut seq, 8)?;
                let WireDecimal(taker_buy_asset_volume) = self.required(&mut seq, 9)?;
                let WireDecimal(taker_buy_quote_volume) = self.required(&mut seq, 10)?;
                let ignored: Option<String> = seq.next_element()?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(Candlestick {
                    open_time,
                    open,
                    high,
                    low,
                    close,
                    asset_volume,
                    close_time,
                    quote_volume,
                    trades,
                    taker_buy_asset_volume,
                    taker_buy_quote_volume,
                    ignored,
                })
            }
        }

        deserializer.deserialize_seq(CandlestickVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const KLINE: &str = r#"[1499040000000, "0.01634790", "0.80000000", "0.01575800", "0.01577100", "148976.11427815", 1499644799999, "2434.19055334", 308, "1756.87402397", "28.46694368", "17928899.62484339"]"#;

    #[test]
    fn test_candlestick_positions() {
        let candle: Candlestick = serde_json::from_str(KLINE).unwrap();

        assert_eq!(codec::timestamp_to_millis(&candle.open_time), 1_499_040_000_000);
        assert_eq!(codec::timestamp_to_millis(&candle.close_time), 1_499_644_799_999);
        assert!(candle.close_time >= candle.open_time);

        assert_eq!(candle.high, dec!(0.80000000));
        assert!(candle.high >= candle.open);
        assert!(candle.high >= candle.low);
        assert!(candle.high >= candle.close);

        assert_eq!(candle.trades, 308);
        assert_eq!(candle.ignored.as_deref(), Some("17928899.62484339"));
    }

    #[test]
    fn test_candlestick_without_trailing_field() {
        let short = r#"[1499040000000, "0.01634790", "0.80000000", "0.01575800", "0.01577100", "148976.11427815", 1499644799999, "2434.19055334", 308, "1756.87402397", "28.46694368"]"#;
        let candle: Candlestick = serde_json::from_str(short).unwrap();
        assert_eq!(candle.ignored, None);
        assert_eq!(candle.taker_buy_quote_volume, dec!(28.46694368));
    }

    #[test]
    fn test_candlestick_too_short() {
        let result: Result<Candlestick, _> =
            serde_json::from_str(r#"[1499040000000, "0.01634790"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_candlestick_from_value() {
        let value: serde_json::Value = serde_json::from_str(KLINE).unwrap();
        let candle: Candlestick = serde_json::from_value(value).unwrap();
        assert!(candle.range() > Decimal::ZERO);
    }

    #[test]
    fn test_depth_level_ignores_trailing() {
        let level: DepthLevel = serde_json::from_str(r#"["4.00000000", "431.00000000", []]"#).unwrap();
        assert_eq!(level.price, dec!(4));
        assert_eq!(level.quantity, dec!(431));
        assert_eq!(level.notional(), dec!(1724));
    }

    #[test]
    fn test_order_renames() {
        let json = r#"{
            "symbol": "LTCBTC",
            "orderId": 1,
            "clientOrderId": "myOrder1",
            "price": "0.1",
            "origQty": "1.0",
            "executedQty": "0.25",
            "status": "CANCELED",
            "timeInForce": "GTC",
            "type": "LIMIT",
            "side": "BUY",
            "stopPrice": "0.0",
            "icebergQty": "0.0",
            "time": 1499827319559
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.original_quantity, dec!(1.0));
        assert_eq!(order.executed_quantity, dec!(0.25));
        assert_eq!(order.remaining_quantity(), dec!(0.75));
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.iceberg_quantity, Decimal::ZERO);
        assert_eq!(order.to_string(), "Order(LTCBTC, 1, myOrder1)");
    }
}
