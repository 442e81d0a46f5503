//! Order side, order type, time in force, order status and kline interval enums

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Returns the side as spelled on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Limit order - executes at specified price or better
    Limit,
    /// Market order - executes immediately at best available price
    Market,
    /// Stop-loss order
    StopLoss,
    /// Stop-loss limit order
    StopLossLimit,
    /// Take-profit order
    TakeProfit,
    /// Take-profit limit order
    TakeProfitLimit,
    /// Limit order rejected if it would match immediately
    LimitMaker,
}

impl OrderType {
    /// Returns the order type as spelled on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::StopLoss => "STOP_LOSS",
            Self::StopLossLimit => "STOP_LOSS_LIMIT",
            Self::TakeProfit => "TAKE_PROFIT",
            Self::TakeProfitLimit => "TAKE_PROFIT_LIMIT",
            Self::LimitMaker => "LIMIT_MAKER",
        }
    }

    /// Returns true if orders of this type rest on the book at a limit price
    pub fn requires_price(&self) -> bool {
        matches!(
            self,
            Self::Limit | Self::StopLossLimit | Self::TakeProfitLimit | Self::LimitMaker
        )
    }

    /// Returns true if orders of this type must carry a time in force
    pub fn requires_time_in_force(&self) -> bool {
        matches!(self, Self::Limit | Self::StopLossLimit | Self::TakeProfitLimit)
    }
}

/// Time in force for orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancelled
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill or kill
    #[serde(rename = "FOK")]
    FillOrKill,
}

impl TimeInForce {
    /// Returns the time in force as spelled on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GoodTillCancelled => "GTC",
            Self::ImmediateOrCancel => "IOC",
            Self::FillOrKill => "FOK",
        }
    }
}

/// Order status as reported by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Accepted by the engine
    #[serde(rename = "NEW")]
    New,
    /// Partially filled
    #[serde(rename = "PARTIALLY_FILLED")]
    PartiallyFilled,
    /// Completely filled
    #[serde(rename = "FILLED")]
    Filled,
    /// Cancelled by the user (the exchange spells it `CANCELED`)
    #[serde(rename = "CANCELED")]
    Cancelled,
    /// Cancel in progress
    #[serde(rename = "PENDING_CANCEL")]
    PendingCancel,
    /// Rejected by the engine
    #[serde(rename = "REJECTED")]
    Rejected,
    /// Expired per time in force
    #[serde(rename = "EXPIRED")]
    Expired,
}

impl OrderStatus {
    /// Returns true if the order can still trade
    pub fn is_open(&self) -> bool {
        matches!(self, Self::New | Self::PartiallyFilled | Self::PendingCancel)
    }
}

/// Kline/candlestick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandlestickInterval {
    #[serde(rename = "1m")]
    Min1,
    #[serde(rename = "3m")]
    Min3,
    #[serde(rename = "5m")]
    Min5,
    #[serde(rename = "15m")]
    Min15,
    #[serde(rename = "30m")]
    Min30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "2h")]
    Hour2,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "6h")]
    Hour6,
    #[serde(rename = "8h")]
    Hour8,
    #[serde(rename = "12h")]
    Hour12,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "3d")]
    Day3,
    #[serde(rename = "1w")]
    Week1,
    /// One calendar month (capital `M` on the wire)
    #[serde(rename = "1M")]
    Month1,
}

impl CandlestickInterval {
    /// Returns the interval as spelled on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Min1 => "1m",
            Self::Min3 => "3m",
            Self::Min5 => "5m",
            Self::Min15 => "15m",
            Self::Min30 => "30m",
            Self::Hour1 => "1h",
            Self::Hour2 => "2h",
            Self::Hour4 => "4h",
            Self::Hour6 => "6h",
            Self::Hour8 => "8h",
            Self::Hour12 => "12h",
            Self::Day1 => "1d",
            Self::Day3 => "3d",
            Self::Week1 => "1w",
            Self::Month1 => "1M",
        }
    }
}

macro_rules! impl_wire_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_wire_display!(OrderSide, OrderType, TimeInForce, CandlestickInterval);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_spelling_matches_serde() {
        assert_eq!(serde_json::to_string(&OrderSide::Buy).unwrap(), "\"BUY\"");
        assert_eq!(
            serde_json::to_string(&OrderType::StopLossLimit).unwrap(),
            "\"STOP_LOSS_LIMIT\""
        );
        assert_eq!(
            serde_json::to_string(&TimeInForce::GoodTillCancelled).unwrap(),
            "\"GTC\""
        );
        assert_eq!(
            serde_json::to_string(&CandlestickInterval::Month1).unwrap(),
            "\"1M\""
        );
    }

    #[test]
    fn test_cancelled_status_spelling() {
        let status: OrderStatus = serde_json::from_str("\"CANCELED\"").unwrap();
        assert_eq!(status, OrderStatus::Cancelled);
        assert!(!status.is_open());
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderSide::Sell.to_string(), "SELL");
        assert_eq!(CandlestickInterval::Min5.to_string(), "5m");
        assert_eq!(OrderType::LimitMaker.to_string(), "LIMIT_MAKER");
    }

    #[test]
    fn test_price_requirements() {
        assert!(OrderType::Limit.requires_price());
        assert!(OrderType::Limit.requires_time_in_force());
        assert!(!OrderType::Market.requires_price());
        assert!(OrderType::LimitMaker.requires_price());
        assert!(!OrderType::LimitMaker.requires_time_in_force());
    }
}
