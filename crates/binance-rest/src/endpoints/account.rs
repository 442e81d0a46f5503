//! Account endpoints (signed)

use std::collections::HashMap;

use binance_types::codec;
use binance_types::{Params, TIMESTAMP};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::{BinanceRequest, EndpointDescriptor};
use crate::decode::ResponseShape;

// ============================================================================
// Account Information
// ============================================================================

/// Current account information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInformation {
    pub timestamp: DateTime<Utc>,
}

impl AccountInformation {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl Default for AccountInformation {
    fn default() -> Self {
        Self::new()
    }
}

impl BinanceRequest for AccountInformation {
    type Response = AccountInfo;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v3/account", ResponseShape::Object);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.push(TIMESTAMP, self.timestamp);
        params
    }
}

/// Holdings of one asset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub free: Decimal,
    pub locked: Decimal,
    /// `free + locked`
    pub total: Decimal,
}

/// Account permissions, commissions and non-zero balances
///
/// Commissions are in basis points (0.01% each). Assets with nothing free
/// and nothing locked are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAccountInfo")]
pub struct AccountInfo {
    pub maker_commission: i32,
    pub taker_commission: i32,
    pub buyer_commission: i32,
    pub seller_commission: i32,
    pub can_trade: bool,
    pub can_withdraw: bool,
    pub can_deposit: bool,
    pub balances: HashMap<String, Balance>,
}

impl AccountInfo {
    pub fn balance(&self, asset: &str) -> Option<&Balance> {
        self.balances.get(asset)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAccountInfo {
    maker_commission: i32,
    taker_commission: i32,
    buyer_commission: i32,
    seller_commission: i32,
    can_trade: bool,
    can_withdraw: bool,
    can_deposit: bool,
    balances: Vec<RawBalance>,
}

#[derive(Deserialize)]
struct RawBalance {
    asset: String,
    #[serde(with = "codec::decimal")]
    free: Decimal,
    #[serde(with = "codec::decimal")]
    locked: Decimal,
}

impl From<RawAccountInfo> for AccountInfo {
    fn from(raw: RawAccountInfo) -> Self {
        let balances = raw
            .balances
            .into_iter()
            .filter(|b| b.free > Decimal::ZERO || b.locked > Decimal::ZERO)
            .map(|b| {
                let balance = Balance {
                    free: b.free,
                    locked: b.locked,
                    total: b.free + b.locked,
                };
                (b.asset, balance)
            })
            .collect();

        Self {
            maker_commission: raw.maker_commission,
            taker_commission: raw.taker_commission,
            buyer_commission: raw.buyer_commission,
            seller_commission: raw.seller_commission,
            can_trade: raw.can_trade,
            can_withdraw: raw.can_withdraw,
            can_deposit: raw.can_deposit,
            balances,
        }
    }
}

// ============================================================================
// Account Trades
// ============================================================================

/// Trades of this account on a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountTrades {
    pub symbol: String,
    /// Default 500; max 500
    pub limit: Option<u32>,
    /// Trade id to fetch from; otherwise the most recent trades
    pub from_id: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl AccountTrades {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            limit: None,
            from_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl BinanceRequest for AccountTrades {
    type Response = Vec<AccountTrade>;
    const ENDPOINT: EndpointDescriptor =
        EndpointDescriptor::get("v3/myTrades", ResponseShape::ObjectArray);

    fn params(&self) -> Params {
        let mut params = Params::new();
        params
            .push("symbol", &self.symbol)
            .push_nonzero("limit", self.limit)
            .push_nonzero("fromId", self.from_id)
            .push(TIMESTAMP, self.timestamp);
        params
    }
}

/// One fill of this account
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTrade {
    pub id: u64,
    #[serde(with = "codec::decimal")]
    pub price: Decimal,
    #[serde(rename = "qty", with = "codec::decimal")]
    pub quantity: Decimal,
    #[serde(with = "codec::decimal")]
    pub commission: Decimal,
    pub commission_asset: String,
    #[serde(with = "codec::millis")]
    pub time: DateTime<Utc>,
    pub is_buyer: bool,
    pub is_maker: bool,
    pub is_best_match: bool,
}
