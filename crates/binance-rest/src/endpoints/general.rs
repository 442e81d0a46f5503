//! Connectivity endpoints

use binance_types::codec;
use binance_types::Params;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::{BinanceRequest, EndpointDescriptor};
use crate::decode::ResponseShape;
use crate::types::Empty;

/// Test connectivity to the REST API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ping;

impl BinanceRequest for Ping {
    type Response = Empty;
    const ENDPOINT: EndpointDescriptor = EndpointDescriptor::get("v1/ping", ResponseShape::Object);

    fn params(&self) -> Params {
        Params::new()
    }
}

/// Get the current server time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerTime;

impl BinanceRequest for ServerTime {
    type Response = ServerTimeResponse;
    const ENDPOINT: EndpointDescriptor = EndpointDescriptor::get("v1/time", ResponseShape::Object);

    fn params(&self) -> Params {
        Params::new()
    }
}

/// Server time, with the local clock sampled when the response was decoded
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTimeResponse {
    #[serde(with = "codec::millis")]
    pub server_time: DateTime<Utc>,
    #[serde(skip_deserializing, default = "Utc::now")]
    pub local_time: DateTime<Utc>,
}

impl ServerTimeResponse {
    /// Server clock minus local clock
    pub fn delta(&self) -> Duration {
        self.server_time - self.local_time
    }
}
