//! Request parameters and the wire-level request handed to a transport

use crate::codec::{self, CodecError, CodecResult};
use crate::enums::{CandlestickInterval, OrderSide, OrderType, TimeInForce};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// Parameter whose presence marks a request as signed
pub const TIMESTAMP: &str = "timestamp";
/// Receive-window parameter added to signed requests
pub const RECV_WINDOW: &str = "recvWindow";
/// Signature parameter, always the last query parameter of a signed request
pub const SIGNATURE: &str = "signature";
/// Header carrying the API key on signed requests
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns true if parameters travel in a form body rather than the query
    pub fn carries_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request parameter value before wire encoding
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Bool(bool),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
}

impl ParamValue {
    /// Encode the value the way the exchange expects it
    pub fn to_wire(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::UInt(u) => u.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Decimal(d) => codec::encode_decimal(d),
            Self::Timestamp(ts) => codec::timestamp_to_millis(ts).to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Decimal> for ParamValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

macro_rules! impl_enum_param {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(value: $ty) -> Self {
                    Self::Str(value.as_str().to_string())
                }
            }
        )*
    };
}

impl_enum_param!(OrderSide, OrderType, TimeInForce, CandlestickInterval);

/// Ordered request parameters
///
/// Insertion order is preserved so the encoded query (and therefore the
/// signed payload) is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(&'static str, ParamValue)>);

impl Params {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn push(&mut self, name: &'static str, value: impl Into<ParamValue>) -> &mut Self {
        self.0.push((name, value.into()));
        self
    }

    /// Append a parameter only if it is present
    pub fn push_opt<V: Into<ParamValue>>(&mut self, name: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(name, value);
        }
        self
    }

    /// Append an optional numeric parameter, omitting it when unset or `0`
    ///
    /// The exchange reads the presence of fields such as `orderId` or `limit`
    /// as intent, so the zero sentinel must never reach the wire.
    pub fn push_nonzero<V>(&mut self, name: &'static str, value: Option<V>) -> &mut Self
    where
        V: Into<ParamValue> + Default + PartialEq,
    {
        self.push_opt(name, codec::omit_zero(value))
    }

    /// Look up a parameter by name
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Returns true if a parameter with this name is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns true if the request these parameters belong to must be signed
    pub fn has_timestamp(&self) -> bool {
        self.contains(TIMESTAMP)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }

    /// Encode every value, keeping insertion order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.to_wire()))
            .collect()
    }
}

/// A fully-formed request as handed to a transport
///
/// `query` holds raw (not yet percent-encoded) pairs; `body` holds the
/// form-encoded payload exactly as it will be transmitted.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the API base URL (e.g. `v3/order`)
    pub path: String,
    /// Query parameters in order
    pub query: Vec<(String, String)>,
    /// Extra headers
    pub headers: Vec<(String, String)>,
    /// Form-encoded body, empty when the method carries none
    pub body: String,
}

impl HttpRequest {
    /// Create a request with no parameters
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Lower endpoint parameters into a wire request
    ///
    /// GET and DELETE parameters go to the query string; POST and PUT
    /// parameters are form-encoded into the body.
    pub fn from_params(method: Method, path: impl Into<String>, params: &Params) -> CodecResult<Self> {
        let mut request = Self::new(method, path);
        let pairs = params.to_pairs();

        if method.carries_body() {
            if !pairs.is_empty() {
                request.body = serde_urlencoded::to_string(&pairs)
                    .map_err(|e| CodecError::Encoding(e.to_string()))?;
            }
        } else {
            request.query = pairs;
        }

        Ok(request)
    }

    /// Percent-encoded query string, without the leading `?`
    pub fn query_string(&self) -> CodecResult<String> {
        serde_urlencoded::to_string(&self.query).map_err(|e| CodecError::Encoding(e.to_string()))
    }

    /// Query string with values left unencoded
    pub fn decoded_query(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Decode the form body into pairs (empty if the body is not a form)
    pub fn body_params(&self) -> Vec<(String, String)> {
        serde_urlencoded::from_str(&self.body).unwrap_or_default()
    }

    /// Returns true if the parameter appears in the query or the body
    pub fn has_param(&self, name: &str) -> bool {
        self.query.iter().any(|(k, _)| k == name)
            || self.body_params().iter().any(|(k, _)| k == name)
    }

    /// Look up a query parameter
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a header (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(k, v)| {
                if k == SIGNATURE {
                    (k.as_str(), "[REDACTED]")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(k, v)| {
                if k.eq_ignore_ascii_case(API_KEY_HEADER) {
                    (k.as_str(), "[REDACTED]")
                } else {
                    (k.as_str(), v.as_str())
                }
            })
            .collect();

        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("query", &query)
            .field("headers", &headers)
            .field("body", &self.body)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_identifier_is_omitted() {
        let mut params = Params::new();
        params
            .push("symbol", "BNBETH")
            .push_nonzero("orderId", Some(0u64))
            .push_nonzero("limit", Some(0u32));

        assert_eq!(params.len(), 1);
        assert!(!params.contains("orderId"));
        assert!(!params.contains("limit"));
    }

    #[test]
    fn test_nonzero_identifier_is_kept() {
        let mut params = Params::new();
        params.push_nonzero("orderId", Some(11_691_907u64));
        assert_eq!(params.get("orderId"), Some(&ParamValue::UInt(11_691_907)));
    }

    #[test]
    fn test_param_wire_encoding() {
        let ts = DateTime::from_timestamp_millis(1_499_827_319_559).unwrap();
        let mut params = Params::new();
        params
            .push("side", OrderSide::Buy)
            .push("type", OrderType::Limit)
            .push("timeInForce", TimeInForce::GoodTillCancelled)
            .push("quantity", dec!(1.00000000))
            .push("price", dec!(0.1))
            .push(TIMESTAMP, ts);

        let pairs = params.to_pairs();
        assert_eq!(pairs[0], ("side".to_string(), "BUY".to_string()));
        assert_eq!(pairs[3], ("quantity".to_string(), "1".to_string()));
        assert_eq!(pairs[4], ("price".to_string(), "0.1".to_string()));
        assert_eq!(pairs[5], ("timestamp".to_string(), "1499827319559".to_string()));
        assert!(params.has_timestamp());
    }

    #[test]
    fn test_get_params_go_to_query() {
        let mut params = Params::new();
        params.push("symbol", "ETHBTC").push("limit", 50u32);

        let request = HttpRequest::from_params(Method::Get, "v1/depth", &params).unwrap();
        assert_eq!(request.decoded_query(), "symbol=ETHBTC&limit=50");
        assert!(request.body.is_empty());
    }

    #[test]
    fn test_post_params_go_to_body() {
        let mut params = Params::new();
        params.push("symbol", "ETHBTC").push("newClientOrderId", "my order");

        let request = HttpRequest::from_params(Method::Post, "v3/order", &params).unwrap();
        assert!(request.query.is_empty());
        assert_eq!(request.body, "symbol=ETHBTC&newClientOrderId=my+order");
        assert!(request.has_param("newClientOrderId"));
    }

    #[test]
    fn test_decoded_vs_encoded_query() {
        let mut request = HttpRequest::new(Method::Get, "v3/order");
        request
            .query
            .push(("origClientOrderId".to_string(), "a/b c".to_string()));

        assert_eq!(request.decoded_query(), "origClientOrderId=a/b c");
        assert_eq!(request.query_string().unwrap(), "origClientOrderId=a%2Fb+c");
    }

    #[test]
    fn test_debug_redacts_signature_and_key() {
        let mut request = HttpRequest::new(Method::Get, "v3/account");
        request
            .query
            .push((SIGNATURE.to_string(), "deadbeef".to_string()));
        request
            .headers
            .push((API_KEY_HEADER.to_string(), "my-api-key".to_string()));

        let debug = format!("{:?}", request);
        assert!(!debug.contains("deadbeef"));
        assert!(!debug.contains("my-api-key"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut request = HttpRequest::new(Method::Get, "v1/ping");
        request
            .headers
            .push(("X-MBX-APIKEY".to_string(), "key".to_string()));
        assert_eq!(request.header("x-mbx-apikey"), Some("key"));
    }
}
