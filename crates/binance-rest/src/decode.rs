//! Response decoding
//!
//! The exchange has no status discriminator in its payloads: an error is an
//! object carrying an integer `code` and a string `msg`, and anything else is
//! a success in one of four layouts. Decoding is therefore two attempts:
//!
//! 1. as [`ExchangeError`] (integer `code` and string `msg` present),
//! 2. otherwise as the endpoint's declared [`ResponseShape`].
//!
//! A body that fits neither is a [`DecodeError`] carrying the raw body. The
//! HTTP status is never consulted.

use std::fmt;

use binance_types::ExchangeError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Field carrying the key of each element in a symbol-keyed response
pub const SYMBOL_FIELD: &str = "symbol";

/// Top-level layout of a successful response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    /// A single JSON object
    Object,
    /// An array of JSON objects
    ObjectArray,
    /// An array of positional arrays
    TupleArray,
    /// An array of objects, each with a `symbol` field, re-keyed by symbol
    SymbolMap,
}

impl ResponseShape {
    /// Check the top-level layout and rewrite it into the form the typed
    /// decoder expects
    ///
    /// Symbol maps become a JSON object keyed by symbol, with the `symbol`
    /// field removed from each value. A repeated symbol overwrites the
    /// earlier entry.
    pub fn prepare(&self, value: Value) -> Result<Value, String> {
        match self {
            Self::Object => match value {
                Value::Object(_) => Ok(value),
                other => Err(format!("expected an object, got {}", kind(&other))),
            },
            Self::ObjectArray => {
                let items = expect_array(&value)?;
                if let Some((i, item)) = items.iter().enumerate().find(|(_, v)| !v.is_object()) {
                    return Err(format!("element {} is {}, expected an object", i, kind(item)));
                }
                Ok(value)
            }
            Self::TupleArray => {
                let items = expect_array(&value)?;
                if let Some((i, item)) = items.iter().enumerate().find(|(_, v)| !v.is_array()) {
                    return Err(format!("element {} is {}, expected an array", i, kind(item)));
                }
                Ok(value)
            }
            Self::SymbolMap => {
                let items = match value {
                    Value::Array(items) => items,
                    other => return Err(format!("expected an array, got {}", kind(&other))),
                };

                let mut map = Map::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    let mut fields = match item {
                        Value::Object(fields) => fields,
                        other => {
                            return Err(format!(
                                "element {} is {}, expected an object",
                                i,
                                kind(&other)
                            ))
                        }
                    };
                    let symbol = match fields.remove(SYMBOL_FIELD) {
                        Some(Value::String(symbol)) => symbol,
                        Some(other) => {
                            return Err(format!(
                                "element {} has a non-string symbol ({})",
                                i,
                                kind(&other)
                            ))
                        }
                        None => return Err(format!("element {} has no symbol", i)),
                    };
                    map.insert(symbol, Value::Object(fields));
                }
                Ok(Value::Object(map))
            }
        }
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object => "object",
            Self::ObjectArray => "array of objects",
            Self::TupleArray => "array of tuples",
            Self::SymbolMap => "symbol map",
        };
        f.write_str(name)
    }
}

fn expect_array(value: &Value) -> Result<&Vec<Value>, String> {
    value
        .as_array()
        .ok_or_else(|| format!("expected an array, got {}", kind(value)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Outcome of decoding a well-formed response
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    /// The exchange rejected the request
    Error(ExchangeError),
    /// The declared success payload
    Success(T),
}

impl<T> Decoded<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn into_result(self) -> Result<T, ExchangeError> {
        match self {
            Self::Error(e) => Err(e),
            Self::Success(value) => Ok(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        match self {
            Self::Error(e) => Decoded::Error(e),
            Self::Success(value) => Decoded::Success(f(value)),
        }
    }
}

/// A body that is neither an error payload nor the declared shape
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed response ({reason})")]
pub struct DecodeError {
    /// What did not match
    pub reason: String,
    /// Raw body, lossily decoded as UTF-8
    pub body: String,
}

impl DecodeError {
    fn new(reason: impl Into<String>, body: &[u8]) -> Self {
        Self {
            reason: reason.into(),
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }
}

/// Decode a response body against its declared shape
pub fn decode<T: DeserializeOwned>(
    body: &[u8],
    shape: ResponseShape,
) -> Result<Decoded<T>, DecodeError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| DecodeError::new(format!("invalid JSON: {}", e), body))?;

    if let Ok(error) = ExchangeError::deserialize(&value) {
        return Ok(Decoded::Error(error));
    }

    let prepared = shape
        .prepare(value)
        .map_err(|reason| DecodeError::new(format!("{}: {}", shape, reason), body))?;

    serde_json::from_value(prepared)
        .map(Decoded::Success)
        .map_err(|e| DecodeError::new(format!("{}: {}", shape, e), body))
}
