//! Wire codec for decimals, timestamps and durations
//!
//! Binance transmits prices and quantities as JSON strings and every point in
//! time as an integer number of milliseconds since the UNIX epoch. The request
//! builder and the response decoder both go through this module so the two
//! directions always agree.
//!
//! Millisecond encoding is lossy below one millisecond: encoding truncates,
//! so a round trip is exact only to millisecond precision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer};
use std::time::Duration;

/// Errors raised while converting between domain and wire values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// A decimal string could not be parsed exactly
    #[error("Invalid decimal '{value}': {reason}")]
    InvalidDecimal { value: String, reason: String },

    /// A millisecond timestamp is outside the representable range
    #[error("Timestamp out of range: {0}ms")]
    InvalidTimestamp(i64),

    /// Parameters could not be form-encoded
    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Parse a wire decimal string
///
/// Parsing is exact: a value carrying more precision than [`Decimal`] can
/// hold is rejected instead of rounded.
pub fn parse_decimal(value: &str) -> CodecResult<Decimal> {
    Decimal::from_str_exact(value).map_err(|e| CodecError::InvalidDecimal {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Encode a decimal for a request parameter, without trailing zeros
pub fn encode_decimal(value: &Decimal) -> String {
    value.normalize().to_string()
}

/// Encode a timestamp as milliseconds since the epoch (truncating)
pub fn timestamp_to_millis(value: &DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

/// Decode milliseconds since the epoch into a timestamp
pub fn timestamp_from_millis(millis: i64) -> CodecResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(CodecError::InvalidTimestamp(millis))
}

/// Encode a duration as whole milliseconds
pub fn duration_to_millis(value: Duration) -> u64 {
    u64::try_from(value.as_millis()).unwrap_or(u64::MAX)
}

/// Treat the `0` sentinel of optional numeric fields as "not provided"
pub fn omit_zero<T>(value: Option<T>) -> Option<T>
where
    T: Default + PartialEq,
{
    value.filter(|v| *v != T::default())
}

/// Serde adapter for decimals sent as JSON strings
///
/// Use with `#[serde(with = "binance_types::codec::decimal")]`. JSON numbers
/// are rejected: every decimal the exchange sends is quoted.
pub mod decimal {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&encode_decimal(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_decimal(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for millisecond timestamps
///
/// Use with `#[serde(with = "binance_types::codec::millis")]`.
pub mod millis {
    use super::*;
    use serde::de::Error as _;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(timestamp_to_millis(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        timestamp_from_millis(raw).map_err(D::Error::custom)
    }
}

/// A decimal read from its quoted wire form
///
/// Handy inside positional decoders, where field attributes are unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireDecimal(pub Decimal);

impl<'de> Deserialize<'de> for WireDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        decimal::deserialize(deserializer).map(Self)
    }
}

/// A timestamp read from its millisecond wire form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireMillis(pub DateTime<Utc>);

impl<'de> Deserialize<'de> for WireMillis {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        millis::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    #[test]
    fn test_parse_small_decimal_exactly() {
        let value = parse_decimal("0.00000100").unwrap();
        assert_eq!(value, dec!(0.000001));
        assert_eq!(value.scale(), 8);
    }

    #[test]
    fn test_reencoded_decimal_is_numerically_equal() {
        let value = parse_decimal("0.00000100").unwrap();
        let encoded = encode_decimal(&value);
        assert_eq!(encoded, "0.000001");
        assert_eq!(parse_decimal(&encoded).unwrap(), value);
    }

    #[test]
    fn test_invalid_decimal_is_error() {
        assert!(matches!(
            parse_decimal("not-a-number"),
            Err(CodecError::InvalidDecimal { .. })
        ));
        assert!(parse_decimal("").is_err());
    }

    #[test]
    fn test_timestamp_round_trip() {
        let ts = timestamp_from_millis(1_499_827_319_559).unwrap();
        assert_eq!(timestamp_to_millis(&ts), 1_499_827_319_559);
    }

    #[test]
    fn test_timestamp_encoding_truncates_sub_millisecond() {
        let ts = DateTime::from_timestamp(1_499_827_319, 559_999_999).unwrap();
        assert_eq!(timestamp_to_millis(&ts), 1_499_827_319_559);

        let decoded = timestamp_from_millis(timestamp_to_millis(&ts)).unwrap();
        assert_eq!(decoded.timestamp_subsec_millis(), ts.timestamp_subsec_millis());
        assert!(decoded <= ts);
    }

    #[test]
    fn test_timestamp_out_of_range() {
        assert_eq!(
            timestamp_from_millis(i64::MAX),
            Err(CodecError::InvalidTimestamp(i64::MAX))
        );
    }

    #[test]
    fn test_duration_millis() {
        assert_eq!(duration_to_millis(Duration::from_secs(5)), 5000);
        assert_eq!(duration_to_millis(Duration::from_micros(1500)), 1);
    }

    #[test]
    fn test_omit_zero() {
        assert_eq!(omit_zero(Some(0u64)), None);
        assert_eq!(omit_zero(Some(42u64)), Some(42));
        assert_eq!(omit_zero::<u32>(None), None);
    }

    #[derive(Deserialize)]
    struct Quote {
        #[serde(with = "decimal")]
        price: Decimal,
        #[serde(with = "millis")]
        time: DateTime<Utc>,
    }

    #[test]
    fn test_serde_adapters() {
        let quote: Quote =
            serde_json::from_str(r#"{"price": "0.01634790", "time": 1499040000000}"#).unwrap();
        assert_eq!(quote.price, dec!(0.01634790));
        assert_eq!(timestamp_to_millis(&quote.time), 1_499_040_000_000);
    }

    #[test]
    fn test_decimal_adapter_rejects_numbers() {
        let result: Result<Quote, _> =
            serde_json::from_str(r#"{"price": 0.0163, "time": 1499040000000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decimal_adapter_rejects_garbage() {
        let result: Result<Quote, _> =
            serde_json::from_str(r#"{"price": "12,5", "time": 1499040000000}"#);
        assert!(result.is_err());
    }
}
