//! Binance API error code mapping with recovery strategies
//!
//! Every rejection the exchange sends has the shape `{"code": -1121, "msg": "..."}`.
//! [`ExchangeError`] carries that payload verbatim; [`BinanceErrorCode`]
//! classifies the documented numeric codes so callers can branch on them.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Recovery strategy for handling API errors
///
/// These are hints only. The client never retries on its own.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecoveryStrategy {
    /// Exponential backoff before retry
    Backoff {
        initial_ms: u64,
        max_ms: u64,
        multiplier: u32,
    },
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Rebuild the request with a fresh timestamp and sign again
    Resign,
    /// Cannot recover programmatically
    Fatal,
    /// Requires user intervention (e.g. add funds)
    UserAction { message: &'static str },
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default exponential backoff for rate limits
    pub fn rate_limit_backoff() -> Self {
        Self::Backoff {
            initial_ms: 1000,
            max_ms: 60000,
            multiplier: 2,
        }
    }

    /// Default retry for transient server errors
    pub fn service_retry() -> Self {
        Self::Retry {
            delay_ms: 2000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Backoff { initial_ms, .. } => Some(Duration::from_millis(*initial_ms)),
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(self, Self::Backoff { .. } | Self::Retry { .. } | Self::Resign)
    }
}

/// Binance error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// -1000 to -1099: server or network issues
    Server,
    /// -1100 to -1199: request issues
    Request,
    /// -2010 to -2015: order and key rejections
    Order,
    /// Anything else
    Unknown,
}

impl ErrorCategory {
    /// Classify a raw numeric code by range
    pub fn from_code(code: i64) -> Self {
        match code {
            -1099..=-1000 => Self::Server,
            -1199..=-1100 => Self::Request,
            -2099..=-2000 => Self::Order,
            _ => Self::Unknown,
        }
    }
}

/// An error payload returned by the exchange
///
/// Any object with an integer `code` and a string `msg` is an error payload;
/// other fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ExchangeError {
    /// Numeric error code (negative)
    pub code: i64,
    /// Message as sent by the exchange
    #[serde(rename = "msg")]
    pub message: String,
}

impl ExchangeError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// The documented code, if recognized
    pub fn kind(&self) -> Option<BinanceErrorCode> {
        BinanceErrorCode::from_code(self.code)
    }

    /// Error category by code range
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code)
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        self.kind()
            .map(|c| c.recovery_strategy())
            .unwrap_or(RecoveryStrategy::Manual)
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self.kind(),
            Some(BinanceErrorCode::TooManyRequests) | Some(BinanceErrorCode::TooManyOrders)
        )
    }

    /// Check if a new order was rejected for lack of funds
    pub fn is_insufficient_balance(&self) -> bool {
        self.kind() == Some(BinanceErrorCode::NewOrderRejected)
            && self.message.to_lowercase().contains("insufficient balance")
    }
}

/// Documented Binance API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinanceErrorCode {
    // === 10xx: server or network ===
    /// -1000 An unknown error occurred while processing the request
    Unknown,
    /// -1001 Internal error; unable to process your request
    Disconnected,
    /// -1002 You are not authorized to execute this request
    Unauthorized,
    /// -1003 Too many requests
    TooManyRequests,
    /// -1006 An unexpected response was received from the message bus
    UnexpectedResponse,
    /// -1007 Timeout waiting for response from backend server
    Timeout,
    /// -1013 Invalid message (usually a filter failure)
    InvalidMessage,
    /// -1014 Unsupported order combination
    UnknownOrderComposition,
    /// -1015 Too many new orders
    TooManyOrders,
    /// -1016 This service is no longer available
    ServiceShuttingDown,
    /// -1020 This operation is not supported
    UnsupportedOperation,
    /// -1021 Timestamp outside of the receive window
    InvalidTimestamp,
    /// -1022 Signature for this request is not valid
    InvalidSignature,

    // === 11xx: request issues ===
    /// -1100 Illegal characters found in a parameter
    IllegalChars,
    /// -1101 Too many parameters sent for this endpoint
    TooManyParameters,
    /// -1102 A mandatory parameter was not sent, was empty/null, or malformed
    MandatoryParamEmptyOrMalformed,
    /// -1103 An unknown parameter was sent
    UnknownParam,
    /// -1104 Not all sent parameters were read
    UnreadParameters,
    /// -1105 A parameter was empty
    ParamEmpty,
    /// -1106 A parameter was sent when not required
    ParamNotRequired,
    /// -1111 Precision is over the maximum defined for this asset
    BadPrecision,
    /// -1112 No orders on book for symbol
    NoDepth,
    /// -1114 TimeInForce parameter sent when not required
    TimeInForceNotRequired,
    /// -1115 Invalid timeInForce
    InvalidTimeInForce,
    /// -1116 Invalid orderType
    InvalidOrderType,
    /// -1117 Invalid side
    InvalidSide,
    /// -1118 New client order ID was empty
    EmptyNewClientOrderId,
    /// -1119 Original client order ID was empty
    EmptyOrigClientOrderId,
    /// -1120 Invalid interval
    BadInterval,
    /// -1121 Invalid symbol
    BadSymbol,
    /// -1125 This listenKey does not exist
    InvalidListenKey,
    /// -1127 Lookup interval is too big
    MoreThanXxHours,
    /// -1128 Combination of optional parameters invalid
    OptionalParamsBadCombo,
    /// -1130 Invalid data sent for a parameter
    InvalidParameter,

    // === 20xx: order and key rejections ===
    /// -2010 New order rejected
    NewOrderRejected,
    /// -2011 Cancel rejected
    CancelRejected,
    /// -2013 Order does not exist
    NoSuchOrder,
    /// -2014 API-key format invalid
    BadApiKeyFormat,
    /// -2015 Invalid API-key, IP, or permissions for action
    RejectedApiKey,
}

impl BinanceErrorCode {
    /// Look up a numeric code
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            -1000 => Self::Unknown,
            -1001 => Self::Disconnected,
            -1002 => Self::Unauthorized,
            -1003 => Self::TooManyRequests,
            -1006 => Self::UnexpectedResponse,
            -1007 => Self::Timeout,
            -1013 => Self::InvalidMessage,
            -1014 => Self::UnknownOrderComposition,
            -1015 => Self::TooManyOrders,
            -1016 => Self::ServiceShuttingDown,
            -1020 => Self::UnsupportedOperation,
            -1021 => Self::InvalidTimestamp,
            -1022 => Self::InvalidSignature,
            -1100 => Self::IllegalChars,
            -1101 => Self::TooManyParameters,
            -1102 => Self::MandatoryParamEmptyOrMalformed,
            -1103 => Self::UnknownParam,
            -1104 => Self::UnreadParameters,
            -1105 => Self::ParamEmpty,
            -1106 => Self::ParamNotRequired,
            -1111 => Self::BadPrecision,
            -1112 => Self::NoDepth,
            -1114 => Self::TimeInForceNotRequired,
            -1115 => Self::InvalidTimeInForce,
            -1116 => Self::InvalidOrderType,
            -1117 => Self::InvalidSide,
            -1118 => Self::EmptyNewClientOrderId,
            -1119 => Self::EmptyOrigClientOrderId,
            -1120 => Self::BadInterval,
            -1121 => Self::BadSymbol,
            -1125 => Self::InvalidListenKey,
            -1127 => Self::MoreThanXxHours,
            -1128 => Self::OptionalParamsBadCombo,
            -1130 => Self::InvalidParameter,
            -2010 => Self::NewOrderRejected,
            -2011 => Self::CancelRejected,
            -2013 => Self::NoSuchOrder,
            -2014 => Self::BadApiKeyFormat,
            -2015 => Self::RejectedApiKey,
            _ => return None,
        })
    }

    /// The numeric code
    pub fn code(&self) -> i64 {
        match self {
            Self::Unknown => -1000,
            Self::Disconnected => -1001,
            Self::Unauthorized => -1002,
            Self::TooManyRequests => -1003,
            Self::UnexpectedResponse => -1006,
            Self::Timeout => -1007,
            Self::InvalidMessage => -1013,
            Self::UnknownOrderComposition => -1014,
            Self::TooManyOrders => -1015,
            Self::ServiceShuttingDown => -1016,
            Self::UnsupportedOperation => -1020,
            Self::InvalidTimestamp => -1021,
            Self::InvalidSignature => -1022,
            Self::IllegalChars => -1100,
            Self::TooManyParameters => -1101,
            Self::MandatoryParamEmptyOrMalformed => -1102,
            Self::UnknownParam => -1103,
            Self::UnreadParameters => -1104,
            Self::ParamEmpty => -1105,
            Self::ParamNotRequired => -1106,
            Self::BadPrecision => -1111,
            Self::NoDepth => -1112,
            Self::TimeInForceNotRequired => -1114,
            Self::InvalidTimeInForce => -1115,
            Self::InvalidOrderType => -1116,
            Self::InvalidSide => -1117,
            Self::EmptyNewClientOrderId => -1118,
            Self::EmptyOrigClientOrderId => -1119,
            Self::BadInterval => -1120,
            Self::BadSymbol => -1121,
            Self::InvalidListenKey => -1125,
            Self::MoreThanXxHours => -1127,
            Self::OptionalParamsBadCombo => -1128,
            Self::InvalidParameter => -1130,
            Self::NewOrderRejected => -2010,
            Self::CancelRejected => -2011,
            Self::NoSuchOrder => -2013,
            Self::BadApiKeyFormat => -2014,
            Self::RejectedApiKey => -2015,
        }
    }

    /// Error category by code range
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the recovery strategy for this error code
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            // Rate limiting - backoff
            Self::TooManyRequests | Self::TooManyOrders => RecoveryStrategy::rate_limit_backoff(),

            // Backend trouble - retry
            Self::Unknown | Self::Disconnected | Self::UnexpectedResponse | Self::Timeout => {
                RecoveryStrategy::service_retry()
            }

            // Clock skew - sign again with a fresh timestamp
            Self::InvalidTimestamp => RecoveryStrategy::Resign,

            // Credentials and permissions - fatal
            Self::Unauthorized
            | Self::InvalidSignature
            | Self::BadApiKeyFormat
            | Self::RejectedApiKey
            | Self::ServiceShuttingDown
            | Self::UnsupportedOperation => RecoveryStrategy::Fatal,

            // Order rejections - user action
            Self::NewOrderRejected => RecoveryStrategy::UserAction {
                message: "Order rejected - check balance and symbol filters",
            },
            Self::InvalidMessage | Self::BadPrecision => RecoveryStrategy::UserAction {
                message: "Order violates a symbol filter - adjust price or quantity",
            },
            Self::CancelRejected | Self::NoSuchOrder => RecoveryStrategy::UserAction {
                message: "Order not found - it may already be filled or cancelled",
            },

            // Malformed requests - caller bug
            _ => RecoveryStrategy::Manual,
        }
    }

    /// Get a human-readable description of this error
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown error while processing the request",
            Self::Disconnected => "Internal error, unable to process the request",
            Self::Unauthorized => "Not authorized to execute this request",
            Self::TooManyRequests => "Too many requests",
            Self::UnexpectedResponse => "Unexpected response from the message bus",
            Self::Timeout => "Timeout waiting for backend response",
            Self::InvalidMessage => "Invalid message",
            Self::UnknownOrderComposition => "Unsupported order combination",
            Self::TooManyOrders => "Too many new orders",
            Self::ServiceShuttingDown => "Service no longer available",
            Self::UnsupportedOperation => "Operation not supported",
            Self::InvalidTimestamp => "Timestamp outside of the receive window",
            Self::InvalidSignature => "Signature for this request is not valid",
            Self::IllegalChars => "Illegal characters found in a parameter",
            Self::TooManyParameters => "Too many parameters sent",
            Self::MandatoryParamEmptyOrMalformed => "Mandatory parameter missing or malformed",
            Self::UnknownParam => "Unknown parameter sent",
            Self::UnreadParameters => "Not all sent parameters were read",
            Self::ParamEmpty => "A parameter was empty",
            Self::ParamNotRequired => "A parameter was sent when not required",
            Self::BadPrecision => "Precision over the maximum for this asset",
            Self::NoDepth => "No orders on book for symbol",
            Self::TimeInForceNotRequired => "timeInForce sent when not required",
            Self::InvalidTimeInForce => "Invalid timeInForce",
            Self::InvalidOrderType => "Invalid order type",
            Self::InvalidSide => "Invalid side",
            Self::EmptyNewClientOrderId => "New client order ID was empty",
            Self::EmptyOrigClientOrderId => "Original client order ID was empty",
            Self::BadInterval => "Invalid interval",
            Self::BadSymbol => "Invalid symbol",
            Self::InvalidListenKey => "Listen key does not exist",
            Self::MoreThanXxHours => "Lookup interval is too big",
            Self::OptionalParamsBadCombo => "Invalid combination of optional parameters",
            Self::InvalidParameter => "Invalid data sent for a parameter",
            Self::NewOrderRejected => "New order rejected",
            Self::CancelRejected => "Cancel rejected",
            Self::NoSuchOrder => "Order does not exist",
            Self::BadApiKeyFormat => "API key format invalid",
            Self::RejectedApiKey => "Invalid API key, IP, or permissions for action",
        }
    }

    /// Check if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::InvalidSignature
                | Self::InvalidTimestamp
                | Self::BadApiKeyFormat
                | Self::RejectedApiKey
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_payload() {
        let error: ExchangeError =
            serde_json::from_str(r#"{"code": -1121, "msg": "Invalid symbol."}"#).unwrap();
        assert_eq!(error, ExchangeError::new(-1121, "Invalid symbol."));
        assert_eq!(error.kind(), Some(BinanceErrorCode::BadSymbol));
        assert_eq!(error.category(), ErrorCategory::Request);
        assert_eq!(error.to_string(), "-1121: Invalid symbol.");
    }

    #[test]
    fn test_error_payload_ignores_extra_fields() {
        let error: ExchangeError = serde_json::from_str(
            r#"{"code": -2013, "msg": "Order does not exist.", "data": null}"#,
        )
        .unwrap();
        assert_eq!(error.kind(), Some(BinanceErrorCode::NoSuchOrder));
        assert_eq!(error.message, "Order does not exist.");
    }

    #[test]
    fn test_error_payload_requires_code_and_msg() {
        let result: Result<ExchangeError, _> = serde_json::from_str(r#"{"code": -1000}"#);
        assert!(result.is_err());

        let result: Result<ExchangeError, _> = serde_json::from_str(r#"{"msg": "oops"}"#);
        assert!(result.is_err());

        let result: Result<ExchangeError, _> =
            serde_json::from_str(r#"{"code": "-1000", "msg": "oops"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_rate_limit_error() {
        let error = ExchangeError::new(-1003, "Too many requests.");
        assert!(error.is_rate_limit());
        assert!(error.is_retryable());
        assert!(matches!(
            error.recovery_strategy(),
            RecoveryStrategy::Backoff { .. }
        ));
    }

    #[test]
    fn test_timestamp_error_requires_resign() {
        let error = ExchangeError::new(-1021, "Timestamp for this request is outside of the recvWindow.");
        assert_eq!(error.recovery_strategy(), RecoveryStrategy::Resign);
        assert!(error.is_retryable());
        assert!(BinanceErrorCode::InvalidTimestamp.is_auth_error());
    }

    #[test]
    fn test_insufficient_balance() {
        let error = ExchangeError::new(-2010, "Account has insufficient balance for requested action.");
        assert!(error.is_insufficient_balance());
        assert!(!error.is_retryable());
        assert_eq!(error.category(), ErrorCategory::Order);

        let other = ExchangeError::new(-2010, "Order would trigger immediately.");
        assert!(!other.is_insufficient_balance());
    }

    #[test]
    fn test_unknown_code() {
        let error = ExchangeError::new(-9999, "Something new");
        assert_eq!(error.kind(), None);
        assert_eq!(error.category(), ErrorCategory::Unknown);
        assert_eq!(error.recovery_strategy(), RecoveryStrategy::Manual);
    }

    #[test]
    fn test_code_round_trip() {
        for code in [-1000, -1003, -1021, -1022, -1121, -1130, -2010, -2015] {
            let kind = BinanceErrorCode::from_code(code).unwrap();
            assert_eq!(kind.code(), code);
        }
    }

    #[test]
    fn test_recovery_strategies() {
        assert!(matches!(
            BinanceErrorCode::Disconnected.recovery_strategy(),
            RecoveryStrategy::Retry { .. }
        ));
        assert!(matches!(
            BinanceErrorCode::RejectedApiKey.recovery_strategy(),
            RecoveryStrategy::Fatal
        ));
        assert_eq!(
            RecoveryStrategy::rate_limit_backoff().initial_delay(),
            Some(Duration::from_secs(1))
        );
    }
}
