//! HMAC-SHA256 request signatures
//!
//! Binance signs the exact parameter string it receives: the query string
//! followed directly by the request body, with no separator, keyed by the
//! account's secret. The result is sent as lowercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the lowercase hex HMAC-SHA256 of `message` under `key`
pub fn sign(message: impl AsRef<[u8]>, key: impl AsRef<[u8]>) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_ref()).expect("HMAC can take key of any size");
    mac.update(message.as_ref());
    hex::encode(mac.finalize().into_bytes())
}
