use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Compute the request signature for a signed webhook call.
///
/// The signature is the standard-base64 encoding of the HMAC-SHA256
/// digest of `"<timestamp_ms>\n<secret>"`, keyed by the secret itself.
/// Pure function of its inputs; the timestamp is wall-clock
/// milliseconds captured once per dispatch by the caller.
pub fn sign(secret: &str, timestamp_ms: i64) -> String {
    let payload = format!("{timestamp_ms}\n{secret}");

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| Hmac::<Sha256>::new_from_slice(b"default").expect("hmac"));
    mac.update(payload.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
