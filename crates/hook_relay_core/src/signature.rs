//! HMAC-SHA256 signing and verification for webhook payloads.
//!
//! GitHub signs every delivery by computing HMAC-SHA256 over the raw
//! request body with the shared webhook secret and sending the result as
//! `X-Hub-Signature-256: sha256=<hex digest>`. [`sign`] reproduces that
//! header value; [`verify`] checks a received header against the body.

use hmac::{Hmac, Mac};
use sha2::Sha256;

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;

type HmacSha256 = Hmac<Sha256>;

/// Prefix carried by hex-encoded HMAC-SHA256 signature headers.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Computes the signature header value for `body` under `secret`.
///
/// The result has the form `sha256=<hex digest>` and is deterministic: the
/// same secret and body always produce the same value.
pub fn sign(secret: &str, body: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(body.as_bytes());

    format!(
        "{}{}",
        SIGNATURE_PREFIX,
        hex::encode(mac.finalize().into_bytes())
    )
}

/// Returns `true` when `signature_header` matches the HMAC-SHA256 of
/// `body` under `secret`.
///
/// A header without the `sha256=` prefix or with a non-hex digest is
/// rejected. The digest comparison is constant-time, so the verdict leaks
/// no information about how much of the signature matched.
pub fn verify(secret: &str, body: &str, signature_header: &str) -> bool {
    let Some(hex_part) = signature_header.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };

    let Ok(received) = hex::decode(hex_part) else {
        return false;
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(body.as_bytes());

    // `verify_slice` uses constant-time comparison internally.
    mac.verify_slice(&received).is_ok()
}
