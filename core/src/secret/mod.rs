//! Preview secret generation.
//!
//! Secrets are 16 bytes from the operating system's CSPRNG, hex-encoded and
//! then wrapped in unpadded URL-safe base64, so they travel in a query string
//! without percent-encoding.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Bytes of entropy in a secret from the primary source.
pub const SECRET_BYTES: usize = 16;

/// Generates a fresh, URL-safe preview secret. Never fails.
///
/// Falls back to a lower-entropy secret, with a warning, when the OS random
/// source is unavailable.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    match getrandom::fill(&mut bytes) {
        Ok(()) => encode_secret(&bytes),
        Err(err) => {
            tracing::warn!(error = %err, "secure random source unavailable, issuing degraded secret");
            degraded_secret()
        }
    }
}

fn encode_secret(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(hex::encode(bytes))
}

/// Two base-36 pseudo-random fragments. Not suitable as a bearer credential
/// beyond the one-hour window it lives for.
pub(crate) fn degraded_secret() -> String {
    format!("{}{}", to_base36(pseudo_random()), to_base36(pseudo_random()))
}

fn pseudo_random() -> u64 {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(nanos);
    hasher.write_u64(COUNTER.fetch_add(1, Ordering::Relaxed));
    hasher.finish()
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if n == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests;
