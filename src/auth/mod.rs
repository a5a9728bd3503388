// src/auth/mod.rs
//
// Admin access gate. Identity is an external concern for this site; all the
// repo carries is the boundary check: a bearer token presented via cookie or
// query parameter, hash-compared against the configured ADMIN_TOKEN. No
// users table, no sessions, no roles.

use crate::config::Config;
use astra::Request;
use sha2::{Digest, Sha256};

const ADMIN_COOKIE: &str = "admin_token";

/// True when the request carries the configured admin token. With no token
/// configured the admin surface is disabled entirely.
pub fn admin_authorized(req: &Request, cfg: &Config) -> bool {
    let expected = match &cfg.admin_token {
        Some(token) => hash_token(token),
        None => return false,
    };

    match presented_token(req) {
        Some(token) => hashes_equal(&hash_token(&token), &expected),
        None => false,
    }
}

/// Token from the `admin_token` cookie, falling back to a `token` query
/// parameter (used on the first visit, before the cookie is set).
fn presented_token(req: &Request) -> Option<String> {
    if let Some(cookie_header) = req.headers().get("Cookie").and_then(|v| v.to_str().ok()) {
        for part in cookie_header.split(';') {
            let mut kv = part.trim().splitn(2, '=');
            if let (Some(k), Some(v)) = (kv.next(), kv.next()) {
                if k == ADMIN_COOKIE && !v.is_empty() {
                    return Some(v.to_string());
                }
            }
        }
    }

    let query = req.uri().query()?;
    for (k, v) in url::form_urlencoded::parse(query.as_bytes()) {
        if k == "token" && !v.is_empty() {
            return Some(v.into_owned());
        }
    }
    None
}

/// Hash a token using SHA-256 so raw secrets never sit in comparisons.
pub fn hash_token(token: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let out = hasher.finalize();
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Constant-time-ish compare for hashes (simple and sufficient here).
pub fn hashes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let h1 = hash_token("hunter2");
        let h2 = hash_token("hunter2");
        assert_eq!(h1, h2);
    }

    #[test]
    fn hash_changes_with_input() {
        assert_ne!(hash_token("hunter2"), hash_token("hunter3"));
    }

    #[test]
    fn hashes_equal_constant_time_style() {
        let a = hash_token("abc");
        let b = hash_token("abc");
        let c = hash_token("abd");

        assert!(hashes_equal(&a, &b));
        assert!(!hashes_equal(&a, &c));
        assert!(!hashes_equal(&a, &a[..16]));
    }
}
