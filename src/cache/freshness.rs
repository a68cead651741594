//! Freshness Module
//!
//! Derives a cache TTL from server `Cache-Control` hints.

use std::sync::OnceLock;

use regex::Regex;
use reqwest::header::{HeaderMap, CACHE_CONTROL};

fn max_age_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)max-age\s*=\s*"?(\d+)"#).expect("max-age pattern is valid")
    })
}

/// Extracts `max-age=<digits>` from a `Cache-Control` value.
///
/// Falls back to `default` when the directive is missing or its digits don't
/// fit in a `u64`.
pub fn parse_max_age(cache_control: &str, default: u64) -> u64 {
    max_age_pattern()
        .captures(cache_control)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(default)
}

/// TTL for a response given its headers.
pub fn ttl_from_headers(headers: &HeaderMap, default: u64) -> u64 {
    headers
        .get(CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        .map(|value| parse_max_age(value, default))
        .unwrap_or(default)
}
