//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.clashking.xyz";

/// Client configuration parameters.
///
/// Fixed at client construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL every endpoint is joined onto
    pub base_url: String,
    /// Bearer token sent with every request, if any
    pub auth_token: Option<String>,
    /// Timeout applied to the whole call (send + body read)
    pub request_timeout_seconds: u64,
    /// TTL for GET responses without a usable `max-age`
    pub default_cache_ttl_seconds: u64,
    /// Maximum number of cached responses
    pub max_cache_entries: usize,
    /// Additional headers attached to every request
    pub extra_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Creates a config for `base_url` with default limits.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_request_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    pub fn with_default_cache_ttl(mut self, seconds: u64) -> Self {
        self.default_cache_ttl_seconds = seconds;
        self
    }

    pub fn with_max_cache_entries(mut self, max_entries: usize) -> Self {
        self.max_cache_entries = max_entries;
        self
    }

    /// Adds a header sent on every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CLASHKING_BASE_URL` - API root (default: https://api.clashking.xyz)
    /// - `CLASHKING_API_TOKEN` - Bearer token (default: none)
    /// - `CLASHKING_TIMEOUT` - Request timeout in seconds (default: 30)
    /// - `CLASHKING_CACHE_TTL` - Default cache TTL in seconds (default: 60)
    /// - `CLASHKING_MAX_ENTRIES` - Maximum cached responses (default: 100)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("CLASHKING_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.base_url),
            auth_token: env::var("CLASHKING_API_TOKEN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            request_timeout_seconds: env::var("CLASHKING_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
            default_cache_ttl_seconds: env::var("CLASHKING_CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_cache_ttl_seconds),
            max_cache_entries: env::var("CLASHKING_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_cache_entries),
            extra_headers: Vec::new(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: None,
            request_timeout_seconds: 30,
            default_cache_ttl_seconds: 60,
            max_cache_entries: 100,
            extra_headers: Vec::new(),
        }
    }
}
