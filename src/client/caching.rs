//! Caching HTTP Client
//!
//! Dispatches routes against the API and serves repeated GETs from memory.

use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Url};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{ttl_from_headers, CacheStats, ResponseCache};
use crate::client::request::{build_request, default_headers};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::route::{fingerprint, Route};

// == Caching HTTP Client ==
/// Async client for a single JSON API with a per-instance response cache.
///
/// Clones share the same cache and connection pool. Separately constructed
/// clients never share state.
///
/// Concurrent callers missing on the same fingerprint each go to the network;
/// there is no request coalescing.
#[derive(Clone)]
pub struct CachingHttpClient {
    http: Client,
    config: Arc<ClientConfig>,
    cache: Arc<RwLock<ResponseCache>>,
}

impl CachingHttpClient {
    // == Constructor ==
    /// Builds a client from `config`.
    ///
    /// Fails with `Config` if the base URL or any configured header is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url '{}': {}", config.base_url, e)))?;

        let http = Client::builder()
            .default_headers(default_headers(&config)?)
            .build()?;

        info!(
            "Client initialized: base_url={}, timeout={}s, default_ttl={}s, max_entries={}",
            config.base_url,
            config.request_timeout_seconds,
            config.default_cache_ttl_seconds,
            config.max_cache_entries
        );

        Ok(Self {
            http,
            cache: Arc::new(RwLock::new(ResponseCache::new(config.max_cache_entries))),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Cache key the client uses for `route`.
    pub fn fingerprint(&self, route: &Route) -> String {
        fingerprint(route)
    }

    // == Request ==
    /// Issues `route` and returns the parsed JSON body.
    ///
    /// GET responses are served from cache while fresh and stored on a miss
    /// with the TTL from `Cache-Control: max-age`, or the configured default.
    /// POST, PUT and DELETE always hit the network and never touch the cache.
    pub async fn request(&self, route: &Route) -> Result<Value> {
        if !route.method().is_cacheable() {
            let (value, _) = self.dispatch(route).await?;
            return Ok(value);
        }

        let key = fingerprint(route);

        // Write lock: a lookup may expire the entry and always updates stats
        let cached = {
            let mut cache = self.cache.write().await;
            cache.get(&key)
        };
        if let Some(value) = cached {
            debug!("Cache hit for GET {}", route.endpoint());
            return Ok(value);
        }
        debug!("Cache miss for GET {}, requesting upstream", route.endpoint());

        let (value, headers) = self.dispatch(route).await?;
        let ttl = ttl_from_headers(&headers, self.config.default_cache_ttl_seconds);

        let stored = {
            let mut cache = self.cache.write().await;
            cache.insert(key, value.clone(), ttl)
        };
        if stored {
            debug!("Cached GET {} for {}s", route.endpoint(), ttl);
        } else {
            debug!("GET {} not cached (ttl={}s)", route.endpoint(), ttl);
        }

        Ok(value)
    }

    /// Fetches the legend league players for `day` (`YYYY-MM-DD`).
    pub async fn legends_day(&self, day: &str) -> Result<Value> {
        self.request(&Route::get(format!("v1/legends/players/day/{}", day)))
            .await
    }

    // == Cache Management ==
    /// Drops the cached response for `route`, returning whether one was held.
    pub async fn invalidate(&self, route: &Route) -> bool {
        let key = fingerprint(route);
        self.cache.write().await.remove(&key)
    }

    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// TTL of the fresh cache entry for `route`, if any.
    ///
    /// Doesn't count as a lookup and never expires the entry.
    pub async fn cached_ttl(&self, route: &Route) -> Option<u64> {
        let key = fingerprint(route);
        let cache = self.cache.read().await;
        cache
            .entry(&key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.ttl_seconds)
    }

    // == Dispatch ==
    /// Sends `route` upstream under the configured timeout.
    async fn dispatch(&self, route: &Route) -> Result<(Value, HeaderMap)> {
        let builder = build_request(&self.http, &self.config.base_url, route)?;
        let timeout = self.config.timeout();

        match tokio::time::timeout(timeout, send(builder, route.endpoint())).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "{} {} timed out after {}s",
                    route.method(),
                    route.endpoint(),
                    self.config.request_timeout_seconds
                );
                Err(ClientError::RequestTimeout {
                    endpoint: route.endpoint().to_string(),
                    timeout_secs: self.config.request_timeout_seconds,
                })
            }
        }
    }
}

/// Sends the request and parses a 2xx JSON body.
async fn send(builder: RequestBuilder, endpoint: &str) -> Result<(Value, HeaderMap)> {
    let response = builder.send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!("Upstream returned {} for {}", status, endpoint);
        return Err(ClientError::UpstreamHttp {
            status_code: status.as_u16(),
            endpoint: endpoint.to_string(),
        });
    }

    let headers = response.headers().clone();
    let bytes = response.bytes().await?;
    let value = serde_json::from_slice(&bytes)?;

    Ok((value, headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_base_url() {
        let result = CachingHttpClient::new(ClientConfig::new("not a url"));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[test]
    fn test_new_rejects_bad_token() {
        let config = ClientConfig::new("http://localhost").with_auth_token("line\nbreak");
        let result = CachingHttpClient::new(config);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    #[tokio::test]
    async fn test_fingerprint_matches_route() {
        let client = CachingHttpClient::new(ClientConfig::new("http://localhost")).unwrap();
        let route = Route::get("v1/players");
        assert_eq!(client.fingerprint(&route), route.fingerprint());
    }

    #[tokio::test]
    async fn test_fresh_client_has_empty_cache() {
        let client = CachingHttpClient::new(ClientConfig::new("http://localhost")).unwrap();

        let stats = client.cache_stats().await;
        assert_eq!(stats.total_entries, 0);
        assert!(!client.invalidate(&Route::get("v1/players")).await);
        assert_eq!(client.cached_ttl(&Route::get("v1/players")).await, None);
    }

    #[tokio::test]
    async fn test_clones_share_cache() {
        let client = CachingHttpClient::new(ClientConfig::new("http://localhost")).unwrap();
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.cache, &clone.cache));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Port 9 (discard) on loopback is expected to refuse connections
        let config = ClientConfig::new("http://127.0.0.1:9").with_request_timeout(5);
        let client = CachingHttpClient::new(config).unwrap();

        let result = client.request(&Route::get("v1/players")).await;
        assert!(matches!(
            result,
            Err(ClientError::Transport(_)) | Err(ClientError::RequestTimeout { .. })
        ));
        assert_eq!(client.cache_stats().await.total_entries, 0);
    }
}
