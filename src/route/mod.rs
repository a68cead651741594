//! Route Module
//!
//! Immutable descriptors of a single API call.

mod fingerprint;
mod method;

pub use fingerprint::fingerprint;
pub use method::Method;

use serde_json::Value;

use crate::error::{ClientError, Result};

// == Body ==
/// Request payload. Raw and structured bodies are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Raw text body sent as-is
    Raw(String),
    /// Structured body serialized as JSON
    Json(Value),
}

// == Route ==
/// One HTTP call against the API: verb, endpoint path, query params, body.
///
/// Fields are private so a route can't change after construction; two routes
/// built from the same values always share a fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    method: Method,
    endpoint: String,
    params: Vec<(String, String)>,
    body: Option<Body>,
}

impl Route {
    /// Creates a route with no params and no body.
    ///
    /// Fails with `InvalidRoute` if `method` is not GET, POST, PUT or DELETE.
    pub fn new(method: &str, endpoint: impl Into<String>) -> Result<Self> {
        Self::builder(method, endpoint).build()
    }

    /// Starts a builder for routes carrying params or a body.
    pub fn builder(method: &str, endpoint: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            method: method.parse(),
            endpoint: normalize_endpoint(endpoint.into()),
            params: Vec::new(),
            data: None,
            json: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::with_method(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::with_method(Method::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::with_method(Method::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::with_method(Method::Delete, endpoint)
    }

    fn with_method(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: normalize_endpoint(endpoint.into()),
            params: Vec::new(),
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Endpoint path without a leading `/`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Query params in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Stable cache key for this route.
    pub fn fingerprint(&self) -> String {
        fingerprint(self)
    }
}

/// `/v1/x` and `v1/x` address the same URL, so they must share a fingerprint.
fn normalize_endpoint(endpoint: String) -> String {
    if endpoint.starts_with('/') {
        endpoint.trim_start_matches('/').to_string()
    } else {
        endpoint
    }
}

// == Route Builder ==
/// Collects route fields; validation happens in [`RouteBuilder::build`].
#[derive(Debug)]
pub struct RouteBuilder {
    method: Result<Method>,
    endpoint: String,
    params: Vec<(String, String)>,
    data: Option<String>,
    json: Option<Value>,
}

impl RouteBuilder {
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    /// Sets a raw body.
    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets a structured JSON body.
    pub fn json(mut self, json: Value) -> Self {
        self.json = Some(json);
        self
    }

    /// Validates and freezes the route.
    pub fn build(self) -> Result<Route> {
        let method = self.method?;

        let body = match (self.data, self.json) {
            (Some(_), Some(_)) => {
                return Err(ClientError::InvalidRoute(
                    "route cannot carry both a raw body and a JSON body".to_string(),
                ))
            }
            (Some(data), None) => Some(Body::Raw(data)),
            (None, Some(json)) => Some(Body::Json(json)),
            (None, None) => None,
        };

        Ok(Route {
            method,
            endpoint: self.endpoint,
            params: self.params,
            body,
        })
    }
}
