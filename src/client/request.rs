//! Request Building
//!
//! Turns a route plus client config into an outbound reqwest request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_ENCODING, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::route::{Body, Route};

// == Payload Shape ==
/// Which parts of a route a given verb sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PayloadShape {
    pub query: bool,
    pub body: bool,
}

impl PayloadShape {
    /// GET sends the query, POST sends query and body, PUT sends the body,
    /// DELETE sends neither.
    pub fn for_method(method: &reqwest::Method) -> Result<Self> {
        match method.as_str() {
            "GET" => Ok(Self { query: true, body: false }),
            "POST" => Ok(Self { query: true, body: true }),
            "PUT" => Ok(Self { query: false, body: true }),
            "DELETE" => Ok(Self { query: false, body: false }),
            other => Err(ClientError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Joins base URL and endpoint with exactly one `/` between them.
pub(crate) fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// Headers sent with every request.
pub(crate) fn default_headers(config: &ClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

    if let Some(token) = &config.auth_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::Config(format!("invalid auth token: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in &config.extra_headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ClientError::Config(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ClientError::Config(format!("invalid value for header '{}': {}", name, e)))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Builds the request for `route`, attaching only the payload its verb carries.
pub(crate) fn build_request(http: &Client, base_url: &str, route: &Route) -> Result<RequestBuilder> {
    let method: reqwest::Method = route.method().into();
    let shape = PayloadShape::for_method(&method)?;
    let url = join_url(base_url, route.endpoint());

    let mut builder = http.request(method, url);

    if !route.params().is_empty() {
        if shape.query {
            builder = builder.query(route.params());
        } else {
            warn!(
                "{} {} does not send query params; dropping {} param(s)",
                route.method(),
                route.endpoint(),
                route.params().len()
            );
        }
    }

    match route.body() {
        Some(Body::Raw(data)) if shape.body => builder = builder.body(data.clone()),
        Some(Body::Json(json)) if shape.body => builder = builder.json(json),
        Some(_) => warn!(
            "{} {} does not send a body; dropping it",
            route.method(),
            route.endpoint()
        ),
        None => {}
    }

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_url_single_slash() {
        assert_eq!(
            join_url("https://api.clashking.xyz/", "/v1/legends"),
            "https://api.clashking.xyz/v1/legends"
        );
        assert_eq!(
            join_url("https://api.clashking.xyz", "v1/legends"),
            "https://api.clashking.xyz/v1/legends"
        );
    }

    #[test]
    fn test_payload_shapes() {
        let get = PayloadShape::for_method(&reqwest::Method::GET).unwrap();
        assert!(get.query && !get.body);

        let post = PayloadShape::for_method(&reqwest::Method::POST).unwrap();
        assert!(post.query && post.body);

        let put = PayloadShape::for_method(&reqwest::Method::PUT).unwrap();
        assert!(!put.query && put.body);

        let delete = PayloadShape::for_method(&reqwest::Method::DELETE).unwrap();
        assert!(!delete.query && !delete.body);
    }

    #[test]
    fn test_unsupported_method_is_rejected() {
        let result = PayloadShape::for_method(&reqwest::Method::PATCH);
        assert!(matches!(result, Err(ClientError::UnsupportedMethod(m)) if m == "PATCH"));
    }

    #[test]
    fn test_default_headers_with_token() {
        let config = ClientConfig::new("http://localhost")
            .with_auth_token("secret")
            .with_header("X-Client", "tests");
        let headers = default_headers(&config).unwrap();

        assert_eq!(headers[ACCEPT_ENCODING], "gzip");
        assert_eq!(headers[AUTHORIZATION], "Bearer secret");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers["x-client"], "tests");
    }

    #[test]
    fn test_default_headers_without_token() {
        let headers = default_headers(&ClientConfig::default()).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(headers[ACCEPT_ENCODING], "gzip");
    }

    #[test]
    fn test_default_headers_rejects_bad_name() {
        let config = ClientConfig::default().with_header("bad header", "v");
        assert!(matches!(default_headers(&config), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_get_sends_query_in_order() {
        let route = Route::builder("GET", "/v1/clans")
            .param("name", "kings")
            .param("limit", 10)
            .build()
            .unwrap();

        let request = build_request(&Client::new(), "http://localhost:8080", &route)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().path(), "/v1/clans");
        assert_eq!(request.url().query(), Some("name=kings&limit=10"));
        assert!(request.body().is_none());
    }

    #[test]
    fn test_post_sends_query_and_json() {
        let route = Route::builder("POST", "v1/search")
            .param("page", 2)
            .json(json!({"tag": "#2PP"}))
            .build()
            .unwrap();

        let request = build_request(&Client::new(), "http://localhost", &route)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().query(), Some("page=2"));
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(serde_json::from_slice::<serde_json::Value>(body).unwrap(), json!({"tag": "#2PP"}));
        assert_eq!(request.headers()["content-type"], "application/json");
    }

    #[test]
    fn test_put_drops_query_keeps_body() {
        let route = Route::builder("PUT", "v1/x")
            .param("ignored", 1)
            .data("raw-body")
            .build()
            .unwrap();

        let request = build_request(&Client::new(), "http://localhost", &route)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().query(), None);
        assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"raw-body"[..]));
    }

    #[test]
    fn test_delete_sends_nothing() {
        let route = Route::builder("DELETE", "v1/x")
            .param("ignored", 1)
            .data("ignored")
            .build()
            .unwrap();

        let request = build_request(&Client::new(), "http://localhost", &route)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.url().query(), None);
        assert!(request.body().is_none());
    }
}
