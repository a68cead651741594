//! ClashKing - A caching async client for the ClashKing API
//!
//! Turns route descriptors into HTTP calls, deduplicating repeated GETs
//! through an in-memory cache governed by server `max-age` hints.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod route;

pub use client::CachingHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use route::{Body, Method, Route, RouteBuilder};
