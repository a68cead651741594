//! Client Module
//!
//! Request dispatch and response caching for the ClashKing API.

mod caching;
mod request;

pub use caching::CachingHttpClient;
