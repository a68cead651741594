//! ClashKing CLI
//!
//! Issues a single GET against the ClashKing API and prints the JSON body.
//!
//! Usage: `clashking <endpoint> [key=value ...]`

use anyhow::{bail, Context};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clashking::{CachingHttpClient, ClientConfig, Route};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clashking=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(endpoint) = args.next() else {
        bail!("usage: clashking <endpoint> [key=value ...]");
    };

    let mut builder = Route::builder("GET", endpoint);
    for arg in args {
        let (key, value) = arg
            .split_once('=')
            .with_context(|| format!("expected key=value, got '{}'", arg))?;
        builder = builder.param(key, value);
    }
    let route = builder.build()?;

    let config = ClientConfig::from_env();
    info!("Requesting {} from {}", route.endpoint(), config.base_url);

    let client = CachingHttpClient::new(config)?;
    let body = client.request(&route).await?;

    println!("{}", serde_json::to_string_pretty(&body)?);

    let stats = client.cache_stats().await;
    debug!(
        "Cache stats: hits={}, misses={}, entries={}",
        stats.hits, stats.misses, stats.total_entries
    );

    Ok(())
}
