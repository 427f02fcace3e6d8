//! Pokedex - an interactive PokeAPI client
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber (stderr, so the prompt stays clean)
//! 2. Load configuration from environment variables
//! 3. Create the response cache, which starts its reaper
//! 4. Run the command loop on stdin/stdout
//! 5. Stop the reaper and log cache statistics

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::{repl, Cache, Config, PokeApiClient, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "warn" so logs do not interleave with command output,
    // can be overridden with RUST_LOG
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokedex=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env();
    info!(
        api_url = %config.api_url,
        cache_interval_ms = config.cache_interval_ms,
        "Configuration loaded"
    );

    let cache = Cache::new(config.cache_interval())?;
    let client = PokeApiClient::from_config(&config, cache.clone());
    let mut session = Session::new(client);

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let result = repl::run(&mut session, input, &mut out).await;

    cache.shutdown().await;
    let stats = cache.stats();
    info!(
        hits = stats.hits,
        misses = stats.misses,
        reaped = stats.reaped,
        hit_rate = stats.hit_rate(),
        "Cache statistics"
    );

    result?;
    Ok(())
}
