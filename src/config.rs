//! Configuration Module
//!
//! Handles loading client configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI root
pub const DEFAULT_API_URL: &str = "https://pokeapi.co/api/v2";

/// Default cache interval in milliseconds
pub const DEFAULT_CACHE_INTERVAL_MS: u64 = 5_000;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the PokeAPI, without a trailing slash
    pub api_url: String,
    /// Reap period and maximum entry age of the response cache, in milliseconds
    pub cache_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_API_URL` - PokeAPI root (default: https://pokeapi.co/api/v2)
    /// - `POKEDEX_CACHE_INTERVAL_MS` - Cache interval in ms (default: 5000)
    ///
    /// An interval of zero is ignored in favour of the default.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("POKEDEX_API_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            cache_interval_ms: env::var("POKEDEX_CACHE_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(DEFAULT_CACHE_INTERVAL_MS),
        }
    }

    /// Cache interval as a Duration.
    pub fn cache_interval(&self) -> Duration {
        Duration::from_millis(self.cache_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            cache_interval_ms: DEFAULT_CACHE_INTERVAL_MS,
        }
    }
}
