//! PokeAPI Client
//!
//! Fetches PokeAPI resources through the response cache and decodes them.

use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// Client for the PokeAPI REST endpoints.
///
/// Every GET is keyed in the cache by its full URL. The cache is only an
/// accelerator: a miss always falls through to the network.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: String,
    cache: Cache,
}

impl PokeApiClient {
    /// Creates a client for `base_url` (e.g. `https://pokeapi.co/api/v2`).
    pub fn new(base_url: impl Into<String>, cache: Cache) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            cache,
        }
    }

    pub fn from_config(config: &Config, cache: Cache) -> Self {
        Self::new(config.api_url.clone(), cache)
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the first location-area page.
    pub fn first_location_page_url(&self) -> String {
        format!("{}/location-area", self.base_url)
    }

    // == Fetch ==
    /// Returns the raw body at `url`, from the cache when possible.
    ///
    /// # Returns
    /// * `Ok(Some(body))` - cached or freshly fetched body
    /// * `Ok(None)` - the API answered 404; nothing is cached
    /// * `Err(_)` - transport failure or any other non-success status
    pub async fn fetch(&self, url: &str) -> Result<Option<Bytes>> {
        if let Some(body) = self.cache.get(url) {
            debug!(url, "Cache hit");
            return Ok(Some(body));
        }
        debug!(url, "Cache miss, fetching");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url, "Resource not found");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(PokedexError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        self.cache.add(url, body.clone());
        Ok(Some(body))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        match self.fetch(url).await? {
            Some(body) => Ok(Some(serde_json::from_slice(&body)?)),
            None => Ok(None),
        }
    }

    // == Resources ==
    /// Fetches one page of location areas.
    ///
    /// `url` is either [`Self::first_location_page_url`] or a `next`/`previous`
    /// link from an earlier page. A missing page is an error.
    pub async fn location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        self.fetch_json(url)
            .await?
            .ok_or_else(|| PokedexError::UnexpectedStatus {
                status: StatusCode::NOT_FOUND.as_u16(),
                url: url.to_string(),
            })
    }

    /// Fetches a single location area, `None` if it does not exist.
    pub async fn location_area(&self, name: &str) -> Result<Option<LocationArea>> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.fetch_json(&url).await
    }

    /// Fetches a Pokemon by name, `None` if it does not exist.
    pub async fn pokemon(&self, name: &str) -> Result<Option<Pokemon>> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.fetch_json(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    // Nothing listens on the discard port, so any network access fails fast.
    const UNREACHABLE: &str = "http://127.0.0.1:9/api/v2/";

    fn test_client() -> PokeApiClient {
        let cache = Cache::new(Duration::from_secs(60)).unwrap();
        PokeApiClient::new(UNREACHABLE, cache)
    }

    #[tokio::test]
    async fn test_first_page_url_trims_slash() {
        let client = test_client();
        assert_eq!(
            client.first_location_page_url(),
            "http://127.0.0.1:9/api/v2/location-area"
        );
    }

    #[tokio::test]
    async fn test_cached_body_skips_network() {
        let client = test_client();
        client.cache().add(
            "http://127.0.0.1:9/api/v2/location-area/mt-coronet-1f",
            r#"{"name":"mt-coronet-1f","pokemon_encounters":[{"pokemon":{"name":"geodude","url":""}}]}"#,
        );

        let area = client.location_area("mt-coronet-1f").await.unwrap().unwrap();
        let names: Vec<&str> = area.pokemon_names().collect();
        assert_eq!(names, vec!["geodude"]);
    }

    #[tokio::test]
    async fn test_cached_garbage_is_decode_error() {
        let client = test_client();
        client
            .cache()
            .add("http://127.0.0.1:9/api/v2/pokemon/missingno", "not json");

        let result = client.pokemon("missingno").await;
        assert!(matches!(result, Err(PokedexError::Decode(_))));
    }

    #[tokio::test]
    async fn test_network_failure_is_http_error() {
        let client = test_client();

        let result = client.pokemon("pikachu").await;
        assert!(matches!(result, Err(PokedexError::Http(_))));
    }
}
