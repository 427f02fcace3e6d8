//! Pokedex - an interactive PokeAPI client
//!
//! Browses location areas, explores them and catches Pokemon, with raw API
//! responses held in a time-expiring in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repl;
pub mod tasks;

pub use api::PokeApiClient;
pub use cache::Cache;
pub use config::Config;
pub use error::{PokedexError, Result};
pub use repl::Session;
