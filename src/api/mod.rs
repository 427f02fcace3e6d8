//! API Module
//!
//! HTTP access to the PokeAPI, backed by the response cache.
//!
//! # Endpoints used
//! - `GET /location-area` - Paginated list of location areas
//! - `GET /location-area/{name}` - Pokemon encounters in an area
//! - `GET /pokemon/{name}` - A single Pokemon

pub mod client;

pub use client::PokeApiClient;
