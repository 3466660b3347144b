//! PokéAPI access.
//!
//! [`JsonSource`] is the transport seam: one GET, one JSON value. [`ApiClient`]
//! implements it over `reqwest`; tests substitute an in-memory source.
//! [`PokeApi`] builds the endpoint URLs and decodes bodies into the schema
//! records.

use async_trait::async_trait;
use schema::{EvolutionChainRecord, PokemonRecord, SpeciesRecord};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::errors::{FetchError, FetchResult};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "POKEAPI_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads [`BASE_URL_ENV`], falling back to the public API.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn species_url(&self, name: &str) -> String {
        format!("{}/pokemon-species/{}", self.base_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Fetches one URL and returns its JSON body.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn fetch_json(&self, url: &str) -> FetchResult<Value>;
}

/// `reqwest`-backed [`JsonSource`]. No retries and no timeout override.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("pokedex-viewer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl JsonSource for ApiClient {
    async fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        debug!(url, "GET");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Network {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Typed view over a [`JsonSource`] for the three endpoints the viewer uses.
#[derive(Debug, Clone)]
pub struct PokeApi<S> {
    source: S,
    config: ApiConfig,
}

impl<S: JsonSource> PokeApi<S> {
    pub fn new(source: S, config: ApiConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn species(&self, name: &str) -> FetchResult<SpeciesRecord> {
        self.fetch(&self.config.species_url(name)).await
    }

    /// `url` is the opaque reference carried by a [`SpeciesRecord`].
    pub async fn evolution_chain(&self, url: &str) -> FetchResult<EvolutionChainRecord> {
        self.fetch(url).await
    }

    pub async fn pokemon(&self, name: &str) -> FetchResult<PokemonRecord> {
        self.fetch(&self.config.pokemon_url(name)).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        let value = self.source.fetch_json(url).await?;
        serde_json::from_value(value).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
