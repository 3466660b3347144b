//! Error types for the Pokédex viewer.
//!
//! Every fetch failure is tagged with the stage it happened in, and the
//! `Display` text of the stage errors is the message shown in the view.

/// Main error type for the Pokédex viewer
#[derive(Debug, thiserror::Error)]
pub enum PokedexError {
    /// The search input was rejected before any request
    #[error(transparent)]
    Query(#[from] QueryError),
    /// The detail lookup failed
    #[error(transparent)]
    Detail(#[from] DetailError),
    /// The evolution chain could not be resolved
    #[error(transparent)]
    Evolution(#[from] EvolutionError),
}

/// A single HTTP GET that did not yield a usable JSON body.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("GET {url} returned status {status}")]
    Status { url: String, status: u16 },
    /// The request never produced a response
    #[error("GET {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The body was not JSON, or not the expected record shape
    #[error("GET {url} returned an unexpected body: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            FetchError::Status { url, .. }
            | FetchError::Network { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Errors of the evolution view, one per fetch stage.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Pokémon species not found or network error")]
    SpeciesNotFound {
        species: String,
        #[source]
        source: FetchError,
    },
    #[error("Evolution chain not found or network error")]
    ChainNotFound {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("Pokémon data not found for {stage}")]
    StageNotFound {
        stage: String,
        #[source]
        source: FetchError,
    },
}

/// Errors of the detail view.
#[derive(Debug, thiserror::Error)]
pub enum DetailError {
    #[error("Pokemon not found or network error")]
    PokemonNotFound {
        name: String,
        #[source]
        source: FetchError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Please enter a Pokémon name")]
    EmptyQuery,
}

/// Type alias for Results using PokedexError
pub type PokedexResult<T> = Result<T, PokedexError>;

/// Type alias for Results using FetchError
pub type FetchResult<T> = Result<T, FetchError>;

/// Type alias for Results using EvolutionError
pub type EvolutionResult<T> = Result<T, EvolutionError>;

/// Type alias for Results using DetailError
pub type DetailResult<T> = Result<T, DetailError>;
