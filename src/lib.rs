// In: src/lib.rs

//! Pokédex Viewer
//!
//! Looks up Pokémon on PokéAPI and renders two views: a detail card (types,
//! abilities, measurements, base stats) and the species' evolution line with
//! the condition for each step.

// --- MODULE DECLARATIONS ---
pub mod api;
pub mod errors;
pub mod evolution;
pub mod mcp_interface;
pub mod presenter;
pub mod session;
pub mod trigger;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
// Re-export the decoded API records.
pub use schema::{
    ChainLink, EvolutionChainRecord, EvolutionDetail, NamedResource, PokemonRecord,
    SpeciesRecord, StatKind,
};

// --- From this crate's modules (`src/`) ---

// Transport and typed endpoints.
pub use api::{ApiClient, ApiConfig, JsonSource, PokeApi};

// Evolution resolution and description.
pub use evolution::{resolve_evolution_chain, EvolutionLine, EvolutionStage, Transition};
pub use trigger::{describe, EvolutionCondition};

// Detail card.
pub use presenter::{load_pokemon_detail, PokemonDetail};

// View state.
pub use session::{normalize_query, PokedexSession, ViewKind, ViewState};

// Crate-specific error and result types.
pub use errors::{
    DetailError, EvolutionError, FetchError, PokedexError, PokedexResult, QueryError,
};

/// Installs the `tracing` subscriber used by both binaries.
///
/// `RUST_LOG` overrides the default `info` filter. Output goes to stderr so
/// stdout stays free for views and for the MCP transport.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
