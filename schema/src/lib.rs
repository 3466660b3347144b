// Pokédex Schema - Shared record definitions
// This crate contains the PokéAPI response records that the viewer decodes,
// kept separate from the HTTP and presentation code so they can be built
// from fixtures without any network stack.

// Re-export the main types
pub use pokemon_data::*;
pub use species_data::*;
pub use stat_types::*;

pub mod pokemon_data;
pub mod species_data;
pub mod stat_types;
