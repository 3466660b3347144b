//! Text handlers behind the MCP server's tools.
//!
//! Each handler drives one view of a [`PokedexSession`] and returns the
//! rendered view, so the server only has to wrap strings into tool results.

use std::str::FromStr;

use crate::api::JsonSource;
use crate::session::{PokedexSession, ViewKind};

/// Runs a detail search and returns the info view.
pub async fn handle_search_pokemon<S: JsonSource>(
    session: &PokedexSession<S>,
    name: &str,
) -> String {
    format!(
        "--- Pokémon Info ---\n{}",
        session.search_info(name).await
    )
}

/// Runs an evolution search and returns the evolution view.
pub async fn handle_search_evolution<S: JsonSource>(
    session: &PokedexSession<S>,
    name: &str,
) -> String {
    format!(
        "--- Evolution Chain ---\n{}",
        session.search_evolution(name).await
    )
}

/// Shows one view as it currently stands, without a new request.
pub fn handle_current_view<S: JsonSource>(session: &PokedexSession<S>, view: &str) -> String {
    match ViewKind::from_str(view.trim()) {
        Ok(kind) => session.render(kind),
        Err(_) => format!(
            "Unknown view '{}'. Use '{}' or '{}'.",
            view,
            ViewKind::Info,
            ViewKind::Evolution
        ),
    }
}
