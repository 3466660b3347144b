//! Search state of the two views.
//!
//! Each view owns a [`ViewSlot`]. Every search takes a fresh [`QueryToken`]
//! from its slot, and only the completion carrying the latest token is
//! applied; an older search that finishes late is dropped instead of
//! overwriting the newer result.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use strum::{Display, EnumString};
use tracing::{error, info, warn};

use crate::api::{JsonSource, PokeApi};
use crate::errors::{PokedexError, PokedexResult, QueryError};
use crate::evolution::{resolve_evolution_chain, EvolutionLine};
use crate::presenter::{load_pokemon_detail, PokemonDetail};

/// Search term both views start from.
pub const DEFAULT_QUERY: &str = "pikachu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewKind {
    Info,
    Evolution,
}

/// Trims and lowercases raw input into a lookup key.
pub fn normalize_query(raw: &str) -> Result<String, QueryError> {
    let query = raw.trim().to_lowercase();
    if query.is_empty() {
        return Err(QueryError::EmptyQuery);
    }
    Ok(query)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryToken(u64);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ViewState<T> {
    Idle,
    Loading { query: String },
    Loaded { query: String, data: T },
    Failed { query: String, message: String },
}

impl<T> ViewState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Loaded { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed { .. })
    }
}

impl<T: fmt::Display> fmt::Display for ViewState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Idle => write!(f, "Enter a Pokémon name to search."),
            ViewState::Loading { query } => write!(f, "Loading data for '{}'...", query),
            ViewState::Loaded { data, .. } => write!(f, "{}", data),
            ViewState::Failed { message, .. } => write!(
                f,
                "Error:\n{}\nTry searching for another Pokémon.",
                message
            ),
        }
    }
}

/// State of one view plus the token of its newest search.
#[derive(Debug)]
pub struct ViewSlot<T> {
    kind: ViewKind,
    issued: u64,
    state: ViewState<T>,
}

impl<T: Clone> ViewSlot<T> {
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            issued: 0,
            state: ViewState::Idle,
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn latest(&self) -> Option<QueryToken> {
        (self.issued > 0).then_some(QueryToken(self.issued))
    }

    /// Starts a search. Previously displayed data is cleared right away.
    pub fn begin(&mut self, query: &str) -> QueryToken {
        self.issued += 1;
        self.state = ViewState::Loading {
            query: query.to_string(),
        };
        QueryToken(self.issued)
    }

    /// Applies the outcome of the search identified by `token`. Returns
    /// `false` and leaves the slot untouched when a newer search exists.
    pub fn complete<E: fmt::Display>(
        &mut self,
        token: QueryToken,
        query: &str,
        outcome: Result<T, E>,
    ) -> bool {
        if Some(token) != self.latest() {
            warn!(
                view = %self.kind,
                query,
                token = token.0,
                latest = self.issued,
                "discarding stale response"
            );
            return false;
        }

        self.state = match outcome {
            Ok(data) => ViewState::Loaded {
                query: query.to_string(),
                data,
            },
            Err(err) => ViewState::Failed {
                query: query.to_string(),
                message: err.to_string(),
            },
        };
        true
    }

    /// Records a rejected input as this view's error.
    pub fn reject(&mut self, raw: &str, err: &QueryError) {
        self.issued += 1;
        self.state = ViewState::Failed {
            query: raw.to_string(),
            message: err.to_string(),
        };
    }
}

/// The two independent views over one API.
#[derive(Debug)]
pub struct PokedexSession<S> {
    api: PokeApi<S>,
    info: Mutex<ViewSlot<PokemonDetail>>,
    evolution: Mutex<ViewSlot<EvolutionLine>>,
}

impl<S: JsonSource> PokedexSession<S> {
    pub fn new(api: PokeApi<S>) -> Self {
        Self {
            api,
            info: Mutex::new(ViewSlot::new(ViewKind::Info)),
            evolution: Mutex::new(ViewSlot::new(ViewKind::Evolution)),
        }
    }

    pub fn api(&self) -> &PokeApi<S> {
        &self.api
    }

    pub fn info_state(&self) -> ViewState<PokemonDetail> {
        lock(&self.info).state().clone()
    }

    pub fn evolution_state(&self) -> ViewState<EvolutionLine> {
        lock(&self.evolution).state().clone()
    }

    /// Current state of `kind`, rendered as text.
    pub fn render(&self, kind: ViewKind) -> String {
        match kind {
            ViewKind::Info => self.info_state().to_string(),
            ViewKind::Evolution => self.evolution_state().to_string(),
        }
    }

    /// Runs a detail search and returns the info view afterwards.
    pub async fn search_info(&self, raw: &str) -> ViewState<PokemonDetail> {
        let Some((token, query)) = begin(&self.info, raw) else {
            return self.info_state();
        };

        let outcome = load_pokemon_detail(&self.api, &query)
            .await
            .map_err(PokedexError::from);
        log_outcome(ViewKind::Info, &query, &outcome);

        let mut slot = lock(&self.info);
        slot.complete(token, &query, outcome);
        slot.state().clone()
    }

    /// Runs an evolution search and returns the evolution view afterwards.
    pub async fn search_evolution(&self, raw: &str) -> ViewState<EvolutionLine> {
        let Some((token, query)) = begin(&self.evolution, raw) else {
            return self.evolution_state();
        };

        let outcome = resolve_evolution_chain(&self.api, &query)
            .await
            .map_err(PokedexError::from);
        log_outcome(ViewKind::Evolution, &query, &outcome);

        let mut slot = lock(&self.evolution);
        slot.complete(token, &query, outcome);
        slot.state().clone()
    }
}

fn lock<T>(slot: &Mutex<ViewSlot<T>>) -> std::sync::MutexGuard<'_, ViewSlot<T>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Normalizes `raw` and opens a search on `slot`, or records the rejection.
fn begin<T: Clone>(slot: &Mutex<ViewSlot<T>>, raw: &str) -> Option<(QueryToken, String)> {
    let mut slot = lock(slot);
    match normalize_query(raw) {
        Ok(query) => Some((slot.begin(&query), query)),
        Err(err) => {
            error!(view = %slot.kind(), input = raw, "{}", err);
            slot.reject(raw, &err);
            None
        }
    }
}

fn log_outcome<T>(kind: ViewKind, query: &str, outcome: &PokedexResult<T>) {
    match outcome {
        Ok(_) => info!(view = %kind, query, "search complete"),
        Err(err) => {
            // The stage errors are transparent, so this is the FetchError.
            let cause = std::error::Error::source(err)
                .map(ToString::to_string)
                .unwrap_or_default();
            error!(view = %kind, query, cause = %cause, "{}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("pikachu", "pikachu")]
    #[case("  Pikachu ", "pikachu")]
    #[case("MR-MIME\n", "mr-mime")]
    fn test_normalize_query(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_query(raw), Ok(expected.to_string()));
    }

    #[test]
    fn test_blank_query_is_rejected() {
        assert_eq!(normalize_query("   "), Err(QueryError::EmptyQuery));
        assert_eq!(normalize_query(""), Err(QueryError::EmptyQuery));
    }

    #[test]
    fn test_view_kind_parses() {
        assert_eq!(ViewKind::from_str("info"), Ok(ViewKind::Info));
        assert_eq!(ViewKind::from_str("Evolution"), Ok(ViewKind::Evolution));
        assert_eq!(ViewKind::Evolution.to_string(), "evolution");
        assert!(ViewKind::from_str("moves").is_err());
    }

    #[test]
    fn test_tokens_increase() {
        let mut slot: ViewSlot<u32> = ViewSlot::new(ViewKind::Info);
        assert_eq!(slot.latest(), None);
        let first = slot.begin("a");
        let second = slot.begin("b");
        assert!(second > first);
        assert_eq!(slot.latest(), Some(second));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut slot: ViewSlot<u32> = ViewSlot::new(ViewKind::Evolution);
        let slow = slot.begin("bulbasaur");
        let fast = slot.begin("charmander");

        assert!(slot.complete(fast, "charmander", Ok::<_, String>(4)));
        assert!(!slot.complete(slow, "bulbasaur", Ok::<_, String>(1)));

        assert_eq!(
            slot.state(),
            &ViewState::Loaded {
                query: "charmander".to_string(),
                data: 4
            }
        );
    }

    #[test]
    fn test_stale_failure_does_not_clobber_newer_result() {
        let mut slot: ViewSlot<u32> = ViewSlot::new(ViewKind::Info);
        let slow = slot.begin("missingno");
        let fast = slot.begin("mew");
        slot.complete(fast, "mew", Ok::<_, String>(151));
        slot.complete(slow, "missingno", Err("not found"));

        assert_eq!(slot.state().data(), Some(&151));
    }

    #[test]
    fn test_begin_clears_loaded_data() {
        let mut slot: ViewSlot<u32> = ViewSlot::new(ViewKind::Info);
        let token = slot.begin("mew");
        slot.complete(token, "mew", Ok::<_, String>(151));

        slot.begin("mewtwo");
        assert_eq!(slot.state().data(), None);
        assert_eq!(
            slot.state(),
            &ViewState::Loading {
                query: "mewtwo".to_string()
            }
        );
    }

    #[test]
    fn test_failure_replaces_loaded_data() {
        let mut slot: ViewSlot<u32> = ViewSlot::new(ViewKind::Info);
        let token = slot.begin("mew");
        slot.complete(token, "mew", Ok::<_, String>(151));

        let token = slot.begin("agumon");
        slot.complete(token, "agumon", Err::<u32, _>("Pokemon not found or network error"));

        assert_eq!(slot.state().data(), None);
        assert_eq!(
            slot.state().error_message(),
            Some("Pokemon not found or network error")
        );
    }

    #[test]
    fn test_reject_invalidates_in_flight_search() {
        let mut slot: ViewSlot<u32> = ViewSlot::new(ViewKind::Info);
        let token = slot.begin("mew");
        slot.reject("  ", &QueryError::EmptyQuery);

        assert!(!slot.complete(token, "mew", Ok::<_, String>(151)));
        assert!(slot.state().is_failed());
    }

    #[test]
    fn test_state_display() {
        let idle: ViewState<u32> = ViewState::Idle;
        assert_eq!(idle.to_string(), "Enter a Pokémon name to search.");

        let failed: ViewState<u32> = ViewState::Failed {
            query: "x".to_string(),
            message: "Evolution chain not found or network error".to_string(),
        };
        assert_eq!(
            failed.to_string(),
            "Error:\nEvolution chain not found or network error\nTry searching for another Pokémon."
        );
    }
}
