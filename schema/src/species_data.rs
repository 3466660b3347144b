use serde::{Deserialize, Serialize};

/// A `{ "name", "url" }` reference as PokéAPI embeds it everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// A bare `{ "url" }` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

/// Response of `GET /pokemon-species/{name}`.
///
/// Only the fields the viewer reads are decoded; everything else in the
/// payload is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub evolution_chain: ApiResource,
}

/// Response of the evolution-chain URL referenced by a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChainRecord {
    #[serde(default)]
    pub id: u32,
    pub chain: ChainLink,
}

/// One node of the evolution tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl ChainLink {
    pub fn species_name(&self) -> &str {
        &self.species.name
    }

    /// The condition that leads into this link. The root link has none.
    pub fn first_detail(&self) -> Option<&EvolutionDetail> {
        self.evolution_details.first()
    }

    /// The next link on the first branch, `None` for a terminal link.
    pub fn next(&self) -> Option<&ChainLink> {
        self.evolves_to.first()
    }

    pub fn is_terminal(&self) -> bool {
        self.evolves_to.is_empty()
    }
}

/// Sparse evolution condition. Any combination of fields may be set; the
/// viewer picks one by a fixed priority when describing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionDetail {
    pub min_level: Option<u32>,
    pub trigger: Option<NamedResource>,
    pub item: Option<NamedResource>,
    pub min_happiness: Option<u32>,
    // PokéAPI sends "" rather than null when unset.
    pub time_of_day: Option<String>,
    pub held_item: Option<NamedResource>,
    pub known_move: Option<NamedResource>,
    pub location: Option<NamedResource>,
}
