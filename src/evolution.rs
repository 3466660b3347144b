//! Evolution chain resolution.
//!
//! The chain is walked along its first branch only. Each link costs one
//! `/pokemon/{species}` request, issued in chain order, and any failure
//! discards the stages resolved so far.

use std::fmt;

use schema::{ChainLink, PokemonRecord};
use serde::Serialize;
use tracing::{debug, info};

use crate::api::{JsonSource, PokeApi};
use crate::errors::{EvolutionError, EvolutionResult};
use crate::presenter::image_label;
use crate::trigger::{replace_first_hyphen, EvolutionCondition};

/// One stage of an evolution line, carrying the condition that leads INTO it
/// from the previous stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionStage {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
    pub condition: EvolutionCondition,
}

impl EvolutionStage {
    /// `name` is the species name from the chain link, not the pokemon
    /// record's name, which can differ for species with forms.
    pub fn new(link: &ChainLink, pokemon: &PokemonRecord) -> Self {
        Self {
            id: pokemon.id,
            name: link.species_name().to_string(),
            image_url: pokemon.sprites.artwork_url().map(str::to_string),
            condition: EvolutionCondition::from_detail(link.first_detail()),
        }
    }

    /// How this stage is reached from its predecessor.
    pub fn arrival_method(&self) -> String {
        self.condition.describe()
    }

    pub fn display_name(&self) -> String {
        replace_first_hyphen(&self.name)
    }
}

impl fmt::Display for EvolutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (#{:03})\nImage: {}",
            self.display_name(),
            self.id,
            image_label(self.image_url.as_deref())
        )
    }
}

/// The ordered stages of a species' evolution line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionLine {
    /// Name of the species that was searched.
    pub family: String,
    pub stages: Vec<EvolutionStage>,
}

/// The step between two consecutive stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<'a> {
    pub from: &'a EvolutionStage,
    pub to: &'a EvolutionStage,
    pub method: String,
}

impl EvolutionLine {
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Consecutive stage pairs, each described by the later stage's
    /// condition.
    pub fn transitions(&self) -> impl Iterator<Item = Transition<'_>> {
        self.stages.windows(2).map(|pair| Transition {
            from: &pair[0],
            to: &pair[1],
            method: pair[1].arrival_method(),
        })
    }
}

impl fmt::Display for EvolutionLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evolution Chain")?;
        writeln!(f, "{} family", self.family)?;
        writeln!(f, "--------------------")?;

        let mut stages = self.stages.iter();
        if let Some(first) = stages.next() {
            write!(f, "{}", first)?;
        }
        for stage in stages {
            write!(f, "\n  --[{}]-->\n{}", stage.arrival_method(), stage)?;
        }
        Ok(())
    }
}

/// Links along the first branch, root first. Sibling branches are never
/// visited.
pub fn linear_path(root: &ChainLink) -> Vec<&ChainLink> {
    let mut path = Vec::new();
    let mut current = Some(root);
    while let Some(link) = current {
        path.push(link);
        current = link.next();
    }
    path
}

/// Resolves the evolution line of `species_name`.
///
/// Requests are made in order: the species, its evolution chain, then one
/// pokemon per stage. The first failing request aborts the whole resolution.
pub async fn resolve_evolution_chain<S: JsonSource>(
    api: &PokeApi<S>,
    species_name: &str,
) -> EvolutionResult<EvolutionLine> {
    let species = api
        .species(species_name)
        .await
        .map_err(|source| EvolutionError::SpeciesNotFound {
            species: species_name.to_string(),
            source,
        })?;

    let chain_url = species.evolution_chain.url.as_str();
    let chain = api
        .evolution_chain(chain_url)
        .await
        .map_err(|source| EvolutionError::ChainNotFound {
            url: chain_url.to_string(),
            source,
        })?;
    debug!(chain_id = chain.id, url = chain_url, "fetched evolution chain");

    let mut stages = Vec::new();
    for link in linear_path(&chain.chain) {
        let stage_name = link.species_name();
        let pokemon = api
            .pokemon(stage_name)
            .await
            .map_err(|source| EvolutionError::StageNotFound {
                stage: stage_name.to_string(),
                source,
            })?;
        debug!(stage = stage_name, id = pokemon.id, "resolved evolution stage");
        stages.push(EvolutionStage::new(link, &pokemon));
    }

    info!(
        species = %species.name,
        species_id = species.id,
        stages = stages.len(),
        "resolved evolution chain"
    );
    Ok(EvolutionLine {
        family: species.name,
        stages,
    })
}
