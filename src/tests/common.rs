use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use schema::{ChainLink, EvolutionDetail, NamedResource, PokemonRecord, Sprites};
use serde_json::{json, Value};

use crate::api::{ApiConfig, JsonSource, PokeApi};
use crate::errors::{FetchError, FetchResult};

/// In-memory [`JsonSource`]. Unknown URLs answer 404; every request is
/// recorded in order.
#[derive(Debug, Default)]
pub struct FakeSource {
    bodies: HashMap<String, Value>,
    statuses: HashMap<String, u16>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, body: Value) -> Self {
        self.bodies.insert(url.into(), body);
        self
    }

    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.statuses.insert(url.into(), status);
        self
    }

    /// Delays the answer for `url`, to let a later request finish first.
    pub fn with_delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonSource for FakeSource {
    async fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        self.requests.lock().unwrap().push(url.to_string());

        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(status) = self.statuses.get(url) {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            });
        }
        self.bodies.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub fn chain_url(id: u32) -> String {
    format!("{}/evolution-chain/{}/", ApiConfig::default().base_url(), id)
}

pub fn species_json(name: &str, chain_id: u32) -> Value {
    json!({
        "id": 1,
        "name": name,
        "evolution_chain": { "url": chain_url(chain_id) },
        "is_legendary": false
    })
}

pub fn pokemon_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 4,
        "weight": 60,
        "sprites": {
            "front_default": format!("https://img.test/{}.png", id),
            "other": {
                "official-artwork": {
                    "front_default": format!("https://img.test/artwork/{}.png", id)
                }
            }
        },
        "types": [ { "slot": 1, "type": { "name": "electric", "url": "" } } ],
        "abilities": [
            { "ability": { "name": "static", "url": "" }, "is_hidden": false, "slot": 1 },
            { "ability": { "name": "lightning-rod", "url": "" }, "is_hidden": true, "slot": 3 }
        ],
        "stats": [
            { "base_stat": 35, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 55, "effort": 0, "stat": { "name": "attack", "url": "" } },
            { "base_stat": 90, "effort": 2, "stat": { "name": "speed", "url": "" } }
        ]
    })
}

/// A chain link as PokéAPI sends it. `detail` is placed as the only entry of
/// `evolution_details`.
pub fn link_json(species: &str, detail: Option<Value>, evolves_to: Vec<Value>) -> Value {
    json!({
        "species": { "name": species, "url": "" },
        "evolution_details": detail.into_iter().collect::<Vec<_>>(),
        "evolves_to": evolves_to,
        "is_baby": false
    })
}

pub fn chain_json(id: u32, root: Value) -> Value {
    json!({ "id": id, "baby_trigger_item": null, "chain": root })
}

pub fn level_detail_json(level: u32) -> Value {
    json!({
        "min_level": level,
        "trigger": { "name": "level-up", "url": "" },
        "item": null,
        "time_of_day": ""
    })
}

pub fn item_detail_json(item: &str) -> Value {
    json!({
        "min_level": null,
        "trigger": { "name": "use-item", "url": "" },
        "item": { "name": item, "url": "" },
        "time_of_day": ""
    })
}

pub fn happiness_detail_json(happiness: u32) -> Value {
    json!({
        "min_happiness": happiness,
        "trigger": { "name": "level-up", "url": "" },
        "time_of_day": ""
    })
}

pub fn chain_link(
    species: &str,
    detail: Option<EvolutionDetail>,
    evolves_to: Vec<ChainLink>,
) -> ChainLink {
    ChainLink {
        species: NamedResource {
            name: species.to_string(),
            url: String::new(),
        },
        evolution_details: detail.into_iter().collect(),
        evolves_to,
    }
}

pub fn detail_with_level(level: u32) -> EvolutionDetail {
    EvolutionDetail {
        min_level: Some(level),
        trigger: Some(NamedResource {
            name: "level-up".to_string(),
            url: String::new(),
        }),
        ..EvolutionDetail::default()
    }
}

pub fn pokemon_record(id: u32, name: &str) -> PokemonRecord {
    PokemonRecord {
        id,
        name: name.to_string(),
        sprites: Sprites::default(),
        types: Vec::new(),
        abilities: Vec::new(),
        stats: Vec::new(),
        height: 0,
        weight: 0,
    }
}

/// The pichu → pikachu → raichu family, with raichu reached by thunder stone.
pub fn pikachu_family() -> FakeSource {
    let config = ApiConfig::default();
    let chain = chain_json(
        10,
        link_json(
            "pichu",
            None,
            vec![link_json(
                "pikachu",
                Some(happiness_detail_json(220)),
                vec![link_json(
                    "raichu",
                    Some(item_detail_json("thunder-stone")),
                    vec![],
                )],
            )],
        ),
    );

    FakeSource::new()
        .with(config.species_url("pikachu"), species_json("pikachu", 10))
        .with(chain_url(10), chain)
        .with(config.pokemon_url("pichu"), pokemon_json(172, "pichu"))
        .with(config.pokemon_url("pikachu"), pokemon_json(25, "pikachu"))
        .with(config.pokemon_url("raichu"), pokemon_json(26, "raichu"))
}

pub fn api(source: FakeSource) -> PokeApi<FakeSource> {
    PokeApi::new(source, ApiConfig::default())
}
