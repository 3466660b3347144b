use crate::NamedResource;
use serde::{Deserialize, Serialize};

/// Response of `GET /pokemon/{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    /// Decimetres.
    #[serde(default)]
    pub height: u32,
    /// Hectograms.
    #[serde(default)]
    pub weight: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Artwork,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl Sprites {
    /// Official artwork when available, otherwise the default front sprite.
    pub fn artwork_url(&self) -> Option<&str> {
        self.other
            .official_artwork
            .front_default
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| self.front_default.as_deref().filter(|url| !url.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    pub slot: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}
