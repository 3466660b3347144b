//! Display-ready derivations for the detail card.

use std::fmt;
use std::str::FromStr;

use schema::{PokemonRecord, StatKind};
use serde::Serialize;

use crate::api::{JsonSource, PokeApi};
use crate::errors::{DetailError, DetailResult};
use crate::trigger::replace_first_hyphen;

/// Stat value that fills the bar completely.
const STAT_BAR_FULL: f64 = 180.0;
/// Stat value at which the bar turns fully green.
const STAT_HUE_FULL: f64 = 150.0;
const MAX_HUE: f64 = 120.0;
/// Character width of a text stat bar.
const TEXT_BAR_WIDTH: usize = 20;

/// `hp` → `HP`, `special-attack` → `Sp. Atk`, ...; unknown names are
/// returned unchanged.
pub fn display_stat_name(name: &str) -> &str {
    match StatKind::from_str(name) {
        Ok(kind) => kind.label(),
        Err(_) => name,
    }
}

/// Bar fill in percent, capped at 100.
pub fn stat_bar_fill(value: u32) -> f64 {
    (value as f64 / STAT_BAR_FULL * 100.0).min(100.0)
}

/// HSL hue of the bar, 0 (red) to 120 (green).
pub fn stat_bar_hue(value: u32) -> f64 {
    (value as f64 / STAT_HUE_FULL * MAX_HUE).clamp(0.0, MAX_HUE)
}

pub fn stat_bar_color(value: u32) -> String {
    format!("hsl({}, 80%, 45%)", stat_bar_hue(value))
}

/// Artwork URL for text output, `?` when the pokemon has none.
pub fn image_label(url: Option<&str>) -> &str {
    url.unwrap_or("?")
}

/// Decimetres or hectograms to one-decimal metres or kilograms.
pub fn format_tenths(value: u32) -> String {
    format!("{:.1}", value as f64 / 10.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub name: String,
    pub label: String,
    pub value: u32,
    pub fill_percent: f64,
    pub hue: f64,
    /// CSS color of the bar.
    pub color: String,
}

impl StatLine {
    pub fn new(name: &str, value: u32) -> Self {
        Self {
            name: name.to_string(),
            label: display_stat_name(name).to_string(),
            value,
            fill_percent: stat_bar_fill(value),
            hue: stat_bar_hue(value),
            color: stat_bar_color(value),
        }
    }

    /// Fixed-width text rendering of the bar.
    pub fn text_bar(&self) -> String {
        let filled = ((self.fill_percent / 100.0) * TEXT_BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(TEXT_BAR_WIDTH);
        format!(
            "{}{}",
            "#".repeat(filled),
            ".".repeat(TEXT_BAR_WIDTH - filled)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityLine {
    pub name: String,
    pub hidden: bool,
}

/// The detail card of one pokemon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub image_url: Option<String>,
    pub types: Vec<String>,
    pub abilities: Vec<AbilityLine>,
    pub stats: Vec<StatLine>,
    pub height_m: String,
    pub weight_kg: String,
}

impl PokemonDetail {
    pub fn from_record(record: &PokemonRecord) -> Self {
        let mut types = record.types.clone();
        types.sort_by_key(|t| t.slot);

        Self {
            id: record.id,
            name: record.name.clone(),
            image_url: record.sprites.artwork_url().map(str::to_string),
            types: types.into_iter().map(|t| t.type_.name).collect(),
            abilities: record
                .abilities
                .iter()
                .map(|a| AbilityLine {
                    name: replace_first_hyphen(&a.ability.name),
                    hidden: a.is_hidden,
                })
                .collect(),
            stats: record
                .stats
                .iter()
                .map(|s| StatLine::new(&s.stat.name, s.base_stat))
                .collect(),
            height_m: format_tenths(record.height),
            weight_kg: format_tenths(record.weight),
        }
    }
}

impl fmt::Display for PokemonDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (#{:03})", self.name, self.id)?;
        writeln!(f, "Image: {}", image_label(self.image_url.as_deref()))?;
        writeln!(f, "--------------------")?;

        writeln!(f, "Type(s): {}", self.types.join(" / "))?;
        writeln!(f, "Height: {} m", self.height_m)?;
        writeln!(f, "Weight: {} kg", self.weight_kg)?;
        writeln!(f, "--------------------")?;

        writeln!(f, "Abilities:")?;
        for ability in &self.abilities {
            if ability.hidden {
                writeln!(f, "  {} (Hidden)", ability.name)?;
            } else {
                writeln!(f, "  {}", ability.name)?;
            }
        }
        writeln!(f, "--------------------")?;

        write!(f, "Base Stats:")?;
        const LABEL_WIDTH: usize = 8;
        for stat in &self.stats {
            write!(
                f,
                "\n{:<LABEL_WIDTH$} : {:>3} {}",
                stat.label,
                stat.value,
                stat.text_bar()
            )?;
        }
        Ok(())
    }
}

/// Fetches `name` and derives its detail card.
pub async fn load_pokemon_detail<S: JsonSource>(
    api: &PokeApi<S>,
    name: &str,
) -> DetailResult<PokemonDetail> {
    let record = api
        .pokemon(name)
        .await
        .map_err(|source| DetailError::PokemonNotFound {
            name: name.to_string(),
            source,
        })?;
    Ok(PokemonDetail::from_record(&record))
}
