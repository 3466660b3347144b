//! Describes how an evolution stage is reached.

use schema::{EvolutionDetail, NamedResource};
use serde::Serialize;

/// Flattened evolution condition attached to a stage.
///
/// Zero and empty values never survive flattening, so `Some(_)` always means
/// the field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EvolutionCondition {
    pub level: Option<u32>,
    pub trigger: Option<String>,
    pub item: Option<String>,
    pub happiness: Option<u32>,
    pub time_of_day: Option<String>,
    pub held_item: Option<String>,
    pub known_move: Option<String>,
    pub location: Option<String>,
}

impl EvolutionCondition {
    pub fn from_detail(detail: Option<&EvolutionDetail>) -> Self {
        let Some(detail) = detail else {
            return Self::default();
        };

        Self {
            level: nonzero(detail.min_level),
            trigger: resource_name(detail.trigger.as_ref()),
            item: resource_name(detail.item.as_ref()),
            happiness: nonzero(detail.min_happiness),
            time_of_day: detail.time_of_day.clone().filter(|t| !t.is_empty()),
            held_item: resource_name(detail.held_item.as_ref()),
            known_move: resource_name(detail.known_move.as_ref()),
            location: resource_name(detail.location.as_ref()),
        }
    }

    pub fn describe(&self) -> String {
        describe(self)
    }
}

fn nonzero(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn resource_name(resource: Option<&NamedResource>) -> Option<String> {
    resource
        .map(|r| r.name.clone())
        .filter(|name| !name.is_empty())
}

/// Replaces the first `-` with a space. Later hyphens are kept, so
/// `"fire-red-stone"` becomes `"fire red-stone"`.
pub fn replace_first_hyphen(name: &str) -> String {
    name.replacen('-', " ", 1)
}

/// Display text for the condition. The first set field in this order wins:
/// level, item, happiness, held item, move, location, trade, other trigger.
pub fn describe(condition: &EvolutionCondition) -> String {
    if let Some(level) = nonzero(condition.level) {
        return format!("Level {}", level);
    }
    if let Some(item) = present(condition.item.as_deref()) {
        return format!("Use {}", replace_first_hyphen(item));
    }
    if let Some(happiness) = nonzero(condition.happiness) {
        return match present(condition.time_of_day.as_deref()) {
            Some(time) => format!("Happiness ({}+) during {}", happiness, time),
            None => format!("Happiness ({}+)", happiness),
        };
    }
    if let Some(held) = present(condition.held_item.as_deref()) {
        return format!("Level up holding {}", replace_first_hyphen(held));
    }
    if let Some(known_move) = present(condition.known_move.as_deref()) {
        return format!("Learn {}", replace_first_hyphen(known_move));
    }
    if let Some(location) = present(condition.location.as_deref()) {
        return format!("Level up at {}", replace_first_hyphen(location));
    }
    match present(condition.trigger.as_deref()) {
        Some("trade") => "Trade".to_string(),
        Some(trigger) => replace_first_hyphen(trigger),
        None => "Special condition".to_string(),
    }
}
