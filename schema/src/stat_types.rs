use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// The six base stats, parsed from their PokéAPI names.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    /// Short label shown next to a stat bar.
    pub fn label(self) -> &'static str {
        match self {
            StatKind::Hp => "HP",
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::SpecialAttack => "Sp. Atk",
            StatKind::SpecialDefense => "Sp. Def",
            StatKind::Speed => "Speed",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
