//! The closed set of tree species a visitor can plant.
//!
//! Stored as the upper-snake tag (e.g. `BRAZIL_NUT`) in a constrained TEXT
//! column and exposed on the wire under the same tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the ten rainforest species available in the forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreeSpecies {
    #[default]
    Kapok,
    Mahogany,
    Rubber,
    BrazilNut,
    Acai,
    Cocoa,
    Rosewood,
    AndeanAlder,
    Ironwood,
    Cecropia,
}

/// Returned when a tag does not name a known species.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct UnknownSpecies(pub String);

impl TreeSpecies {
    pub const ALL: [TreeSpecies; 10] = [
        TreeSpecies::Kapok,
        TreeSpecies::Mahogany,
        TreeSpecies::Rubber,
        TreeSpecies::BrazilNut,
        TreeSpecies::Acai,
        TreeSpecies::Cocoa,
        TreeSpecies::Rosewood,
        TreeSpecies::AndeanAlder,
        TreeSpecies::Ironwood,
        TreeSpecies::Cecropia,
    ];

    /// Storage / wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            TreeSpecies::Kapok => "KAPOK",
            TreeSpecies::Mahogany => "MAHOGANY",
            TreeSpecies::Rubber => "RUBBER",
            TreeSpecies::BrazilNut => "BRAZIL_NUT",
            TreeSpecies::Acai => "ACAI",
            TreeSpecies::Cocoa => "COCOA",
            TreeSpecies::Rosewood => "ROSEWOOD",
            TreeSpecies::AndeanAlder => "ANDEAN_ALDER",
            TreeSpecies::Ironwood => "IRONWOOD",
            TreeSpecies::Cecropia => "CECROPIA",
        }
    }

    /// Human-readable label shown next to a tree.
    pub fn display_name(self) -> &'static str {
        match self {
            TreeSpecies::Kapok => "Kapok Tree",
            TreeSpecies::Mahogany => "Mahogany Tree",
            TreeSpecies::Rubber => "Rubber Tree",
            TreeSpecies::BrazilNut => "Brazil Nut Tree",
            TreeSpecies::Acai => "Açaí Palm",
            TreeSpecies::Cocoa => "Cocoa Tree",
            TreeSpecies::Rosewood => "Rosewood",
            TreeSpecies::AndeanAlder => "Andean Alder",
            TreeSpecies::Ironwood => "Ironwood",
            TreeSpecies::Cecropia => "Cecropia",
        }
    }
}

impl fmt::Display for TreeSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreeSpecies {
    type Err = UnknownSpecies;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TreeSpecies::ALL
            .into_iter()
            .find(|species| species.as_str() == s)
            .ok_or_else(|| UnknownSpecies(s.to_string()))
    }
}

impl TryFrom<String> for TreeSpecies {
    type Error = UnknownSpecies;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
