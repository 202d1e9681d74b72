#![forbid(unsafe_code)]

//! Named arrangements.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the four spatial arrangements a tile set can morph into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    /// Flat periodic-table style wall of cards.
    Table,
    /// Even-density shell around the origin.
    Sphere,
    /// Two interleaved spiral strands.
    Helix,
    /// 5 x 4 block repeated in depth.
    Grid,
}

impl Arrangement {
    /// All arrangements in selection order.
    pub const ALL: [Self; 4] = [Self::Table, Self::Sphere, Self::Helix, Self::Grid];

    /// Lowercase name used by selection triggers and config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Sphere => "sphere",
            Self::Helix => "helix",
            Self::Grid => "grid",
        }
    }
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known arrangement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown arrangement {name:?} (expected table, sphere, helix, or grid)")]
pub struct ParseArrangementError {
    pub name: String,
}

impl FromStr for Arrangement {
    type Err = ParseArrangementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseArrangementError {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for a in Arrangement::ALL {
            assert_eq!(a.name().parse::<Arrangement>(), Ok(a));
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(" Helix ".parse::<Arrangement>(), Ok(Arrangement::Helix));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "cube".parse::<Arrangement>().unwrap_err();
        assert_eq!(err.name, "cube");
        assert!(err.to_string().contains("cube"));
    }
}
