//! Fantasy roster positions that rankings are published for.

use crate::error::NexusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Positions with precomputed ranking lists.
///
/// `FLEX` is the combined RB/WR/TE list and the default when a caller does
/// not ask for anything specific.
///
/// # Examples
///
/// ```rust
/// use fantasy_nexus::FantasyPosition;
///
/// let pos: FantasyPosition = "wr".parse().unwrap();
/// assert_eq!(pos.to_string(), "WR");
/// assert_eq!(FantasyPosition::lenient(Some("K")), FantasyPosition::FLEX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum FantasyPosition {
    QB,
    RB,
    WR,
    TE,
    #[default]
    FLEX,
}

impl FantasyPosition {
    pub const ALL: [FantasyPosition; 5] = [
        FantasyPosition::QB,
        FantasyPosition::RB,
        FantasyPosition::WR,
        FantasyPosition::TE,
        FantasyPosition::FLEX,
    ];

    /// Positions that make up the FLEX list plus QB, i.e. every single-position list.
    pub const SKILL: [FantasyPosition; 4] = [
        FantasyPosition::QB,
        FantasyPosition::RB,
        FantasyPosition::WR,
        FantasyPosition::TE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FantasyPosition::QB => "QB",
            FantasyPosition::RB => "RB",
            FantasyPosition::WR => "WR",
            FantasyPosition::TE => "TE",
            FantasyPosition::FLEX => "FLEX",
        }
    }

    /// Parse a query parameter, falling back to `FLEX` for anything unrecognised.
    pub fn lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for FantasyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FantasyPosition {
    type Err = NexusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "QB" => Ok(FantasyPosition::QB),
            "RB" => Ok(FantasyPosition::RB),
            "WR" => Ok(FantasyPosition::WR),
            "TE" => Ok(FantasyPosition::TE),
            "FLEX" => Ok(FantasyPosition::FLEX),
            _ => Err(NexusError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_string_conversion() {
        for pos in FantasyPosition::ALL {
            assert_eq!(pos.to_string().parse::<FantasyPosition>().unwrap(), pos);
        }
        assert_eq!("te".parse::<FantasyPosition>().unwrap(), FantasyPosition::TE);
    }

    #[test]
    fn test_unknown_position_is_error() {
        let err = "K".parse::<FantasyPosition>().unwrap_err();
        assert!(err.to_string().contains("Invalid position"));
    }

    #[test]
    fn test_lenient_defaults_to_flex() {
        assert_eq!(FantasyPosition::lenient(None), FantasyPosition::FLEX);
        assert_eq!(FantasyPosition::lenient(Some("DST")), FantasyPosition::FLEX);
        assert_eq!(FantasyPosition::lenient(Some("RB")), FantasyPosition::RB);
    }
}
