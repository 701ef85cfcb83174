//! Scoring profiles used to key precomputed ranking lists.

use crate::error::NexusError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How receptions are scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ReceptionScoring {
    /// No points per reception
    Standard,
    /// Half a point per reception
    HalfPpr,
    /// One point per reception
    Ppr,
}

/// Points awarded for a passing touchdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TdPoints {
    Four,
    Six,
}

impl TryFrom<u8> for TdPoints {
    type Error = NexusError;

    fn try_from(points: u8) -> Result<Self, Self::Error> {
        match points {
            4 => Ok(TdPoints::Four),
            6 => Ok(TdPoints::Six),
            other => Err(NexusError::InvalidProfile {
                profile: format!("{other}pt passing touchdowns"),
            }),
        }
    }
}

/// A league scoring configuration that has its own ranking lists.
///
/// Serialized names match the cache key segment, e.g. `full_ppr_6pt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScoringProfile {
    #[serde(rename = "half_ppr_4pt")]
    HalfPpr4pt,
    #[serde(rename = "half_ppr_6pt")]
    HalfPpr6pt,
    #[serde(rename = "full_ppr_4pt")]
    FullPpr4pt,
    #[default]
    #[serde(rename = "full_ppr_6pt")]
    FullPpr6pt,
    #[serde(rename = "standard_4pt")]
    Standard4pt,
    #[serde(rename = "standard_6pt")]
    Standard6pt,
}

impl ScoringProfile {
    pub const ALL: [ScoringProfile; 6] = [
        ScoringProfile::HalfPpr4pt,
        ScoringProfile::HalfPpr6pt,
        ScoringProfile::FullPpr4pt,
        ScoringProfile::FullPpr6pt,
        ScoringProfile::Standard4pt,
        ScoringProfile::Standard6pt,
    ];

    pub fn from_parts(receptions: ReceptionScoring, td: TdPoints) -> Self {
        match (receptions, td) {
            (ReceptionScoring::Ppr, TdPoints::Six) => ScoringProfile::FullPpr6pt,
            (ReceptionScoring::Ppr, TdPoints::Four) => ScoringProfile::FullPpr4pt,
            (ReceptionScoring::HalfPpr, TdPoints::Six) => ScoringProfile::HalfPpr6pt,
            (ReceptionScoring::HalfPpr, TdPoints::Four) => ScoringProfile::HalfPpr4pt,
            (ReceptionScoring::Standard, TdPoints::Six) => ScoringProfile::Standard6pt,
            (ReceptionScoring::Standard, TdPoints::Four) => ScoringProfile::Standard4pt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringProfile::HalfPpr4pt => "half_ppr_4pt",
            ScoringProfile::HalfPpr6pt => "half_ppr_6pt",
            ScoringProfile::FullPpr4pt => "full_ppr_4pt",
            ScoringProfile::FullPpr6pt => "full_ppr_6pt",
            ScoringProfile::Standard4pt => "standard_4pt",
            ScoringProfile::Standard6pt => "standard_6pt",
        }
    }

    /// Field name holding this profile's points on a projection record.
    pub fn points_field(&self) -> String {
        format!("fantasy_points_{}", self.as_str())
    }

    /// Parse a query parameter, falling back to `full_ppr_6pt` for anything unrecognised.
    pub fn lenient(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for ScoringProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringProfile {
    type Err = NexusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ScoringProfile::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| NexusError::InvalidProfile {
                profile: s.to_string(),
            })
    }
}
