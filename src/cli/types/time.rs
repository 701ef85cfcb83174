//! Season and week newtypes.

use crate::error::{NexusError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for an NFL season, identified by its starting calendar year.
///
/// A game played in January 2026 belongs to `Season(2025)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Season(pub u16);

impl Season {
    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Calendar year as chrono expects it.
    pub fn year(&self) -> i32 {
        i32::from(self.0)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = NexusError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for week ordinals within a season. Week numbering starts at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Two-digit zero padded form used in cache keys (`7` -> `"07"`).
    pub fn padded(&self) -> String {
        format!("{:02}", self.0)
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = NexusError;

    fn from_str(s: &str) -> Result<Self> {
        let week: u16 = s.trim().parse()?;
        if week == 0 {
            return Err(NexusError::InvalidQuery {
                message: "week numbers start at 1".to_string(),
            });
        }
        Ok(Self(week))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_parse_and_display() {
        let season: Season = "2025".parse().unwrap();
        assert_eq!(season, Season::new(2025));
        assert_eq!(season.to_string(), "2025");
        assert_eq!(season.year(), 2025);
        assert!("twenty".parse::<Season>().is_err());
    }

    #[test]
    fn test_week_padding() {
        assert_eq!(Week::new(7).padded(), "07");
        assert_eq!(Week::new(12).padded(), "12");
        assert_eq!(Week::new(104).padded(), "104");
    }

    #[test]
    fn test_week_zero_rejected() {
        assert!("0".parse::<Week>().is_err());
        assert_eq!("3".parse::<Week>().unwrap(), Week::new(3));
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&(Season::new(2025), Week::new(4))).unwrap();
        assert_eq!(json, "[2025,4]");
    }
}
