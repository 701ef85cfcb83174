//! Data models for the comparison log

use crate::cli::types::{Season, Week};
use crate::error::NexusError;
use crate::weeks::TimeRange;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default number of rows from [`top_players`](super::ComparisonLog::top_players)
pub const DEFAULT_TOP_LIMIT: u32 = 25;

/// A comparison about to be logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewComparison {
    pub season: Season,
    pub week: Week,
    pub profile: String,
    pub player_ids: Vec<String>,
    #[serde(default)]
    pub proj_keys: Vec<String>,
    #[serde(default)]
    pub source_path: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl NewComparison {
    pub fn validate(&self) -> Result<(), NexusError> {
        let problem = if self.season.as_u16() == 0 {
            Some("season_year must be set")
        } else if self.week.as_u16() == 0 {
            Some("week must be set")
        } else if self.profile.trim().is_empty() {
            Some("profile must not be empty")
        } else if self.player_ids.len() < 2 {
            Some("at least two player ids are required")
        } else {
            None
        };

        match problem {
            Some(message) => Err(NexusError::InvalidQuery {
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Identifies the same comparison within one week: `{season}:{week}:`
    /// followed by the projection keys, or the player ids when no projection
    /// keys were given.
    pub fn dedupe_key(&self) -> String {
        let keys = if self.proj_keys.is_empty() {
            &self.player_ids
        } else {
            &self.proj_keys
        };
        format!(
            "{}:{}:{}",
            self.season,
            self.week,
            dedupe_key_for(keys, &self.profile)
        )
    }
}

/// Sorted keys joined with `|`, then `|{profile}`.
pub fn dedupe_key_for(keys: &[String], profile: &str) -> String {
    let mut sorted: Vec<&str> = keys.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    format!("{}|{}", sorted.join("|"), profile)
}

/// A logged comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredComparison {
    pub id: i64,
    pub season: Season,
    pub week: Week,
    pub profile: String,
    pub player_ids: Vec<String>,
    pub proj_keys: Option<Vec<String>>,
    pub source_path: Option<String>,
    pub dedupe_key: String,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Filters for the most-compared players
#[derive(Debug, Clone, Default)]
pub struct TopPlayersQuery {
    /// Half-open `[start, end)` range on the logging time
    pub range: Option<TimeRange>,
    pub season: Option<Season>,
    pub week: Option<Week>,
    pub limit: Option<u32>,
}

/// How often a player appeared in logged comparisons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPlayer {
    pub player_id: String,
    pub comparisons: u32,
}
