//! Weekly ranking lists from the precomputed rank cache.
//!
//! Lists are keyed by season, week, scoring profile and position:
//! `nfl:rankcache:WEEK:{season}:{week:02}:{profile}:{position}`. A key may
//! hold a Redis list of JSON entries or a single JSON value, so reads try the
//! list form first and fall back to `GET`. Failed reads and malformed entries
//! degrade to fewer (or no) items instead of errors.


use crate::cli::types::{FantasyPosition, ScoringProfile, Season, Week};
use crate::core::cache::{CacheKey, KvStore};
use crate::weeks::{Kickoff, WeekWindow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Upper bound for a requested item limit.
pub const MAX_RANK_LIMIT: usize = 1000;

/// Cache key of one precomputed ranking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankCacheKey {
    pub season: Season,
    pub week: Week,
    pub profile: ScoringProfile,
    pub position: FantasyPosition,
}

impl RankCacheKey {
    pub fn for_window(
        window: &WeekWindow,
        profile: ScoringProfile,
        position: FantasyPosition,
    ) -> Self {
        Self {
            season: window.season,
            week: window.week,
            profile,
            position,
        }
    }
}

impl CacheKey for RankCacheKey {
    fn to_key(&self) -> String {
        format!(
            "nfl:rankcache:WEEK:{}:{}:{}:{}",
            self.season,
            self.week.padded(),
            self.profile,
            self.position
        )
    }
}

impl fmt::Display for RankCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key())
    }
}

/// Team identifiers arrive as either strings or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamId {
    Number(i64),
    Text(String),
}

/// One ranked player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankItem {
    #[serde(deserialize_with = "string_or_number")]
    pub player_id: String,
    pub full_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub team_abbr: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub score: f64,
    #[serde(default)]
    pub proj_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commence_time: Option<String>,
}

impl Kickoff for RankItem {
    fn kickoff(&self) -> Option<DateTime<Utc>> {
        let raw = self.commence_time.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|score| score.is_finite())
        .ok_or_else(|| serde::de::Error::custom(format!("score is not numeric: {value}")))
}

/// Rankings for one profile/position in a week.
#[derive(Debug, Clone, Serialize)]
pub struct RankingsResponse {
    pub profile: ScoringProfile,
    pub position: FantasyPosition,
    pub season: Season,
    pub week: Week,
    pub items: Vec<RankItem>,
    #[serde(rename = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RankingsResponse {
    pub fn new(key: &RankCacheKey, items: Vec<RankItem>, now: DateTime<Utc>) -> Self {
        let updated_at = (!items.is_empty()).then_some(now);
        Self {
            profile: key.profile,
            position: key.position,
            season: key.season,
            week: key.week,
            items,
            updated_at,
        }
    }
}

pub fn clamp_limit(requested: usize) -> usize {
    requested.clamp(1, MAX_RANK_LIMIT)
}

/// Decode a JSON string entry, or pass an already decoded value through.
fn decode_json_entry(entry: Value) -> Option<Value> {
    match entry {
        Value::String(raw) => serde_json::from_str(&raw).ok(),
        other => Some(other),
    }
}

/// Records held by a single `GET` value.
///
/// Accepts an array, an object with an `items` array, or any other object
/// (whose values are the records). JSON strings are decoded first.
pub fn records_from_value(value: Value) -> Vec<Value> {
    match decode_json_entry(value) {
        Some(Value::Array(records)) => records,
        Some(Value::Object(mut map)) => match map.remove("items") {
            Some(Value::Array(records)) => records,
            Some(items) => {
                map.insert("items".to_string(), items);
                map.into_iter().map(|(_, v)| v).collect()
            }
            None => map.into_iter().map(|(_, v)| v).collect(),
        },
        _ => Vec::new(),
    }
}

/// Turn raw entries into items, skipping the ones that do not decode.
pub fn decode_entries(entries: Vec<Value>) -> Vec<RankItem> {
    let total = entries.len();
    let items: Vec<RankItem> = entries
        .into_iter()
        .filter_map(decode_json_entry)
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if items.len() < total {
        debug!(skipped = total - items.len(), total, "skipped malformed rank entries");
    }
    items
}

/// Read a ranking list, preferring the list form and falling back to `GET`.
///
/// Never fails: store errors are logged and yield an empty list.
pub async fn fetch_rankings<S: KvStore>(
    store: &S,
    key: &RankCacheKey,
    limit: Option<usize>,
) -> Vec<RankItem> {
    let key = key.to_key();

    let mut items = match store.lrange(&key).await {
        Ok(entries) => decode_entries(entries),
        Err(err) => {
            warn!(%key, error = %err, "rank list read failed, trying GET");
            Vec::new()
        }
    };

    if items.is_empty() {
        items = match store.get(&key).await {
            Ok(Some(value)) => decode_entries(records_from_value(value)),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(%key, error = %err, "rank value read failed");
                Vec::new()
            }
        };
    }

    if let Some(limit) = limit {
        items.truncate(clamp_limit(limit));
    }
    items
}

/// Every skill-position list for a week merged into one pool, first occurrence of a player wins.
pub async fn fetch_player_pool<S: KvStore>(
    store: &S,
    window: &WeekWindow,
    profile: ScoringProfile,
) -> Vec<RankItem> {
    let keys: Vec<RankCacheKey> = FantasyPosition::SKILL
        .into_iter()
        .map(|position| RankCacheKey::for_window(window, profile, position))
        .collect();
    let lists = futures::future::join_all(keys.iter().map(|key| fetch_rankings(store, key, None))).await;

    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|item| seen.insert(item.player_id.clone()))
        .collect()
}

/// Case-insensitive name search over a pool, at most `max` hits.
pub fn search_pool<'a>(pool: &'a [RankItem], query: &str, max: usize) -> Vec<&'a RankItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    pool.iter()
        .filter(|item| item.full_name.to_lowercase().contains(&needle))
        .take(max)
        .collect()
}
