//! Per-player projection records and the start/sit comparison view.
//!
//! Records are stored whole under a `proj_key` (e.g. `nfl:proj:...`) and are
//! passed through mostly untouched. The typed [`ProjectionRecord`] is a
//! lenient view for display; [`compare`] works on raw JSON so that older
//! record layouts still compare.

use crate::cli::types::ScoringProfile;
use crate::core::cache::KvStore;
use crate::error::{NexusError, Result};
use crate::rankings::TeamId;
use crate::weeks::Kickoff;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Who and which game a projection is for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionIdentity {
    pub player_id: Value,
    pub full_name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub team_abbr: Option<String>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub commence_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleeper_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub espn_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yahoo_id: Option<String>,
}

/// Market-derived stat projections. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatProjections {
    pub pass_yds: Option<f64>,
    pub rush_yds: Option<f64>,
    pub rec_yds: Option<f64>,
    pub receptions: Option<f64>,
    pub pass_tds: Option<f64>,
    pub rush_tds: Option<f64>,
    pub rec_tds: Option<f64>,
    pub pass_ints: Option<f64>,
    pub tds: Option<f64>,
    pub any_td_prob: Option<f64>,
    pub any_td_lambda: Option<f64>,
    pub td_2plus_prob: Option<f64>,
    pub longest_pass_completion: Option<f64>,
    pub longest_reception: Option<f64>,
    pub longest_rush: Option<f64>,
}

/// A stored projection record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub identity: ProjectionIdentity,
    #[serde(default)]
    pub projections: Option<StatProjections>,
    #[serde(default)]
    pub inputs: Option<Value>,
    #[serde(default)]
    pub event_total: Option<f64>,
    #[serde(default)]
    pub home_spread: Option<f64>,
    /// `fantasy_points_*` and anything else not named above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ProjectionRecord {
    pub fn fantasy_points(&self, profile: ScoringProfile) -> Option<f64> {
        self.extra.get(&profile.points_field()).and_then(Value::as_f64)
    }

    /// Whether any input market was inferred rather than quoted.
    pub fn is_inferred(&self) -> bool {
        self.inputs
            .as_ref()
            .and_then(|inputs| inputs.get("inferred"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl Kickoff for ProjectionRecord {
    fn kickoff(&self) -> Option<DateTime<Utc>> {
        let raw = self
            .extra
            .get("commence_time")
            .and_then(Value::as_str)
            .or(self.identity.commence_time.as_deref())?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// JSON strings are decoded; anything that fails to decode is kept as-is.
fn decode_or_raw(value: Value) -> Value {
    match value {
        Value::String(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
        other => other,
    }
}

/// Read one projection record.
pub async fn fetch_projection<S: KvStore>(store: &S, proj_key: &str) -> Result<Option<Value>> {
    let proj_key = proj_key.trim();
    if proj_key.is_empty() {
        return Err(NexusError::InvalidQuery {
            message: "proj_key must not be empty".to_string(),
        });
    }
    Ok(store.get(proj_key).await?.map(decode_or_raw))
}

/// Identity block of a comparison row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareIdentity {
    pub player_id: Value,
    pub full_name: Value,
    pub position: Value,
    pub team_abbr: Value,
    pub headshot_url: Value,
}

/// One player in a start/sit comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareItem {
    pub proj_key: String,
    pub identity: CompareIdentity,
    pub event_total: Value,
    pub home_spread: Value,
    pub home_team: Value,
    pub away_team: Value,
    pub inputs: Value,
    pub projections: Value,
    pub fantasy_points: Map<String, Value>,
}

fn field(source: &Value, name: &str) -> Value {
    match source.get(name) {
        Some(Value::Null) | None => Value::Null,
        Some(v) => v.clone(),
    }
}

fn first_present(candidates: &[(&Value, &str)]) -> Value {
    candidates
        .iter()
        .map(|(source, name)| field(source, name))
        .find(|v| !v.is_null())
        .unwrap_or(Value::Null)
}

/// Flatten a raw record into a comparison row.
pub fn compare_item(proj_key: &str, record: &Value) -> CompareItem {
    let identity = match record.get("identity") {
        Some(id @ Value::Object(_)) => id,
        _ => record,
    };

    let fantasy_points = record
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter(|(k, _)| k.starts_with("fantasy_points_"))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default();

    CompareItem {
        proj_key: proj_key.to_string(),
        identity: CompareIdentity {
            player_id: field(identity, "player_id"),
            full_name: field(identity, "full_name"),
            position: first_present(&[(identity, "position"), (identity, "player_position")]),
            team_abbr: first_present(&[(identity, "team_abbr"), (identity, "team_name")]),
            headshot_url: first_present(&[(identity, "headshot_url"), (record, "headshot_url")]),
        },
        event_total: field(record, "event_total"),
        home_spread: field(record, "home_spread"),
        home_team: first_present(&[(record, "home_team"), (identity, "home_team")]),
        away_team: first_present(&[(record, "away_team"), (identity, "away_team")]),
        inputs: field(record, "inputs"),
        projections: field(record, "projections"),
        fantasy_points,
    }
}

/// Compare two or three players side by side. Keys with no record are dropped.
pub async fn compare<S: KvStore>(store: &S, proj_keys: &[String]) -> Result<Vec<CompareItem>> {
    let keys: Vec<&str> = proj_keys
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect();
    if !(2..=3).contains(&keys.len()) {
        return Err(NexusError::InvalidQuery {
            message: "Provide 2-3 proj_keys".to_string(),
        });
    }

    let records = futures::future::join_all(keys.iter().map(|key| store.get(key))).await;

    let mut items = Vec::with_capacity(keys.len());
    for (key, record) in keys.iter().zip(records) {
        if let Some(record) = record? {
            items.push(compare_item(key, &decode_or_raw(record)));
        }
    }
    Ok(items)
}
