//! Season-long fantasy breakdown via the `get_fantasy_season_breakdown` RPC.

use crate::cli::types::{FantasyPosition, Season};
use crate::core::config::SupabaseConfig;
use crate::core::http::{ensure_success, supabase_headers};
use crate::error::Result;
use chrono::{Datelike, Utc};
use reqwest::header::HeaderValue;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub const RPC_NAME: &str = "get_fantasy_season_breakdown";
pub const DEFAULT_SCORING: &str = "half_ppr";
pub const DEFAULT_LIMIT: u32 = 50;

/// RPC arguments, serialized with the `p_` prefix the function expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonBreakdownRequest {
    #[serde(rename = "p_position")]
    pub position: String,
    #[serde(rename = "p_season")]
    pub season: Season,
    #[serde(rename = "p_scoring_type")]
    pub scoring: String,
    #[serde(rename = "p_limit")]
    pub limit: u32,
}

impl Default for SeasonBreakdownRequest {
    fn default() -> Self {
        let year = Utc::now().year();
        Self {
            position: FantasyPosition::QB.to_string(),
            season: Season::new(u16::try_from(year).unwrap_or(u16::MAX)),
            scoring: DEFAULT_SCORING.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SeasonBreakdownRequest {
    /// Fill unset arguments with defaults.
    pub fn with_defaults(
        position: Option<String>,
        season: Option<Season>,
        scoring: Option<String>,
        limit: Option<u32>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            position: position.unwrap_or(defaults.position),
            season: season.unwrap_or(defaults.season),
            scoring: scoring.unwrap_or(defaults.scoring),
            limit: limit.unwrap_or(defaults.limit),
        }
    }
}

pub fn rpc_url(config: &SupabaseConfig) -> String {
    format!("{}/rest/v1/rpc/{RPC_NAME}", config.url)
}

/// Call the RPC and return its JSON body unchanged.
pub async fn fetch_season_breakdown(
    client: &Client,
    config: &SupabaseConfig,
    request: &SeasonBreakdownRequest,
) -> Result<Value> {
    let mut headers = supabase_headers(config)?;
    headers.insert("prefer", HeaderValue::from_static("count=exact"));

    debug!(?request, "calling season breakdown rpc");
    let response = client
        .post(rpc_url(config))
        .headers(headers)
        .json(request)
        .send()
        .await?;

    Ok(ensure_success(response).await?.json::<Value>().await?)
}
