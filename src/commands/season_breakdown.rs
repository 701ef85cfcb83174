//! Season breakdown command implementation

use super::common::print_json;
use crate::{
    core::{build_client, NexusConfig},
    season_breakdown::{fetch_season_breakdown, SeasonBreakdownRequest},
    Result, Season,
};

/// Handle the season-breakdown command; prints the RPC result as JSON.
pub async fn handle_season_breakdown(
    position: Option<String>,
    season: Option<Season>,
    scoring: Option<String>,
    limit: Option<u32>,
) -> Result<()> {
    let config = NexusConfig::from_env()?.supabase()?;
    let request = SeasonBreakdownRequest::with_defaults(position, season, scoring, limit);

    let client = build_client()?;
    let data = fetch_season_breakdown(&client, &config, &request).await?;
    print_json(&data)
}
