//! Projection command implementation

use super::common::{open_store, print_json};
use crate::{
    cli::StoreArgs,
    core::NexusConfig,
    projection::{fetch_projection, ProjectionRecord},
    Result, ScoringProfile,
};
use serde_json::Value;

/// Text summary of a record, or `None` when it does not have the usual shape.
pub fn summarize_projection(value: &Value) -> Option<Vec<String>> {
    let record: ProjectionRecord = serde_json::from_value(value.clone()).ok()?;
    let identity = &record.identity;

    let mut lines = vec![format!(
        "{} ({} {})",
        identity.full_name,
        identity.position.as_deref().unwrap_or("-"),
        identity.team_abbr.as_deref().unwrap_or("-"),
    )];
    if let Some(total) = record.event_total {
        lines.push(format!("  game total {total:.1}, home spread {:+.1}", record.home_spread.unwrap_or(0.0)));
    }
    for profile in ScoringProfile::ALL {
        if let Some(points) = record.fantasy_points(profile) {
            lines.push(format!("  {:<14} {points:>6.2}", profile.as_str()));
        }
    }
    if record.is_inferred() {
        lines.push("  (some markets inferred)".to_string());
    }
    Some(lines)
}

/// Handle the projection command
pub async fn handle_projection(store: StoreArgs, key: String, as_json: bool) -> Result<()> {
    let config = NexusConfig::from_env()?;
    let store = open_store(&config, &store)?;

    let Some(record) = fetch_projection(&store, &key).await? else {
        println!("No projection stored under {key}");
        return Ok(());
    };

    match summarize_projection(&record) {
        Some(lines) if !as_json => lines.iter().for_each(|line| println!("{line}")),
        _ => print_json(&record)?,
    }

    Ok(())
}
