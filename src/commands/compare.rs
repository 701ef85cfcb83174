//! Start/sit compare command implementation

use super::common::{display_value, open_store, print_json};
use crate::{cli::StoreArgs, core::NexusConfig, projection::compare, projection::CompareItem, Result};

pub fn format_compare_item(item: &CompareItem) -> String {
    let points = item
        .fantasy_points
        .iter()
        .map(|(field, value)| {
            let profile = field.trim_start_matches("fantasy_points_");
            format!("{profile}={}", display_value(value))
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{} ({} {}) total {} | {}",
        display_value(&item.identity.full_name),
        display_value(&item.identity.position),
        display_value(&item.identity.team_abbr),
        display_value(&item.event_total),
        points
    )
}

/// Handle the compare command
pub async fn handle_compare(store: StoreArgs, keys: Vec<String>, as_json: bool) -> Result<()> {
    let config = NexusConfig::from_env()?;
    let store = open_store(&config, &store)?;
    let items = compare(&store, &keys).await?;

    if as_json {
        return print_json(&serde_json::json!({ "items": items }));
    }

    if items.is_empty() {
        println!("None of the keys have a stored projection.");
    }
    for item in &items {
        println!("{}", format_compare_item(item));
    }
    Ok(())
}
