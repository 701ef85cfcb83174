//! Subscription command implementation

use super::common::print_json;
use crate::{
    core::{build_client, NexusConfig},
    subscription::fetch_subscription,
    Result,
};
use chrono::Utc;

/// Handle the subscription command
pub async fn handle_subscription(user_id: String, as_json: bool) -> Result<()> {
    let config = NexusConfig::from_env()?.supabase()?;
    let client = build_client()?;
    let summary = fetch_subscription(&client, &config, &user_id, Utc::now()).await;

    if as_json {
        return print_json(&summary);
    }

    println!("pro: {}", summary.pro);
    if let Some(status) = &summary.status {
        println!("status: {status}");
    }
    if let Some(end) = summary.current_period_end {
        println!("period ends: {end}");
    }
    Ok(())
}
