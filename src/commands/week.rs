//! Week window command implementation

use super::common::{print_json, CommandContext};
use crate::{cli::WindowArgs, weeks::WeekWindow, Result, Season};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct WeekOutput<'a> {
    #[serde(flatten)]
    window: &'a WeekWindow,
    instant: chrono::DateTime<chrono::Utc>,
    contains_instant: bool,
    time_zone: String,
}

/// Handle the week command
pub async fn handle_week(window: WindowArgs, season: Option<Season>, as_json: bool) -> Result<()> {
    let ctx = CommandContext::from_env(&window)?;
    let resolved = ctx.window(season);

    if as_json {
        print_json(&WeekOutput {
            window: &resolved,
            instant: ctx.instant,
            contains_instant: resolved.contains(ctx.instant),
            time_zone: ctx.resolver.time_zone().to_string(),
        })?;
    } else {
        println!("{resolved}");
        if !resolved.contains(ctx.instant) {
            println!("note: {} falls after the end of this window", ctx.instant);
        }
    }

    Ok(())
}
