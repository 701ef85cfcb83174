//! Start/sit log, leaderboard and player search commands

use std::path::PathBuf;

use super::common::{open_store, print_json, CommandContext};
use crate::{
    cli::{StoreArgs, WindowArgs},
    rankings::{fetch_player_pool, search_pool},
    storage::{ComparisonLog, NewComparison, TopPlayersQuery},
    weeks::TimeRange,
    Result, ScoringProfile, Season, Week,
};
use tracing::info;

/// Parameters for `start-sit log`
#[derive(Debug, Default)]
pub struct LogParams {
    pub window: WindowArgs,
    pub profile: ScoringProfile,
    pub player_ids: Vec<String>,
    pub proj_keys: Vec<String>,
    pub source_path: Option<String>,
    pub season: Option<Season>,
    pub week: Option<Week>,
    pub db: Option<PathBuf>,
}

/// Parameters for `start-sit top`
#[derive(Debug, Default)]
pub struct TopParams {
    pub window: WindowArgs,
    pub season: Option<Season>,
    pub week: Option<Week>,
    pub limit: Option<u32>,
    pub all_time: bool,
    pub db: Option<PathBuf>,
    pub as_json: bool,
}

fn open_log(db: Option<&PathBuf>) -> Result<ComparisonLog> {
    let log = match db {
        Some(path) => ComparisonLog::open(path)?,
        None => ComparisonLog::new()?,
    };
    Ok(log)
}

/// Build the row to log; season and week come from the resolved window unless overridden.
pub fn build_comparison(ctx: &CommandContext, params: &LogParams) -> NewComparison {
    let window = ctx.window(params.season);
    NewComparison {
        season: params.season.unwrap_or(window.season),
        week: params.week.unwrap_or(window.week),
        profile: params.profile.to_string(),
        player_ids: params.player_ids.clone(),
        proj_keys: params.proj_keys.clone(),
        source_path: params.source_path.clone(),
        created_by: None,
    }
}

/// Build the leaderboard query. An explicit season or week filters on the
/// logged columns; with neither (and not `all_time`) the current week window
/// bounds the log time.
pub fn build_top_query(ctx: &CommandContext, params: &TopParams) -> TopPlayersQuery {
    let use_window = !params.all_time && params.season.is_none() && params.week.is_none();
    let range = use_window.then(|| TimeRange::from(&ctx.window(None)));
    TopPlayersQuery {
        range,
        season: params.season,
        week: params.week,
        limit: params.limit,
    }
}

/// Handle `start-sit log`
pub async fn handle_log(params: LogParams) -> Result<()> {
    let ctx = CommandContext::from_env(&params.window)?;
    let comparison = build_comparison(&ctx, &params);
    let mut log = open_log(params.db.as_ref())?;

    if log.log_comparison(&comparison, ctx.instant)? {
        info!(dedupe_key = %comparison.dedupe_key(), "logged comparison");
        println!(
            "✓ Logged comparison for season {} week {}",
            comparison.season, comparison.week
        );
    } else {
        println!("Comparison already logged ({})", comparison.dedupe_key());
    }
    Ok(())
}

/// Handle `start-sit top`
pub async fn handle_top(params: TopParams) -> Result<()> {
    let ctx = CommandContext::from_env(&params.window)?;
    let query = build_top_query(&ctx, &params);
    let log = open_log(params.db.as_ref())?;
    let top = log.top_players(&query)?;

    if params.as_json {
        return print_json(&top);
    }

    if top.is_empty() {
        println!("No comparisons logged yet.");
    }
    for (i, player) in top.iter().enumerate() {
        println!("{:>3}. {:<12} {}", i + 1, player.player_id, player.comparisons);
    }
    Ok(())
}

/// Handle `start-sit search`
pub async fn handle_search(
    window: WindowArgs,
    store: StoreArgs,
    query: String,
    profile: ScoringProfile,
    limit: usize,
    as_json: bool,
) -> Result<()> {
    let ctx = CommandContext::from_env(&window)?;
    let week = ctx.window(None);
    let store = open_store(&ctx.config, &store)?;

    let pool = fetch_player_pool(&store, &week, profile).await;
    let hits = search_pool(&pool, &query, limit);

    if as_json {
        return print_json(&hits);
    }
    for item in hits {
        println!(
            "{:<24} {:<3} {:<4} {}",
            item.full_name, item.position, item.team_abbr, item.proj_key
        );
    }
    Ok(())
}
