//! Rankings command implementation

use super::common::{open_store, print_json, CommandContext};
use crate::{
    cli::{StoreArgs, WindowArgs},
    rankings::{fetch_rankings, RankCacheKey, RankItem, RankingsResponse},
    weeks::filter_within_window,
    FantasyPosition, Result, ScoringProfile,
};

/// Parameters for the rankings command
#[derive(Debug, Default)]
pub struct RankingsParams {
    pub window: WindowArgs,
    pub store: StoreArgs,
    pub profile: ScoringProfile,
    pub position: FantasyPosition,
    pub limit: Option<usize>,
    pub in_window: bool,
    pub as_json: bool,
}

pub fn format_rank_line(rank: usize, item: &RankItem) -> String {
    format!(
        "{:>3}. {:<24} {:<3} {:<4} {:>6.2}",
        rank, item.full_name, item.position, item.team_abbr, item.score
    )
}

/// Handle the rankings command
pub async fn handle_rankings(params: RankingsParams) -> Result<()> {
    let ctx = CommandContext::from_env(&params.window)?;
    let window = ctx.window(None);
    let key = RankCacheKey::for_window(&window, params.profile, params.position);
    let store = open_store(&ctx.config, &params.store)?;

    let mut items = fetch_rankings(&store, &key, params.limit).await;
    if params.in_window {
        items = filter_within_window(items, &window);
    }
    let response = RankingsResponse::new(&key, items, ctx.instant);

    if params.as_json {
        return print_json(&response);
    }

    println!("{window}");
    println!("{} {} ({})", response.profile, response.position, key);
    if response.items.is_empty() {
        println!("No rankings cached for this week.");
    }
    for (i, item) in response.items.iter().enumerate() {
        println!("{}", format_rank_line(i + 1, item));
    }

    Ok(())
}
