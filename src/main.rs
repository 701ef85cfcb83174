//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use fantasy_nexus::{
    cli::{Commands, Nexus, StartSitCmd},
    commands::{
        compare::handle_compare,
        projection::handle_projection,
        rankings::{handle_rankings, RankingsParams},
        season_breakdown::handle_season_breakdown,
        start_sit::{handle_log, handle_search, handle_top, LogParams, TopParams},
        subscription::handle_subscription,
        week::handle_week,
    },
    Result,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let app = Nexus::parse();

    match app.command {
        Commands::Week {
            window,
            season,
            json,
        } => handle_week(window, season, json).await?,

        Commands::Rankings {
            window,
            store,
            profile,
            position,
            limit,
            in_window,
            json,
        } => {
            handle_rankings(RankingsParams {
                window,
                store,
                profile: profile.resolve()?,
                position,
                limit,
                in_window,
                as_json: json,
            })
            .await?
        }

        Commands::Projection { store, key, json } => handle_projection(store, key, json).await?,

        Commands::Compare { store, keys, json } => handle_compare(store, keys, json).await?,

        Commands::SeasonBreakdown {
            position,
            season,
            scoring,
            limit,
        } => handle_season_breakdown(position, season, scoring, limit).await?,

        Commands::Subscription { user_id, json } => handle_subscription(user_id, json).await?,

        Commands::StartSit { cmd } => match cmd {
            StartSitCmd::Log {
                window,
                profile,
                player_ids,
                proj_keys,
                source_path,
                season,
                week,
                db,
            } => {
                handle_log(LogParams {
                    window,
                    profile: profile.resolve()?,
                    player_ids,
                    proj_keys,
                    source_path,
                    season,
                    week,
                    db,
                })
                .await?
            }

            StartSitCmd::Top {
                window,
                season,
                week,
                limit,
                all_time,
                db,
                json,
            } => {
                handle_top(TopParams {
                    window,
                    season,
                    week,
                    limit,
                    all_time,
                    db,
                    as_json: json,
                })
                .await?
            }

            StartSitCmd::Search {
                window,
                store,
                query,
                profile,
                limit,
                json,
            } => {
                let profile = profile.resolve()?;
                handle_search(window, store, query, profile, limit, json).await?
            },
        },
    }

    Ok(())
}
