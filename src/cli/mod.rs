//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use crate::error::Result;
use types::{FantasyPosition, ReceptionScoring, ScoringProfile, Season, Week, TdPoints};

/// Which instant to resolve and how.
#[derive(Debug, Args, Default)]
pub struct WindowArgs {
    /// Instant to resolve as RFC 3339 (e.g. 2025-11-21T18:00:00Z). Defaults to now.
    #[clap(long)]
    pub at: Option<String>,

    /// IANA time zone for computed windows (or set `NEXUS_TIMEZONE`).
    #[clap(long)]
    pub tz: Option<String>,

    /// Extra manual week schedule, JSON (or set `NEXUS_SCHEDULE_FILE`).
    #[clap(long)]
    pub schedule: Option<PathBuf>,
}

/// Where cached rankings and projections are read from.
#[derive(Debug, Args, Default)]
pub struct StoreArgs {
    /// Read JSON snapshots from this directory instead of Upstash.
    #[clap(long)]
    pub cache_dir: Option<PathBuf>,
}

/// Scoring profile, named directly or built from its parts.
#[derive(Debug, Args, Default)]
pub struct ProfileArgs {
    /// Scoring profile, e.g. `half_ppr_6pt`. Defaults to `full_ppr_6pt`.
    #[clap(long)]
    pub profile: Option<ScoringProfile>,

    /// Reception scoring, combined with `--td-points` instead of `--profile`.
    #[clap(long, value_enum, conflicts_with = "profile")]
    pub receptions: Option<ReceptionScoring>,

    /// Points per passing touchdown (4 or 6).
    #[clap(long, conflicts_with = "profile")]
    pub td_points: Option<u8>,
}

impl ProfileArgs {
    /// `--profile` wins; otherwise missing parts default to PPR and 6 points.
    pub fn resolve(&self) -> Result<ScoringProfile> {
        if let Some(profile) = self.profile {
            return Ok(profile);
        }
        if self.receptions.is_none() && self.td_points.is_none() {
            return Ok(ScoringProfile::default());
        }
        let receptions = self.receptions.unwrap_or(ReceptionScoring::Ppr);
        let td = TdPoints::try_from(self.td_points.unwrap_or(6))?;
        Ok(ScoringProfile::from_parts(receptions, td))
    }
}

#[derive(Debug, Subcommand)]
pub enum StartSitCmd {
    /// Record a start/sit comparison of two or three players.
    Log {
        #[clap(flatten)]
        window: WindowArgs,

        #[clap(flatten)]
        profile: ProfileArgs,

        /// Player id (repeat 2-3 times).
        #[clap(long = "player-id", required = true)]
        player_ids: Vec<String>,

        /// Projection key of each player, in the same order.
        #[clap(long = "proj-key")]
        proj_keys: Vec<String>,

        /// Page the comparison came from.
        #[clap(long)]
        source_path: Option<String>,

        /// Override the season of the resolved window.
        #[clap(long, short)]
        season: Option<Season>,

        /// Override the week of the resolved window.
        #[clap(long, short)]
        week: Option<Week>,

        /// SQLite file to log into. Defaults to the user cache directory.
        #[clap(long)]
        db: Option<PathBuf>,
    },

    /// Most-compared players, for the current week unless told otherwise.
    Top {
        #[clap(flatten)]
        window: WindowArgs,

        /// Filter on the logged season instead of the current week window.
        #[clap(long, short)]
        season: Option<Season>,

        /// Filter on the logged week instead of the current week window.
        #[clap(long, short)]
        week: Option<Week>,

        #[clap(long, short)]
        limit: Option<u32>,

        /// Count every logged comparison instead of the current week window.
        #[clap(long)]
        all_time: bool,

        #[clap(long)]
        db: Option<PathBuf>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Find players by name in this week's ranking pool.
    Search {
        #[clap(flatten)]
        window: WindowArgs,

        #[clap(flatten)]
        store: StoreArgs,

        /// Name fragment, case-insensitive.
        query: String,

        #[clap(flatten)]
        profile: ProfileArgs,

        #[clap(long, short, default_value_t = 8)]
        limit: usize,

        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "nexus", about = "Fantasy Nexus NFL week, rankings and start/sit tools")]
pub struct Nexus {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the NFL week window containing an instant.
    Week {
        #[clap(flatten)]
        window: WindowArgs,

        /// Season to resolve against. Defaults to the instant's season.
        #[clap(long, short)]
        season: Option<Season>,

        #[clap(long)]
        json: bool,
    },

    /// Precomputed rankings for the current week.
    Rankings {
        #[clap(flatten)]
        window: WindowArgs,

        #[clap(flatten)]
        store: StoreArgs,

        #[clap(flatten)]
        profile: ProfileArgs,

        #[clap(long, short, default_value_t = FantasyPosition::default())]
        position: FantasyPosition,

        /// Maximum items (1-1000).
        #[clap(long, short)]
        limit: Option<usize>,

        /// Keep only games kicking off inside the week window.
        #[clap(long)]
        in_window: bool,

        #[clap(long)]
        json: bool,
    },

    /// Print one stored projection record.
    Projection {
        #[clap(flatten)]
        store: StoreArgs,

        /// Projection key, e.g. `nfl:proj:...`.
        #[clap(long)]
        key: String,

        #[clap(long)]
        json: bool,
    },

    /// Compare two or three players side by side.
    Compare {
        #[clap(flatten)]
        store: StoreArgs,

        /// Projection key (repeat 2-3 times).
        #[clap(long = "key", required = true)]
        keys: Vec<String>,

        #[clap(long)]
        json: bool,
    },

    /// Season-long fantasy breakdown from Supabase.
    SeasonBreakdown {
        #[clap(long, short)]
        position: Option<String>,

        #[clap(long, short)]
        season: Option<Season>,

        /// Scoring type, e.g. `half_ppr`.
        #[clap(long)]
        scoring: Option<String>,

        #[clap(long, short)]
        limit: Option<u32>,
    },

    /// Check whether a user has Pro.
    Subscription {
        #[clap(long)]
        user_id: String,

        #[clap(long)]
        json: bool,
    },

    /// Start/sit comparison log.
    StartSit {
        #[clap(subcommand)]
        cmd: StartSitCmd,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NexusError;

    #[test]
    fn test_profile_args_default() {
        assert_eq!(
            ProfileArgs::default().resolve().unwrap(),
            ScoringProfile::FullPpr6pt
        );
    }

    #[test]
    fn test_profile_args_named_profile() {
        let args = ProfileArgs {
            profile: Some(ScoringProfile::Standard4pt),
            ..Default::default()
        };
        assert_eq!(args.resolve().unwrap(), ScoringProfile::Standard4pt);
    }

    #[test]
    fn test_profile_args_from_parts() {
        let half = ProfileArgs {
            receptions: Some(ReceptionScoring::HalfPpr),
            td_points: Some(4),
            ..Default::default()
        };
        assert_eq!(half.resolve().unwrap(), ScoringProfile::HalfPpr4pt);

        let td_only = ProfileArgs {
            td_points: Some(4),
            ..Default::default()
        };
        assert_eq!(td_only.resolve().unwrap(), ScoringProfile::FullPpr4pt);

        let bad = ProfileArgs {
            td_points: Some(5),
            ..Default::default()
        };
        assert!(matches!(bad.resolve(), Err(NexusError::InvalidProfile { .. })));
    }

    #[test]
    fn test_cli_parses_profile_parts() {
        let app = Nexus::try_parse_from([
            "nexus", "rankings", "--receptions", "standard", "--td-points", "6", "--position", "WR",
        ])
        .unwrap();
        match app.command {
            Commands::Rankings { profile, .. } => {
                assert_eq!(profile.resolve().unwrap(), ScoringProfile::Standard6pt)
            }
            other => panic!("unexpected command {other:?}"),
        }

        let conflicting = Nexus::try_parse_from([
            "nexus", "rankings", "--profile", "full_ppr_6pt", "--receptions", "ppr",
        ]);
        assert!(conflicting.is_err());
    }
}
