//! Fantasy Nexus NFL library
//!
//! Resolves the NFL week that contains any instant, and reads the weekly
//! fantasy data keyed by that week: precomputed rankings, per-player
//! projections, start/sit comparisons, season breakdowns and Pro status.
//!
//! ## Features
//!
//! - **Week Windows**: Manual schedules first, then a computed Thursday-anchored week
//! - **Rankings**: Cached lists per season, week, scoring profile and position
//! - **Start/Sit**: Side-by-side projection comparisons and a local comparison log
//! - **Supabase**: Season breakdown RPC and subscription gating
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use fantasy_nexus::{WeekResolver, Week};
//!
//! let instant = Utc.with_ymd_and_hms(2025, 11, 21, 18, 0, 0).unwrap();
//! let window = WeekResolver::default().resolve(instant, None);
//!
//! assert_eq!(window.week, Week::new(12));
//! assert!(window.contains(instant));
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export UPSTASH_REDIS_REST_URL=https://...upstash.io
//! export UPSTASH_REDIS_REST_TOKEN=...
//! export NEXT_PUBLIC_SUPABASE_URL=https://...supabase.co
//! export SUPABASE_SERVICE_ROLE_KEY=...
//! export NEXUS_TIMEZONE=America/Chicago
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod projection;
pub mod rankings;
pub mod season_breakdown;
pub mod storage;
pub mod subscription;
pub mod weeks;

// Re-export commonly used types
pub use cli::types::{FantasyPosition, ScoringProfile, Season, Week};
pub use error::{NexusError, Result};
pub use weeks::{week_window_for, WeekResolver, WeekWindow};
