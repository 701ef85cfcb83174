//! Type-safe wrappers and enums shared by the CLI and the library.

pub mod position;
pub mod profile;
pub mod time;

pub use position::FantasyPosition;
pub use profile::{ReceptionScoring, ScoringProfile, TdPoints};
pub use time::{Season, Week};
