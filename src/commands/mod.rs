//! Command implementations for the `nexus` CLI

pub mod common;
pub mod compare;
pub mod projection;
pub mod rankings;
pub mod season_breakdown;
pub mod start_sit;
pub mod subscription;
pub mod week;
