//! Environment configuration.

use crate::error::{NexusError, Result};
use crate::weeks::{parse_time_zone, ScheduleBook, WeekResolver, DEFAULT_TIME_ZONE};
use chrono_tz::Tz;
use std::path::PathBuf;

pub const UPSTASH_URL_ENV: &str = "UPSTASH_REDIS_REST_URL";
pub const UPSTASH_TOKEN_ENV: &str = "UPSTASH_REDIS_REST_TOKEN";
pub const SUPABASE_URL_ENV: &str = "NEXT_PUBLIC_SUPABASE_URL";
pub const SUPABASE_URL_FALLBACK_ENV: &str = "SUPABASE_URL";
pub const SUPABASE_KEY_ENV: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const TIME_ZONE_ENV: &str = "NEXUS_TIMEZONE";
pub const SCHEDULE_FILE_ENV: &str = "NEXUS_SCHEDULE_FILE";

/// Upstash REST endpoint and bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstashConfig {
    pub url: String,
    pub token: String,
}

/// Supabase project URL and service-role key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: String,
}

/// Settings gathered from the environment. CLI flags override individual fields.
#[derive(Debug, Clone)]
pub struct NexusConfig {
    pub upstash_url: Option<String>,
    pub upstash_token: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub time_zone: Tz,
    pub schedule_file: Option<PathBuf>,
}

impl Default for NexusConfig {
    fn default() -> Self {
        Self {
            upstash_url: None,
            upstash_token: None,
            supabase_url: None,
            supabase_key: None,
            time_zone: DEFAULT_TIME_ZONE,
            schedule_file: None,
        }
    }
}

impl NexusConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let time_zone = match get(TIME_ZONE_ENV) {
            Some(name) => parse_time_zone(&name)?,
            None => DEFAULT_TIME_ZONE,
        };

        Ok(Self {
            upstash_url: get(UPSTASH_URL_ENV),
            upstash_token: get(UPSTASH_TOKEN_ENV),
            supabase_url: get(SUPABASE_URL_ENV).or_else(|| get(SUPABASE_URL_FALLBACK_ENV)),
            supabase_key: get(SUPABASE_KEY_ENV),
            time_zone,
            schedule_file: get(SCHEDULE_FILE_ENV).map(PathBuf::from),
        })
    }

    pub fn upstash(&self) -> Result<UpstashConfig> {
        Ok(UpstashConfig {
            url: required(&self.upstash_url, UPSTASH_URL_ENV)?,
            token: required(&self.upstash_token, UPSTASH_TOKEN_ENV)?,
        })
    }

    pub fn supabase(&self) -> Result<SupabaseConfig> {
        Ok(SupabaseConfig {
            url: required(&self.supabase_url, SUPABASE_URL_ENV)?,
            service_key: required(&self.supabase_key, SUPABASE_KEY_ENV)?,
        })
    }

    /// Week resolver for the configured zone, with the schedule file (if any) loaded.
    pub fn resolver(&self) -> Result<WeekResolver> {
        let mut schedules = ScheduleBook::builtin();
        if let Some(path) = &self.schedule_file {
            let season = schedules.load_file(path)?;
            tracing::debug!(%season, path = %path.display(), "loaded manual week schedule");
        }
        Ok(WeekResolver::new(self.time_zone, schedules))
    }
}

fn required(value: &Option<String>, var: &str) -> Result<String> {
    value
        .as_ref()
        .map(|v| v.trim_end_matches('/').to_string())
        .ok_or_else(|| NexusError::MissingEnv {
            var: var.to_string(),
        })
}
