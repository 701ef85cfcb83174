//! Common utilities and helper functions shared across commands.
//!
//! Every command builds its own [`WindowContext`] and store; nothing is kept
//! between invocations.

use crate::{
    cli::{StoreArgs, WindowArgs},
    core::{
        build_client, cache::MemoStore, FileStore, KvStore, NexusConfig, UpstashStore,
    },
    weeks::{parse_instant, parse_time_zone, WeekResolver, WeekWindow},
    Result, Season,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Entries memoized per command.
pub const MEMO_CAPACITY: usize = 256;

/// Configuration, resolver and target instant for one command.
pub struct CommandContext {
    pub config: NexusConfig,
    pub resolver: WeekResolver,
    pub instant: DateTime<Utc>,
}

impl CommandContext {
    /// Apply `--tz`, `--schedule` and `--at` on top of `config`.
    pub fn new(mut config: NexusConfig, args: &WindowArgs) -> Result<Self> {
        if let Some(tz) = &args.tz {
            config.time_zone = parse_time_zone(tz)?;
        }
        if let Some(path) = &args.schedule {
            config.schedule_file = Some(path.clone());
        }

        let resolver = config.resolver()?;
        let instant = match &args.at {
            Some(at) => parse_instant(at)?,
            None => Utc::now(),
        };

        Ok(Self {
            config,
            resolver,
            instant,
        })
    }

    pub fn from_env(args: &WindowArgs) -> Result<Self> {
        Self::new(NexusConfig::from_env()?, args)
    }

    pub fn window(&self, season: Option<Season>) -> WeekWindow {
        self.resolver.resolve(self.instant, season)
    }
}

/// The store a command reads from.
#[derive(Debug, Clone)]
pub enum AnyStore {
    Upstash(UpstashStore),
    File(FileStore),
}

impl KvStore for AnyStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match self {
            AnyStore::Upstash(store) => store.get(key).await,
            AnyStore::File(store) => store.get(key).await,
        }
    }

    async fn lrange(&self, key: &str) -> Result<Vec<Value>> {
        match self {
            AnyStore::Upstash(store) => store.lrange(key).await,
            AnyStore::File(store) => store.lrange(key).await,
        }
    }
}

/// `--cache-dir` snapshots when given, Upstash otherwise.
pub fn open_store(config: &NexusConfig, args: &StoreArgs) -> Result<MemoStore<AnyStore>> {
    let store = match &args.cache_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "reading cache snapshots from disk");
            AnyStore::File(FileStore::new(dir))
        }
        None => AnyStore::Upstash(UpstashStore::new(build_client()?, &config.upstash()?)?),
    };
    Ok(MemoStore::new(store, MEMO_CAPACITY))
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render an optional JSON scalar for text output.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{f:.1}"),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
