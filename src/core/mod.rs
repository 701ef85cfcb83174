//! Shared infrastructure for commands
//!
//! - `cache`: key-value store trait and its file/memory/memo backends
//! - `config`: environment configuration
//! - `http`: HTTP client, Upstash store and Supabase headers

pub mod cache;
pub mod config;
pub mod http;

pub use cache::{cache_base_dir, CacheKey, FileStore, KvStore, MemoStore, MemoryStore};
pub use config::{NexusConfig, SupabaseConfig, UpstashConfig};
pub use http::{build_client, UpstashStore};
