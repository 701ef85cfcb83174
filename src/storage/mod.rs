//! Local log of start/sit comparisons
//!
//! Every comparison of two or three players is recorded in SQLite so the
//! most-compared players of a week can be ranked later:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Logging and aggregate reads

pub mod models;
pub mod queries;
pub mod schema;


pub use models::*;
pub use schema::ComparisonLog;
