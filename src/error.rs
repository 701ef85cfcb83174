//! Error types for the Fantasy Nexus library and CLI

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, NexusError>;

#[derive(Error, Debug)]
pub enum NexusError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),

    #[error("{var} environment variable not set")]
    MissingEnv { var: String },

    #[error("Unknown IANA time zone: {name}")]
    InvalidTimeZone { name: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid scoring profile: {profile}")]
    InvalidProfile { profile: String },

    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    #[error("Invalid week schedule: {message}")]
    InvalidSchedule { message: String },

    #[error("Cache store error: {message}")]
    Store { message: String },

    #[error("RPC call failed with status {status}: {body}")]
    Rpc { status: u16, body: String },
}

impl From<anyhow::Error> for NexusError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<rusqlite::Error>() {
            Ok(db) => NexusError::Database(db),
            Err(other) => match other.downcast::<NexusError>() {
                Ok(nexus) => nexus,
                Err(other) => NexusError::Store {
                    message: other.to_string(),
                },
            },
        }
    }
}
