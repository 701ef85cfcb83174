//! Comparison log queries

use super::{models::*, schema::ComparisonLog};
use crate::cli::types::{Season, Week};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use tracing::debug;

impl ComparisonLog {
    /// Record a comparison. Returns `false` when the same comparison was
    /// already logged.
    pub fn log_comparison(&mut self, comparison: &NewComparison, at: DateTime<Utc>) -> Result<bool> {
        comparison.validate()?;

        let player_ids = serde_json::to_string(&comparison.player_ids)?;
        let proj_keys = if comparison.proj_keys.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&comparison.proj_keys)?)
        };
        let dedupe_key = comparison.dedupe_key();

        let rows_affected = self.conn.execute(
            "INSERT OR IGNORE INTO start_sit_comparisons
             (season_year, week, profile, player_ids, proj_keys, source_path,
              dedupe_key, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                comparison.season.as_u16(),
                comparison.week.as_u16(),
                comparison.profile.trim(),
                player_ids,
                proj_keys,
                comparison.source_path,
                dedupe_key,
                comparison.created_by,
                at.timestamp_millis(),
            ],
        )?;

        if rows_affected == 0 {
            debug!(%dedupe_key, "comparison already logged");
        }
        Ok(rows_affected > 0)
    }

    /// Players ranked by how many logged comparisons include them
    pub fn top_players(&self, query: &TopPlayersQuery) -> Result<Vec<TopPlayer>> {
        let start = query.range.as_ref().map(|r| r.start.timestamp_millis());
        let end = query.range.as_ref().map(|r| r.end.timestamp_millis());
        let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);

        let mut stmt = self.conn.prepare(
            "SELECT j.value AS player_id, COUNT(*) AS comparisons
             FROM start_sit_comparisons c, json_each(c.player_ids) j
             WHERE (?1 IS NULL OR c.created_at >= ?1)
               AND (?2 IS NULL OR c.created_at < ?2)
               AND (?3 IS NULL OR c.season_year = ?3)
               AND (?4 IS NULL OR c.week = ?4)
             GROUP BY j.value
             ORDER BY comparisons DESC, player_id ASC
             LIMIT ?5",
        )?;

        let rows = stmt.query_map(
            params![
                start,
                end,
                query.season.map(|s| s.as_u16()),
                query.week.map(|w| w.as_u16()),
                limit
            ],
            |row| {
                Ok(TopPlayer {
                    player_id: row.get(0)?,
                    comparisons: row.get(1)?,
                })
            },
        )?;

        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Most recent comparisons first
    pub fn recent_comparisons(&self, limit: u32) -> Result<Vec<StoredComparison>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, season_year, week, profile, player_ids, proj_keys, source_path,
                    dedupe_key, created_by, created_at
             FROM start_sit_comparisons
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )?;

        let rows = stmt.query_map(params![limit], read_comparison_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn comparison_count(&self) -> Result<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM start_sit_comparisons", [], |row| row.get(0))?;
        Ok(u64::try_from(count)?)
    }
}

fn json_column_error(index: usize, err: serde_json::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(err))
}

fn read_comparison_row(row: &Row) -> rusqlite::Result<StoredComparison> {
    let player_ids: String = row.get(4)?;
    let proj_keys: Option<String> = row.get(5)?;
    let created_at: i64 = row.get(9)?;

    Ok(StoredComparison {
        id: row.get(0)?,
        season: Season::new(row.get(1)?),
        week: Week::new(row.get(2)?),
        profile: row.get(3)?,
        player_ids: serde_json::from_str(&player_ids).map_err(|e| json_column_error(4, e))?,
        proj_keys: proj_keys
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(|e| json_column_error(5, e))?,
        source_path: row.get(6)?,
        dedupe_key: row.get(7)?,
        created_by: row.get(8)?,
        created_at: DateTime::from_timestamp_millis(created_at).unwrap_or_default(),
    })
}
