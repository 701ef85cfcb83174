//! Manually curated week tables.
//!
//! A season listed here takes its week boundaries from the table instead of
//! the Thursday-anchored computation. Dates are calendar dates and both ends
//! are inclusive.

use crate::cli::types::{Season, Week};
use crate::error::{NexusError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One row of a manual schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub week: Week,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ScheduleEntry {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Ordered week table for a single season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualSchedule {
    pub season: Season,
    pub weeks: Vec<ScheduleEntry>,
}

impl ManualSchedule {
    /// First entry whose inclusive range holds `date`.
    pub fn find(&self, date: NaiveDate) -> Option<&ScheduleEntry> {
        self.weeks.iter().find(|entry| entry.contains(date))
    }

    pub fn validate(&self) -> Result<()> {
        if self.weeks.is_empty() {
            return Err(invalid(format!("season {} has no weeks", self.season)));
        }

        for entry in &self.weeks {
            if entry.week.as_u16() == 0 {
                return Err(invalid(format!("season {} lists a week 0", self.season)));
            }
            if entry.start > entry.end {
                return Err(invalid(format!(
                    "week {} starts {} after it ends {}",
                    entry.week, entry.start, entry.end
                )));
            }
        }

        let mut sorted: Vec<&ScheduleEntry> = self.weeks.iter().collect();
        sorted.sort_by_key(|entry| entry.start);
        for pair in sorted.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(invalid(format!(
                    "weeks {} and {} overlap",
                    pair[0].week, pair[1].week
                )));
            }
        }

        Ok(())
    }
}

fn invalid(message: String) -> NexusError {
    NexusError::InvalidSchedule { message }
}

/// Manual schedules keyed by season.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleBook {
    seasons: BTreeMap<Season, ManualSchedule>,
}

impl ScheduleBook {
    /// A book with no manual seasons; every lookup uses the computed windows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The schedules shipped with the crate.
    pub fn builtin() -> Self {
        let mut book = Self::empty();
        book.seasons.insert(Season::new(2025), schedule_2025());
        book
    }

    /// Add or replace the table for `schedule.season`.
    pub fn insert(&mut self, schedule: ManualSchedule) -> Result<()> {
        schedule.validate()?;
        self.seasons.insert(schedule.season, schedule);
        Ok(())
    }

    pub fn get(&self, season: Season) -> Option<&ManualSchedule> {
        self.seasons.get(&season)
    }

    pub fn seasons(&self) -> impl Iterator<Item = Season> + '_ {
        self.seasons.keys().copied()
    }

    /// Read a JSON schedule file and add it to the book.
    ///
    /// ```json
    /// { "season": 2026, "weeks": [{ "week": 1, "start": "2026-09-10", "end": "2026-09-16" }] }
    /// ```
    pub fn load_file(&mut self, path: &Path) -> Result<Season> {
        let contents = std::fs::read_to_string(path)?;
        let schedule: ManualSchedule = serde_json::from_str(&contents)?;
        let season = schedule.season;
        self.insert(schedule)?;
        Ok(season)
    }
}

const WEEKS_2025: [(u16, (i32, u32, u32), (i32, u32, u32)); 18] = [
    (1, (2025, 9, 5), (2025, 9, 10)),
    (2, (2025, 9, 11), (2025, 9, 17)),
    (3, (2025, 9, 18), (2025, 9, 24)),
    (4, (2025, 9, 25), (2025, 10, 1)),
    (5, (2025, 10, 2), (2025, 10, 8)),
    (6, (2025, 10, 9), (2025, 10, 15)),
    (7, (2025, 10, 16), (2025, 10, 22)),
    (8, (2025, 10, 23), (2025, 10, 29)),
    (9, (2025, 10, 30), (2025, 11, 5)),
    (10, (2025, 11, 6), (2025, 11, 12)),
    (11, (2025, 11, 13), (2025, 11, 19)),
    (12, (2025, 11, 20), (2025, 11, 26)),
    (13, (2025, 11, 27), (2025, 12, 3)),
    (14, (2025, 12, 4), (2025, 12, 10)),
    (15, (2025, 12, 11), (2025, 12, 17)),
    (16, (2025, 12, 18), (2025, 12, 24)),
    (17, (2025, 12, 25), (2025, 12, 31)),
    (18, (2026, 1, 1), (2026, 1, 7)),
];

fn schedule_2025() -> ManualSchedule {
    let weeks = WEEKS_2025
        .iter()
        .filter_map(|&(week, (sy, sm, sd), (ey, em, ed))| {
            Some(ScheduleEntry {
                week: Week::new(week),
                start: NaiveDate::from_ymd_opt(sy, sm, sd)?,
                end: NaiveDate::from_ymd_opt(ey, em, ed)?,
            })
        })
        .collect();

    ManualSchedule {
        season: Season::new(2025),
        weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builtin_2025_table_is_complete() {
        let book = ScheduleBook::builtin();
        let schedule = book.get(Season::new(2025)).unwrap();

        assert_eq!(schedule.weeks.len(), 18);
        assert!(schedule.validate().is_ok());
        assert_eq!(schedule.weeks[0].start, date(2025, 9, 5));
        assert_eq!(schedule.weeks[17].end, date(2026, 1, 7));
        assert!(book.get(Season::new(2024)).is_none());
    }

    #[test]
    fn test_find_is_inclusive_on_both_ends() {
        let book = ScheduleBook::builtin();
        let schedule = book.get(Season::new(2025)).unwrap();

        assert_eq!(schedule.find(date(2025, 10, 9)).unwrap().week, Week::new(6));
        assert_eq!(schedule.find(date(2025, 10, 15)).unwrap().week, Week::new(6));
        assert_eq!(schedule.find(date(2025, 10, 16)).unwrap().week, Week::new(7));
        assert!(schedule.find(date(2025, 9, 4)).is_none());
        assert!(schedule.find(date(2026, 1, 8)).is_none());
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let empty = ManualSchedule {
            season: Season::new(2026),
            weeks: vec![],
        };
        assert!(empty.validate().is_err());

        let backwards = ManualSchedule {
            season: Season::new(2026),
            weeks: vec![ScheduleEntry {
                week: Week::new(1),
                start: date(2026, 9, 16),
                end: date(2026, 9, 10),
            }],
        };
        assert!(backwards.validate().is_err());

        let overlapping = ManualSchedule {
            season: Season::new(2026),
            weeks: vec![
                ScheduleEntry {
                    week: Week::new(1),
                    start: date(2026, 9, 10),
                    end: date(2026, 9, 16),
                },
                ScheduleEntry {
                    week: Week::new(2),
                    start: date(2026, 9, 16),
                    end: date(2026, 9, 23),
                },
            ],
        };
        let err = overlapping.validate().unwrap_err();
        assert!(err.to_string().contains("overlap"));
    }

    #[test]
    fn test_load_file_adds_season() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"season": 2026, "weeks": [
                {{"week": 1, "start": "2026-09-10", "end": "2026-09-16"}},
                {{"week": 2, "start": "2026-09-17", "end": "2026-09-23"}}
            ]}}"#
        )
        .unwrap();

        let mut book = ScheduleBook::builtin();
        let season = book.load_file(file.path()).unwrap();

        assert_eq!(season, Season::new(2026));
        assert_eq!(
            book.seasons().collect::<Vec<_>>(),
            vec![Season::new(2025), Season::new(2026)]
        );
        let week = book.get(season).unwrap().find(date(2026, 9, 20)).unwrap();
        assert_eq!(week.week, Week::new(2));
    }

    #[test]
    fn test_load_file_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not a schedule").unwrap();

        let mut book = ScheduleBook::empty();
        assert!(book.load_file(file.path()).is_err());
        assert_eq!(book.seasons().count(), 0);
    }
}
