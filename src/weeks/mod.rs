//! NFL fantasy week windows.
//!
//! A fantasy week runs Thursday through the following Wednesday in the
//! league's scheduling time zone. Week 1 starts on the Thursday after Labor
//! Day (the first Monday of September) and every later week follows in fixed
//! 7-day steps with no upper cap. Instants before the opener are folded into
//! week 1.
//!
//! Seasons with a [`ManualSchedule`] in the resolver's [`ScheduleBook`] take
//! their boundaries from that table first, since the published league
//! schedule can drift from the Thursday rule.
//!
//! All functions are pure: the caller supplies "now".
//!
//! # Examples
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use fantasy_nexus::weeks::WeekResolver;
//!
//! let resolver = WeekResolver::default();
//! let now = Utc.with_ymd_and_hms(2025, 11, 21, 18, 0, 0).unwrap();
//! let window = resolver.resolve(now, None);
//!
//! assert_eq!(window.week.as_u16(), 12);
//! assert_eq!(window.season.as_u16(), 2025);
//! ```

pub mod schedule;


pub use schedule::{ManualSchedule, ScheduleBook, ScheduleEntry};

use crate::cli::types::{Season, Week};
use crate::error::{NexusError, Result};
use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// The league's canonical scheduling zone.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Chicago;

/// Which path produced a [`WeekWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowSource {
    /// Taken from a manual schedule. `end` is the last millisecond of the final date.
    Manual,
    /// Thursday-anchored computation. `end` is exclusive.
    Computed,
}

/// The active fantasy week for an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WeekWindow {
    pub week: Week,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub season: Season,
    pub source: WindowSource,
}

impl WeekWindow {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        is_within_window(instant, self)
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NFL Week {} ({} → {}, season {})",
            self.week,
            self.start.to_rfc3339(),
            self.end.to_rfc3339(),
            self.season
        )
    }
}

/// Anything with a `[start, end)` span.
pub trait Bounds {
    fn start(&self) -> DateTime<Utc>;
    fn end(&self) -> DateTime<Utc>;
}

impl Bounds for WeekWindow {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A bare `{start, end}` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Bounds for TimeRange {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

impl From<&WeekWindow> for TimeRange {
    fn from(window: &WeekWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
        }
    }
}

/// Items scheduled at a kickoff instant.
pub trait Kickoff {
    /// `None` when the item has no usable kickoff time.
    fn kickoff(&self) -> Option<DateTime<Utc>>;
}

impl Kickoff for DateTime<Utc> {
    fn kickoff(&self) -> Option<DateTime<Utc>> {
        Some(*self)
    }
}

/// `start <= instant < end`.
pub fn is_within_window<B: Bounds + ?Sized>(instant: DateTime<Utc>, window: &B) -> bool {
    window.start() <= instant && instant < window.end()
}

/// Keep the items whose kickoff falls inside `window`. Items without a kickoff are dropped.
pub fn filter_within_window<T, B>(items: impl IntoIterator<Item = T>, window: &B) -> Vec<T>
where
    T: Kickoff,
    B: Bounds + ?Sized,
{
    items
        .into_iter()
        .filter(|item| {
            item.kickoff()
                .is_some_and(|kickoff| is_within_window(kickoff, window))
        })
        .collect()
}

/// Season an instant belongs to: January and February count toward the previous year.
///
/// Years outside `0..=u16::MAX` saturate to the nearest bound.
pub fn season_for_instant(instant: DateTime<Utc>) -> Season {
    let year = if instant.month() <= 2 {
        instant.year() - 1
    } else {
        instant.year()
    };
    let year = year.clamp(0, i32::from(u16::MAX));
    Season::new(u16::try_from(year).unwrap_or(u16::MAX))
}

/// Thursday after the first Monday of September.
pub fn season_opener(season: Season) -> NaiveDate {
    let sept_first = NaiveDate::from_ymd_opt(season.year(), 9, 1)
        .expect("September 1st exists for every u16 year");
    let to_monday = (8 - sept_first.weekday().num_days_from_sunday()) % 7;
    sept_first + Days::new(u64::from(to_monday) + 3)
}

/// UTC offset of `time_zone` at exactly `instant`.
fn utc_offset(time_zone: Tz, instant: DateTime<Utc>) -> Duration {
    let seconds = time_zone
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc();
    Duration::seconds(i64::from(seconds))
}

/// Thursday-anchored window for `instant`, ignoring any manual schedule.
///
/// The zone offset is sampled once at `instant` and applied to both
/// boundaries, so a window containing a DST change has one boundary an hour
/// away from true local midnight.
pub fn computed_window(instant: DateTime<Utc>, season: Season, time_zone: Tz) -> WeekWindow {
    let offset = utc_offset(time_zone, instant);
    let local_day = (instant.naive_utc() + offset).date();

    // Sunday=0 .. Saturday=6; Thursday is 0 days back, Wednesday 6.
    let days_back = (local_day.weekday().num_days_from_sunday() + 3) % 7;
    let opener = season_opener(season);
    let start_local = (local_day - Days::new(u64::from(days_back))).max(opener);
    let end_local = start_local + Days::new(6);

    let weeks_in = (start_local - opener).num_days() / 7;
    let week = Week::new(u16::try_from(weeks_in + 1).unwrap_or(u16::MAX));

    let to_utc = |day: NaiveDate| (day.and_time(NaiveTime::MIN) - offset).and_utc();

    WeekWindow {
        week,
        start: to_utc(start_local),
        end: to_utc(end_local),
        season,
        source: WindowSource::Computed,
    }
}

fn manual_window(schedule: &ManualSchedule, instant: DateTime<Utc>) -> Option<WeekWindow> {
    let entry = schedule.find(instant.date_naive())?;
    Some(WeekWindow {
        week: entry.week,
        start: entry.start.and_time(NaiveTime::MIN).and_utc(),
        end: entry.end.and_hms_milli_opt(23, 59, 59, 999)?.and_utc(),
        season: schedule.season,
        source: WindowSource::Manual,
    })
}

/// Resolves instants to week windows for one time zone and schedule book.
#[derive(Debug, Clone)]
pub struct WeekResolver {
    time_zone: Tz,
    schedules: ScheduleBook,
}

impl WeekResolver {
    pub fn new(time_zone: Tz, schedules: ScheduleBook) -> Self {
        Self {
            time_zone,
            schedules,
        }
    }

    /// Resolver for `time_zone` using the built-in schedules.
    pub fn with_time_zone(time_zone: Tz) -> Self {
        Self::new(time_zone, ScheduleBook::builtin())
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    pub fn schedules(&self) -> &ScheduleBook {
        &self.schedules
    }

    /// Week window containing `instant`.
    ///
    /// `season` defaults to [`season_for_instant`]. The season's manual
    /// schedule is consulted first, matched on the instant's UTC calendar date.
    pub fn resolve(&self, instant: DateTime<Utc>, season: Option<Season>) -> WeekWindow {
        let season = season.unwrap_or_else(|| season_for_instant(instant));

        match self.schedules.get(season) {
            Some(schedule) => {
                if let Some(window) = manual_window(schedule, instant) {
                    debug!(%season, week = %window.week, "week resolved from manual schedule");
                    return window;
                }
                debug!(%season, %instant, "instant outside manual schedule, computing week");
            }
            None => debug!(%season, "no manual schedule for season, computing week"),
        }

        let window = computed_window(instant, season, self.time_zone);
        debug!(
            %season,
            week = %window.week,
            start = %window.start,
            end = %window.end,
            time_zone = %self.time_zone,
            "computed week window"
        );
        window
    }
}

impl Default for WeekResolver {
    fn default() -> Self {
        Self::with_time_zone(DEFAULT_TIME_ZONE)
    }
}

/// One-shot resolve with the built-in schedules.
pub fn week_window_for(
    instant: DateTime<Utc>,
    season: Option<Season>,
    time_zone: Tz,
) -> WeekWindow {
    WeekResolver::with_time_zone(time_zone).resolve(instant, season)
}

/// Parse an IANA zone name such as `America/Chicago`.
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| NexusError::InvalidTimeZone {
            name: name.to_string(),
        })
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value.trim())?.with_timezone(&Utc))
}
