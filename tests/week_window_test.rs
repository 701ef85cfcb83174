//! End-to-end week window scenarios through the public API

use chrono::{DateTime, TimeZone, Utc};
use fantasy_nexus::{
    core::CacheKey,
    rankings::RankCacheKey,
    week_window_for,
    weeks::{season_for_instant, WindowSource, DEFAULT_TIME_ZONE},
    FantasyPosition, ScoringProfile, Season, Week, WeekResolver,
};

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

#[test]
fn test_friday_before_thanksgiving_builds_week_twelve_key() {
    let instant = utc(2025, 11, 21, 18);
    let window = week_window_for(instant, Some(Season::new(2025)), DEFAULT_TIME_ZONE);

    assert_eq!(window.week, Week::new(12));
    assert_eq!(window.start, utc(2025, 11, 20, 0));
    assert!(window.end > utc(2025, 11, 26, 23));
    assert!(window.contains(instant));

    let key = RankCacheKey::for_window(&window, ScoringProfile::HalfPpr6pt, FantasyPosition::WR);
    assert_eq!(key.to_key(), "nfl:rankcache:WEEK:2025:12:half_ppr_6pt:WR");
}

#[test]
fn test_override_table_wins_for_2025() {
    let window = WeekResolver::default().resolve(utc(2025, 10, 10, 12), None);
    assert_eq!(window.week, Week::new(6));
    assert_eq!(window.source, WindowSource::Manual);
    assert_eq!(window.start, utc(2025, 10, 9, 0));
}

#[test]
fn test_january_rolls_back_to_previous_season() {
    let instant = utc(2026, 1, 15, 12);
    assert_eq!(season_for_instant(instant), Season::new(2025));

    let window = WeekResolver::default().resolve(instant, None);
    assert_eq!(window.season, Season::new(2025));
    assert_eq!(window.source, WindowSource::Computed);
}

#[test]
fn test_consecutive_days_never_move_backwards() {
    let resolver = WeekResolver::default();
    let mut previous = Week::new(1);

    for day in 0..200 {
        let instant = utc(2024, 8, 1, 17) + chrono::Duration::days(day);
        let window = resolver.resolve(instant, Some(Season::new(2024)));
        assert!(window.week >= previous, "week went backwards at {instant}");
        previous = window.week;
    }
}
