//! Comparison log persisted to disk

use chrono::{TimeZone, Utc};
use fantasy_nexus::{
    storage::{ComparisonLog, NewComparison, TopPlayersQuery},
    weeks::TimeRange,
    Season, Week, WeekResolver,
};

fn comparison(ids: &[&str]) -> NewComparison {
    NewComparison {
        season: Season::new(2025),
        week: Week::new(12),
        profile: "ppr".to_string(),
        player_ids: ids.iter().map(|s| s.to_string()).collect(),
        proj_keys: Vec::new(),
        source_path: None,
        created_by: Some("user-1".to_string()),
    }
}

#[test]
fn test_week_leaderboard_from_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nexus.db");
    let now = Utc.with_ymd_and_hms(2025, 11, 21, 18, 0, 0).unwrap();
    let window = WeekResolver::default().resolve(now, None);

    {
        let mut log = ComparisonLog::open(&path).unwrap();
        assert!(log.log_comparison(&comparison(&["10", "20"]), now).unwrap());
        assert!(log.log_comparison(&comparison(&["10", "30"]), now).unwrap());
        assert!(!log.log_comparison(&comparison(&["20", "10"]), now).unwrap());

        let earlier = Utc.with_ymd_and_hms(2025, 11, 1, 18, 0, 0).unwrap();
        assert!(log.log_comparison(&comparison(&["40", "50"]), earlier).unwrap());
    }

    let log = ComparisonLog::open(&path).unwrap();
    let query = TopPlayersQuery {
        range: Some(TimeRange::from(&window)),
        ..Default::default()
    };
    let top = log.top_players(&query).unwrap();

    assert_eq!(top[0].player_id, "10");
    assert_eq!(top[0].comparisons, 2);
    assert_eq!(top.len(), 3);
    assert_eq!(log.comparison_count().unwrap(), 3);
}
