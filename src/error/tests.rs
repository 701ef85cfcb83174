//! Unit tests for error handling

use super::*;
use std::io;

mod conversion_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();

        match NexusError::from(json_error) {
            NexusError::Json(_) => (),
            other => panic!("Expected Json error variant, got {other:?}"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        assert!(matches!(NexusError::from(io_error), NexusError::Io(_)));
    }

    #[test]
    fn test_invalid_header_error_conversion() {
        let header_error = reqwest::header::HeaderValue::from_str("invalid\nheader").unwrap_err();
        assert!(matches!(
            NexusError::from(header_error),
            NexusError::InvalidHeader(_)
        ));
    }

    #[test]
    fn test_timestamp_error_conversion() {
        let err = chrono::DateTime::parse_from_rfc3339("next thursday").unwrap_err();
        assert!(matches!(NexusError::from(err), NexusError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_number_error_conversion() {
        let err = "week".parse::<u16>().unwrap_err();
        assert!(matches!(NexusError::from(err), NexusError::InvalidNumber(_)));
    }

    #[test]
    fn test_anyhow_conversion_keeps_known_errors() {
        let db: anyhow::Error = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(NexusError::from(db), NexusError::Database(_)));

        let nexus: anyhow::Error = NexusError::InvalidQuery {
            message: "at least two player ids are required".to_string(),
        }
        .into();
        assert!(matches!(
            NexusError::from(nexus),
            NexusError::InvalidQuery { .. }
        ));

        let other = anyhow::anyhow!("disk on fire");
        match NexusError::from(other) {
            NexusError::Store { message } => assert_eq!(message, "disk on fire"),
            e => panic!("Expected Store error variant, got {e:?}"),
        }
    }
}

mod display_tests {
    use super::*;

    #[test]
    fn test_missing_env_display() {
        let err = NexusError::MissingEnv {
            var: "UPSTASH_REDIS_REST_URL".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "UPSTASH_REDIS_REST_URL environment variable not set"
        );
    }

    #[test]
    fn test_rpc_display() {
        let err = NexusError::Rpc {
            status: 404,
            body: "function not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "RPC call failed with status 404: function not found"
        );
    }

    #[test]
    fn test_domain_variants_display() {
        let tz = NexusError::InvalidTimeZone {
            name: "Mars/Olympus".to_string(),
        };
        assert_eq!(tz.to_string(), "Unknown IANA time zone: Mars/Olympus");

        let position = NexusError::InvalidPosition {
            position: "K".to_string(),
        };
        assert_eq!(position.to_string(), "Invalid position: K");

        let schedule = NexusError::InvalidSchedule {
            message: "week 3 overlaps week 2".to_string(),
        };
        assert!(schedule.to_string().contains("overlaps"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<NexusError>();
    }
}
