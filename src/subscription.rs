//! Pro gating from the `subscriptions` table.

use crate::core::config::SupabaseConfig;
use crate::core::http::{ensure_success, supabase_headers};
use crate::error::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Brand whose subscriptions unlock Pro.
pub const BRAND_KEY: &str = "fantasy_nexus";

pub fn is_active_status(status: Option<&str>) -> bool {
    status.is_some_and(|s| s.eq_ignore_ascii_case("active") || s.eq_ignore_ascii_case("trialing"))
}

/// Latest subscription row for a user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SubscriptionRecord {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub current_period_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancel_at_period_end: Option<bool>,
    #[serde(default)]
    pub brand_key: Option<String>,
}

impl SubscriptionRecord {
    /// Active or trialing, and not past the paid period. A row without a
    /// period end counts as inside it.
    pub fn is_pro(&self, now: DateTime<Utc>) -> bool {
        is_active_status(self.status.as_deref())
            && self.current_period_end.is_none_or(|end| end > now)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionSummary {
    pub pro: bool,
    pub status: Option<String>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub brand_key: Option<String>,
}

impl SubscriptionSummary {
    pub fn inactive() -> Self {
        Self {
            pro: false,
            status: None,
            current_period_end: None,
            brand_key: None,
        }
    }

    pub fn from_record(record: SubscriptionRecord, now: DateTime<Utc>) -> Self {
        Self {
            pro: record.is_pro(now),
            status: record.status,
            current_period_end: record.current_period_end,
            brand_key: record.brand_key,
        }
    }
}

fn subscriptions_url(config: &SupabaseConfig) -> String {
    format!("{}/rest/v1/subscriptions", config.url)
}

async fn latest_subscription(
    client: &Client,
    config: &SupabaseConfig,
    user_id: &str,
) -> Result<Option<SubscriptionRecord>> {
    let user_filter = format!("eq.{user_id}");
    let brand_filter = format!("eq.{BRAND_KEY}");
    let params = [
        ("select", "status,current_period_end,cancel_at_period_end,brand_key"),
        ("user_id", user_filter.as_str()),
        ("brand_key", brand_filter.as_str()),
        ("order", "updated_at.desc"),
        ("limit", "1"),
    ];

    let response = client
        .get(subscriptions_url(config))
        .headers(supabase_headers(config)?)
        .query(&params)
        .send()
        .await?;
    let rows: Vec<SubscriptionRecord> = ensure_success(response).await?.json().await?;

    Ok(rows.into_iter().next())
}

/// Pro status for a user. Lookup failures are logged and count as not Pro.
pub async fn fetch_subscription(
    client: &Client,
    config: &SupabaseConfig,
    user_id: &str,
    now: DateTime<Utc>,
) -> SubscriptionSummary {
    if user_id.trim().is_empty() {
        return SubscriptionSummary::inactive();
    }

    match latest_subscription(client, config, user_id.trim()).await {
        Ok(Some(record)) => SubscriptionSummary::from_record(record, now),
        Ok(None) => SubscriptionSummary::inactive(),
        Err(err) => {
            warn!(user_id, error = %err, "subscription lookup failed");
            SubscriptionSummary::inactive()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    fn record(status: Option<&str>, end: Option<DateTime<Utc>>) -> SubscriptionRecord {
        SubscriptionRecord {
            status: status.map(str::to_string),
            current_period_end: end,
            cancel_at_period_end: Some(false),
            brand_key: Some(BRAND_KEY.to_string()),
        }
    }

    #[test]
    fn test_active_statuses() {
        assert!(is_active_status(Some("active")));
        assert!(is_active_status(Some("TRIALING")));
        assert!(!is_active_status(Some("past_due")));
        assert!(!is_active_status(Some("canceled")));
        assert!(!is_active_status(None));
    }

    #[test]
    fn test_is_pro_respects_period_end() {
        let later = Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap();

        assert!(record(Some("active"), Some(later)).is_pro(now()));
        assert!(!record(Some("active"), Some(earlier)).is_pro(now()));
        assert!(!record(Some("active"), Some(now())).is_pro(now()));
        assert!(record(Some("trialing"), None).is_pro(now()));
        assert!(!record(Some("canceled"), Some(later)).is_pro(now()));
    }

    #[test]
    fn test_record_decodes_supabase_row() {
        let rows: Vec<SubscriptionRecord> = serde_json::from_str(
            r#"[{"status":"active","current_period_end":"2025-10-31T00:00:00+00:00",
                 "cancel_at_period_end":true,"brand_key":"fantasy_nexus"}]"#,
        )
        .unwrap();
        let summary = SubscriptionSummary::from_record(rows[0].clone(), now());

        assert!(summary.pro);
        assert_eq!(summary.brand_key.as_deref(), Some(BRAND_KEY));
        assert_eq!(rows[0].cancel_at_period_end, Some(true));
    }

    #[test]
    fn test_record_tolerates_nulls() {
        let rec: SubscriptionRecord =
            serde_json::from_str(r#"{"status":null,"current_period_end":null}"#).unwrap();
        assert!(!rec.is_pro(now()));
    }

    #[tokio::test]
    async fn test_lookup_failure_is_not_pro() {
        let config = SupabaseConfig {
            url: "http://127.0.0.1:9".to_string(),
            service_key: "key".to_string(),
        };
        let summary = fetch_subscription(&Client::new(), &config, "user-1", now()).await;
        assert_eq!(summary, SubscriptionSummary::inactive());

        let blank = fetch_subscription(&Client::new(), &config, "  ", now()).await;
        assert!(!blank.pro);
    }
}
