//! HTTP plumbing for the Upstash cache and the Supabase REST API

use crate::core::cache::KvStore;
use crate::core::config::{SupabaseConfig, UpstashConfig};
use crate::error::{NexusError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

const USER_AGENT: &str = concat!("fantasy-nexus/", env!("CARGO_PKG_VERSION"));

/// Client shared by everything one command does.
pub fn build_client() -> Result<Client> {
    Ok(Client::builder().user_agent(USER_AGENT).build()?)
}

/// Headers for a service-role Supabase request.
pub fn supabase_headers(config: &SupabaseConfig) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    h.insert(
        HeaderName::from_static("apikey"),
        HeaderValue::from_str(&config.service_key)?,
    );
    h.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.service_key))?,
    );
    Ok(h)
}

/// Turn a non-2xx response into [`NexusError::Rpc`] carrying the body text.
pub async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(NexusError::Rpc {
        status: status.as_u16(),
        body,
    })
}

/// Upstash reply envelope: `{"result": ...}` or `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct UpstashReply {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<String>,
}

impl UpstashReply {
    pub fn into_result(self) -> Result<Value> {
        match self.error {
            Some(message) => Err(NexusError::Store { message }),
            None => Ok(self.result),
        }
    }
}

/// Redis over the Upstash REST API.
///
/// Commands are POSTed as a JSON array (`["GET", key]`) to the database URL,
/// which keeps `:` separated keys out of the request path.
#[derive(Debug, Clone)]
pub struct UpstashStore {
    client: Client,
    url: String,
    headers: HeaderMap,
}

impl UpstashStore {
    pub fn new(client: Client, config: &UpstashConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.token))?,
        );
        Ok(Self {
            client,
            url: config.url.clone(),
            headers,
        })
    }

    async fn command(&self, args: Value) -> Result<Value> {
        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .json(&args)
            .send()
            .await?;
        let reply: UpstashReply = ensure_success(response).await?.json().await?;
        reply.into_result()
    }
}

impl KvStore for UpstashStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        match self.command(json!(["GET", key])).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    async fn lrange(&self, key: &str) -> Result<Vec<Value>> {
        match self.command(json!(["LRANGE", key, "0", "-1"])).await? {
            Value::Array(entries) => Ok(entries),
            Value::Null => Ok(Vec::new()),
            other => Err(NexusError::Store {
                message: format!("LRANGE {key} returned {other}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supabase_headers() {
        let config = SupabaseConfig {
            url: "https://abc.supabase.co".to_string(),
            service_key: "service-key".to_string(),
        };

        let headers = supabase_headers(&config).unwrap();
        assert_eq!(headers.get("apikey").unwrap(), "service-key");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer service-key");
        assert!(headers.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn test_supabase_headers_reject_newlines() {
        let config = SupabaseConfig {
            url: "https://abc.supabase.co".to_string(),
            service_key: "bad\nkey".to_string(),
        };
        assert!(matches!(
            supabase_headers(&config),
            Err(NexusError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_upstash_reply_result_and_error() {
        let ok: UpstashReply = serde_json::from_str(r#"{"result": "[1,2]"}"#).unwrap();
        assert_eq!(ok.into_result().unwrap(), Value::String("[1,2]".to_string()));

        let missing: UpstashReply = serde_json::from_str(r#"{"result": null}"#).unwrap();
        assert_eq!(missing.into_result().unwrap(), Value::Null);

        let err: UpstashReply =
            serde_json::from_str(r#"{"error": "WRONGTYPE Operation against a key"}"#).unwrap();
        let err = err.into_result().unwrap_err();
        assert!(err.to_string().contains("WRONGTYPE"));
    }

    #[test]
    fn test_upstash_store_builds_with_token() {
        let config = UpstashConfig {
            url: "https://example.upstash.io".to_string(),
            token: "abc".to_string(),
        };
        let store = UpstashStore::new(Client::new(), &config).unwrap();
        assert_eq!(store.headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
    }

    #[tokio::test]
    async fn test_unreachable_upstash_is_http_error() {
        let config = UpstashConfig {
            url: "http://127.0.0.1:9".to_string(),
            token: "abc".to_string(),
        };
        let store = UpstashStore::new(Client::new(), &config).unwrap();
        assert!(matches!(store.get("k").await, Err(NexusError::Http(_))));
    }
}
