//! Upstream schedule provider client.
//!
//! One request per call: `GET {api_base}/timetables` with a bearer token,
//! answered by a JSON array of broadcast events.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::utils::logging::{log_fetch, log_timeout};

/// Default base URL of the AnimeSchedule v3 API.
pub const DEFAULT_API_BASE: &str = "https://animeschedule.net/api/v3";

/// Failures while fetching the upstream schedule.
#[derive(Error, Debug)]
pub enum ScheduleFetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Schedule request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Schedule request timed out after {0}s")]
    Timeout(u64),
    #[error("Schedule provider returned HTTP {0}")]
    Status(u16),
    #[error("Failed to decode schedule response: {0}")]
    Decode(String),
}

/// One raw airing record as delivered by the provider.
///
/// Every field is optional; the provider is not trusted to send complete
/// records. Numbers are accepted where strings are expected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BroadcastEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, rename = "english", deserialize_with = "lenient_string")]
    pub english_title: Option<String>,
    #[serde(default, rename = "episodeNumber", deserialize_with = "lenient_string")]
    pub episode_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, rename = "airType", deserialize_with = "lenient_string")]
    pub air_type: Option<String>,
    #[serde(default, rename = "episodeDate", deserialize_with = "lenient_string")]
    pub episode_timestamp: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Decodes the timetable array, dropping elements that are not event objects.
pub fn decode_events(values: Vec<Value>) -> Vec<BroadcastEvent> {
    values
        .into_iter()
        .filter_map(|value| match BroadcastEvent::deserialize(&value) {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::debug!("Skipping malformed schedule element {}: {}", value, e);
                None
            }
        })
        .collect()
}

/// Anything that can produce the full list of raw broadcast events.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<BroadcastEvent>, ScheduleFetchError>;
}

/// HTTP client for the AnimeSchedule timetables endpoint.
#[derive(Debug, Clone)]
pub struct AnimeScheduleClient {
    client: Client,
    api_base: String,
    token: String,
    timeout: Duration,
}

impl AnimeScheduleClient {
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ScheduleFetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ScheduleFetchError::Client)?;

        Ok(Self {
            client,
            api_base: api_base.into(),
            token: token.into(),
            timeout,
        })
    }

    fn timetables_url(&self) -> String {
        format!("{}/timetables", self.api_base.trim_end_matches('/'))
    }

    fn classify(&self, error: reqwest::Error) -> ScheduleFetchError {
        if error.is_timeout() {
            log_timeout("schedule fetch", self.timeout.as_secs(), None);
            ScheduleFetchError::Timeout(self.timeout.as_secs())
        } else if error.is_decode() {
            ScheduleFetchError::Decode(error.to_string())
        } else {
            ScheduleFetchError::Request(error)
        }
    }
}

#[async_trait]
impl ScheduleSource for AnimeScheduleClient {
    async fn fetch_events(&self) -> Result<Vec<BroadcastEvent>, ScheduleFetchError> {
        let url = self.timetables_url();
        log_fetch(&url, None);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleFetchError::Status(status.as_u16()));
        }

        let values: Vec<Value> = response.json().await.map_err(|e| self.classify(e))?;
        let received = values.len();
        let events = decode_events(values);
        if events.len() < received {
            tracing::debug!("Dropped {} malformed schedule elements", received - events.len());
        }
        log_fetch(&url, Some(&format!("{} events", events.len())));
        Ok(events)
    }
}
