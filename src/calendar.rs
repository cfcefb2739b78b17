//! Current in-game day resolution.
//!
//! "What day is it on the server" comes from one of three sources, tried in
//! fixed priority order: a day-counter HTTP API, a manual override projected
//! forward by elapsed real time, and finally elapsed time since the server
//! first came up. A failing tier logs and falls through to the next; the
//! resolver itself never errors and always returns a day of at least 1, so
//! the forecast stays renderable no matter how degenerate the configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const SECONDS_PER_REAL_DAY: f64 = 86_400.0;

/// Calendar source configuration. Loaded fresh for every resolution so admin
/// edits take effect on the next poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub api: ApiTierConfig,
    #[serde(default)]
    pub manual: ManualTierConfig,
    /// When the game server first came up; the tier of last resort.
    #[serde(default = "Utc::now")]
    pub server_start_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiTierConfig {
    #[serde(default)]
    pub enabled: bool,
    /// GET endpoint answering `{"currentDay": <number>}`.
    #[serde(default)]
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualTierConfig {
    #[serde(default)]
    pub enabled: bool,
    /// The in-game day an admin pinned.
    #[serde(default = "default_start_day")]
    pub start_day: u64,
    /// When that pin was made; elapsed real days are added on top.
    #[serde(default = "Utc::now")]
    pub start_date: DateTime<Utc>,
}

fn default_start_day() -> u64 {
    1
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api: ApiTierConfig::default(),
            manual: ManualTierConfig::default(),
            server_start_date: Utc::now(),
        }
    }
}

impl Default for ManualTierConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            start_day: default_start_day(),
            start_date: Utc::now(),
        }
    }
}

/// Why a tier did not produce a day. A value, not an exception: the chain
/// inspects these and moves on, nothing propagates to the caller.
#[derive(Debug, Error)]
pub enum TierFailure {
    #[error("tier is disabled")]
    Disabled,
    #[error("no endpoint configured")]
    NoEndpoint,
    #[error("request failed: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Body(String),
}

impl TierFailure {
    /// Disabled/unconfigured tiers are expected to be skipped; anything else
    /// is worth a warning.
    fn is_skip(&self) -> bool {
        matches!(self, TierFailure::Disabled | TierFailure::NoEndpoint)
    }
}

/// Which tier produced the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DaySource {
    Api,
    Manual,
    ServerStart,
}

/// The resolved current day. `day` is always >= 1; `detail` is informational
/// only (which tier was used, or why higher tiers were passed over).
#[derive(Debug, Clone, Serialize)]
pub struct DayResolution {
    pub day: u64,
    pub source: DaySource,
    pub detail: String,
}

/// Expected body of the day-counter API.
#[derive(Deserialize)]
struct DayCounterBody {
    #[serde(rename = "currentDay")]
    current_day: f64,
}

/// Resolve the current in-game day. Never fails; the worst possible outcome
/// is day 1 from the server-start tier.
pub async fn resolve_current_day(
    config: &CalendarConfig,
    client: &reqwest::Client,
) -> DayResolution {
    let api_outcome = api_tier(&config.api, client).await;
    resolve_at(config, api_outcome, Utc::now())
}

/// The synchronous tail of the chain, with the API outcome and the clock
/// passed in. Split out so tests can pin `now`.
fn resolve_at(
    config: &CalendarConfig,
    api_outcome: Result<u64, TierFailure>,
    now: DateTime<Utc>,
) -> DayResolution {
    let api_failure = match api_outcome {
        Ok(day) => {
            return DayResolution {
                day,
                source: DaySource::Api,
                detail: "day counter API".to_string(),
            };
        }
        Err(failure) => {
            if failure.is_skip() {
                debug!("api tier skipped: {failure}");
            } else {
                warn!("api tier failed: {failure}");
            }
            failure
        }
    };

    if config.manual.enabled {
        let elapsed = elapsed_real_days(config.manual.start_date, now);
        let day = floor_day(config.manual.start_day as f64 + elapsed);
        return DayResolution {
            day,
            source: DaySource::Manual,
            detail: format!(
                "manual override from day {} ({})",
                config.manual.start_day, api_failure
            ),
        };
    }
    debug!("manual tier skipped: disabled");

    let elapsed = elapsed_real_days(config.server_start_date, now);
    DayResolution {
        day: floor_day(elapsed.floor() + 1.0),
        source: DaySource::ServerStart,
        detail: "elapsed time since server start".to_string(),
    }
}

/// Tier 1: ask the day-counter API. Any failure is returned as a value for
/// the chain to log and step past.
async fn api_tier(
    config: &ApiTierConfig,
    client: &reqwest::Client,
) -> Result<u64, TierFailure> {
    if !config.enabled {
        return Err(TierFailure::Disabled);
    }
    if config.endpoint.is_empty() {
        return Err(TierFailure::NoEndpoint);
    }

    let response = client
        .get(&config.endpoint)
        .send()
        .await
        .map_err(|e| TierFailure::Http(e.to_string()))?;

    if !response.status().is_success() {
        return Err(TierFailure::Status(response.status()));
    }

    let body: DayCounterBody = response
        .json()
        .await
        .map_err(|e| TierFailure::Body(e.to_string()))?;

    Ok(floor_day(body.current_day))
}

fn elapsed_real_days(since: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - since).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_REAL_DAY
}

/// Floor to a whole day, never below 1. NaN from a hostile API body also
/// lands on 1.
fn floor_day(day: f64) -> u64 {
    let floored = day.floor();
    if floored >= 1.0 { floored as u64 } else { 1 }
}
