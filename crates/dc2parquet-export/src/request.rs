//! Export request body sent to the Data Connector API

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Schedule interval for an export that runs exactly once
pub const ONE_TIME_INTERVAL: &str = "ONE_TIME";

/// JSON body of `POST /v1/accounts/{accountId}/requests`
///
/// `start_date` and `end_date` are always `None` in one-time mode and are
/// serialized as explicit `null`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub project_id: String,
    pub service_groups: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: String,
    pub schedule_interval: &'static str,
    pub effective_from: String,
    pub callback_url: String,
}

impl ExportRequest {
    /// Build a one-time export request effective now
    pub fn one_time(
        account_id: &str,
        project_id: &str,
        callback_url: &str,
        service_groups: &[String],
    ) -> Self {
        Self::one_time_at(account_id, project_id, callback_url, service_groups, Utc::now())
    }

    /// Build a one-time export request effective at `now`
    pub fn one_time_at(
        account_id: &str,
        project_id: &str,
        callback_url: &str,
        service_groups: &[String],
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id: project_id.to_string(),
            service_groups: service_groups.to_vec(),
            start_date: None,
            end_date: None,
            description: format!(
                "Insight Data Extraction for Account: {}, Project: {}.",
                account_id, project_id
            ),
            schedule_interval: ONE_TIME_INTERVAL,
            effective_from: format_effective_from(now),
            callback_url: callback_url.to_string(),
        }
    }
}

/// Render a UTC instant as ISO-8601 with a literal `Z`
///
/// Microseconds are included only when non-zero, e.g.
/// `2024-01-15T14:30:00Z` or `2024-01-15T14:30:00.250000Z`.
pub fn format_effective_from(now: DateTime<Utc>) -> String {
    if now.timestamp_subsec_micros() == 0 {
        now.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    } else {
        now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
    }
}
