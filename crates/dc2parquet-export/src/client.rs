//! HTTP client for the Data Connector requests endpoint

use crate::error::{ExportError, Result};
use crate::request::ExportRequest;
use dc2parquet_config::{redact_secret, ExportConfig};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde_json::Value;
use std::fmt;

/// Caller-supplied bearer credential
///
/// Only ever rendered into the `Authorization` header; `Debug` shows a
/// redacted prefix.
#[derive(Clone)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken({})", redact_secret(&self.0))
    }
}

/// Remote answer, passed through unmodified
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResponse {
    pub status: u16,
    /// Parsed JSON body; a non-JSON body becomes a JSON string, an empty body `null`
    pub body: Value,
}

impl ExportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Client that schedules one-time exports
pub struct ExportClient {
    http: reqwest::Client,
    api_base_url: Url,
    callback_url: String,
    service_groups: Vec<String>,
}

impl ExportClient {
    /// Create a client from the export configuration
    ///
    /// No request timeout is set; the hosting environment bounds the invocation.
    pub fn new(config: &ExportConfig) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(http: reqwest::Client, config: &ExportConfig) -> Result<Self> {
        let callback_url = config
            .callback_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ExportError::InvalidConfig("CALLBACK_URL is not set".to_string()))?;

        let api_base_url = Url::parse(&config.api_base_url).map_err(|e| {
            ExportError::InvalidConfig(format!(
                "api_base_url '{}' is not a valid URL: {}",
                config.api_base_url, e
            ))
        })?;

        Ok(Self {
            http,
            api_base_url,
            callback_url,
            service_groups: config.service_groups.clone(),
        })
    }

    /// `{base}/v1/accounts/{account_id}/requests`, with the account id encoded
    /// as a single path segment
    pub fn endpoint(&self, account_id: &str) -> Result<Url> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ExportError::InvalidEndpoint(format!(
                    "base URL '{}' cannot carry a path",
                    self.api_base_url
                ))
            })?
            .pop_if_empty()
            .extend(["v1", "accounts", account_id, "requests"]);
        Ok(url)
    }

    /// Schedule a one-time export for a project
    ///
    /// Every call schedules a new export job; there is no de-duplication.
    pub async fn schedule_one_time(
        &self,
        token: &BearerToken,
        account_id: &str,
        project_id: &str,
    ) -> Result<ExportResponse> {
        require("access_token", &token.0)?;
        require("accountId", account_id)?;
        require("projectId", project_id)?;

        let request = ExportRequest::one_time(
            account_id,
            project_id,
            &self.callback_url,
            &self.service_groups,
        );
        self.send(token, account_id, &request).await
    }

    /// Send a prepared request body
    pub async fn send(
        &self,
        token: &BearerToken,
        account_id: &str,
        request: &ExportRequest,
    ) -> Result<ExportResponse> {
        let url = self.endpoint(account_id)?;
        let body = serde_json::to_vec(request)?;

        tracing::info!(
            account_id = %account_id,
            project_id = %request.project_id,
            effective_from = %request.effective_from,
            "Scheduling one-time export"
        );

        let response = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, token.header_value())
            .body(body)
            .send()
            .await
            .map_err(|source| ExportError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ExportError::Transport {
                url: url.to_string(),
                source,
            })?;

        let response = ExportResponse {
            status,
            body: parse_body(&bytes),
        };

        if response.is_success() {
            tracing::info!(status, "Export scheduled");
        } else {
            tracing::warn!(status, "Export service rejected the request");
        }

        Ok(response)
    }
}

fn require(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExportError::MissingField { field });
    }
    Ok(())
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
