// Invocation payloads
//
// Fields are optional at the serde level so a missing field surfaces as a
// named validation error instead of an opaque deserialization failure.

use dc2parquet_config::redact_secret;
use dc2parquet_writer::strip_query;
use serde::Deserialize;
use std::fmt;

use crate::InvocationError;

/// `{ "access_token": ..., "accountId": ..., "projectId": ... }`
#[derive(Clone, Default, Deserialize)]
pub struct ExportTriggerEvent {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default, rename = "accountId")]
    pub account_id: Option<String>,
    #[serde(default, rename = "projectId")]
    pub project_id: Option<String>,
}

impl fmt::Debug for ExportTriggerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportTriggerEvent")
            .field(
                "access_token",
                &self.access_token.as_deref().map(redact_secret),
            )
            .field("account_id", &self.account_id)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// Validated export-trigger input
pub(crate) struct ExportInput<'a> {
    pub access_token: &'a str,
    pub account_id: &'a str,
    pub project_id: &'a str,
}

impl ExportTriggerEvent {
    pub(crate) fn validate(&self) -> Result<ExportInput<'_>, InvocationError> {
        Ok(ExportInput {
            access_token: required(&self.access_token, "access_token")?,
            account_id: required(&self.account_id, "accountId")?,
            project_id: required(&self.project_id, "projectId")?,
        })
    }
}

/// `{ "source_url": ..., "destination_filename": ... }`
#[derive(Clone, Default, Deserialize)]
pub struct ConversionEvent {
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub destination_filename: Option<String>,
}

impl fmt::Debug for ConversionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionEvent")
            .field("source_url", &self.source_url.as_deref().map(strip_query))
            .field("destination_filename", &self.destination_filename)
            .finish()
    }
}

pub(crate) struct ConversionInput<'a> {
    pub source_url: &'a str,
    pub destination_filename: &'a str,
}

impl ConversionEvent {
    pub(crate) fn validate(&self) -> Result<ConversionInput<'_>, InvocationError> {
        Ok(ConversionInput {
            source_url: required(&self.source_url, "source_url")?,
            destination_filename: required(&self.destination_filename, "destination_filename")?,
        })
    }
}

fn required<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> Result<&'a str, InvocationError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(InvocationError::MissingField(field)),
    }
}
