// dc2parquet-config - Configuration shared by both functions
//
// Supports configuration from multiple sources:
// 1. Environment variables (highest priority)
// 2. Config file path from DC2PARQUET_CONFIG env var
// 3. Config file contents from DC2PARQUET_CONFIG_CONTENT env var
// 4. Built-in defaults (lowest priority)
//
// The config is loaded once per process and passed into each operation.
// Operations never consult the environment on their own.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{apply_env_overrides, EnvSource, ENV_PREFIX};
pub use sources::StdEnvSource;

/// Base URL of the Data Connector API; `/v1/accounts/{id}/requests` is appended.
pub const DEFAULT_EXPORT_API_BASE_URL: &str = "https://developer.api.autodesk.com/data-connector";

/// Service groups requested for every one-time export.
pub const DEFAULT_SERVICE_GROUPS: [&str; 2] = ["admin", "activities"];

/// Main runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub log: LogConfig,
}

/// Export-trigger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Where the remote service delivers export results (`CALLBACK_URL`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,

    #[serde(default = "default_service_groups")]
    pub service_groups: Vec<String>,
}

fn default_api_base_url() -> String {
    DEFAULT_EXPORT_API_BASE_URL.to_string()
}

fn default_service_groups() -> Vec<String> {
    DEFAULT_SERVICE_GROUPS.iter().map(|s| s.to_string()).collect()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            callback_url: None,
            service_groups: default_service_groups(),
        }
    }
}

/// Destination storage configuration
///
/// `Debug` is implemented by hand so the secret key never reaches a log line.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Destination prefix (`BUCKET_FOLDER`), e.g. `s3://bucket/folder/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_folder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,

    /// Temporary-credential token (`AWS_SESSION_TOKEN`), set for Lambda role credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,

    /// S3-compatible endpoint override (MinIO, LocalStack, R2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket_folder", &self.bucket_folder)
            .field("region", &self.region)
            .field(
                "access_key_id",
                &self.access_key_id.as_deref().map(redact_secret),
            )
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// CSV decoding and Parquet encoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Rows sampled for schema inference.
    #[serde(default = "default_schema_sample_rows")]
    pub schema_sample_rows: usize,

    /// Rows per decoded Arrow batch.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_row_group_size")]
    pub parquet_row_group_size: usize,
}

fn default_schema_sample_rows() -> usize {
    20_480
}

fn default_batch_size() -> usize {
    8_192
}

fn default_row_group_size() -> usize {
    32 * 1024
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            schema_sample_rows: default_schema_sample_rows(),
            batch_size: default_batch_size(),
            parquet_row_group_size: default_row_group_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl RuntimeConfig {
    /// Load configuration from the process environment and optional config file
    pub fn load() -> Result<Self> {
        sources::load_config(&StdEnvSource)
    }

    /// Load configuration from an arbitrary environment source (useful for testing)
    pub fn load_from<E: EnvSource>(env: &E) -> Result<Self> {
        sources::load_config(env)
    }

    /// Validate the settings the export-trigger function depends on
    pub fn validate_for_export(&self) -> Result<()> {
        validation::validate_export_config(&self.export)
    }

    /// Validate the settings the conversion function depends on
    pub fn validate_for_conversion(&self) -> Result<()> {
        validation::validate_storage_config(&self.storage)?;
        validation::validate_conversion_config(&self.conversion)
    }
}

/// Mask all but the first four characters of a credential
pub fn redact_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if visible.len() == secret.len() {
        "****".to_string()
    } else {
        format!("{}****", visible)
    }
}
