//! CSV to Parquet conversion pipeline
//!
//! fetch -> infer + decode -> encode -> open storage session -> single PUT

use crate::decode::decode_csv;
use crate::encoding::encode_parquet;
use crate::error::{Result, WriterError};
use crate::job::{ConversionJob, Destination};
use crate::source::{fetch_csv, strip_query};
use crate::storage::StorageSession;
use dc2parquet_config::{ConversionConfig, RuntimeConfig, StorageConfig};
use opendal::Operator;

/// Result of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub destination_url: String,
    pub rows: usize,
    pub columns: Vec<String>,
    pub bytes_written: u64,
    /// Blake3 hex digest of the uploaded Parquet bytes
    pub content_hash: String,
}

impl ConversionOutcome {
    /// Human-readable confirmation returned to the caller
    pub fn message(&self) -> String {
        success_message(&self.destination_url)
    }
}

pub fn success_message(destination_url: &str) -> String {
    format!(
        "CSV converted to Parquet and uploaded to {} successfully!",
        destination_url
    )
}

/// Converts one CSV per call into a Parquet object under the configured folder
pub struct Converter {
    http: reqwest::Client,
    storage: StorageConfig,
    bucket_folder: String,
    settings: ConversionConfig,
    operator: Option<Operator>,
}

impl Converter {
    /// Create a converter from the runtime configuration
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(http: reqwest::Client, config: &RuntimeConfig) -> Result<Self> {
        let bucket_folder = config
            .storage
            .bucket_folder
            .clone()
            .filter(|folder| !folder.is_empty())
            .ok_or_else(|| WriterError::invalid_config("BUCKET_FOLDER is not set"))?;

        Ok(Self {
            http,
            storage: config.storage.clone(),
            bucket_folder,
            settings: config.conversion.clone(),
            operator: None,
        })
    }

    /// Write through `operator` instead of building one from the credentials
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    pub fn bucket_folder(&self) -> &str {
        &self.bucket_folder
    }

    /// Build a job whose destination is `bucket_folder + destination_filename`
    pub fn job(&self, source_url: &str, destination_filename: &str) -> Result<ConversionJob> {
        ConversionJob::new(source_url, destination_filename, &self.bucket_folder)
    }

    /// Run one conversion
    ///
    /// The source is fully fetched, decoded and encoded before storage is
    /// touched, so a source failure never modifies the destination.
    pub async fn convert(&self, job: &ConversionJob) -> Result<ConversionOutcome> {
        let destination_url = job.destination_url();
        Destination::parse(destination_url)?;

        tracing::info!(
            source = %strip_query(&job.source_url),
            destination = %destination_url,
            "Converting CSV to Parquet"
        );

        let csv = fetch_csv(&self.http, &job.source_url).await?;
        let decoded = decode_csv(
            &csv,
            self.settings.schema_sample_rows,
            self.settings.batch_size,
        )?;
        drop(csv);

        let columns: Vec<String> = decoded
            .schema
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        let encoded = encode_parquet(
            decoded.schema.clone(),
            &decoded.batches,
            self.settings.parquet_row_group_size,
        )?;

        let session = match &self.operator {
            Some(operator) => StorageSession::with_operator(operator.clone(), destination_url)?,
            None => StorageSession::open(&self.storage, destination_url)?,
        };
        let bytes_written = session.put(encoded.bytes).await?;

        tracing::info!(
            destination = %destination_url,
            rows = decoded.rows,
            columns = columns.len(),
            bytes = bytes_written,
            content_hash = %encoded.content_hash,
            "✓ Wrote Parquet file"
        );

        Ok(ConversionOutcome {
            destination_url: destination_url.to_string(),
            rows: decoded.rows,
            columns,
            bytes_written,
            content_hash: encoded.content_hash,
        })
    }
}
