//! Per-invocation storage session
//!
//! Each conversion builds its own OpenDAL operator from the configured
//! credentials and drops it when the session goes out of scope. Ambient
//! credential discovery (profile files, instance metadata) is disabled so the
//! write uses exactly the configured key pair.

use crate::error::{Result, WriterError};
use crate::job::Destination;
use dc2parquet_config::{redact_secret, StorageConfig};
use opendal::Operator;

pub struct StorageSession {
    operator: Operator,
    destination_url: String,
    object_path: String,
}

impl StorageSession {
    /// Open a session for `destination_url` with the configured credentials
    pub fn open(storage: &StorageConfig, destination_url: &str) -> Result<Self> {
        let destination = Destination::parse(destination_url)?;

        let operator = match &destination {
            Destination::S3 { bucket, .. } => {
                let region = required(&storage.region, "AWS_REGION")?;
                let access_key_id = required(&storage.access_key_id, "AWS_ACCESS_KEY_ID")?;
                let secret_access_key =
                    required(&storage.secret_access_key, "AWS_SECRET_ACCESS_KEY")?;

                tracing::debug!(
                    bucket = %bucket,
                    region = %region,
                    access_key_id = %redact_secret(access_key_id),
                    "Opening S3 storage session"
                );

                let mut s3_builder = opendal::services::S3::default()
                    .bucket(bucket)
                    .region(region)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .disable_config_load()
                    .disable_ec2_metadata();

                if let Some(token) = storage
                    .session_token
                    .as_deref()
                    .filter(|t| !t.is_empty())
                {
                    s3_builder = s3_builder.session_token(token);
                }
                if let Some(endpoint) = &storage.endpoint {
                    s3_builder = s3_builder.endpoint(endpoint);
                }

                Operator::new(s3_builder)
                    .map_err(|e| {
                        WriterError::invalid_config(format!("Failed to create S3 operator: {}", e))
                    })?
                    .finish()
            }
            Destination::Fs { path } => {
                let root = Destination::fs_root(path);
                tracing::debug!(root = %root, "Opening filesystem storage session");

                let fs_builder = opendal::services::Fs::default()
                    .root(root)
                    .atomic_write_dir(root);
                Operator::new(fs_builder)
                    .map_err(|e| {
                        WriterError::invalid_config(format!(
                            "Failed to create filesystem operator: {}",
                            e
                        ))
                    })?
                    .finish()
            }
        };

        Ok(Self {
            operator,
            destination_url: destination_url.to_string(),
            object_path: destination.object_path().to_string(),
        })
    }

    /// Use a pre-built operator; the destination still decides the object path
    pub fn with_operator(operator: Operator, destination_url: &str) -> Result<Self> {
        let destination = Destination::parse(destination_url)?;
        Ok(Self {
            operator,
            destination_url: destination_url.to_string(),
            object_path: destination.object_path().to_string(),
        })
    }

    pub fn object_path(&self) -> &str {
        &self.object_path
    }

    /// Replace the object with `bytes` in a single write
    ///
    /// An existing object is overwritten without checks. Two sessions writing
    /// the same destination concurrently race; the last completed PUT wins.
    pub async fn put(&self, bytes: Vec<u8>) -> Result<u64> {
        let len = bytes.len() as u64;
        self.operator
            .write(&self.object_path, bytes)
            .await
            .map_err(|e| WriterError::from_storage(&self.destination_url, e))?;
        Ok(len)
    }
}

impl Drop for StorageSession {
    fn drop(&mut self) {
        tracing::debug!(destination = %self.destination_url, "Storage session closed");
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| WriterError::invalid_config(format!("{} is not set", name)))
}
