//! Conversion job and destination resolution

use crate::error::{Result, WriterError};
use crate::source::strip_query;
use std::fmt;

/// One CSV-to-Parquet conversion
///
/// Only the filename is caller-controlled; the folder prefix always comes
/// from configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source_url: String,
    pub destination_filename: String,
    destination_url: String,
}

impl ConversionJob {
    /// Build a job, deriving `destination_url = bucket_folder + destination_filename`
    ///
    /// The concatenation is literal. A filename containing a `..` segment is
    /// rejected so the result stays under the configured folder.
    pub fn new(
        source_url: impl Into<String>,
        destination_filename: impl Into<String>,
        bucket_folder: &str,
    ) -> Result<Self> {
        let source_url = source_url.into();
        let destination_filename = destination_filename.into();

        if source_url.trim().is_empty() {
            return Err(WriterError::invalid_input("source_url is empty"));
        }
        if destination_filename.trim().is_empty() {
            return Err(WriterError::invalid_input("destination_filename is empty"));
        }
        if destination_filename
            .split(['/', '\\'])
            .any(|segment| segment == "..")
        {
            return Err(WriterError::invalid_input(format!(
                "destination_filename '{}' escapes the destination folder",
                destination_filename
            )));
        }

        let destination_url = format!("{}{}", bucket_folder, destination_filename);

        Ok(Self {
            source_url,
            destination_filename,
            destination_url,
        })
    }

    pub fn destination_url(&self) -> &str {
        &self.destination_url
    }
}

impl fmt::Debug for ConversionJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionJob")
            .field("source_url", &strip_query(&self.source_url))
            .field("destination_filename", &self.destination_filename)
            .field("destination_url", &self.destination_url)
            .finish()
    }
}

/// Parsed destination location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// `s3://bucket/key`
    S3 { bucket: String, key: String },
    /// `file:///abs/path` or a bare filesystem path
    Fs { path: String },
}

impl Destination {
    pub fn parse(url: &str) -> Result<Self> {
        if let Some(rest) = url.strip_prefix("s3://") {
            let (bucket, key) = rest.split_once('/').ok_or_else(|| {
                WriterError::invalid_config(format!("destination '{}' has no object key", url))
            })?;
            if bucket.is_empty() {
                return Err(WriterError::invalid_config(format!(
                    "destination '{}' has no bucket",
                    url
                )));
            }
            if key.is_empty() || key.ends_with('/') {
                return Err(WriterError::invalid_config(format!(
                    "destination '{}' does not name an object",
                    url
                )));
            }
            return Ok(Self::S3 {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        let path = url.strip_prefix("file://").unwrap_or(url);
        if path.contains("://") {
            return Err(WriterError::invalid_config(format!(
                "unsupported destination scheme in '{}' (expected s3:// or a filesystem path)",
                url
            )));
        }
        if path.is_empty() || path.ends_with('/') {
            return Err(WriterError::invalid_config(format!(
                "destination '{}' does not name a file",
                url
            )));
        }

        Ok(Self::Fs {
            path: path.to_string(),
        })
    }

    /// Path of the object relative to the storage root
    pub fn object_path(&self) -> &str {
        match self {
            Self::S3 { key, .. } => key,
            Self::Fs { path } => path.rsplit_once('/').map_or(path.as_str(), |(_, file)| file),
        }
    }

    /// Directory used as the filesystem root (the file's parent)
    pub(crate) fn fs_root(path: &str) -> &str {
        match path.rsplit_once('/') {
            Some(("", _)) => "/",
            Some((dir, _)) => dir,
            None => ".",
        }
    }
}
