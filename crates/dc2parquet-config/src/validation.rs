// Configuration validation
//
// Each function validates only the section it depends on

use crate::{ConversionConfig, ExportConfig, StorageConfig};
use anyhow::{bail, Result};
use tracing::warn;

pub(crate) fn validate_export_config(config: &ExportConfig) -> Result<()> {
    let callback_url = match config.callback_url.as_deref() {
        Some(url) if !url.trim().is_empty() => url,
        _ => bail!("CALLBACK_URL is required for the export trigger"),
    };

    if !is_http_url(callback_url) {
        bail!("CALLBACK_URL must be an http(s) URL, got '{}'", callback_url);
    }

    if !is_http_url(&config.api_base_url) {
        bail!(
            "export.api_base_url must be an http(s) URL, got '{}'",
            config.api_base_url
        );
    }

    if config.service_groups.is_empty() {
        bail!("export.service_groups must name at least one service group");
    }

    Ok(())
}

pub(crate) fn validate_storage_config(config: &StorageConfig) -> Result<()> {
    let folder = require(&config.bucket_folder, "BUCKET_FOLDER")?;
    require(&config.region, "AWS_REGION")?;
    require(&config.access_key_id, "AWS_ACCESS_KEY_ID")?;
    require(&config.secret_access_key, "AWS_SECRET_ACCESS_KEY")?;

    // The destination is a plain concatenation, so a missing separator
    // silently produces a sibling key instead of a file inside the folder.
    if !folder.ends_with('/') {
        warn!(
            bucket_folder = %folder,
            "BUCKET_FOLDER does not end with '/'; filenames will be appended directly"
        );
    }

    Ok(())
}

pub(crate) fn validate_conversion_config(config: &ConversionConfig) -> Result<()> {
    if config.schema_sample_rows == 0 {
        bail!("conversion.schema_sample_rows must be greater than 0");
    }

    if config.batch_size == 0 {
        bail!("conversion.batch_size must be greater than 0");
    }

    if config.parquet_row_group_size == 0 {
        bail!("conversion.parquet_row_group_size must be greater than 0");
    }

    Ok(())
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => bail!("{} is required for the converter", name),
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> StorageConfig {
        StorageConfig {
            bucket_folder: Some("s3://bucket/folder/".to_string()),
            region: Some("us-east-1".to_string()),
            access_key_id: Some("AKIA123456".to_string()),
            secret_access_key: Some("secret".to_string()),
            session_token: None,
            endpoint: None,
        }
    }

    #[test]
    fn test_validate_export_config() {
        let mut config = ExportConfig {
            callback_url: Some("https://cb.example.com".to_string()),
            ..ExportConfig::default()
        };
        assert!(validate_export_config(&config).is_ok());

        config.callback_url = None;
        let err = validate_export_config(&config).unwrap_err();
        assert!(err.to_string().contains("CALLBACK_URL"));

        config.callback_url = Some("ftp://cb.example.com".to_string());
        assert!(validate_export_config(&config).is_err());
    }

    #[test]
    fn test_validate_storage_config() {
        assert!(validate_storage_config(&storage()).is_ok());

        let missing_secret = StorageConfig {
            secret_access_key: None,
            ..storage()
        };
        let err = validate_storage_config(&missing_secret).unwrap_err();
        assert!(err.to_string().contains("AWS_SECRET_ACCESS_KEY"));

        let blank_folder = StorageConfig {
            bucket_folder: Some("  ".to_string()),
            ..storage()
        };
        assert!(validate_storage_config(&blank_folder).is_err());

        // Missing trailing slash only warns
        let no_slash = StorageConfig {
            bucket_folder: Some("s3://bucket/folder".to_string()),
            ..storage()
        };
        assert!(validate_storage_config(&no_slash).is_ok());
    }

    #[test]
    fn test_validate_conversion_config() {
        assert!(validate_conversion_config(&ConversionConfig::default()).is_ok());

        let zero_batch = ConversionConfig {
            batch_size: 0,
            ..ConversionConfig::default()
        };
        assert!(validate_conversion_config(&zero_batch).is_err());
    }
}
