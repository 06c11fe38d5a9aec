//! Error types for the conversion crate

use thiserror::Error;

/// Error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Invocation input missing or unusable
    E001InvalidInput,
    /// E002: Source CSV unreachable, unreadable, or malformed
    E002DataAccess,
    /// E003: No columns could be inferred from the source
    E003Schema,
    /// E004: Storage rejected the credentials or lacks write permission
    E004StorageAuthorization,
    /// E005: Storage write failed after authorization
    E005StorageWrite,
    /// E006: Configuration missing or invalid
    E006InvalidConfig,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E001InvalidInput => "E001",
            Self::E002DataAccess => "E002",
            Self::E003Schema => "E003",
            Self::E004StorageAuthorization => "E004",
            Self::E005StorageWrite => "E005",
            Self::E006InvalidConfig => "E006",
        }
    }
}

/// Errors that can occur while converting a CSV to Parquet
#[derive(Debug, Error)]
pub enum WriterError {
    /// Invocation input was rejected before any I/O
    #[error("[{code}] Invalid input: {message}")]
    InvalidInput { code: &'static str, message: String },

    /// Source could not be fetched or decoded
    #[error("[{code}] Failed to read source CSV: {message}")]
    DataAccess { code: &'static str, message: String },

    /// Source has no inferable columns
    #[error("[{code}] Cannot infer a schema: {message}")]
    Schema { code: &'static str, message: String },

    /// Destination refused the configured credentials
    #[error("[{code}] Storage authorization failed for '{destination}': {message}\n\nTroubleshooting:\n  • Check AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY\n  • Ensure the key may s3:PutObject under BUCKET_FOLDER\n  • Verify AWS_REGION matches the bucket")]
    StorageAuthorization {
        code: &'static str,
        destination: String,
        message: String,
    },

    /// Destination write failed
    #[error("[{code}] Write to '{destination}' failed: {message}")]
    StorageWrite {
        code: &'static str,
        destination: String,
        message: String,
    },

    /// Configuration cannot be used
    #[error("[{code}] Invalid configuration: {message}")]
    InvalidConfig { code: &'static str, message: String },
}

impl WriterError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code: ErrorCode::E001InvalidInput.as_str(),
            message: message.into(),
        }
    }

    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess {
            code: ErrorCode::E002DataAccess.as_str(),
            message: message.into(),
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            code: ErrorCode::E003Schema.as_str(),
            message: message.into(),
        }
    }

    pub fn storage_authorization(destination: &str, message: impl Into<String>) -> Self {
        Self::StorageAuthorization {
            code: ErrorCode::E004StorageAuthorization.as_str(),
            destination: destination.to_string(),
            message: message.into(),
        }
    }

    pub fn storage_write(destination: &str, message: impl Into<String>) -> Self {
        Self::StorageWrite {
            code: ErrorCode::E005StorageWrite.as_str(),
            destination: destination.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            code: ErrorCode::E006InvalidConfig.as_str(),
            message: message.into(),
        }
    }

    /// Classify an OpenDAL failure at the destination
    pub(crate) fn from_storage(destination: &str, err: opendal::Error) -> Self {
        match err.kind() {
            opendal::ErrorKind::PermissionDenied => {
                Self::storage_authorization(destination, err.to_string())
            }
            opendal::ErrorKind::ConfigInvalid => Self::invalid_config(err.to_string()),
            _ => Self::storage_write(destination, err.to_string()),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { .. } => ErrorCode::E001InvalidInput,
            Self::DataAccess { .. } => ErrorCode::E002DataAccess,
            Self::Schema { .. } => ErrorCode::E003Schema,
            Self::StorageAuthorization { .. } => ErrorCode::E004StorageAuthorization,
            Self::StorageWrite { .. } => ErrorCode::E005StorageWrite,
            Self::InvalidConfig { .. } => ErrorCode::E006InvalidConfig,
        }
    }
}

/// Result type alias for WriterError
pub type Result<T> = std::result::Result<T, WriterError>;
