//! Error types for export scheduling

use thiserror::Error;

/// Errors that prevent an export request from reaching the remote service
///
/// A non-2xx answer from the service is not an error: it is returned as an
/// [`ExportResponse`](crate::ExportResponse) with the remote status.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A required input was missing or empty
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// The export configuration cannot be used
    #[error("invalid export configuration: {0}")]
    InvalidConfig(String),

    /// The request URL could not be built from the base URL and account id
    #[error("invalid export endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request never completed (DNS, connect, TLS, body read)
    #[error("export request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request body could not be serialized
    #[error("failed to encode export request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for ExportError
pub type Result<T> = std::result::Result<T, ExportError>;
