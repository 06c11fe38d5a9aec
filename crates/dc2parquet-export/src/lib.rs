//! One-time Data Connector export scheduling
//!
//! Builds the `ONE_TIME` export request and posts it to the Data Connector
//! API on behalf of the caller's bearer token. The remote status and body are
//! handed back untouched; only transport failures are treated as errors.

mod client;
mod error;
mod request;

pub use client::{BearerToken, ExportClient, ExportResponse};
pub use error::{ExportError, Result};
pub use request::{format_effective_from, ExportRequest, ONE_TIME_INTERVAL};
