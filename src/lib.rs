//! dc2parquet: Data Connector export scheduling and CSV-to-Parquet conversion
//!
//! Facade over the workspace crates. The deployable Lambda binaries live in
//! `dc2parquet-lambda`.

pub use dc2parquet_config as config;
pub use dc2parquet_export as export;
pub use dc2parquet_lambda as lambda;
pub use dc2parquet_writer as writer;

pub use dc2parquet_config::RuntimeConfig;
pub use dc2parquet_export::{BearerToken, ExportClient, ExportRequest, ExportResponse};
pub use dc2parquet_lambda::{
    handle_conversion, handle_export_trigger, ConversionEvent, ExportTriggerEvent,
    InvocationError, InvocationResponse,
};
pub use dc2parquet_writer::{ConversionJob, ConversionOutcome, Converter, WriterError};
