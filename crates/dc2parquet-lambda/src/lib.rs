// AWS Lambda runtime adapter
//
// Two independent functions share this crate:
// - export-trigger: schedules a one-time Data Connector export
// - converter: converts one CSV into a Parquet object in S3

use dc2parquet_export::{ExportClient, ExportError};
use dc2parquet_writer::{Converter, WriterError};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use std::sync::Arc;
use thiserror::Error as ThisError;

mod events;
mod handlers;
mod init;
mod response;

pub use events::{ConversionEvent, ExportTriggerEvent};
pub use handlers::{handle_conversion, handle_export_trigger};
pub use response::InvocationResponse;

/// Errors that fail an invocation
#[derive(Debug, ThisError)]
pub enum InvocationError {
    /// Required payload field missing or empty
    #[error("invalid invocation payload: missing required field '{0}'")]
    MissingField(&'static str),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Conversion(#[from] WriterError),
}

/// Export-trigger Lambda entry point
pub async fn run_export_trigger() -> Result<(), Error> {
    let config = init::load_config()?;
    init::init_tracing(&config);
    init::log_build_info("export-trigger");

    config.validate_for_export().map_err(|e| {
        tracing::error!("Invalid export configuration: {:#}", e);
        Error::from(format!("Invalid export configuration: {:#}", e))
    })?;

    let client = Arc::new(ExportClient::new(&config.export)?);

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<ExportTriggerEvent>| {
            let client = client.clone();
            async move {
                let (payload, context) = event.into_parts();
                tracing::debug!(request_id = %context.request_id, event = ?payload, "Export trigger invoked");
                handle_export_trigger(&payload, &client)
                    .await
                    .map_err(|err| {
                        tracing::error!(request_id = %context.request_id, "Export trigger failed: {}", err);
                        Error::from(err)
                    })
            }
        },
    ))
    .await
}

/// Converter Lambda entry point
pub async fn run_converter() -> Result<(), Error> {
    let config = init::load_config()?;
    init::init_tracing(&config);
    init::log_build_info("converter");

    config.validate_for_conversion().map_err(|e| {
        tracing::error!("Invalid converter configuration: {:#}", e);
        Error::from(format!("Invalid converter configuration: {:#}", e))
    })?;
    tracing::debug!(storage = ?config.storage, "Converter configured");

    let converter = Arc::new(Converter::new(&config)?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<ConversionEvent>| {
        let converter = converter.clone();
        async move {
            let (payload, context) = event.into_parts();
            handle_conversion(&payload, &converter)
                .await
                .map_err(|err| {
                    tracing::error!(request_id = %context.request_id, "Conversion failed: {}", err);
                    Error::from(err)
                })
        }
    }))
    .await
}
