// Invocation handlers
//
// Each handler validates its payload, runs one operation and wraps the result
// in the `{statusCode, body}` envelope. Errors are returned to the runtime,
// which marks the invocation failed.

use dc2parquet_export::{BearerToken, ExportClient};
use dc2parquet_writer::Converter;

use crate::events::{ConversionEvent, ExportTriggerEvent};
use crate::{InvocationError, InvocationResponse};

/// Schedule a one-time export and pass the remote answer through
///
/// A 4xx/5xx from the export service is a normal response carrying that
/// status; only transport failures are errors.
pub async fn handle_export_trigger(
    event: &ExportTriggerEvent,
    client: &ExportClient,
) -> Result<InvocationResponse, InvocationError> {
    let input = event.validate()?;

    let response = client
        .schedule_one_time(
            &BearerToken::new(input.access_token),
            input.account_id,
            input.project_id,
        )
        .await?;

    Ok(InvocationResponse::json(response.status, response.body))
}

/// Convert one CSV into a Parquet object under the configured folder
pub async fn handle_conversion(
    event: &ConversionEvent,
    converter: &Converter,
) -> Result<InvocationResponse, InvocationError> {
    let input = event.validate()?;

    let job = converter.job(input.source_url, input.destination_filename)?;
    let outcome = converter.convert(&job).await?;

    Ok(InvocationResponse::text(200, outcome.message()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc2parquet_config::{ExportConfig, RuntimeConfig};
    use dc2parquet_writer::WriterError;
    use httpmock::prelude::*;
    use opendal::{services, Operator};
    use serde_json::json;

    fn export_client(server: &MockServer) -> ExportClient {
        ExportClient::new(&ExportConfig {
            api_base_url: server.base_url(),
            callback_url: Some("https://cb.example.com".to_string()),
            ..ExportConfig::default()
        })
        .unwrap()
    }

    fn export_event(project_id: Option<&str>) -> ExportTriggerEvent {
        ExportTriggerEvent {
            access_token: Some("tok".to_string()),
            account_id: Some("A1".to_string()),
            project_id: project_id.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn export_success_is_wrapped() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/v1/accounts/A1/requests")
                    .json_body_partial(r#"{"projectId":"P1","scheduleInterval":"ONE_TIME"}"#);
                then.status(200).json_body(json!({ "id": "req-123" }));
            })
            .await;

        let response = handle_export_trigger(&export_event(Some("P1")), &export_client(&server))
            .await
            .unwrap();
        assert_eq!(
            response,
            InvocationResponse::json(200, json!({ "id": "req-123" }))
        );
    }

    #[tokio::test]
    async fn export_rejection_is_not_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/v1/accounts/A1/requests");
                then.status(401).json_body(json!({ "error": "invalid token" }));
            })
            .await;

        let response = handle_export_trigger(&export_event(Some("P1")), &export_client(&server))
            .await
            .unwrap();
        assert_eq!(response.status_code, 401);
        assert_eq!(response.body, json!({ "error": "invalid token" }));
    }

    #[tokio::test]
    async fn export_missing_field_sends_nothing() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST);
                then.status(200);
            })
            .await;

        let err = handle_export_trigger(&export_event(None), &export_client(&server))
            .await
            .unwrap_err();
        assert!(matches!(err, InvocationError::MissingField("projectId")));
        mock.assert_hits_async(0).await;
    }

    #[tokio::test]
    async fn conversion_returns_confirmation() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users.csv");
                then.status(200).body("id,name\n1,a\n2,b\n3,c\n");
            })
            .await;

        let mut config = RuntimeConfig::default();
        config.storage.bucket_folder = Some("s3://bucket/folder/".to_string());
        let op = Operator::new(services::Memory::default()).unwrap().finish();
        let converter = Converter::new(&config).unwrap().with_operator(op.clone());

        let event = ConversionEvent {
            source_url: Some(server.url("/users.csv")),
            destination_filename: Some("out.parquet".to_string()),
        };
        let response = handle_conversion(&event, &converter).await.unwrap();

        assert_eq!(
            response,
            InvocationResponse::text(
                200,
                "CSV converted to Parquet and uploaded to s3://bucket/folder/out.parquet successfully!"
            )
        );
        assert!(op.exists("folder/out.parquet").await.unwrap());
    }

    #[tokio::test]
    async fn conversion_failure_propagates() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/gone.csv");
                then.status(404);
            })
            .await;

        let mut config = RuntimeConfig::default();
        config.storage.bucket_folder = Some("s3://bucket/folder/".to_string());
        let op = Operator::new(services::Memory::default()).unwrap().finish();
        let converter = Converter::new(&config).unwrap().with_operator(op);

        let event = ConversionEvent {
            source_url: Some(server.url("/gone.csv")),
            destination_filename: Some("out.parquet".to_string()),
        };
        let err = handle_conversion(&event, &converter).await.unwrap_err();
        assert!(matches!(
            err,
            InvocationError::Conversion(WriterError::DataAccess { .. })
        ));
    }
}
