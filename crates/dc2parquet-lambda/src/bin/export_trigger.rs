// Export-trigger Lambda binary
//
// Build with: cargo build -p dc2parquet-lambda --bin export-trigger
//
// The lambda_runtime crate provides the tokio runtime, so we use #[tokio::main]

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    dc2parquet_lambda::run_export_trigger().await
}
