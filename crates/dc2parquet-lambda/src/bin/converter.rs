// Converter Lambda binary
//
// Build with: cargo build -p dc2parquet-lambda --bin converter

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    dc2parquet_lambda::run_converter().await
}
