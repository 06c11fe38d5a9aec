// Cold-start initialization
//
// Configuration loading and logging/tracing setup

use dc2parquet_config::{LogFormat, RuntimeConfig};
use lambda_runtime::Error;

/// Load the runtime configuration once per execution environment
pub(crate) fn load_config() -> Result<RuntimeConfig, Error> {
    RuntimeConfig::load().map_err(|e| Error::from(format!("Failed to load configuration: {:#}", e)))
}

/// Initialize tracing/logging from RuntimeConfig
///
/// CloudWatch adds its own timestamps and does not render ANSI colors.
pub(crate) fn init_tracing(config: &RuntimeConfig) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_new(&config.log.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: a second initialization (tests, warm re-entry) is not an error
    let _ = match config.log.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().without_time().with_ansi(false))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().without_time().with_ansi(false))
            .try_init(),
    };
}

pub(crate) fn log_build_info(function: &str) {
    tracing::info!(
        function,
        version = env!("CARGO_PKG_VERSION"),
        git_hash = env!("GIT_HASH"),
        built_at = env!("BUILD_TIMESTAMP"),
        "Lambda function starting"
    );
}
