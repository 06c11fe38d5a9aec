use super::{LogFormat, RuntimeConfig};
use anyhow::{anyhow, Result};

pub const ENV_PREFIX: &str = "DC2PARQUET_";

/// Abstraction over environment-variable lookups so tests can supply their
/// own source of overrides.
pub trait EnvSource {
    /// Get an environment variable WITH the DC2PARQUET_ prefix applied
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the DC2PARQUET_ prefix
    /// Used for the names the functions are deployed with (CALLBACK_URL, AWS_*)
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Apply environment-variable overrides (highest priority) to the runtime config.
pub fn apply_env_overrides<E: EnvSource>(config: &mut RuntimeConfig, env: &E) -> Result<()> {
    // Export trigger
    if let Some(callback_url) = get_raw_env_string(env, "CALLBACK_URL") {
        config.export.callback_url = Some(callback_url);
    }
    if let Some(base_url) = get_env_string(env, "EXPORT_API_BASE_URL") {
        config.export.api_base_url = base_url;
    }
    if let Some(groups) = get_env_string(env, "EXPORT_SERVICE_GROUPS") {
        config.export.service_groups = groups
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
    }

    // Destination storage (standard AWS names, no prefix)
    if let Some(folder) = get_raw_env_string(env, "BUCKET_FOLDER") {
        config.storage.bucket_folder = Some(folder);
    }
    if let Some(region) = get_raw_env_string(env, "AWS_REGION") {
        config.storage.region = Some(region);
    }
    if let Some(access_key_id) = get_raw_env_string(env, "AWS_ACCESS_KEY_ID") {
        config.storage.access_key_id = Some(access_key_id);
    }
    if let Some(secret_access_key) = get_raw_env_string(env, "AWS_SECRET_ACCESS_KEY") {
        config.storage.secret_access_key = Some(secret_access_key);
    }
    if let Some(session_token) = get_raw_env_string(env, "AWS_SESSION_TOKEN") {
        config.storage.session_token = Some(session_token);
    }
    if let Some(endpoint) = get_raw_env_string(env, "AWS_ENDPOINT_URL") {
        config.storage.endpoint = Some(endpoint);
    }
    if let Some(endpoint) = get_env_string(env, "S3_ENDPOINT") {
        config.storage.endpoint = Some(endpoint);
    }

    // Conversion tuning
    if let Some(val) = get_env_usize(env, "SCHEMA_SAMPLE_ROWS")? {
        config.conversion.schema_sample_rows = val;
    }
    if let Some(val) = get_env_usize(env, "BATCH_SIZE")? {
        config.conversion.batch_size = val;
    }
    if let Some(val) = get_env_usize(env, "PARQUET_ROW_GROUP_SIZE")? {
        config.conversion.parquet_row_group_size = val;
    }

    // Logging
    if let Some(level) = get_env_string(env, "LOG_LEVEL") {
        config.log.level = level;
    }
    if let Some(format) = get_env_string(env, "LOG_FORMAT") {
        config.log.format = match format.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };
    }

    Ok(())
}

fn get_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|v| !v.is_empty())
}

fn get_raw_env_string<E: EnvSource>(env: &E, key: &str) -> Option<String> {
    env.get_raw(key).filter(|v| !v.is_empty())
}

fn get_env_usize<E: EnvSource>(env: &E, key: &str) -> Result<Option<usize>> {
    match get_env_string(env, key) {
        Some(val) => {
            let parsed = val
                .parse::<usize>()
                .map_err(|e| anyhow!("Failed to parse {}{}: {}", ENV_PREFIX, key, e))?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}
