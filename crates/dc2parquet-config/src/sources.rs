// Configuration source loading.
//
// Priority order:
// 1. Environment variables (raw AWS/CALLBACK names and DC2PARQUET_* keys)
// 2. Config file path from DC2PARQUET_CONFIG
// 3. Inline config content from DC2PARQUET_CONFIG_CONTENT
// 4. Built-in defaults

use crate::env_overrides::{self, EnvSource, ENV_PREFIX};
use crate::RuntimeConfig;
use anyhow::{Context, Result};
use std::env;

/// Load configuration: defaults, then optional TOML, then environment overrides.
///
/// Validation is left to the caller because each function needs a different
/// subset of the settings.
pub(crate) fn load_config<E: EnvSource>(env: &E) -> Result<RuntimeConfig> {
    let mut config = load_from_file(env)?.unwrap_or_default();
    env_overrides::apply_env_overrides(&mut config, env)?;
    Ok(config)
}

fn load_from_file<E: EnvSource>(env: &E) -> Result<Option<RuntimeConfig>> {
    if let Some(path) = env.get("CONFIG") {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: RuntimeConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        return Ok(Some(config));
    }

    if let Some(content) = env.get("CONFIG_CONTENT") {
        let config: RuntimeConfig = toml::from_str(&content).with_context(|| {
            format!("Failed to parse inline config from {}CONFIG_CONTENT", ENV_PREFIX)
        })?;
        return Ok(Some(config));
    }

    Ok(None)
}

/// Environment source backed by the real process environment
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}
