use crate::config::types::{
    Config, CrawlerConfig, InputConfig, MetadataConfig, OutputConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Schemes a seed URL may use
const SEED_SCHEMES: &[&str] = &["http", "https", "file"];

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_metadata_config(&config.metadata)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_depth < 1 {
        return Err(ConfigError::Validation(
            "max_depth must be >= 1".to_string(),
        ));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 256 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_requests must be between 1 and 256, got {}",
            config.max_concurrent_requests
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 600 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 600, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates partial download settings
fn validate_metadata_config(config: &MetadataConfig) -> Result<(), ConfigError> {
    if config.range_bytes < 128 || config.range_bytes > 1024 * 1024 {
        return Err(ConfigError::Validation(format!(
            "range_bytes must be between 128 and 1048576, got {}",
            config.range_bytes
        )));
    }

    Ok(())
}

/// Validates inline seeds and the site list path
fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if let Some(site_list) = &config.site_list {
        if site_list.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_list cannot be an empty path".to_string(),
            ));
        }
    }

    for seed in &config.seeds {
        validate_seed(seed)?;
    }

    Ok(())
}

/// Validates a single seed URL
pub(crate) fn validate_seed(seed: &str) -> Result<(), ConfigError> {
    let url = Url::parse(seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", seed, e)))?;

    if !SEED_SCHEMES.contains(&url.scheme()) {
        return Err(ConfigError::Validation(format!(
            "Seed URL '{}' must use http, https or file scheme",
            seed
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
