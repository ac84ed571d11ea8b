use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_API_URL: &str = "https://psis.rda.go.kr/openApi/service.do";
pub(crate) const DEFAULT_USER_AGENT: &str = "psis-search/0.1 (pesticide-lookup)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if `PSIS_API_KEY` is missing or a value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if `PSIS_API_KEY` is missing or a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // A blank key is as useless as a missing one; fail before any search runs.
    let api_key = lookup("PSIS_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar("PSIS_API_KEY".to_string()))?;

    let api_url = or_default("PSIS_API_URL", DEFAULT_API_URL);
    let log_level = or_default("PSIS_LOG_LEVEL", "info");
    let list_timeout_secs = parse_u64("PSIS_LIST_TIMEOUT_SECS", "15")?;
    let detail_timeout_secs = parse_u64("PSIS_DETAIL_TIMEOUT_SECS", "10")?;
    let detail_concurrency = parse_usize("PSIS_DETAIL_CONCURRENCY", "1")?.max(1);
    let user_agent = or_default("PSIS_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        api_key,
        api_url,
        log_level,
        list_timeout_secs,
        detail_timeout_secs,
        detail_concurrency,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
