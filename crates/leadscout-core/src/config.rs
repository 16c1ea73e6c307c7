use crate::app_config::{AppConfig, LlmProvider};
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = parse_u64(var, default)?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(value)
    };

    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");

    let serpapi_api_key = optional("SERPAPI_API_KEY");
    let search_base_url = or_default("LEADSCOUT_SEARCH_BASE_URL", "https://serpapi.com/");
    let search_engine = or_default("LEADSCOUT_SEARCH_ENGINE", "google");
    let search_locale = or_default("LEADSCOUT_SEARCH_LOCALE", "us");
    let target_results = parse_positive_usize("LEADSCOUT_TARGET_RESULTS", "10")?;
    let page_delay_ms = parse_u64("LEADSCOUT_PAGE_DELAY_MS", "2000")?;

    let llm_provider = parse_llm_provider(&or_default("LEADSCOUT_LLM_PROVIDER", "gemini"))?;
    let llm_api_key =
        optional("LEADSCOUT_LLM_API_KEY").or_else(|| optional(llm_provider.key_env_var()));
    let llm_model = or_default("LEADSCOUT_LLM_MODEL", llm_provider.default_model());
    let llm_base_url = or_default("LEADSCOUT_LLM_BASE_URL", llm_provider.default_base_url());

    let request_timeout_secs = parse_positive_u64("LEADSCOUT_REQUEST_TIMEOUT_SECS", "10")?;
    let llm_timeout_secs = parse_positive_u64("LEADSCOUT_LLM_TIMEOUT_SECS", "30")?;
    let candidate_timeout_secs = parse_positive_u64("LEADSCOUT_CANDIDATE_TIMEOUT_SECS", "60")?;
    let max_concurrent_candidates =
        parse_positive_usize("LEADSCOUT_MAX_CONCURRENT_CANDIDATES", "4")?;
    let max_retries = parse_u32("LEADSCOUT_MAX_RETRIES", "2")?;
    let retry_backoff_base_ms = parse_u64("LEADSCOUT_RETRY_BACKOFF_BASE_MS", "500")?;
    let user_agent = or_default("LEADSCOUT_USER_AGENT", DEFAULT_USER_AGENT);

    Ok(AppConfig {
        log_level,
        serpapi_api_key,
        search_base_url,
        search_engine,
        search_locale,
        target_results,
        page_delay_ms,
        llm_provider,
        llm_api_key,
        llm_model,
        llm_base_url,
        request_timeout_secs,
        llm_timeout_secs,
        candidate_timeout_secs,
        max_concurrent_candidates,
        max_retries,
        retry_backoff_base_ms,
        user_agent,
    })
}

/// Parse the `LEADSCOUT_LLM_PROVIDER` value.
///
/// Returns `Err(ConfigError::InvalidEnvVar)` for unrecognized values.
fn parse_llm_provider(s: &str) -> Result<LlmProvider, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "gemini" => Ok(LlmProvider::Gemini),
        "openai" => Ok(LlmProvider::OpenAi),
        other => Err(ConfigError::InvalidEnvVar {
            var: "LEADSCOUT_LLM_PROVIDER".to_string(),
            reason: format!("unrecognized value {other:?}; expected gemini or openai"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
