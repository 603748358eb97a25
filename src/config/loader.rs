use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::dto::{AppConfig, FetchSettings};
use crate::core::error::AppError;

pub fn load_config() -> Result<AppConfig, AppError> {
    dotenvy::dotenv().ok();

    let defaults = FetchSettings::default();

    let max_attempts = parse_env("SCRAPER_MAX_ATTEMPTS", defaults.max_attempts)?;
    let base_backoff_secs = parse_env("SCRAPER_BASE_BACKOFF_SECS", defaults.base_backoff_secs)?;
    let request_delay_secs =
        parse_env("SCRAPER_REQUEST_DELAY_SECS", defaults.request_delay_secs)?;
    let timeout_secs = parse_env("SCRAPER_TIMEOUT_SECS", defaults.timeout_secs)?;
    let user_agent = env::var("SCRAPER_USER_AGENT")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or(defaults.user_agent);
    let disable_proxy = parse_bool_env("SCRAPER_DISABLE_PROXY", false);

    let fetch = FetchSettings {
        max_attempts,
        base_backoff_secs,
        request_delay_secs,
        timeout_secs,
        user_agent,
        disable_proxy,
    };
    validate_fetch_settings(&fetch)?;

    let output_root = env::var("SCRAPER_OUTPUT_ROOT")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let page_cache_dir = env::var("SCRAPER_PAGE_CACHE_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        fetch,
        output_root,
        page_cache_dir,
    })
}

pub fn validate_fetch_settings(settings: &FetchSettings) -> Result<(), AppError> {
    if settings.max_attempts == 0 {
        return Err(AppError::configuration(
            "max attempts must be at least 1".to_string(),
        ));
    }

    for (name, value) in [
        ("base backoff", settings.base_backoff_secs),
        ("request delay", settings.request_delay_secs),
        ("timeout", settings.timeout_secs),
    ] {
        Duration::try_from_secs_f64(value).map_err(|err| {
            AppError::configuration(format!(
                "{name} must be a non-negative number of seconds, received {value}: {err}"
            ))
        })?;
    }

    if settings.timeout_secs == 0.0 {
        return Err(AppError::configuration(
            "timeout must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn parse_env<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map_err(|err| AppError::configuration(format!("invalid {key}: {err}"))),
        _ => Ok(default),
    }
}

fn parse_bool_env(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|value| matches!(value.as_str(), "true" | "1" | "TRUE" | "True"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_attempts() {
        let settings = FetchSettings {
            max_attempts: 0,
            ..FetchSettings::default()
        };
        let err = validate_fetch_settings(&settings).expect_err("zero attempts");
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn rejects_negative_delay() {
        let settings = FetchSettings {
            request_delay_secs: -1.0,
            ..FetchSettings::default()
        };
        assert!(validate_fetch_settings(&settings).is_err());
    }

    #[test]
    fn rejects_durations_too_large_to_represent() {
        for settings in [
            FetchSettings {
                base_backoff_secs: 1e20,
                ..FetchSettings::default()
            },
            FetchSettings {
                request_delay_secs: f64::INFINITY,
                ..FetchSettings::default()
            },
            FetchSettings {
                timeout_secs: f64::NAN,
                ..FetchSettings::default()
            },
        ] {
            let err = validate_fetch_settings(&settings).expect_err("unrepresentable duration");
            assert!(matches!(err, AppError::Configuration(_)));
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_fetch_settings(&FetchSettings::default()).is_ok());
    }
}
