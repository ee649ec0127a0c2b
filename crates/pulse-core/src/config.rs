use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

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
/// Every variable has a default, so an empty environment is valid.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PULSE_ENV", "development"))?;
    let log_level = or_default("PULSE_LOG_LEVEL", "info");

    let data_dir = PathBuf::from(or_default("PULSE_DATA_DIR", "./data"));
    let raw_dir = lookup("PULSE_RAW_DIR").map_or_else(|_| data_dir.join("raw"), PathBuf::from);
    let cleaned_path = lookup("PULSE_CLEANED_PATH")
        .map_or_else(|_| data_dir.join("cleaned_posts.csv"), PathBuf::from);
    let model_dir = PathBuf::from(or_default("PULSE_MODEL_DIR", "./model"));
    let taxonomy_path = PathBuf::from(or_default(
        "PULSE_TAXONOMY_PATH",
        "./config/categories.yaml",
    ));

    let max_features = parse_usize("PULSE_MAX_FEATURES", "5000")?;
    if max_features == 0 {
        return Err(invalid("PULSE_MAX_FEATURES", "must be at least 1".to_string()));
    }

    let max_iter = parse_usize("PULSE_MAX_ITER", "2000")?;
    if max_iter == 0 {
        return Err(invalid("PULSE_MAX_ITER", "must be at least 1".to_string()));
    }

    let test_size = parse_f64("PULSE_TEST_SIZE", "0.3")?;
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(invalid(
            "PULSE_TEST_SIZE",
            format!("{test_size} is outside the open interval (0, 1)"),
        ));
    }

    let seed = parse_u64("PULSE_SEED", "42")?;
    let content_limit = parse_usize("PULSE_CONTENT_LIMIT", "3000")?;
    let trend_window = parse_usize("PULSE_TREND_WINDOW", "7")?;

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        raw_dir,
        cleaned_path,
        model_dir,
        taxonomy_path,
        max_features,
        max_iter,
        test_size,
        seed,
        content_limit,
        trend_window,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PULSE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
