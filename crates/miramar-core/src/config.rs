use crate::app_config::{AppConfig, CmsConfig, Environment};
use crate::ConfigError;

/// CMS host used when no host variable is set (a local Strapi instance).
pub const DEFAULT_CMS_HOST: &str = "http://localhost:1337";

pub const DEFAULT_USER_AGENT: &str = "miramar-shop/0.1 (storefront)";

/// Server-side host variable first, then the variant exposed to the browser build.
const HOST_VARS: [&str; 2] = ["STRAPI_HOST", "NEXT_PUBLIC_STRAPI_HOST"];
const TOKEN_VARS: [&str; 2] = ["STRAPI_TOKEN", "NEXT_PUBLIC_STRAPI_TOKEN"];

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Tests pass a `HashMap` lookup instead of touching the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let first_of = |vars: &[&str]| -> Option<String> {
        vars.iter()
            .find_map(|var| lookup(var).ok().filter(|v| !v.trim().is_empty()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("MIRAMAR_ENV", "development"))?;
    let log_level = or_default("MIRAMAR_LOG_LEVEL", "info");

    let host = first_of(&HOST_VARS).unwrap_or_else(|| DEFAULT_CMS_HOST.to_string());
    let host = parse_host(&host)?;

    let token = first_of(&TOKEN_VARS).unwrap_or_default();
    if token.is_empty() && env == Environment::Production {
        return Err(ConfigError::MissingEnvVar(TOKEN_VARS[0].to_string()));
    }

    let timeout_secs = match lookup("MIRAMAR_CMS_TIMEOUT_SECS") {
        Ok(raw) => Some(raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: "MIRAMAR_CMS_TIMEOUT_SECS".to_string(),
            reason: e.to_string(),
        })?),
        Err(_) => None,
    };
    let user_agent = or_default("MIRAMAR_CMS_USER_AGENT", DEFAULT_USER_AGENT);

    let whatsapp_number = or_default("MIRAMAR_WHATSAPP_NUMBER", "1234567890");
    if !whatsapp_number.chars().any(|c| c.is_ascii_digit()) {
        return Err(ConfigError::InvalidEnvVar {
            var: "MIRAMAR_WHATSAPP_NUMBER".to_string(),
            reason: "must contain at least one digit".to_string(),
        });
    }

    let search_debounce_ms = parse_u64("MIRAMAR_SEARCH_DEBOUNCE_MS", "300")?;

    Ok(AppConfig {
        env,
        log_level,
        cms: CmsConfig {
            host,
            token,
            timeout_secs,
            user_agent,
        },
        whatsapp_number,
        search_debounce_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MIRAMAR_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Validates the CMS host and strips any trailing slash.
fn parse_host(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: HOST_VARS[0].to_string(),
            reason: format!("'{raw}' is not an http(s) URL"),
        });
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
