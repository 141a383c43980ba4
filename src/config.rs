//! Configuration management for the edge page function.
//!
//! Values come from environment variables set on the function. A `.env` file is
//! loaded first when present, which is convenient for local one-shot renders.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Default parameter read when `SSM_PARAM_NAME` is not set.
pub const DEFAULT_PARAM_NAME: &str = "/challenge/dynamic_string";

/// Value rendered when the parameter store cannot be reached.
pub const DEFAULT_FALLBACK_VALUE: &str = "default-value";

/// Configuration for the edge page function.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the parameter to render
    pub param_name: String,

    /// Region the function runs in (default: "us-east-1")
    pub region: String,

    /// Base URL of the parameter store endpoint (default: "http://localhost:2773")
    pub parameter_store_url: String,

    /// Session token forwarded to the parameter store endpoint, if any
    pub session_token: Option<String>,

    /// How long a fetched value is served from memory, in seconds (default: 60)
    pub cache_ttl_seconds: u64,

    /// Directory holding the page templates (default: "/var/task/templates")
    pub template_dir: PathBuf,

    /// Template rendered for every invocation (default: "index.html")
    pub template_name: String,

    /// Value rendered when the fetch fails (default: "default-value")
    pub default_value: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level used when `RUST_LOG` is not set (default: "info")
    pub log_level: String,

    /// Host and port of the function runtime API, if running inside one
    pub runtime_api: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `SSM_PARAM_NAME`: parameter to read (default: `/challenge/dynamic_string`)
    /// - `AWS_REGION`: region (default: `us-east-1`)
    /// - `PARAMETER_STORE_URL`: store endpoint (default: `http://localhost:2773`)
    /// - `AWS_SESSION_TOKEN`: forwarded to the store endpoint when present
    /// - `CACHE_TTL_SECONDS`: cache lifetime (default: 60)
    /// - `TEMPLATE_DIR` / `TEMPLATE_NAME`: template location
    /// - `DEFAULT_VALUE`: fallback string (default: `default-value`)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: logging level (default: "info")
    /// - `AWS_LAMBDA_RUNTIME_API`: enables the invocation loop
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let param_name = Self::env_or("SSM_PARAM_NAME", &defaults.param_name);
        if param_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SSM_PARAM_NAME".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let parameter_store_url =
            Self::env_or("PARAMETER_STORE_URL", &defaults.parameter_store_url);
        if !parameter_store_url.starts_with("http://")
            && !parameter_store_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                var: "PARAMETER_STORE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let template_name = Self::env_or("TEMPLATE_NAME", &defaults.template_name);
        if template_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "TEMPLATE_NAME".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let cache_ttl_seconds =
            Self::parse_env_u64("CACHE_TTL_SECONDS", defaults.cache_ttl_seconds)?;
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", defaults.request_timeout)?;

        Ok(Config {
            param_name,
            region: Self::env_or("AWS_REGION", &defaults.region),
            parameter_store_url,
            session_token: Self::env_opt("AWS_SESSION_TOKEN"),
            cache_ttl_seconds,
            template_dir: env::var("TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_dir),
            template_name,
            default_value: Self::env_or("DEFAULT_VALUE", &defaults.default_value),
            request_timeout,
            log_level: Self::env_or("LOG_LEVEL", &defaults.log_level),
            runtime_api: Self::env_opt("AWS_LAMBDA_RUNTIME_API"),
        })
    }

    fn env_or(var_name: &str, default: &str) -> String {
        env::var(var_name).unwrap_or_else(|_| default.to_string())
    }

    /// Read a variable, treating blank values as unset.
    fn env_opt(var_name: &str) -> Option<String> {
        env::var(var_name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            param_name: DEFAULT_PARAM_NAME.to_string(),
            region: "us-east-1".to_string(),
            parameter_store_url: "http://localhost:2773".to_string(),
            session_token: None,
            cache_ttl_seconds: 60,
            template_dir: PathBuf::from("/var/task/templates"),
            template_name: "index.html".to_string(),
            default_value: DEFAULT_FALLBACK_VALUE.to_string(),
            request_timeout: 10,
            log_level: "info".to_string(),
            runtime_api: None,
        }
    }
}
