//! HTTP client for the parameter store endpoint.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client talks to the local parameter store
//! endpoint exposed to the function and maps its failures to `ParameterStoreError`.

mod async_wrapper;
pub use async_wrapper::{AsyncParameterStoreClient, ParameterStore};

use crate::config::Config;
use crate::error::{ParameterStoreError, ParameterStoreResult};
use crate::metrics::{Metrics, StoreTimer};
use crate::models::{GetParameterResponse, Parameter};
use std::sync::Arc;
use std::time::Duration;

/// Header carrying the function's session token to the parameter store endpoint.
pub const SESSION_TOKEN_HEADER: &str = "X-Aws-Parameters-Secrets-Token";

const GET_PARAMETER_PATH: &str = "/systemsmanager/parameters/get";

/// HTTP client for the parameter store.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ParameterStoreClient {
    /// Base URL of the parameter store endpoint
    base_url: String,

    /// Session token forwarded with every request, if any
    session_token: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ParameterStoreClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.parameter_store_url.clone(),
            session_token: config.session_token.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, session_token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            session_token,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Fetch a single parameter by name.
    ///
    /// The value is never decrypted.
    pub fn get_parameter(&self, name: &str) -> ParameterStoreResult<Parameter> {
        let url = format!(
            "{}?name={}&withDecryption=false",
            self.build_url(GET_PARAMETER_PATH),
            urlencoding::encode(name)
        );

        tracing::debug!("GET {}", url);
        let timer = StoreTimer::new(self.metrics.clone());

        let mut request = self.agent.get(&url);
        if let Some(token) = &self.session_token {
            request = request.set(SESSION_TOKEN_HEADER, token);
        }

        let result = request
            .call()
            .map_err(|e| Self::map_error(name, e))
            .and_then(|response| {
                response
                    .into_string()
                    .map_err(|e| ParameterStoreError::HttpError(e.to_string()))
            })
            .and_then(|body| {
                serde_json::from_str::<GetParameterResponse>(&body)
                    .map_err(ParameterStoreError::JsonError)
            });

        match result {
            Ok(envelope) => {
                timer.complete();
                Ok(envelope.parameter)
            }
            Err(e) => {
                tracing::debug!("GET {} - Error: {:?}", url, e);
                timer.complete_with_error();
                Err(e)
            }
        }
    }

    /// Map a ureq error to a ParameterStoreError.
    fn map_error(name: &str, error: ureq::Error) -> ParameterStoreError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => ParameterStoreError::Unauthorized,
                    404 => ParameterStoreError::NotFound(name.to_string()),
                    400 if message.contains("ParameterNotFound") => {
                        ParameterStoreError::NotFound(name.to_string())
                    }
                    _ => ParameterStoreError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ParameterStoreError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ParameterStoreError::Timeout
                } else {
                    ParameterStoreError::HttpError(transport.to_string())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client =
            ParameterStoreClient::with_base_url("http://localhost:2773".to_string(), None);

        assert_eq!(
            client.build_url(GET_PARAMETER_PATH),
            "http://localhost:2773/systemsmanager/parameters/get"
        );

        let client_with_slash =
            ParameterStoreClient::with_base_url("http://localhost:2773/".to_string(), None);

        assert_eq!(
            client_with_slash.build_url("systemsmanager/parameters/get"),
            "http://localhost:2773/systemsmanager/parameters/get"
        );
    }

    #[test]
    fn test_client_creation() {
        let config = Config {
            parameter_store_url: "http://127.0.0.1:2773".to_string(),
            session_token: Some("token-123".to_string()),
            ..Config::default()
        };

        let metrics = Metrics::new();
        let client = ParameterStoreClient::new(&config, metrics.clone());
        assert_eq!(client.base_url, "http://127.0.0.1:2773");
        assert_eq!(client.session_token.as_deref(), Some("token-123"));

        client.metrics().record_store_error();
        assert_eq!(metrics.store_errors_total(), 1);
    }
}
