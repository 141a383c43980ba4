//! Error types for the edge page function.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when reading from the parameter store.
#[derive(Error, Debug)]
pub enum ParameterStoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Store returned an error status code
    #[error("Parameter store error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Parameter does not exist
    #[error("Parameter not found: {0}")]
    NotFound(String),

    /// Request was rejected by the store
    #[error("Access to parameter store denied")]
    Unauthorized,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors that can occur while loading a template.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Template name escapes the template directory
    #[error("Invalid template name: {0}")]
    InvalidName(String),
}

/// Errors raised while talking to the function runtime API.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// HTTP request to the runtime API failed
    #[error("Runtime API request failed: {0}")]
    HttpError(String),

    /// Runtime API answered with an unexpected status
    #[error("Runtime API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Invocation is missing its request id header
    #[error("Invocation is missing the request id header")]
    MissingRequestId,

    /// Event or response could not be (de)serialized
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Convenience type alias for Results with ParameterStoreError
pub type ParameterStoreResult<T> = Result<T, ParameterStoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with TemplateError
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Convenience type alias for Results with RuntimeError
pub type RuntimeResult<T> = Result<T, RuntimeError>;
