//! Edge Param Page - a cloud function that renders an HTML page from a
//! parameter-store value.
//!
//! The value is fetched once per TTL window and kept in process memory for
//! the lifetime of the warm function instance.
//!
//! # Architecture
//!
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **cache**: Single-slot TTL value
//! - **client**: HTTP client for the parameter store endpoint
//! - **services**: Cached parameter lookup with default-value fallback
//! - **template**: Placeholder substitution for page templates
//! - **handler**: The per-request page handler
//! - **runtime**: Function runtime API client and invocation loop
//! - **metrics**: Process-local counters

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod models;
pub mod runtime;
pub mod services;
pub mod template;

pub use cache::TimedValue;
pub use client::{AsyncParameterStoreClient, ParameterStore, ParameterStoreClient};
pub use config::Config;
pub use error::{ConfigError, ParameterStoreError, RuntimeError, TemplateError};
pub use handler::PageHandler;
pub use metrics::{Metrics, MetricsSummary};
pub use models::{EdgeResponse, HeaderEntry, Parameter};
pub use runtime::RuntimeClient;
pub use services::{CachedParameterService, ParameterService};
pub use template::{Template, TemplateLoader};
