//! Async wrapper around the synchronous ParameterStoreClient.
//!
//! This module provides an async interface to the blocking client by using
//! `tokio::task::spawn_blocking`, so HTTP calls never stall the runtime thread.

use crate::client::ParameterStoreClient;
use crate::error::{ParameterStoreError, ParameterStoreResult};
use crate::models::Parameter;
use async_trait::async_trait;
use std::sync::Arc;

/// Read access to a key-value parameter store.
///
/// Implemented by the HTTP client and by test doubles.
#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetch a parameter by its full name.
    async fn get_parameter(&self, name: &str) -> ParameterStoreResult<Parameter>;
}

/// Async wrapper around the synchronous ParameterStoreClient.
#[derive(Clone)]
pub struct AsyncParameterStoreClient {
    client: Arc<ParameterStoreClient>,
}

impl AsyncParameterStoreClient {
    pub fn new(client: ParameterStoreClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

#[async_trait]
impl ParameterStore for AsyncParameterStoreClient {
    async fn get_parameter(&self, name: &str) -> ParameterStoreResult<Parameter> {
        let client = self.client.clone();
        let name = name.to_string();

        tokio::task::spawn_blocking(move || client.get_parameter(&name))
            .await
            .map_err(|e| ParameterStoreError::HttpError(format!("Task join error: {}", e)))?
    }
}
