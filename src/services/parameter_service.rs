//! Cached access to the rendered parameter.
//!
//! One remote read per TTL window; failures fall back to a fixed string.

use crate::cache::TimedValue;
use crate::client::ParameterStore;
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

/// Supplies the value rendered into the page.
#[async_trait]
pub trait ParameterService: Send + Sync {
    /// Current value of the configured parameter. Never fails.
    async fn get_value(&self) -> String;
}

/// Parameter service backed by a store and an in-process TTL cache.
pub struct CachedParameterService {
    store: Arc<dyn ParameterStore>,
    name: String,
    default_value: String,
    cache: TimedValue<String>,
    metrics: Metrics,
}

impl CachedParameterService {
    pub fn new(
        store: Arc<dyn ParameterStore>,
        name: impl Into<String>,
        default_value: impl Into<String>,
        cache: TimedValue<String>,
        metrics: Metrics,
    ) -> Self {
        Self {
            store,
            name: name.into(),
            default_value: default_value.into(),
            cache,
            metrics,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cache(&self) -> &TimedValue<String> {
        &self.cache
    }
}

#[async_trait]
impl ParameterService for CachedParameterService {
    async fn get_value(&self) -> String {
        let started = Instant::now();

        // An empty value counts as nothing cached
        if let Some(value) = self.cache.get_at(started).filter(|v| !v.is_empty()) {
            tracing::info!("Using cached parameter {}", self.name);
            self.metrics.record_cache_access(true);
            return value;
        }
        self.metrics.record_cache_access(false);

        match self.store.get_parameter(&self.name).await {
            Ok(parameter) => {
                tracing::debug!(
                    name = %self.name,
                    version = ?parameter.version,
                    "Fetched parameter"
                );
                self.cache.set_at(parameter.value.clone(), started);
                parameter.value
            }
            Err(e) => {
                tracing::error!("Error fetching parameter {}: {}", self.name, e);
                self.metrics.record_fallback();
                self.default_value.clone()
            }
        }
    }
}
