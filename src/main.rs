//! Edge Param Page - Main entry point
//!
//! Inside the function runtime this serves invocations until the runtime API
//! goes away. Outside of it, one page is rendered and printed to stdout.

use anyhow::Result;
use edge_param_page::client::{AsyncParameterStoreClient, ParameterStore};
use edge_param_page::services::{CachedParameterService, ParameterService};
use edge_param_page::{
    Config, Metrics, PageHandler, ParameterStoreClient, RuntimeClient, TemplateLoader, TimedValue,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Logs go to stderr so one-shot output stays clean
    let level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Rendering parameter {} (region {}) from {}",
        config.param_name, config.region, config.parameter_store_url
    );

    let metrics = Metrics::new();

    let sync_client = ParameterStoreClient::new(&config, metrics.clone());
    let store = Arc::new(AsyncParameterStoreClient::new(sync_client)) as Arc<dyn ParameterStore>;

    let parameters = Arc::new(CachedParameterService::new(
        store,
        config.param_name.clone(),
        config.default_value.clone(),
        TimedValue::from_secs(config.cache_ttl_seconds),
        metrics.clone(),
    )) as Arc<dyn ParameterService>;

    let handler = PageHandler::new(
        TemplateLoader::new(config.template_dir.clone()),
        config.template_name.clone(),
        parameters,
        metrics,
    );

    info!("Cache TTL: {} seconds", config.cache_ttl_seconds);

    match &config.runtime_api {
        Some(api) => {
            info!("Starting invocation loop against {}", api);
            let client = RuntimeClient::new(api);
            edge_param_page::runtime::run(&handler, &client).await?;
        }
        None => {
            info!("No runtime API configured, rendering once");
            let response = handler.handle(&serde_json::Value::Null).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
