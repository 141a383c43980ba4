//! End-to-end tests for the page handler with a mock parameter store.

mod mocks;

use edge_param_page::models::TEMPLATE_ERROR_BODY;
use edge_param_page::{
    CachedParameterService, Metrics, PageHandler, ParameterService, TemplateLoader, TimedValue,
};
use mocks::MockParameterStore;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const PARAM: &str = "/challenge/dynamic_string";
const TEMPLATE: &str =
    "<html><body><h1>{{ dynamic_value }}</h1><p>{{ timestamp }}</p></body></html>";

struct Fixture {
    _dir: TempDir,
    store: MockParameterStore,
    metrics: Metrics,
    handler: PageHandler,
}

fn fixture(template: Option<&str>, ttl: Duration) -> Fixture {
    let dir = TempDir::new().unwrap();
    if let Some(source) = template {
        fs::write(dir.path().join("index.html"), source).unwrap();
    }

    let store = MockParameterStore::new();
    let metrics = Metrics::new();
    let parameters = Arc::new(CachedParameterService::new(
        Arc::new(store.clone()),
        PARAM,
        "default-value",
        TimedValue::new(ttl),
        metrics.clone(),
    )) as Arc<dyn ParameterService>;

    let handler = PageHandler::new(
        TemplateLoader::new(dir.path()),
        "index.html",
        parameters,
        metrics.clone(),
    );

    Fixture {
        _dir: dir,
        store,
        metrics,
        handler,
    }
}

#[tokio::test]
async fn test_fetch_succeeds_renders_value() {
    let fx = fixture(Some(TEMPLATE), Duration::from_secs(60));
    fx.store.put(PARAM, "hello edge");

    let response = fx.handler.handle(&serde_json::json!({})).await;

    assert_eq!(response.status, "200");
    assert!(response.body.contains("<h1>hello edge</h1>"));
    assert_eq!(response.header("content-type"), Some("text/html"));
    assert_eq!(response.header("cache-control"), Some("no-cache"));
    assert_eq!(response.headers["content-type"][0].key, "Content-Type");
    assert_eq!(response.headers["cache-control"][0].key, "Cache-Control");
}

#[tokio::test]
async fn test_fetch_fails_renders_default() {
    let fx = fixture(Some(TEMPLATE), Duration::from_secs(60));
    fx.store.set_failing(true);

    let response = fx.handler.handle(&serde_json::Value::Null).await;

    assert_eq!(response.status, "200");
    assert!(response.body.contains("<h1>default-value</h1>"));
    assert_eq!(fx.metrics.fallbacks_total(), 1);
}

#[tokio::test]
async fn test_missing_parameter_renders_default() {
    let fx = fixture(Some(TEMPLATE), Duration::from_secs(60));

    let response = fx.handler.handle(&serde_json::Value::Null).await;

    assert!(response.body.contains("<h1>default-value</h1>"));
}

#[tokio::test]
async fn test_timestamp_is_rendered() {
    let fx = fixture(Some("{{ timestamp }}"), Duration::from_secs(60));
    fx.store.put(PARAM, "x");

    let response = fx.handler.handle(&serde_json::Value::Null).await;

    // Whole seconds drop the fraction, anything else carries six digits
    let with_micros =
        chrono::NaiveDateTime::parse_from_str(&response.body, "%Y-%m-%dT%H:%M:%S%.6f").is_ok()
            && response.body.len() == "2024-05-01T12:00:00.000001".len();
    let whole_second =
        chrono::NaiveDateTime::parse_from_str(&response.body, "%Y-%m-%dT%H:%M:%S").is_ok();
    assert!(
        with_micros || whole_second,
        "unexpected timestamp: {}",
        response.body
    );
}

#[tokio::test]
async fn test_value_is_cached_within_ttl() {
    let fx = fixture(Some(TEMPLATE), Duration::from_secs(60));
    fx.store.put(PARAM, "first");

    fx.handler.handle(&serde_json::Value::Null).await;
    fx.store.put(PARAM, "second");
    let response = fx.handler.handle(&serde_json::Value::Null).await;

    assert!(response.body.contains("<h1>first</h1>"));
    assert_eq!(fx.store.get_call_count(PARAM), 1);
    assert_eq!(fx.metrics.cache_hits_total(), 1);
    assert_eq!(fx.metrics.invocations_total(), 2);
}

#[tokio::test]
async fn test_value_is_refetched_after_ttl() {
    let fx = fixture(Some(TEMPLATE), Duration::from_millis(100));
    fx.store.put(PARAM, "first");

    fx.handler.handle(&serde_json::Value::Null).await;
    fx.store.put(PARAM, "second");
    tokio::time::sleep(Duration::from_millis(200)).await;
    let response = fx.handler.handle(&serde_json::Value::Null).await;

    assert!(response.body.contains("<h1>second</h1>"));
    assert_eq!(fx.store.get_call_count(PARAM), 2);
}

#[tokio::test]
async fn test_missing_template_returns_error_page() {
    let fx = fixture(None, Duration::from_secs(60));
    fx.store.put(PARAM, "never read");

    let response = fx.handler.handle(&serde_json::Value::Null).await;

    assert_eq!(response.status, "500");
    assert_eq!(response.body, TEMPLATE_ERROR_BODY);
    assert_eq!(response.header("content-type"), Some("text/html"));
    assert!(response.header("cache-control").is_none());
    assert_eq!(fx.store.get_call_count(PARAM), 0);
    assert_eq!(fx.metrics.invocations_total(), 1);
    assert_eq!(fx.metrics.cache_misses_total(), 0);
}
