//! The page handler invoked once per edge request.
//!
//! Loads the page template, fills in the cached parameter value and the
//! current time, and returns the HTTP-shaped response.

use crate::metrics::Metrics;
use crate::models::EdgeResponse;
use crate::services::ParameterService;
use crate::template::{Context, TemplateLoader};
use chrono::{NaiveDateTime, Timelike, Utc};
use std::sync::Arc;

/// Render `time` as ISO-8601 without an offset.
///
/// Microseconds are printed with six digits, and left out entirely when zero.
pub fn format_timestamp(time: NaiveDateTime) -> String {
    if time.nanosecond() / 1_000 == 0 {
        time.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        time.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Handles a single invocation.
pub struct PageHandler {
    templates: TemplateLoader,
    template_name: String,
    parameters: Arc<dyn ParameterService>,
    metrics: Metrics,
}

impl PageHandler {
    pub fn new(
        templates: TemplateLoader,
        template_name: impl Into<String>,
        parameters: Arc<dyn ParameterService>,
        metrics: Metrics,
    ) -> Self {
        Self {
            templates,
            template_name: template_name.into(),
            parameters,
            metrics,
        }
    }

    /// Build the response for one request.
    ///
    /// The event is not inspected. The parameter is only read once the
    /// template has loaded.
    pub async fn handle(&self, event: &serde_json::Value) -> EdgeResponse {
        self.metrics.record_invocation();
        let response = self.respond(event).await;
        tracing::debug!(
            status = %response.status,
            summary = ?self.metrics.summary(),
            "Invocation complete"
        );
        response
    }

    async fn respond(&self, _event: &serde_json::Value) -> EdgeResponse {
        let template = match self.templates.get_template(&self.template_name) {
            Ok(template) => template,
            Err(e) => {
                tracing::error!("Error loading template: {}", e);
                return EdgeResponse::template_error();
            }
        };

        let dynamic_value = self.parameters.get_value().await;

        let mut context = Context::new();
        context.insert("dynamic_value".to_string(), dynamic_value);
        context.insert(
            "timestamp".to_string(),
            format_timestamp(Utc::now().naive_utc()),
        );

        EdgeResponse::html(template.render(&context))
    }
}
