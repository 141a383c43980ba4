//! Client for the function runtime API and the invocation loop.
//!
//! The loop long-polls for the next invocation, runs the page handler and
//! posts the response back. Blocking HTTP runs on tokio's blocking pool.

use crate::error::{RuntimeError, RuntimeResult};
use crate::handler::PageHandler;
use crate::models::EdgeResponse;
use serde::Serialize;
use std::sync::Arc;

/// Header carrying the invocation's request id.
pub const REQUEST_ID_HEADER: &str = "Lambda-Runtime-Aws-Request-Id";

const API_VERSION: &str = "2018-06-01";

/// A pending invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub request_id: String,
    /// Raw event JSON
    pub body: String,
}

/// Error document reported for a failed invocation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorReport<'a> {
    error_message: &'a str,
    error_type: &'a str,
}

/// HTTP client for the runtime API.
#[derive(Clone)]
pub struct RuntimeClient {
    base_url: String,
    agent: Arc<ureq::Agent>,
}

impl RuntimeClient {
    /// Create a client for the `host:port` found in `AWS_LAMBDA_RUNTIME_API`.
    pub fn new(runtime_api: &str) -> Self {
        let has_scheme =
            runtime_api.starts_with("http://") || runtime_api.starts_with("https://");
        let base_url = if has_scheme {
            runtime_api.to_string()
        } else {
            format!("http://{}", runtime_api)
        };
        Self::with_base_url(base_url)
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        // No read timeout: `next` blocks until an event arrives
        let agent = ureq::AgentBuilder::new().build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent: Arc::new(agent),
        }
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}/runtime/{}", self.base_url, API_VERSION, path)
    }

    /// Block until the next invocation is available.
    pub fn next_invocation(&self) -> RuntimeResult<Invocation> {
        let response = self
            .agent
            .get(&self.build_url("invocation/next"))
            .call()
            .map_err(map_error)?;

        let request_id = response
            .header(REQUEST_ID_HEADER)
            .filter(|id| !id.is_empty())
            .ok_or(RuntimeError::MissingRequestId)?
            .to_string();
        let body = response
            .into_string()
            .map_err(|e| RuntimeError::HttpError(e.to_string()))?;

        Ok(Invocation { request_id, body })
    }

    /// Report the handler's response for `request_id`.
    pub fn post_response(&self, request_id: &str, response: &EdgeResponse) -> RuntimeResult<()> {
        let body = serde_json::to_value(response)?;
        self.agent
            .post(&self.build_url(&format!("invocation/{}/response", request_id)))
            .send_json(body)
            .map_err(map_error)?;
        Ok(())
    }

    /// Report that `request_id` could not be handled.
    pub fn post_error(
        &self,
        request_id: &str,
        error_type: &str,
        message: &str,
    ) -> RuntimeResult<()> {
        let report = ErrorReport {
            error_message: message,
            error_type,
        };
        self.agent
            .post(&self.build_url(&format!("invocation/{}/error", request_id)))
            .set("Lambda-Runtime-Function-Error-Type", error_type)
            .send_json(serde_json::to_value(&report)?)
            .map_err(map_error)?;
        Ok(())
    }
}

fn map_error(error: ureq::Error) -> RuntimeError {
    match error {
        ureq::Error::Status(status, response) => RuntimeError::ApiError {
            status,
            message: response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string()),
        },
        ureq::Error::Transport(transport) => RuntimeError::HttpError(transport.to_string()),
    }
}

async fn blocking<T, F>(f: F) -> RuntimeResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RuntimeResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| RuntimeError::HttpError(format!("Task join error: {}", e)))?
}

/// Keep the loop alive when the runtime API rejects what we posted.
///
/// Only transport failures are passed on.
fn tolerate_rejection(request_id: &str, result: RuntimeResult<()>) -> RuntimeResult<()> {
    match result {
        Err(RuntimeError::ApiError { status, message }) => {
            tracing::error!(
                request_id = %request_id,
                status = status,
                "Runtime API rejected the result: {}",
                message
            );
            Ok(())
        }
        other => other,
    }
}

/// Fetch, handle and answer a single invocation.
///
/// Returns the request id that was processed. Events that are not valid JSON
/// are reported through the error endpoint instead of failing the loop, and a
/// posted result the runtime API answers with an error status is logged and
/// dropped.
pub async fn run_once(handler: &PageHandler, client: &RuntimeClient) -> RuntimeResult<String> {
    let next = client.clone();
    let invocation = blocking(move || next.next_invocation()).await?;
    let request_id = invocation.request_id.clone();
    tracing::info!(request_id = %request_id, "Received invocation");

    let event: serde_json::Value = match serde_json::from_str(&invocation.body) {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(request_id = %request_id, "Malformed event: {}", e);
            let reporter = client.clone();
            let id = request_id.clone();
            let message = e.to_string();
            let posted =
                blocking(move || reporter.post_error(&id, "Runtime.InvalidEvent", &message)).await;
            tolerate_rejection(&request_id, posted)?;
            return Ok(request_id);
        }
    };

    let response = handler.handle(&event).await;
    tracing::debug!(request_id = %request_id, status = %response.status, "Posting response");

    let poster = client.clone();
    let id = request_id.clone();
    let posted = blocking(move || poster.post_response(&id, &response)).await;
    tolerate_rejection(&request_id, posted)?;
    Ok(request_id)
}

/// Serve invocations until the runtime API becomes unreachable.
pub async fn run(handler: &PageHandler, client: &RuntimeClient) -> RuntimeResult<()> {
    loop {
        run_once(handler, client).await?;
    }
}
