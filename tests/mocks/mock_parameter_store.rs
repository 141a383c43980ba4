use async_trait::async_trait;
use edge_param_page::error::{ParameterStoreError, ParameterStoreResult};
use edge_param_page::models::Parameter;
use edge_param_page::ParameterStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock parameter store for testing.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockParameterStore {
    parameters: Arc<Mutex<HashMap<String, String>>>,
    failing: Arc<Mutex<bool>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockParameterStore {
    pub fn new() -> Self {
        Self {
            parameters: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(false)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn put(&self, name: &str, value: &str) {
        let mut parameters = self.parameters.lock().unwrap();
        parameters.insert(name.to_string(), value.to_string());
    }

    /// Make every subsequent fetch fail with a transport error.
    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    pub fn get_call_count(&self, name: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(name).unwrap_or(&0)
    }

    fn track_call(&self, name: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(name.to_string()).or_insert(0) += 1;
    }
}

impl Default for MockParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParameterStore for MockParameterStore {
    async fn get_parameter(&self, name: &str) -> ParameterStoreResult<Parameter> {
        self.track_call(name);

        if *self.failing.lock().unwrap() {
            return Err(ParameterStoreError::HttpError(
                "Connection failed".to_string(),
            ));
        }

        let parameters = self.parameters.lock().unwrap();
        parameters
            .get(name)
            .map(|value| Parameter {
                name: name.to_string(),
                value: value.clone(),
                kind: Some("String".to_string()),
                version: Some(1),
                arn: None,
            })
            .ok_or_else(|| ParameterStoreError::NotFound(name.to_string()))
    }
}
