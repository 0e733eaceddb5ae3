//! Remote HTTP service adapter

use super::{Backend, BackendError, ExamplePair, ExecutionResult, HealthStatus, ProofResult};
use crate::inputs::StackInputs;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Instant;
use tracing::debug;

/// Adapter for the remote execution/proof service
pub struct RemoteBackend {
    client: Client,
    base_url: String,
}

impl RemoteBackend {
    /// Create an adapter for the service at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn try_execute(
        &self,
        program: &str,
        inputs: Option<&StackInputs>,
    ) -> Result<ExecutionResult, BackendError> {
        self.post_json("/api/execute", program, inputs).await
    }

    async fn try_prove(
        &self,
        program: &str,
        inputs: Option<&StackInputs>,
    ) -> Result<ProofResult, BackendError> {
        self.post_json("/api/prove", program, inputs).await
    }

    /// One request/response exchange, no retries. A non-2xx status is a
    /// transport failure; the body is not inspected for a structured error.
    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        program: &str,
        inputs: Option<&StackInputs>,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        let request = WireRequest { program, inputs };

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(BackendError::Body)
    }
}

/// Wire request shape shared by `/api/execute` and `/api/prove`
#[derive(Serialize)]
struct WireRequest<'a> {
    program: &'a str,
    inputs: Option<&'a StackInputs>,
}

#[async_trait]
impl Backend for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    async fn execute(&self, program: &str, inputs: Option<&StackInputs>) -> ExecutionResult {
        match self.try_execute(program, inputs).await {
            Ok(result) => result,
            Err(e) => ExecutionResult::failure(format!("API Error: {e}")),
        }
    }

    async fn prove(&self, program: &str, inputs: Option<&StackInputs>) -> ProofResult {
        match self.try_prove(program, inputs).await {
            Ok(result) => result,
            Err(e) => ProofResult::failure(format!("API Error: {e}")),
        }
    }

    async fn list_examples(&self) -> Result<Vec<ExamplePair>, BackendError> {
        let url = format!("{}/api/examples", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(BackendError::Body)
    }

    async fn health_check(&self) -> HealthStatus {
        let url = format!("{}/health", self.base_url);
        let start = Instant::now();

        match self.client.get(&url).send().await {
            Ok(response) => {
                let latency = start.elapsed().as_millis() as u64;
                if response.status().is_success() {
                    debug!(latency_ms = latency, "Health probe passed");
                    HealthStatus {
                        connected: true,
                        latency_ms: Some(latency),
                        error: None,
                    }
                } else {
                    HealthStatus {
                        connected: false,
                        latency_ms: Some(latency),
                        error: Some(format!("HTTP {}", response.status())),
                    }
                }
            }
            Err(e) => HealthStatus {
                connected: false,
                latency_ms: None,
                error: Some(e.to_string()),
            },
        }
    }
}
