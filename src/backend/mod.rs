//! Backend abstraction and implementations

mod bridge;
mod remote;

pub use bridge::{BridgeBackend, BridgeHost};
pub use remote::RemoteBackend;

use crate::inputs::StackInputs;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to a backend
///
/// These never escape an adapter: every failure is absorbed into a
/// `{success: false, error}` result at the adapter boundary. The bridge
/// decode kinds are kept separate from the HTTP kinds because the two
/// transports fail in structurally different ways.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(reqwest::StatusCode),

    #[error("malformed response body: {0}")]
    Body(serde_json::Error),

    #[error("bridge call failed: {0}")]
    Bridge(String),

    #[error("malformed bridge reply: {0}")]
    BridgeDecode(serde_json::Error),
}

/// Result of executing a program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_outputs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compilation_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_ms: Option<f64>,
}

impl ExecutionResult {
    /// A failed result carrying only a diagnostic
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            stack_outputs: None,
            program_hash: None,
            cycles: None,
            error: Some(error.into()),
            compilation_time_ms: None,
            execution_time_ms: None,
            total_time_ms: None,
        }
    }
}

/// Result of generating an execution proof
///
/// Structurally parallel to [`ExecutionResult`], with proving time in place
/// of execution time/cycles and the opaque proof bytes attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_bytes: Option<Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_outputs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compilation_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proving_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time_ms: Option<f64>,
}

impl ProofResult {
    /// A failed result carrying only a diagnostic
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            proof_bytes: None,
            program_hash: None,
            stack_outputs: None,
            error: Some(error.into()),
            compilation_time_ms: None,
            proving_time_ms: None,
            total_time_ms: None,
        }
    }
}

/// Connectivity status of a backend
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub connected: bool,
    pub latency_ms: Option<u64>,
    pub error: Option<String>,
}

/// A named example program, as it appears on the wire
pub type ExamplePair = (String, String);

/// Trait for execution/proof backends
///
/// Both adapters must be substitutable for one another. `execute` and
/// `prove` never fail: transport problems come back as
/// `{success: false, error}`. `list_examples` surfaces its error so the
/// catalog loader can apply its own fallback tier.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Backend name for logging/identification
    fn name(&self) -> &str;

    /// Execute a program with optional initial stack inputs
    async fn execute(&self, program: &str, inputs: Option<&StackInputs>) -> ExecutionResult;

    /// Execute a program and generate a proof of its execution
    async fn prove(&self, program: &str, inputs: Option<&StackInputs>) -> ProofResult;

    /// Fetch the example program catalog
    async fn list_examples(&self) -> Result<Vec<ExamplePair>, BackendError>;

    /// Check whether the backend is reachable
    async fn health_check(&self) -> HealthStatus;
}
