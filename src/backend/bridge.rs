//! Local desktop-bridge adapter
//!
//! When the playground runs inside a desktop shell, the host exposes a small
//! command interface instead of an HTTP endpoint. Requests are marshaled as
//! plain invocation arguments and every reply is a single string holding
//! JSON, so this adapter owns an explicit serialize/deserialize boundary
//! separate from the HTTP adapter's.

use super::{Backend, BackendError, ExamplePair, ExecutionResult, HealthStatus, ProofResult};
use crate::inputs::StackInputs;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

const CMD_EXECUTE: &str = "exec_program_with_inputs";
const CMD_PROVE: &str = "generate_proof_with_inputs";
const CMD_EXAMPLES: &str = "get_example_programs";

/// Host-provided command interface
///
/// Implemented by whatever desktop shell embeds the playground. `invoke`
/// returns the raw reply string; decoding it is the adapter's job.
#[async_trait]
pub trait BridgeHost: Send + Sync {
    async fn invoke(&self, command: &str, args: Option<Value>) -> Result<String, String>;
}

/// Arguments for the execute/prove bridge commands
#[derive(Serialize)]
struct BridgeArgs<'a> {
    program: &'a str,
    #[serde(rename = "inputsJson")]
    inputs_json: Option<String>,
}

/// Adapter for a host-provided local bridge
pub struct BridgeBackend {
    host: Arc<dyn BridgeHost>,
}

impl BridgeBackend {
    pub fn new(host: Arc<dyn BridgeHost>) -> Self {
        Self { host }
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        command: &str,
        program: &str,
        inputs: Option<&StackInputs>,
    ) -> Result<T, BackendError> {
        // The bridge takes the inputs as nested JSON text, not as a value.
        let inputs_json = match inputs {
            Some(payload) => Some(
                serde_json::to_string(payload)
                    .map_err(|e| BackendError::Bridge(format!("failed to encode arguments: {e}")))?,
            ),
            None => None,
        };

        let args = serde_json::to_value(BridgeArgs {
            program,
            inputs_json,
        })
        .map_err(|e| BackendError::Bridge(format!("failed to encode arguments: {e}")))?;

        let reply = self
            .host
            .invoke(command, Some(args))
            .await
            .map_err(BackendError::Bridge)?;

        debug!(command, reply_len = reply.len(), "Bridge reply received");
        serde_json::from_str(&reply).map_err(BackendError::BridgeDecode)
    }
}

#[async_trait]
impl Backend for BridgeBackend {
    fn name(&self) -> &str {
        "local-bridge"
    }

    async fn execute(&self, program: &str, inputs: Option<&StackInputs>) -> ExecutionResult {
        match self.call(CMD_EXECUTE, program, inputs).await {
            Ok(result) => result,
            Err(e) => ExecutionResult::failure(format!("Bridge Error: {e}")),
        }
    }

    async fn prove(&self, program: &str, inputs: Option<&StackInputs>) -> ProofResult {
        match self.call(CMD_PROVE, program, inputs).await {
            Ok(result) => result,
            Err(e) => ProofResult::failure(format!("Bridge Error: {e}")),
        }
    }

    async fn list_examples(&self) -> Result<Vec<ExamplePair>, BackendError> {
        let reply = self
            .host
            .invoke(CMD_EXAMPLES, None)
            .await
            .map_err(BackendError::Bridge)?;

        serde_json::from_str(&reply).map_err(BackendError::BridgeDecode)
    }

    async fn health_check(&self) -> HealthStatus {
        // The bridge lives in-process with the shell; it is always reachable.
        HealthStatus {
            connected: true,
            latency_ms: None,
            error: None,
        }
    }
}
