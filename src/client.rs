//! Orchestration client
//!
//! The façade the presentation layer talks to. Owns input validation, the
//! per-operation in-flight state, the connectivity flag, and the current
//! result slot for each operation kind. Every call path terminates here as a
//! typed result value; nothing is thrown past this boundary.

use crate::backend::{
    Backend, BridgeBackend, BridgeHost, ExecutionResult, ProofResult, RemoteBackend,
};
use crate::catalog::{self, ExampleEntry};
use crate::environment::Environment;
use crate::inputs::StackInputs;
use crate::PlaygroundConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

const ERR_INVALID_INPUT: &str = "Invalid JSON input format";
const ERR_NOT_CONNECTED: &str = "Not connected to the execution service";
const ERR_RUN_IN_FLIGHT: &str = "Execution already in progress";
const ERR_PROVE_IN_FLIGHT: &str = "Proof generation already in progress";

/// Editor state produced by selecting a catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub program: String,
    pub inputs_text: String,
}

/// Clears the in-flight flag on every exit path, including panics
struct OpGuard<'a>(&'a AtomicBool);

impl<'a> OpGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        // `then`, not `then_some`: a guard built on the failed path would
        // clear the flag the in-flight call still owns when dropped.
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
            .then(|| Self(flag))
    }
}

impl Drop for OpGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Dual-backend execution/proof orchestration client
///
/// Constructed once at application assembly and shared; operations take the
/// editor text as arguments, so the client carries no editor state of its
/// own.
pub struct PlaygroundClient {
    backend: Arc<dyn Backend>,
    environment: Environment,
    connected: AtomicBool,
    run_in_flight: AtomicBool,
    prove_in_flight: AtomicBool,
    last_run: Mutex<Option<ExecutionResult>>,
    last_proof: Mutex<Option<ProofResult>>,
}

impl PlaygroundClient {
    /// Assemble a client for the detected environment
    ///
    /// A present bridge handle selects the local-bridge adapter; otherwise
    /// the remote HTTP adapter is built from the configured base URL.
    pub fn new(config: &PlaygroundConfig, bridge: Option<Arc<dyn BridgeHost>>) -> Self {
        let environment = Environment::detect(bridge.as_ref());
        let backend: Arc<dyn Backend> = match bridge {
            Some(host) => Arc::new(BridgeBackend::new(host)),
            None => Arc::new(RemoteBackend::new(&config.base_url)),
        };
        info!(environment = %environment, backend = backend.name(), "Playground client assembled");
        Self::with_backend(backend, environment)
    }

    /// Build a client around an explicit backend
    pub fn with_backend(backend: Arc<dyn Backend>, environment: Environment) -> Self {
        // The bridge lives in-process, so it starts out connected; a remote
        // service is unknown until the first probe.
        let connected = environment == Environment::LocalBridge;
        Self {
            backend,
            environment,
            connected: AtomicBool::new(connected),
            run_in_flight: AtomicBool::new(false),
            prove_in_flight: AtomicBool::new(false),
            last_run: Mutex::new(None),
            last_proof: Mutex::new(None),
        }
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub fn is_run_in_flight(&self) -> bool {
        self.run_in_flight.load(Ordering::Acquire)
    }

    pub fn is_prove_in_flight(&self) -> bool {
        self.prove_in_flight.load(Ordering::Acquire)
    }

    /// The most recent execution result, if any
    pub fn last_run_result(&self) -> Option<ExecutionResult> {
        self.last_run.lock().unwrap().clone()
    }

    /// The most recent proof result, if any
    pub fn last_proof_result(&self) -> Option<ProofResult> {
        self.last_proof.lock().unwrap().clone()
    }

    /// Probe backend connectivity once and record the outcome
    ///
    /// The flag goes stale until the next explicit probe; there is no
    /// automatic re-polling.
    pub async fn probe_connectivity(&self) -> bool {
        let status = self.backend.health_check().await;
        if let Some(error) = &status.error {
            warn!(backend = self.backend.name(), error = %error, "Connectivity probe failed");
        } else {
            debug!(
                backend = self.backend.name(),
                latency_ms = ?status.latency_ms,
                "Connectivity probe completed"
            );
        }
        self.connected.store(status.connected, Ordering::Release);
        status.connected
    }

    /// Execute a program against the active backend
    ///
    /// `raw_inputs` is the inputs editor text. Empty or canonical-empty text
    /// dispatches with an absent payload; malformed text is rejected locally
    /// without contacting the backend. A call issued while another run is
    /// in-flight is refused, never queued.
    pub async fn run(&self, program: &str, raw_inputs: &str) -> ExecutionResult {
        if self.refuses_dispatch() {
            return ExecutionResult::failure(ERR_NOT_CONNECTED);
        }
        let Some(_guard) = OpGuard::acquire(&self.run_in_flight) else {
            debug!("Run refused: already in flight");
            return ExecutionResult::failure(ERR_RUN_IN_FLIGHT);
        };

        let result = match parse_raw_inputs(raw_inputs) {
            Ok(inputs) => {
                debug!(
                    program_len = program.len(),
                    has_inputs = inputs.is_some(),
                    "Dispatching run"
                );
                self.backend.execute(program, inputs.as_ref()).await
            }
            Err(error) => ExecutionResult::failure(error),
        };

        *self.last_run.lock().unwrap() = Some(result.clone());
        result
    }

    /// Generate an execution proof against the active backend
    ///
    /// Same dispatch and validation contract as [`PlaygroundClient::run`].
    pub async fn prove(&self, program: &str, raw_inputs: &str) -> ProofResult {
        if self.refuses_dispatch() {
            return ProofResult::failure(ERR_NOT_CONNECTED);
        }
        let Some(_guard) = OpGuard::acquire(&self.prove_in_flight) else {
            debug!("Prove refused: already in flight");
            return ProofResult::failure(ERR_PROVE_IN_FLIGHT);
        };

        let result = match parse_raw_inputs(raw_inputs) {
            Ok(inputs) => {
                debug!(
                    program_len = program.len(),
                    has_inputs = inputs.is_some(),
                    "Dispatching prove"
                );
                self.backend.prove(program, inputs.as_ref()).await
            }
            Err(error) => ProofResult::failure(error),
        };

        *self.last_proof.lock().unwrap() = Some(result.clone());
        result
    }

    /// Load the example catalog through the active backend
    pub async fn load_examples(&self) -> Vec<ExampleEntry> {
        catalog::load(self.backend.as_ref()).await
    }

    /// Select a catalog entry: clears both result slots and yields the
    /// program text plus the entry's default input text
    pub fn load_example(&self, entry: &ExampleEntry) -> EditorState {
        self.clear_results();
        EditorState {
            program: entry.source.clone(),
            inputs_text: entry.inputs.to_editor_text(),
        }
    }

    /// Drop both current results
    pub fn clear_results(&self) {
        *self.last_run.lock().unwrap() = None;
        *self.last_proof.lock().unwrap() = None;
    }

    /// Connectivity gating applies in remote mode only; the bridge is
    /// assumed always available.
    fn refuses_dispatch(&self) -> bool {
        self.environment == Environment::RemoteService && !self.is_connected()
    }
}

/// Parse the inputs editor text into an optional payload
///
/// Empty text and any payload whose operand stack is empty both mean "no
/// explicit inputs" and are dispatched as an absent payload, not an empty
/// object. The distinction matters downstream.
fn parse_raw_inputs(raw: &str) -> Result<Option<StackInputs>, &'static str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let payload: StackInputs = serde_json::from_str(trimmed).map_err(|_| ERR_INVALID_INPUT)?;
    if payload.is_empty() {
        Ok(None)
    } else {
        Ok(Some(payload))
    }
}
