//! Wire-level tests: the remote adapter against the in-crate API front

use async_trait::async_trait;
use axum::{http::StatusCode, routing::post, Router};
use playground::backend::{
    Backend, BackendError, ExamplePair, ExecutionResult, HealthStatus, ProofResult, RemoteBackend,
};
use playground::environment::Environment;
use playground::inputs::StackInputs;
use playground::server::{create_router, ApiState};
use playground::PlaygroundClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Engine stand-in behind the served API
struct ScriptedBackend {
    execute_calls: AtomicUsize,
    last_inputs: Mutex<Option<Option<StackInputs>>>,
}

impl ScriptedBackend {
    fn new() -> Self {
        Self {
            execute_calls: AtomicUsize::new(0),
            last_inputs: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn execute(&self, _program: &str, inputs: Option<&StackInputs>) -> ExecutionResult {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_inputs.lock().unwrap() = Some(inputs.cloned());
        ExecutionResult {
            success: true,
            stack_outputs: Some(vec!["8".to_string()]),
            program_hash: Some("0xabc123".to_string()),
            cycles: Some(64),
            error: None,
            compilation_time_ms: Some(1.5),
            execution_time_ms: Some(0.3),
            total_time_ms: Some(1.8),
        }
    }

    async fn prove(&self, _program: &str, _inputs: Option<&StackInputs>) -> ProofResult {
        ProofResult {
            success: true,
            proof_bytes: Some(vec![0, 1, 2, 255]),
            program_hash: Some("0xabc123".to_string()),
            stack_outputs: Some(vec!["8".to_string()]),
            error: None,
            compilation_time_ms: Some(1.5),
            proving_time_ms: Some(40.0),
            total_time_ms: Some(41.5),
        }
    }

    async fn list_examples(&self) -> Result<Vec<ExamplePair>, BackendError> {
        Ok(vec![(
            "Basic Addition".to_string(),
            "begin push.3 push.5 add end".to_string(),
        )])
    }

    async fn health_check(&self) -> HealthStatus {
        HealthStatus {
            connected: true,
            latency_ms: Some(1),
            error: None,
        }
    }
}

/// Serve a router on an ephemeral port and return its base URL
async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_playground(backend: Arc<ScriptedBackend>) -> String {
    let state = Arc::new(ApiState { backend });
    spawn_server(create_router(state)).await
}

const ADD_PROGRAM: &str = "begin\n push.3\n push.5\n add\n end";

#[tokio::test]
async fn test_execute_round_trip() {
    let engine = Arc::new(ScriptedBackend::new());
    let base_url = spawn_playground(engine.clone()).await;

    let remote = RemoteBackend::new(base_url);
    let inputs = StackInputs::from_tokens(["10", "20"]);
    let result = remote.execute(ADD_PROGRAM, Some(&inputs)).await;

    assert!(result.success);
    assert_eq!(result.stack_outputs.as_deref(), Some(&["8".to_string()][..]));
    assert_eq!(result.cycles, Some(64));
    assert_eq!(result.program_hash.as_deref(), Some("0xabc123"));

    let seen = engine.last_inputs.lock().unwrap().clone().unwrap();
    assert_eq!(seen, Some(inputs));
}

#[tokio::test]
async fn test_absent_inputs_arrive_absent() {
    let engine = Arc::new(ScriptedBackend::new());
    let base_url = spawn_playground(engine.clone()).await;

    let remote = RemoteBackend::new(base_url);
    remote.execute(ADD_PROGRAM, None).await;

    let seen = engine.last_inputs.lock().unwrap().clone().unwrap();
    assert!(seen.is_none());
}

#[tokio::test]
async fn test_prove_round_trip_keeps_proof_bytes() {
    let engine = Arc::new(ScriptedBackend::new());
    let base_url = spawn_playground(engine).await;

    let remote = RemoteBackend::new(base_url);
    let result = remote.prove(ADD_PROGRAM, None).await;

    assert!(result.success);
    assert_eq!(result.proof_bytes, Some(vec![0, 1, 2, 255]));
    assert_eq!(result.proving_time_ms, Some(40.0));
}

#[tokio::test]
async fn test_examples_served_as_pairs() {
    let engine = Arc::new(ScriptedBackend::new());
    let base_url = spawn_playground(engine).await;

    let remote = RemoteBackend::new(base_url);
    let examples = remote.list_examples().await.unwrap();

    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].0, "Basic Addition");
}

#[tokio::test]
async fn test_http_500_names_the_status() {
    let app = Router::new().route(
        "/api/execute",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base_url = spawn_server(app).await;

    let remote = RemoteBackend::new(base_url);
    let result = remote.execute(ADD_PROGRAM, None).await;

    assert!(!result.success);
    assert_eq!(
        result.error.as_deref(),
        Some("API Error: HTTP error! status: 500")
    );
}

#[tokio::test]
async fn test_unreachable_service_is_transport_failure() {
    // Bind then drop to get a port nothing is listening on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let remote = RemoteBackend::new(format!("http://{addr}"));
    let result = remote.execute(ADD_PROGRAM, None).await;

    assert!(!result.success);
    assert!(result.error.unwrap().starts_with("API Error:"));

    let status = remote.health_check().await;
    assert!(!status.connected);
}

#[tokio::test]
async fn test_client_end_to_end_over_http() {
    let engine = Arc::new(ScriptedBackend::new());
    let base_url = spawn_playground(engine.clone()).await;

    let remote: Arc<dyn Backend> = Arc::new(RemoteBackend::new(base_url));
    let client = PlaygroundClient::with_backend(remote, Environment::RemoteService);

    // Gated until the probe records a live service.
    let refused = client.run(ADD_PROGRAM, "").await;
    assert!(!refused.success);
    assert_eq!(engine.execute_calls.load(Ordering::SeqCst), 0);

    assert!(client.probe_connectivity().await);
    let result = client.run(ADD_PROGRAM, "{\n  \"operand_stack\": []\n}").await;
    assert!(result.success);
    assert_eq!(engine.execute_calls.load(Ordering::SeqCst), 1);
    assert!(!client.is_run_in_flight());
}
