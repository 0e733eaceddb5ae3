//! Stack assembly playground client
//!
//! This crate provides:
//! - A uniform backend contract for executing and proving stack assembly
//!   programs (remote HTTP service or host-provided desktop bridge)
//! - An orchestration client that validates inputs, serializes in-flight
//!   operations, and normalizes every failure into a typed result
//! - Example catalog loading with a built-in offline fallback
//! - An axum front exposing the playground wire API over any backend

pub mod backend;
pub mod catalog;
pub mod client;
pub mod environment;
pub mod inputs;
pub mod server;

pub use backend::{Backend, ExecutionResult, ProofResult};
pub use client::PlaygroundClient;
pub use environment::Environment;
pub use inputs::StackInputs;

/// Configuration for the playground client
#[derive(Debug, Clone, serde::Deserialize)]
pub struct PlaygroundConfig {
    /// Base URL of the remote execution service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whether to probe `/health` once at startup (remote mode only)
    #[serde(default = "default_probe_on_startup")]
    pub probe_on_startup: bool,
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_probe_on_startup() -> bool {
    true
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            probe_on_startup: default_probe_on_startup(),
        }
    }
}
