//! Runtime environment detection

use crate::backend::BridgeHost;
use std::fmt;
use std::sync::Arc;

/// Which backend is authoritative for this session
///
/// Decided once at startup and never re-evaluated mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Running inside a desktop shell with a host bridge
    LocalBridge,
    /// Plain browser/CLI context talking to the HTTP service
    RemoteService,
}

impl Environment {
    /// Detect the environment from the presence of a host bridge handle
    ///
    /// Absence of the bridge is the normal web case, not a failure.
    pub fn detect(bridge: Option<&Arc<dyn BridgeHost>>) -> Self {
        match bridge {
            Some(_) => Environment::LocalBridge,
            None => Environment::RemoteService,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::LocalBridge => write!(f, "local-bridge"),
            Environment::RemoteService => write!(f, "remote-service"),
        }
    }
}
