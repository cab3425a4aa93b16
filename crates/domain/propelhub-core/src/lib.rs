use serde::{Deserialize, Serialize};

pub mod error;
pub mod phase;

pub use error::ApiError;
pub use phase::Phase;

/// Opaque request/response body exchanged with the API.
pub type Payload = serde_json::Value;

/// Async lifecycle of a single workflow, together with its last failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub phase: Phase,
    pub error: Option<Payload>,
    pub message: String,
}

impl WorkflowState {
    /// Enter `Loading`, forgetting the previous failure.
    pub fn loading(self) -> Self {
        Self {
            phase: Phase::Loading,
            error: None,
            message: String::new(),
        }
    }

    pub fn succeeded(self) -> Self {
        Self {
            phase: Phase::Success,
            ..self
        }
    }

    pub fn failed(self, error: Option<Payload>, message: String) -> Self {
        Self {
            phase: Phase::Error,
            error,
            message,
        }
    }

    pub fn reset(self) -> Self {
        Self {
            phase: Phase::Init,
            ..self
        }
    }
}
