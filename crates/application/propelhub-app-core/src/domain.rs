use propelhub_core::{Payload, Phase, WorkflowState};
use serde::{Deserialize, Serialize};

use crate::app_core::Workflow;

/// Snapshot of the repository slice.
///
/// Values are never mutated in place by the store: every reducer call
/// consumes the current snapshot and yields the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoState {
    /// Credential used by the API client. Never serialized.
    #[serde(skip)]
    pub token: String,

    pub repo: WorkflowState,
    pub commit: WorkflowState,
    pub builds: WorkflowState,

    pub is_submitting: bool,

    pub repodata: Option<Payload>,
    pub commitdata: Option<Payload>,
    pub builddata: Vec<Payload>,
}

impl RepoState {
    /// Initial state for a session authenticated with `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    pub fn workflow(&self, workflow: Workflow) -> &WorkflowState {
        match workflow {
            Workflow::Repo => &self.repo,
            Workflow::Commit => &self.commit,
            Workflow::Builds => &self.builds,
        }
    }

    pub fn is_busy(&self) -> bool {
        Workflow::ALL
            .into_iter()
            .any(|w| self.workflow(w).phase == Phase::Loading)
    }
}
