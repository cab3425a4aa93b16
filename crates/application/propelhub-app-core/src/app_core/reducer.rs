use propelhub_core::{Payload, WorkflowState};
use serde_json::Value;

use crate::domain::RepoState;

use super::actions::{Action, ActionType};

pub fn reduce(mut state: RepoState, action: &Action) -> RepoState {
    match &action.kind {
        ActionType::FetchRepo => {
            state.repo = state.repo.loading();
            state.is_submitting = true;
        }
        // The fetched repository is not kept and the submit flag stays set.
        ActionType::FetchRepoSuccess => {
            state.repo = state.repo.succeeded();
        }
        ActionType::FetchRepoError => state.repo = fail(state.repo, action),
        ActionType::ClearPhase => state.repo = state.repo.reset(),

        ActionType::Commit => {
            state.commit = state.commit.loading();
            state.is_submitting = true;
        }
        ActionType::CommitSuccess => {
            state.commit = state.commit.succeeded();
            state.commitdata = action.payload.clone();
            state.is_submitting = false;
        }
        ActionType::CommitError => state.commit = fail(state.commit, action),

        ActionType::GetBuilds => {
            state.builds = state.builds.loading();
            state.is_submitting = true;
        }
        ActionType::GetBuildsSuccess => {
            state.builds = state.builds.succeeded();
            state.builddata = build_list(action.payload.as_ref());
            state.is_submitting = false;
        }
        ActionType::GetBuildsError => state.builds = fail(state.builds, action),

        ActionType::Other(_) => {}
    }
    state
}

fn fail(workflow: WorkflowState, action: &Action) -> WorkflowState {
    let payload = action.payload.as_ref();
    let error = payload
        .and_then(|p| p.get("error"))
        .filter(|e| !e.is_null())
        .cloned();
    let message = payload
        .and_then(|p| p.get("message"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    workflow.failed(error, message)
}

fn build_list(payload: Option<&Payload>) -> Vec<Payload> {
    match payload {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(single) => vec![single.clone()],
    }
}
