use std::fmt;

use propelhub_config::ACTION_PREFIX;
use propelhub_core::{ApiError, Payload};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Identifier of a dispatchable action.
///
/// On the wire every type is namespaced with [`ACTION_PREFIX`]. Types this
/// slice does not own are kept verbatim in `Other` and ignored by the reducer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    FetchRepo,
    FetchRepoSuccess,
    FetchRepoError,

    Commit,
    CommitSuccess,
    CommitError,

    GetBuilds,
    GetBuildsSuccess,
    GetBuildsError,

    ClearPhase,

    Other(String),
}

impl ActionType {
    /// Short name without the namespace, used in logs.
    pub fn name(&self) -> &str {
        match self {
            ActionType::FetchRepo => "FETCH_REPO",
            ActionType::FetchRepoSuccess => "FETCH_REPO_SUCCESS",
            ActionType::FetchRepoError => "FETCH_REPO_ERROR",
            ActionType::Commit => "COMMIT",
            ActionType::CommitSuccess => "COMMIT_SUCCESS",
            ActionType::CommitError => "COMMIT_ERROR",
            ActionType::GetBuilds => "GET_BUILDS",
            ActionType::GetBuildsSuccess => "GET_BUILDS_SUCCESS",
            ActionType::GetBuildsError => "GET_BUILDS_ERROR",
            ActionType::ClearPhase => "CLEAR_PHASE",
            ActionType::Other(raw) => raw,
        }
    }

    pub fn wire_name(&self) -> String {
        match self {
            ActionType::Other(raw) => raw.clone(),
            known => format!("{ACTION_PREFIX}{}", known.name()),
        }
    }
}

impl From<&str> for ActionType {
    fn from(s: &str) -> Self {
        let Some(name) = s.strip_prefix(ACTION_PREFIX) else {
            return ActionType::Other(s.to_string());
        };
        match name {
            "FETCH_REPO" => ActionType::FetchRepo,
            "FETCH_REPO_SUCCESS" => ActionType::FetchRepoSuccess,
            "FETCH_REPO_ERROR" => ActionType::FetchRepoError,
            "COMMIT" => ActionType::Commit,
            "COMMIT_SUCCESS" => ActionType::CommitSuccess,
            "COMMIT_ERROR" => ActionType::CommitError,
            "GET_BUILDS" => ActionType::GetBuilds,
            "GET_BUILDS_SUCCESS" => ActionType::GetBuildsSuccess,
            "GET_BUILDS_ERROR" => ActionType::GetBuildsError,
            "CLEAR_PHASE" => ActionType::ClearPhase,
            _ => ActionType::Other(s.to_string()),
        }
    }
}

impl From<String> for ActionType {
    fn from(s: String) -> Self {
        ActionType::from(s.as_str())
    }
}

impl From<ActionType> for String {
    fn from(t: ActionType) -> Self {
        t.wire_name()
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.wire_name())
    }
}

/// The three remote workflows of the slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    Repo,
    Commit,
    Builds,
}

impl Workflow {
    pub const ALL: [Workflow; 3] = [Workflow::Repo, Workflow::Commit, Workflow::Builds];

    pub fn trigger(self) -> ActionType {
        match self {
            Workflow::Repo => ActionType::FetchRepo,
            Workflow::Commit => ActionType::Commit,
            Workflow::Builds => ActionType::GetBuilds,
        }
    }

    pub fn success(self) -> ActionType {
        match self {
            Workflow::Repo => ActionType::FetchRepoSuccess,
            Workflow::Commit => ActionType::CommitSuccess,
            Workflow::Builds => ActionType::GetBuildsSuccess,
        }
    }

    pub fn failure(self) -> ActionType {
        match self {
            Workflow::Repo => ActionType::FetchRepoError,
            Workflow::Commit => ActionType::CommitError,
            Workflow::Builds => ActionType::GetBuildsError,
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Workflow::Repo => "repo",
            Workflow::Commit => "commit",
            Workflow::Builds => "builds",
        })
    }
}

/// A dispatched action: `{"type": ..., "payload": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl Action {
    pub fn new(kind: ActionType, payload: Option<Payload>) -> Self {
        Self { kind, payload }
    }

    pub fn success(workflow: Workflow, value: Payload) -> Self {
        Self::new(workflow.success(), Some(value))
    }

    /// Failure follow-up carrying `{error, message}`.
    pub fn failure(workflow: Workflow, err: &ApiError) -> Self {
        Self::new(
            workflow.failure(),
            Some(json!({
                "error": err.to_payload(),
                "message": err.to_string(),
            })),
        )
    }
}

pub fn fetch_repos(data: impl Into<Option<Payload>>) -> Action {
    Action::new(ActionType::FetchRepo, data.into())
}

pub fn git_commit(data: impl Into<Option<Payload>>) -> Action {
    Action::new(ActionType::Commit, data.into())
}

pub fn get_builds(data: impl Into<Option<Payload>>) -> Action {
    Action::new(ActionType::GetBuilds, data.into())
}

pub fn clear_phase() -> Action {
    Action::new(ActionType::ClearPhase, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_namespaced() {
        assert_eq!(
            ActionType::GetBuildsSuccess.wire_name(),
            "propelhub/user/GET_BUILDS_SUCCESS"
        );
        assert_eq!(
            ActionType::from("propelhub/user/CLEAR_PHASE"),
            ActionType::ClearPhase
        );
    }

    #[test]
    fn foreign_types_are_kept_verbatim() {
        let kind = ActionType::from("propelhub/auth/LOGIN");
        assert_eq!(kind, ActionType::Other("propelhub/auth/LOGIN".into()));
        assert_eq!(kind.wire_name(), "propelhub/auth/LOGIN");

        // Unprefixed names of our own types are not ours either.
        assert!(matches!(ActionType::from("COMMIT"), ActionType::Other(_)));
    }

    #[test]
    fn action_json_shape() {
        let action = git_commit(json!({"msg": "x"}));
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(
            value,
            json!({"type": "propelhub/user/COMMIT", "payload": {"msg": "x"}})
        );

        let cleared = serde_json::to_value(clear_phase()).unwrap();
        assert_eq!(cleared, json!({"type": "propelhub/user/CLEAR_PHASE"}));

        let parsed: Action =
            serde_json::from_value(json!({"type": "propelhub/user/GET_BUILDS"})).unwrap();
        assert_eq!(parsed, get_builds(None));
    }

    #[test]
    fn workflows_map_triggers() {
        assert_eq!(Workflow::Commit.trigger(), ActionType::Commit);
        assert_eq!(Workflow::Repo.success(), ActionType::FetchRepoSuccess);
        assert_eq!(Workflow::Builds.failure(), ActionType::GetBuildsError);
    }

    #[test]
    fn failure_carries_error_and_message() {
        let action = Action::failure(Workflow::Repo, &ApiError::Unauthorized);
        assert_eq!(action.kind, ActionType::FetchRepoError);
        let payload = action.payload.unwrap();
        assert_eq!(payload["error"]["kind"], "unauthorized");
        assert_eq!(payload["message"], "credential rejected by server");
    }
}
