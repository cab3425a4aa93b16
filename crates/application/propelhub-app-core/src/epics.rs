//! Effect handlers.
//!
//! An [`Epic`] watches dispatched actions for its workflow's trigger and turns
//! each one into a future that performs the API call and resolves to exactly
//! one follow-up action. API failures become failure actions; they never
//! surface as errors to the dispatcher.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use propelhub_core::{ApiError, Payload};
use tracing::warn;

use crate::app_core::{Action, Workflow};
use crate::ports::RepoApi;

/// Pending API call resolving to its follow-up action.
pub type Effect = BoxFuture<'static, Action>;

pub struct Epic<A> {
    workflow: Workflow,
    api: Arc<A>,
}

impl<A: RepoApi> Epic<A> {
    pub fn new(workflow: Workflow, api: Arc<A>) -> Self {
        Self { workflow, api }
    }

    /// Start handling `action`, or `None` when it is not this epic's trigger.
    pub fn on(&self, action: &Action) -> Option<Effect> {
        if action.kind != self.workflow.trigger() {
            return None;
        }

        let api = Arc::clone(&self.api);
        let workflow = self.workflow;
        let payload = action.payload.clone();

        Some(
            async move {
                match call(api.as_ref(), workflow, payload).await {
                    Ok(value) => Action::success(workflow, value),
                    Err(err) => {
                        warn!(%workflow, error = %err, "request failed");
                        Action::failure(workflow, &err)
                    }
                }
            }
            .boxed(),
        )
    }
}

async fn call<A: RepoApi>(
    api: &A,
    workflow: Workflow,
    payload: Option<Payload>,
) -> Result<Payload, ApiError> {
    match workflow {
        Workflow::Repo => api.fetch_repos(payload).await,
        Workflow::Commit => api.git_commit(payload).await,
        Workflow::Builds => api.get_builds(payload).await,
    }
}

/// All epics of the slice behind one entry point.
pub struct RootEpic<A> {
    epics: Vec<Epic<A>>,
}

impl<A: RepoApi> RootEpic<A> {
    pub fn on(&self, action: &Action) -> Vec<Effect> {
        self.epics.iter().filter_map(|e| e.on(action)).collect()
    }
}

/// One epic per workflow, sharing the same API client.
pub fn combine_epics<A: RepoApi>(api: Arc<A>) -> RootEpic<A> {
    RootEpic {
        epics: Workflow::ALL
            .into_iter()
            .map(|w| Epic::new(w, Arc::clone(&api)))
            .collect(),
    }
}
