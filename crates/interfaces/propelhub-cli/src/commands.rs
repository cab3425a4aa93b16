use anyhow::{bail, Context, Result};
use propelhub_app_core::{
    clear_phase, fetch_repos, get_builds, git_commit, Action, AppStore, Kernel, Payload, Phase,
    RepoState, Workflow,
};
use propelhub_infra::{default_http_client, HttpRepoApi};
use tracing::debug;

/// What a run of dispatched actions produced.
#[derive(Debug)]
pub struct WorkflowReport {
    /// Every action seen on the stream, trigger first.
    pub actions: Vec<Action>,
    /// State after each dispatched action settled, in dispatch order.
    pub steps: Vec<RepoState>,
    pub state: RepoState,
}

pub fn parse_payload(raw: Option<&str>) -> Result<Option<Payload>> {
    raw.map(|s| serde_json::from_str(s).with_context(|| format!("Invalid JSON payload: {s}")))
        .transpose()
}

pub fn trigger(workflow: Workflow, payload: Option<Payload>) -> Action {
    match workflow {
        Workflow::Repo => fetch_repos(payload),
        Workflow::Commit => git_commit(payload),
        Workflow::Builds => get_builds(payload),
    }
}

/// Dispatch `action` against the API at `api_url` and wait for every
/// request it started to settle.
pub async fn run_workflow(api_url: &str, token: String, action: Action) -> Result<WorkflowReport> {
    run_sequence(api_url, token, vec![action]).await
}

/// Dispatch each action through one kernel, settling before the next.
pub async fn run_sequence(
    api_url: &str,
    token: String,
    sequence: Vec<Action>,
) -> Result<WorkflowReport> {
    let client = default_http_client().context("Failed to build HTTP client")?;
    let api = HttpRepoApi::new(client, api_url, token.clone());
    let store = AppStore::new(RepoState::new(token));
    let mut kernel = Kernel::new(store.clone(), api);
    let mut stream = kernel.subscribe();

    let mut steps = Vec::with_capacity(sequence.len());
    for action in sequence {
        debug!(api = api_url, action = action.kind.name(), "running workflow");
        kernel.dispatch(action);
        kernel.settle().await;
        steps.push(store.state());
    }

    let mut actions = Vec::new();
    while let Ok(action) = stream.try_recv() {
        actions.push(action);
    }

    Ok(WorkflowReport {
        actions,
        steps,
        state: store.state(),
    })
}

pub async fn cmd_workflow(
    api_url: &str,
    token: String,
    workflow: Workflow,
    payload: Option<Payload>,
) -> Result<()> {
    println!(":: Running {} against {}", workflow, api_url);

    let report = run_workflow(api_url, token, trigger(workflow, payload)).await?;
    print_report(&report)?;

    let outcome = report.state.workflow(workflow);
    if outcome.phase == Phase::Error {
        bail!("{} failed: {}", workflow, outcome.message);
    }
    Ok(())
}

/// Fetch the repository, then reset its phase through the same kernel.
pub async fn cmd_clear_phase(
    api_url: &str,
    token: String,
    payload: Option<Payload>,
) -> Result<()> {
    println!(":: Fetching repo from {} before clearing its phase", api_url);

    let sequence = vec![fetch_repos(payload), clear_phase()];
    let report = run_sequence(api_url, token, sequence).await?;
    print_report(&report)?;

    let fetched = report.steps.first().map(|s| s.repo.phase).unwrap_or_default();
    println!("\n:: repo phase {} -> {}", fetched, report.state.repo.phase);
    Ok(())
}

fn print_report(report: &WorkflowReport) -> Result<()> {
    println!("\n:: Actions");
    for action in &report.actions {
        println!("   {}", serde_json::to_string(action)?);
    }
    println!("\n:: State");
    println!("{}", serde_json::to_string_pretty(&report.state)?);
    Ok(())
}
