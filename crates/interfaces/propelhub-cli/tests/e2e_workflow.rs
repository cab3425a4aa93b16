use std::net::SocketAddr;

use axum::{http::StatusCode, routing::post, Json, Router};
use propelhub_app_core::{clear_phase, ActionType, Phase, Workflow};
use propelhub_cli::commands;
use serde_json::{json, Value};

async fn start_mock_server() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route(
            "/api/repo",
            post(|| async { Json(json!({"name": "propelhub", "branches": ["main"]})) }),
        )
        .route(
            "/api/commit",
            post(|Json(body): Json<Value>| async move {
                if body.get("msg").is_some() {
                    Ok(Json(json!({"sha": "abc"})))
                } else {
                    Err((StatusCode::UNPROCESSABLE_ENTITY, "missing msg"))
                }
            }),
        )
        .route(
            "/api/builds",
            post(|| async { Json(json!([{"id": 1, "status": "passed"}])) }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, handle)
}

#[tokio::test]
async fn full_session_against_mock_api() {
    let (addr, server_handle) = start_mock_server().await;
    let api_url = format!("http://{addr}/api");

    // Commit succeeds and is recorded.
    let payload = commands::parse_payload(Some(r#"{"msg":"x"}"#)).unwrap();
    let report = commands::run_workflow(
        &api_url,
        "tok".into(),
        commands::trigger(Workflow::Commit, payload),
    )
    .await
    .expect("commit workflow failed");

    let kinds: Vec<_> = report.actions.iter().map(|a| a.kind.clone()).collect();
    assert_eq!(kinds, vec![ActionType::Commit, ActionType::CommitSuccess]);
    assert_eq!(report.state.commit.phase, Phase::Success);
    assert_eq!(report.state.commitdata, Some(json!({"sha": "abc"})));
    assert!(!report.state.is_submitting);
    assert_eq!(report.state.token, "tok");

    // Builds land in builddata.
    let report = commands::run_workflow(
        &api_url,
        String::new(),
        commands::trigger(Workflow::Builds, None),
    )
    .await
    .expect("builds workflow failed");
    assert_eq!(report.state.builds.phase, Phase::Success);
    assert_eq!(
        report.state.builddata,
        vec![json!({"id": 1, "status": "passed"})]
    );

    // Repository fetch succeeds without keeping the payload.
    let report = commands::run_workflow(
        &api_url,
        String::new(),
        commands::trigger(Workflow::Repo, None),
    )
    .await
    .expect("repo workflow failed");
    assert_eq!(report.state.repo.phase, Phase::Success);
    assert_eq!(report.state.repodata, None);
    assert_eq!(
        report.actions[1].payload,
        Some(json!({"name": "propelhub", "branches": ["main"]}))
    );

    // Clearing the phase after a fetch resets SUCCESS back to INIT.
    let report = commands::run_sequence(
        &api_url,
        String::new(),
        vec![commands::trigger(Workflow::Repo, None), clear_phase()],
    )
    .await
    .expect("clear-phase sequence failed");
    assert_eq!(report.steps.len(), 2);
    assert_eq!(report.steps[0].repo.phase, Phase::Success);
    assert_eq!(report.steps[1].repo.phase, Phase::Init);
    assert_eq!(report.state.repo.phase, Phase::Init);
    let kinds: Vec<_> = report.actions.iter().map(|a| a.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            ActionType::FetchRepo,
            ActionType::FetchRepoSuccess,
            ActionType::ClearPhase
        ]
    );
    commands::cmd_clear_phase(&api_url, String::new(), None)
        .await
        .expect("clear-phase command failed");

    // A rejected commit ends in ERROR and the command reports failure.
    let err = commands::cmd_workflow(&api_url, String::new(), Workflow::Commit, None)
        .await
        .expect_err("commit without msg should fail");
    assert!(err.to_string().contains("status 422"), "{err}");

    server_handle.abort();
}

#[tokio::test]
async fn unreachable_api_surfaces_as_error_state() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let report = commands::run_workflow(
        &format!("http://{addr}/api"),
        String::new(),
        commands::trigger(Workflow::Builds, None),
    )
    .await
    .expect("dispatch itself never fails");

    assert_eq!(report.state.builds.phase, Phase::Error);
    assert_eq!(report.state.builds.error.as_ref().unwrap()["kind"], "transport");
    assert!(report.state.builddata.is_empty());
}
