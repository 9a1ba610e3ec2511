//! Polling semantics against a scripted gateway.
//!
//! All tests run on tokio's paused clock. Poll and uptime periods are kept
//! far apart per test so assertions never race the other timer.

use fixwatch_runtime::{Runtime, RuntimeConfig, RuntimeEvent};
use fixwatch_testing::fixtures::{
    sample_ci_run, sample_fix, sample_log, sample_params, sample_stats, sample_status,
};
use fixwatch_testing::{FakeGateway, Outcome};
use fixwatch_types::{BugCategory, CiStatus, Stage};
use std::sync::Arc;
use std::time::Duration;

const FAR: Duration = Duration::from_secs(3600);

fn config(gateway: &Arc<FakeGateway>, poll: Duration, uptime: Duration) -> RuntimeConfig {
    let mut config = RuntimeConfig::new(gateway.clone());
    config.poll_period = poll;
    config.uptime_period = uptime;
    config
}

fn poll_only(gateway: &Arc<FakeGateway>) -> RuntimeConfig {
    config(gateway, Duration::from_secs(2), FAR)
}

#[tokio::test(start_paused = true)]
async fn failed_start_does_not_begin_polling() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.script_start_fail("Failed to start agent");

    let result = Runtime::start(poll_only(&gateway), sample_params()).await;
    assert!(result.is_err());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(gateway.poll_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn successful_start_polls_within_one_period() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.script_start_ok("run-1");
    gateway.script_status(Outcome::ok(sample_status(
        "run-1",
        Stage::Scanning,
        sample_stats(3, 0, 0, 2),
    )));
    gateway.script_logs(Outcome::ok(vec![sample_log("run-1", 0, "Cloning repository")]));
    gateway.script_fixes(Outcome::ok(vec![sample_fix("run-1", 0, BugCategory::Syntax)]));
    gateway.script_ci_runs(Outcome::ok(vec![sample_ci_run(0, CiStatus::Running)]));

    let mut runtime = Runtime::start(poll_only(&gateway), sample_params())
        .await
        .unwrap();
    assert_eq!(gateway.start_calls(), 1);

    let started = runtime.recv().await.unwrap();
    match started {
        RuntimeEvent::Started { session } => {
            assert_eq!(session.run_id, "run-1");
            assert_eq!(session.branch_name, "TEAM_AMD_AZHAN_ALI_AI_Fix");
        }
        other => panic!("expected Started, got {:?}", other),
    }

    // All four resources land within the first poll period.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    let snapshot = runtime.snapshot();
    assert_eq!(snapshot.stage, Stage::Scanning);
    assert_eq!(snapshot.stats.total_bugs, 3);
    assert_eq!(snapshot.logs.len(), 1);
    assert_eq!(snapshot.fixes.len(), 1);
    assert_eq!(snapshot.ci_runs.len(), 1);

    // And the display layer observed at least one state change.
    let mut saw_update = false;
    while let Ok(event) =
        tokio::time::timeout(Duration::from_millis(10), runtime.recv()).await
    {
        if matches!(event, Some(RuntimeEvent::StateUpdated { .. })) {
            saw_update = true;
            break;
        }
    }
    assert!(saw_update);
}

#[tokio::test(start_paused = true)]
async fn failed_logs_fetch_leaves_logs_untouched() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.script_start_ok("run-1");

    // Tick 1: everything succeeds.
    gateway.script_status(Outcome::ok(sample_status(
        "run-1",
        Stage::Fixing,
        sample_stats(5, 1, 0, 2),
    )));
    gateway.script_logs(Outcome::ok(vec![
        sample_log("run-1", 0, "Cloning repository"),
        sample_log("run-1", 1, "Scanning"),
    ]));
    gateway.script_fixes(Outcome::ok(vec![sample_fix("run-1", 0, BugCategory::Syntax)]));
    gateway.script_ci_runs(Outcome::ok(vec![sample_ci_run(0, CiStatus::Running)]));

    // Tick 2: logs endpoint fails, the rest move forward.
    gateway.script_status(Outcome::ok(sample_status(
        "run-1",
        Stage::Testing,
        sample_stats(5, 3, 0, 4),
    )));
    gateway.script_logs(Outcome::fail());
    gateway.script_fixes(Outcome::ok(vec![
        sample_fix("run-1", 0, BugCategory::Syntax),
        sample_fix("run-1", 1, BugCategory::Linting),
    ]));
    gateway.script_ci_runs(Outcome::ok(vec![sample_ci_run(0, CiStatus::Passed)]));

    let runtime = Runtime::start(poll_only(&gateway), sample_params())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(runtime.snapshot().logs.len(), 2);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let snapshot = runtime.snapshot();
    // Logs kept the tick-1 snapshot, everything else is tick 2.
    assert_eq!(snapshot.logs.len(), 2);
    assert_eq!(snapshot.stage, Stage::Testing);
    assert_eq!(snapshot.stats.fixed_bugs, 3);
    assert_eq!(snapshot.fixes.len(), 2);
    assert_eq!(snapshot.ci_runs[0].status, CiStatus::Passed);
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_never_overwrites_fresher_tick() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.script_start_ok("run-1");

    // Tick 1's status is delayed past tick 2's: it arrives last but must
    // be discarded as stale.
    gateway.script_status(
        Outcome::ok(sample_status(
            "run-1",
            Stage::Cloning,
            sample_stats(0, 0, 0, 2),
        ))
        .after_ms(3000),
    );
    gateway.script_status(Outcome::ok(sample_status(
        "run-1",
        Stage::Fixing,
        sample_stats(4, 1, 0, 4),
    )));
    gateway.script_logs(Outcome::ok(vec![sample_log("run-1", 0, "go")]));
    gateway.script_fixes(Outcome::ok(vec![]));
    gateway.script_ci_runs(Outcome::ok(vec![]));

    let runtime = Runtime::start(poll_only(&gateway), sample_params())
        .await
        .unwrap();

    // Tick 2's response applies at t=4s; tick 1's arrives at t=5s.
    tokio::time::sleep(Duration::from_millis(6500)).await;
    let snapshot = runtime.snapshot();
    assert_eq!(snapshot.stage, Stage::Fixing);
    assert_eq!(snapshot.stats.total_bugs, 4);
}

#[tokio::test(start_paused = true)]
async fn uptime_ticks_locally_between_polls() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.script_start_ok("run-1");

    let runtime = Runtime::start(
        config(&gateway, FAR, Duration::from_secs(1)),
        sample_params(),
    )
    .await
    .unwrap();

    tokio::time::sleep(Duration::from_millis(3500)).await;
    assert_eq!(runtime.snapshot().stats.uptime, 3);
}
