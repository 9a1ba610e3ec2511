//! Timer lifecycle: every exit path cancels both timers, stop is
//! idempotent, and nothing mutates the store after stop.

use fixwatch_runtime::{Runtime, RuntimeConfig, RuntimeEvent};
use fixwatch_testing::fixtures::{sample_params, sample_stats, sample_status};
use fixwatch_testing::{FakeGateway, Outcome};
use fixwatch_types::Stage;
use std::sync::Arc;
use std::time::Duration;

fn config(gateway: &Arc<FakeGateway>) -> RuntimeConfig {
    let mut config = RuntimeConfig::new(gateway.clone());
    config.poll_period = Duration::from_secs(2);
    config.uptime_period = Duration::from_secs(3600);
    config
}

#[tokio::test(start_paused = true)]
async fn stop_twice_behaves_like_stop_once() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.script_start_ok("run-1");
    gateway.script_status(Outcome::ok(sample_status(
        "run-1",
        Stage::Scanning,
        sample_stats(0, 0, 0, 2),
    )));
    gateway.script_logs(Outcome::ok(vec![]));
    gateway.script_fixes(Outcome::ok(vec![]));
    gateway.script_ci_runs(Outcome::ok(vec![]));

    let mut runtime = Runtime::start(config(&gateway), sample_params())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let calls_before = gateway.poll_calls();
    assert!(calls_before > 0);

    runtime.stop();
    runtime.stop();

    // No further polls fire after stop.
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(gateway.poll_calls(), calls_before);
    assert!(!runtime.handle().is_active());

    // Exactly one Stopped notification was delivered.
    let mut stopped = 0;
    while let Ok(Some(event)) =
        tokio::time::timeout(Duration::from_millis(10), runtime.recv()).await
    {
        if matches!(event, RuntimeEvent::Stopped) {
            stopped += 1;
        }
    }
    assert_eq!(stopped, 1);
}

#[tokio::test(start_paused = true)]
async fn in_flight_response_is_dropped_after_stop() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.script_start_ok("run-1");
    // The only status response is slower than the stop below.
    gateway.script_status(
        Outcome::ok(sample_status(
            "run-1",
            Stage::Pushing,
            sample_stats(9, 9, 0, 2),
        ))
        .after_ms(2000),
    );
    gateway.script_logs(Outcome::ok(vec![]));
    gateway.script_fixes(Outcome::ok(vec![]));
    gateway.script_ci_runs(Outcome::ok(vec![]));

    let runtime = Runtime::start(config(&gateway), sample_params())
        .await
        .unwrap();

    // Stop while tick 1's status request is still in flight.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    runtime.stop();

    tokio::time::sleep(Duration::from_secs(5)).await;
    let snapshot = runtime.snapshot();
    assert_eq!(snapshot.stage, Stage::Idle);
    assert_eq!(snapshot.stats.total_bugs, 0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_runtime_cancels_the_timers() {
    let gateway = Arc::new(FakeGateway::new());
    gateway.script_start_ok("run-1");
    gateway.script_status(Outcome::ok(sample_status(
        "run-1",
        Stage::Scanning,
        sample_stats(0, 0, 0, 2),
    )));
    gateway.script_logs(Outcome::ok(vec![]));
    gateway.script_fixes(Outcome::ok(vec![]));
    gateway.script_ci_runs(Outcome::ok(vec![]));

    let runtime = Runtime::start(config(&gateway), sample_params())
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let calls_before = gateway.poll_calls();
    drop(runtime);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(gateway.poll_calls(), calls_before);
}
