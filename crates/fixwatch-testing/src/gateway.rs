//! Scripted in-memory gateway.
//!
//! Each read endpoint pops from its own outcome queue; once a queue runs
//! dry the last successful payload keeps repeating, which matches a quiet
//! gateway between state changes. An `Outcome::fail()` entry simulates one
//! transient failure; `after_ms` delays the response to exercise tick
//! overlap.

use async_trait::async_trait;
use fixwatch_gateway::wire::StartRunResponse;
use fixwatch_gateway::{AgentGateway, Error, Result};
use fixwatch_types::{CiRun, FixRecord, LogEvent, RunParams, RunStatus};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Outcome<T> {
    result: Option<T>,
    delay: Duration,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self {
            result: Some(value),
            delay: Duration::ZERO,
        }
    }

    pub fn fail() -> Self {
        Self {
            result: None,
            delay: Duration::ZERO,
        }
    }

    pub fn after_ms(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

struct Scripted<T> {
    queue: VecDeque<Outcome<T>>,
    last_ok: Option<T>,
}

impl<T: Clone> Scripted<T> {
    fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            last_ok: None,
        }
    }

    fn push(&mut self, outcome: Outcome<T>) {
        self.queue.push_back(outcome);
    }

    fn next(&mut self, path: &str) -> (Duration, Result<T>) {
        match self.queue.pop_front() {
            Some(outcome) => {
                let delay = outcome.delay;
                match outcome.result {
                    Some(value) => {
                        self.last_ok = Some(value.clone());
                        (delay, Ok(value))
                    }
                    None => (
                        delay,
                        Err(Error::Status {
                            status: 503,
                            path: path.to_string(),
                        }),
                    ),
                }
            }
            None => match &self.last_ok {
                Some(value) => (Duration::ZERO, Ok(value.clone())),
                None => (
                    Duration::ZERO,
                    Err(Error::Status {
                        status: 404,
                        path: path.to_string(),
                    }),
                ),
            },
        }
    }
}

struct Inner {
    start: VecDeque<std::result::Result<String, String>>,
    status: Scripted<RunStatus>,
    logs: Scripted<Vec<LogEvent>>,
    fixes: Scripted<Vec<FixRecord>>,
    ci_runs: Scripted<Vec<CiRun>>,
    results: Option<serde_json::Value>,
    healthy: bool,
}

pub struct FakeGateway {
    inner: Mutex<Inner>,
    start_calls: AtomicUsize,
    poll_calls: AtomicUsize,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGateway {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                start: VecDeque::new(),
                status: Scripted::new(),
                logs: Scripted::new(),
                fixes: Scripted::new(),
                ci_runs: Scripted::new(),
                results: None,
                healthy: true,
            }),
            start_calls: AtomicUsize::new(0),
            poll_calls: AtomicUsize::new(0),
        }
    }

    pub fn script_start_ok(&self, run_id: &str) {
        self.inner
            .lock()
            .unwrap()
            .start
            .push_back(Ok(run_id.to_string()));
    }

    pub fn script_start_fail(&self, message: &str) {
        self.inner
            .lock()
            .unwrap()
            .start
            .push_back(Err(message.to_string()));
    }

    pub fn script_status(&self, outcome: Outcome<RunStatus>) {
        self.inner.lock().unwrap().status.push(outcome);
    }

    pub fn script_logs(&self, outcome: Outcome<Vec<LogEvent>>) {
        self.inner.lock().unwrap().logs.push(outcome);
    }

    pub fn script_fixes(&self, outcome: Outcome<Vec<FixRecord>>) {
        self.inner.lock().unwrap().fixes.push(outcome);
    }

    pub fn script_ci_runs(&self, outcome: Outcome<Vec<CiRun>>) {
        self.inner.lock().unwrap().ci_runs.push(outcome);
    }

    pub fn set_results(&self, document: serde_json::Value) {
        self.inner.lock().unwrap().results = Some(document);
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.inner.lock().unwrap().healthy = healthy;
    }

    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    /// Total read requests across all four poll endpoints.
    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }

    async fn respond<T>(&self, (delay, result): (Duration, Result<T>)) -> Result<T> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}

#[async_trait]
impl AgentGateway for FakeGateway {
    async fn start_run(&self, _params: &RunParams) -> Result<StartRunResponse> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.inner.lock().unwrap().start.pop_front();
        match scripted {
            Some(Ok(run_id)) => Ok(StartRunResponse {
                run_id,
                status: "started".to_string(),
                message: "Agent analysis started successfully".to_string(),
            }),
            Some(Err(message)) => Err(Error::Start(message)),
            None => Err(Error::Start("no start scripted".to_string())),
        }
    }

    async fn fetch_status(&self, run_id: &str) -> Result<RunStatus> {
        let next = self
            .inner
            .lock()
            .unwrap()
            .status
            .next(&format!("/api/status/{}", run_id));
        self.respond(next).await
    }

    async fn fetch_logs(&self, run_id: &str) -> Result<Vec<LogEvent>> {
        let next = self
            .inner
            .lock()
            .unwrap()
            .logs
            .next(&format!("/api/logs/{}", run_id));
        self.respond(next).await
    }

    async fn fetch_fixes(&self, run_id: &str) -> Result<Vec<FixRecord>> {
        let next = self
            .inner
            .lock()
            .unwrap()
            .fixes
            .next(&format!("/api/fixes/{}", run_id));
        self.respond(next).await
    }

    async fn fetch_ci_runs(&self, run_id: &str) -> Result<Vec<CiRun>> {
        let next = self
            .inner
            .lock()
            .unwrap()
            .ci_runs
            .next(&format!("/api/cicd-runs/{}", run_id));
        self.respond(next).await
    }

    async fn fetch_results(&self, run_id: &str) -> Result<serde_json::Value> {
        let results = self.inner.lock().unwrap().results.clone();
        results.ok_or(Error::Status {
            status: 404,
            path: format!("/api/results/{}", run_id),
        })
    }

    async fn health(&self) -> Result<String> {
        if self.inner.lock().unwrap().healthy {
            Ok("healthy".to_string())
        } else {
            Err(Error::Status {
                status: 503,
                path: "/health".to_string(),
            })
        }
    }
}
