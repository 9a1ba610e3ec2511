use crate::events::RuntimeEvent;
use crate::session::{DashboardSnapshot, PollTag, Resource, SessionStore};
use crate::{Error, Result};
use fixwatch_gateway::AgentGateway;
use fixwatch_types::{RunParams, RunSession};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Wall-clock cadence of the four-read poll tick.
pub const POLL_PERIOD: Duration = Duration::from_secs(2);

/// Cadence of the local uptime overlay tick.
pub const UPTIME_PERIOD: Duration = Duration::from_secs(1);

pub struct RuntimeConfig {
    pub gateway: Arc<dyn AgentGateway>,
    pub poll_period: Duration,
    pub uptime_period: Duration,
}

impl RuntimeConfig {
    pub fn new(gateway: Arc<dyn AgentGateway>) -> Self {
        Self {
            gateway,
            poll_period: POLL_PERIOD,
            uptime_period: UPTIME_PERIOD,
        }
    }
}

/// Supervisor for one attached run: owns the poll and uptime timers and
/// the session store, and feeds [`RuntimeEvent`]s to the display layer.
///
/// Both timers are scoped to this value. `stop()` cancels them on any
/// exit path and dropping the runtime does the same, so no timer can
/// outlive the dashboard that created it.
pub struct Runtime {
    handle: RuntimeHandle,
    events: UnboundedReceiver<RuntimeEvent>,
}

impl Runtime {
    /// Start a new agent run, then attach to it. A gateway rejection or
    /// transport failure is a hard error: nothing is spawned, no state
    /// changes, and the message is surfaced to the operator.
    pub async fn start(config: RuntimeConfig, params: RunParams) -> Result<Runtime> {
        let accepted = config
            .gateway
            .start_run(&params)
            .await
            .map_err(Error::Gateway)?;
        let session = RunSession::new(accepted.run_id, &params);
        Ok(Self::attach(config, session))
    }

    /// Attach to an already-accepted run and begin polling. The first tick
    /// fires one poll period after attach.
    pub fn attach(config: RuntimeConfig, session: RunSession) -> Runtime {
        let (events_tx, events) = mpsc::unbounded_channel();

        let store = Arc::new(Mutex::new(SessionStore::new()));
        store.lock().unwrap().begin_run(session.clone());

        let _ = events_tx.send(RuntimeEvent::Started {
            session: session.clone(),
        });

        let poller = tokio::spawn(poll_loop(
            config.gateway,
            store.clone(),
            events_tx.clone(),
            session.run_id.clone(),
            config.poll_period,
        ));
        let ticker = tokio::spawn(uptime_loop(
            store.clone(),
            events_tx.clone(),
            config.uptime_period,
        ));

        let handle = RuntimeHandle {
            store,
            events_tx,
            tasks: Arc::new(Mutex::new(Some([poller, ticker]))),
        };

        Runtime { handle, events }
    }

    pub async fn recv(&mut self) -> Option<RuntimeEvent> {
        self.events.recv().await
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.handle.snapshot()
    }

    /// Stop polling. Safe to call any number of times.
    pub fn stop(&self) {
        self.handle.stop();
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.handle.stop();
    }
}

/// Cloneable control surface over a running [`Runtime`], used by renderers
/// that need to stop polling or read the current snapshot from another
/// task.
#[derive(Clone)]
pub struct RuntimeHandle {
    store: Arc<Mutex<SessionStore>>,
    events_tx: UnboundedSender<RuntimeEvent>,
    tasks: Arc<Mutex<Option<[JoinHandle<()>; 2]>>>,
}

impl RuntimeHandle {
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.store.lock().unwrap().snapshot()
    }

    pub fn is_active(&self) -> bool {
        self.store.lock().unwrap().is_active()
    }

    /// Cancel both timers and mark the store stopped. Idempotent: the
    /// second and later calls find the timers already gone and do nothing.
    pub fn stop(&self) {
        let Some(tasks) = self.tasks.lock().unwrap().take() else {
            return;
        };
        for task in tasks {
            task.abort();
        }
        self.store.lock().unwrap().mark_stopped();
        let _ = self.events_tx.send(RuntimeEvent::Stopped);
    }
}

async fn poll_loop(
    gateway: Arc<dyn AgentGateway>,
    store: Arc<Mutex<SessionStore>>,
    events_tx: UnboundedSender<RuntimeEvent>,
    run_id: String,
    period: Duration,
) {
    let mut ticks = interval_at(Instant::now() + period, period);
    let mut tick = 0u64;
    loop {
        ticks.tick().await;
        tick += 1;
        let tag = PollTag {
            run_id: run_id.clone(),
            tick,
        };
        // Fire-and-forget so the next tick stays on its wall-clock
        // schedule even while this tick's requests are in flight. The
        // store's tick guard resolves any out-of-order arrivals.
        tokio::spawn(poll_tick(
            gateway.clone(),
            store.clone(),
            events_tx.clone(),
            tag,
        ));
    }
}

/// One poll tick: four independent reads, each applied as it settles.
/// The tick is complete once all four have settled; one resource failing
/// never prevents the other three from being applied.
async fn poll_tick(
    gateway: Arc<dyn AgentGateway>,
    store: Arc<Mutex<SessionStore>>,
    events_tx: UnboundedSender<RuntimeEvent>,
    tag: PollTag,
) {
    let status = async {
        match gateway.fetch_status(&tag.run_id).await {
            Ok(status) => {
                let applied = store.lock().unwrap().apply_status(&tag, status);
                if applied {
                    emit_snapshot(&store, &events_tx);
                }
            }
            Err(err) => diagnose(Resource::Status, &tag, &err),
        }
    };
    let logs = async {
        match gateway.fetch_logs(&tag.run_id).await {
            Ok(logs) => {
                let applied = store.lock().unwrap().apply_logs(&tag, logs);
                if applied {
                    emit_snapshot(&store, &events_tx);
                }
            }
            Err(err) => diagnose(Resource::Logs, &tag, &err),
        }
    };
    let fixes = async {
        match gateway.fetch_fixes(&tag.run_id).await {
            Ok(fixes) => {
                let applied = store.lock().unwrap().apply_fixes(&tag, fixes);
                if applied {
                    emit_snapshot(&store, &events_tx);
                }
            }
            Err(err) => diagnose(Resource::Fixes, &tag, &err),
        }
    };
    let ci_runs = async {
        match gateway.fetch_ci_runs(&tag.run_id).await {
            Ok(runs) => {
                let applied = store.lock().unwrap().apply_ci_runs(&tag, runs);
                if applied {
                    emit_snapshot(&store, &events_tx);
                }
            }
            Err(err) => diagnose(Resource::CiRuns, &tag, &err),
        }
    };

    tokio::join!(status, logs, fixes, ci_runs);
}

async fn uptime_loop(
    store: Arc<Mutex<SessionStore>>,
    events_tx: UnboundedSender<RuntimeEvent>,
    period: Duration,
) {
    let mut ticks = interval_at(Instant::now() + period, period);
    loop {
        ticks.tick().await;
        let ticked = store.lock().unwrap().tick_uptime();
        if ticked {
            emit_snapshot(&store, &events_tx);
        }
    }
}

fn emit_snapshot(store: &Arc<Mutex<SessionStore>>, events_tx: &UnboundedSender<RuntimeEvent>) {
    let snapshot = store.lock().unwrap().snapshot();
    let _ = events_tx.send(RuntimeEvent::StateUpdated {
        snapshot: Box::new(snapshot),
    });
}

/// Poll failures are invisible to the operator by design; a trace line is
/// the only record.
fn diagnose(resource: Resource, tag: &PollTag, err: &fixwatch_gateway::Error) {
    tracing::debug!(
        resource = resource.as_str(),
        run_id = %tag.run_id,
        tick = tag.tick,
        "poll skipped: {}",
        err
    );
}
