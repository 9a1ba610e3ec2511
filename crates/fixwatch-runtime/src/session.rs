use fixwatch_types::{CiRun, FixRecord, LogEvent, RunSession, RunStatus, Stage, Stats};

/// One of the four polled resources, used to key the per-resource
/// freshness guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Status,
    Logs,
    Fixes,
    CiRuns,
}

impl Resource {
    fn index(self) -> usize {
        match self {
            Resource::Status => 0,
            Resource::Logs => 1,
            Resource::Fixes => 2,
            Resource::CiRuns => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Status => "status",
            Resource::Logs => "logs",
            Resource::Fixes => "fixes",
            Resource::CiRuns => "cicd_runs",
        }
    }
}

/// Provenance of a poll response: which run it was issued for and on which
/// tick. Responses are applied at-most-once per resource, newest tick wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollTag {
    pub run_id: String,
    pub tick: u64,
}

/// All state behind the dashboard for the active run.
///
/// Single logical owner; every mutation goes through a named operation
/// below. Display layers only ever see [`DashboardSnapshot`] clones.
///
/// Each of the four collections is always a complete snapshot as of the
/// most recent successfully *applied* poll of that resource: responses
/// replace wholesale, never merge. A response is rejected when it belongs
/// to a superseded run, when the run has been stopped, or when a newer
/// tick already landed for the same resource.
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Option<RunSession>,
    active: bool,
    run_state: String,
    stage: Stage,
    progress: f64,
    stats: Stats,
    logs: Vec<LogEvent>,
    fixes: Vec<FixRecord>,
    ci_runs: Vec<CiRun>,
    applied_ticks: [u64; 4],
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a newly accepted run, discarding everything that belonged to
    /// the previous one. Counters start at zero; the next status poll
    /// brings the authoritative values.
    pub fn begin_run(&mut self, session: RunSession) {
        self.session = Some(session);
        self.active = true;
        self.run_state = "running".to_string();
        self.stage = Stage::Idle;
        self.progress = 0.0;
        self.stats = Stats::default();
        self.logs.clear();
        self.fixes.clear();
        self.ci_runs.clear();
        self.applied_ticks = [0; 4];
    }

    /// Stop accepting poll responses and uptime ticks. Data stays visible.
    pub fn mark_stopped(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn session(&self) -> Option<&RunSession> {
        self.session.as_ref()
    }

    fn accepts(&mut self, resource: Resource, tag: &PollTag) -> bool {
        if !self.active {
            return false;
        }
        let Some(session) = &self.session else {
            return false;
        };
        if session.run_id != tag.run_id {
            return false;
        }
        let slot = &mut self.applied_ticks[resource.index()];
        if tag.tick <= *slot {
            return false;
        }
        *slot = tag.tick;
        true
    }

    /// Apply a status response. The latest accepted value wins outright:
    /// the reported stage is trusted even if it regresses or skips, and
    /// the server uptime overwrites the local overlay.
    pub fn apply_status(&mut self, tag: &PollTag, status: RunStatus) -> bool {
        if !self.accepts(Resource::Status, tag) {
            return false;
        }
        self.run_state = status.status;
        self.stage = status.stage;
        self.progress = status.progress;
        self.stats = status.stats;
        true
    }

    pub fn apply_logs(&mut self, tag: &PollTag, logs: Vec<LogEvent>) -> bool {
        if !self.accepts(Resource::Logs, tag) {
            return false;
        }
        self.logs = logs;
        true
    }

    pub fn apply_fixes(&mut self, tag: &PollTag, fixes: Vec<FixRecord>) -> bool {
        if !self.accepts(Resource::Fixes, tag) {
            return false;
        }
        self.fixes = fixes;
        true
    }

    pub fn apply_ci_runs(&mut self, tag: &PollTag, runs: Vec<CiRun>) -> bool {
        if !self.accepts(Resource::CiRuns, tag) {
            return false;
        }
        self.ci_runs = runs;
        true
    }

    /// Local once-per-second uptime increment between polls. Display
    /// smoothing only; the next status poll overwrites it.
    pub fn tick_uptime(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.stats.uptime += 1;
        true
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            session: self.session.clone(),
            active: self.active,
            run_state: self.run_state.clone(),
            stage: self.stage,
            progress: self.progress,
            stats: self.stats.clone(),
            logs: self.logs.clone(),
            fixes: self.fixes.clone(),
            ci_runs: self.ci_runs.clone(),
        }
    }
}

/// Read-only clone of the store handed to display and export layers.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub session: Option<RunSession>,
    pub active: bool,
    pub run_state: String,
    pub stage: Stage,
    pub progress: f64,
    pub stats: Stats,
    pub logs: Vec<LogEvent>,
    pub fixes: Vec<FixRecord>,
    pub ci_runs: Vec<CiRun>,
}
