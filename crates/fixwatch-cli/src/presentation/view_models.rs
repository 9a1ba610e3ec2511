//! Presenters: pure functions from a [`DashboardSnapshot`] to the view
//! models the renderers draw. No IO, no mutation.

use crate::presentation::formatters::{format_clock, format_uptime};
use fixwatch_runtime::DashboardSnapshot;
use fixwatch_types::{CategoryFilter, CiStatus, FixStatus, LogLevel, Stage};

/// The six visible pipeline steps. IDLE renders nothing active and
/// DEPLOYING means the whole pipeline is behind us.
pub const PIPELINE_STEPS: [(Stage, &str); 6] = [
    (Stage::Cloning, "Clone Repo"),
    (Stage::Scanning, "Deep Scan"),
    (Stage::Analyzing, "AI Analysis"),
    (Stage::Fixing, "Apply Fixes"),
    (Stage::Testing, "Run Tests"),
    (Stage::Pushing, "Git Push"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone)]
pub struct PipelineStep {
    pub label: &'static str,
    pub state: StepState,
}

/// Coarse health badge on the summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthLabel {
    Waiting,
    NeedsAttention,
    Healthy,
    Running,
}

impl HealthLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLabel::Waiting => "WAITING",
            HealthLabel::NeedsAttention => "NEEDS ATTENTION",
            HealthLabel::Healthy => "HEALTHY",
            HealthLabel::Running => "RUNNING",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryViewModel {
    pub repo: String,
    pub branch: String,
    pub team_line: String,
    pub health: HealthLabel,
    pub total_bugs: u64,
    pub fixed_bugs: u64,
    pub failed_fixes: u64,
    pub success_rate: u64,
    pub uptime_label: String,
}

#[derive(Debug, Clone)]
pub struct LogLineViewModel {
    pub clock: String,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone)]
pub struct FixRowViewModel {
    pub status: FixStatus,
    pub location: String,
    pub category: &'static str,
    pub commit_message: String,
    pub description: String,
    pub clock: String,
}

#[derive(Debug, Clone)]
pub struct CiRowViewModel {
    pub id: i64,
    pub status: CiStatus,
    pub duration: String,
    pub clock: String,
}

#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    pub running: bool,
    pub run_id: Option<String>,
    pub stage: Stage,
    pub pipeline: Vec<PipelineStep>,
    pub summary: SummaryViewModel,
    pub logs: Vec<LogLineViewModel>,
    pub fixes: Vec<FixRowViewModel>,
    /// Count of fix records before filtering.
    pub total_fix_count: usize,
    pub filter_label: &'static str,
    pub ci_runs: Vec<CiRowViewModel>,
}

pub fn build_dashboard(snapshot: &DashboardSnapshot, filter: CategoryFilter) -> DashboardViewModel {
    let summary = SummaryViewModel {
        repo: snapshot
            .session
            .as_ref()
            .map(|s| s.repo_url.clone())
            .unwrap_or_default(),
        branch: snapshot
            .session
            .as_ref()
            .map(|s| s.branch_name.clone())
            .unwrap_or_default(),
        team_line: snapshot
            .session
            .as_ref()
            .map(|s| format!("{} / {}", s.team_name, s.team_leader))
            .unwrap_or_default(),
        health: health_label(snapshot),
        total_bugs: snapshot.stats.total_bugs,
        fixed_bugs: snapshot.stats.fixed_bugs,
        failed_fixes: snapshot.stats.failed_fixes,
        success_rate: snapshot.stats.success_rate(),
        uptime_label: format_uptime(snapshot.stats.uptime),
    };

    DashboardViewModel {
        running: snapshot.active,
        run_id: snapshot.session.as_ref().map(|s| s.run_id.clone()),
        stage: snapshot.stage,
        pipeline: pipeline_steps(snapshot.stage),
        summary,
        logs: snapshot
            .logs
            .iter()
            .map(|log| LogLineViewModel {
                clock: format_clock(&log.timestamp),
                message: log.message.clone(),
                level: log.level,
            })
            .collect(),
        fixes: filter
            .apply(&snapshot.fixes)
            .into_iter()
            .map(|fix| FixRowViewModel {
                status: fix.status,
                location: format!("{}:{}", fix.file, fix.line),
                category: fix.bug_type.as_str(),
                commit_message: fix.commit_message.clone(),
                description: fix.description.clone(),
                clock: format_clock(&fix.timestamp),
            })
            .collect(),
        total_fix_count: snapshot.fixes.len(),
        filter_label: filter.label(),
        ci_runs: snapshot
            .ci_runs
            .iter()
            .map(|run| CiRowViewModel {
                id: run.id,
                status: run.status,
                duration: run.duration.clone(),
                clock: format_clock(&run.timestamp),
            })
            .collect(),
    }
}

pub fn pipeline_steps(stage: Stage) -> Vec<PipelineStep> {
    let active_index = match stage {
        Stage::Idle => None,
        Stage::Deploying => Some(PIPELINE_STEPS.len()),
        current => PIPELINE_STEPS.iter().position(|(step, _)| *step == current),
    };

    PIPELINE_STEPS
        .iter()
        .enumerate()
        .map(|(index, &(_, label))| {
            let state = match active_index {
                None => StepState::Pending,
                Some(active) if index < active => StepState::Completed,
                Some(active) if index == active => StepState::Active,
                Some(_) => StepState::Pending,
            };
            PipelineStep { label, state }
        })
        .collect()
}

fn health_label(snapshot: &DashboardSnapshot) -> HealthLabel {
    let stats = &snapshot.stats;
    if stats.uptime == 0 {
        HealthLabel::Waiting
    } else if stats.failed_fixes > 0 {
        HealthLabel::NeedsAttention
    } else if stats.fixed_bugs > 0 {
        HealthLabel::Healthy
    } else {
        HealthLabel::Running
    }
}
