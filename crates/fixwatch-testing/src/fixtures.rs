//! Sample record builders for test scenarios.

use fixwatch_types::{
    BugCategory, CiRun, CiStatus, FixRecord, FixStatus, LogEvent, LogLevel, RunParams, RunStatus,
    Severity, Stage, Stats,
};

pub fn sample_params() -> RunParams {
    RunParams {
        repo_url: "https://github.com/acme/app".to_string(),
        team_name: "TEAM AMD".to_string(),
        team_leader: "AZHAN ALI".to_string(),
    }
}

pub fn sample_status(run_id: &str, stage: Stage, stats: Stats) -> RunStatus {
    let params = sample_params();
    RunStatus {
        run_id: run_id.to_string(),
        status: "running".to_string(),
        stage,
        progress: 40.0,
        stats,
        repo_url: params.repo_url.clone(),
        team_name: params.team_name.clone(),
        team_leader: params.team_leader.clone(),
        branch_name: params.branch_name(),
    }
}

pub fn sample_stats(total: u64, fixed: u64, failed: u64, uptime: u64) -> Stats {
    Stats {
        total_bugs: total,
        fixed_bugs: fixed,
        failed_fixes: failed,
        uptime,
    }
}

pub fn sample_log(run_id: &str, index: usize, message: &str) -> LogEvent {
    LogEvent {
        id: format!("{}_{}", run_id, index),
        timestamp: format!("2026-01-05T10:00:{:02}", index % 60),
        message: message.to_string(),
        level: LogLevel::Info,
    }
}

pub fn sample_fix(run_id: &str, index: usize, category: BugCategory) -> FixRecord {
    FixRecord {
        id: format!("{}_fix_{}", run_id, index),
        file: format!("src/module_{}.py", index),
        line: 10 + index as u64,
        bug_type: category,
        description: format!("Issue {} detected by the scanner", index),
        commit_message: format!("Fix {} issue", category.as_str()),
        status: FixStatus::InProgress,
        timestamp: format!("2026-01-05T10:01:{:02}", index % 60),
        severity: Severity::Medium,
    }
}

pub fn sample_ci_run(index: usize, status: CiStatus) -> CiRun {
    CiRun {
        id: 1_767_600_000_000 + index as i64,
        status,
        timestamp: format!("2026-01-05T10:02:{:02}", index % 60),
        duration: format!("{}.{}s", index + 1, index % 10),
    }
}
