//! Request/response envelopes for the gateway's JSON contract.

use fixwatch_types::{CiRun, FixRecord, LogEvent, RunStatus};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, Serialize)]
pub struct StartRunRequest {
    pub repo_url: String,
    pub team_name: String,
    pub team_leader: String,
    pub retry_limit: u32,
}

/// Success payload of `POST /api/analyze`.
#[derive(Debug, Clone, Deserialize)]
pub struct StartRunResponse {
    pub run_id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsResponse {
    pub logs: Vec<LogEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixesResponse {
    pub fixes: Vec<FixRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CiRunsResponse {
    pub cicd_runs: Vec<CiRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// `GET /api/status/{run_id}` returns the status snapshot directly.
pub type StatusResponse = RunStatus;
