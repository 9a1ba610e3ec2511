use crate::error::{Error, Result};
use crate::wire::{
    CiRunsResponse, FixesResponse, HealthResponse, LogsResponse, StartRunRequest,
    StartRunResponse, StatusResponse,
};
use async_trait::async_trait;
use fixwatch_types::{CiRun, FixRecord, LogEvent, RunParams, RunStatus, DEFAULT_RETRY_LIMIT};
use std::time::Duration;

/// Read/write surface of the remote agent gateway.
///
/// The runtime holds this as a trait object so integration tests can swap in
/// a scripted gateway without a network.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// `POST /api/analyze`. Any failure is a hard start failure.
    async fn start_run(&self, params: &RunParams) -> Result<StartRunResponse>;

    /// `GET /api/status/{run_id}`.
    async fn fetch_status(&self, run_id: &str) -> Result<RunStatus>;

    /// `GET /api/logs/{run_id}`. The returned sequence is the complete log
    /// as the gateway knows it; the caller replaces, never appends.
    async fn fetch_logs(&self, run_id: &str) -> Result<Vec<LogEvent>>;

    /// `GET /api/fixes/{run_id}`.
    async fn fetch_fixes(&self, run_id: &str) -> Result<Vec<FixRecord>>;

    /// `GET /api/cicd-runs/{run_id}`.
    async fn fetch_ci_runs(&self, run_id: &str) -> Result<Vec<CiRun>>;

    /// `GET /api/results/{run_id}`: the gateway's complete results
    /// document, kept opaque.
    async fn fetch_results(&self, run_id: &str) -> Result<serde_json::Value>;

    /// `GET /health`.
    async fn health(&self) -> Result<String>;
}

/// reqwest-backed gateway client.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: String,
    http: reqwest::Client,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::BaseUrl("empty base URL".to_string()));
        }
        if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
            return Err(Error::BaseUrl(format!(
                "expected http(s) URL, got '{}'",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Transport)?;

        Ok(Self {
            base_url: trimmed.to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await.map_err(Error::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response.json::<T>().await.map_err(Error::Decode)
    }
}

#[async_trait]
impl AgentGateway for GatewayClient {
    async fn start_run(&self, params: &RunParams) -> Result<StartRunResponse> {
        let url = format!("{}/api/analyze", self.base_url);
        let body = StartRunRequest {
            repo_url: params.repo_url.clone(),
            team_name: params.team_name.clone(),
            team_leader: params.team_leader.clone(),
            retry_limit: DEFAULT_RETRY_LIMIT,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Start(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Start(format!("gateway returned HTTP {}", status)));
        }

        response
            .json::<StartRunResponse>()
            .await
            .map_err(|e| Error::Start(format!("unexpected response body: {}", e)))
    }

    async fn fetch_status(&self, run_id: &str) -> Result<RunStatus> {
        self.get_json::<StatusResponse>(&format!("/api/status/{}", run_id))
            .await
    }

    async fn fetch_logs(&self, run_id: &str) -> Result<Vec<LogEvent>> {
        let response = self
            .get_json::<LogsResponse>(&format!("/api/logs/{}", run_id))
            .await?;
        Ok(response.logs)
    }

    async fn fetch_fixes(&self, run_id: &str) -> Result<Vec<FixRecord>> {
        let response = self
            .get_json::<FixesResponse>(&format!("/api/fixes/{}", run_id))
            .await?;
        Ok(response.fixes)
    }

    async fn fetch_ci_runs(&self, run_id: &str) -> Result<Vec<CiRun>> {
        let response = self
            .get_json::<CiRunsResponse>(&format!("/api/cicd-runs/{}", run_id))
            .await?;
        Ok(response.cicd_runs)
    }

    async fn fetch_results(&self, run_id: &str) -> Result<serde_json::Value> {
        self.get_json::<serde_json::Value>(&format!("/api/results/{}", run_id))
            .await
    }

    async fn health(&self) -> Result<String> {
        let response = self.get_json::<HealthResponse>("/health").await?;
        Ok(response.status)
    }
}
