use crate::handlers::live;
use anyhow::{Context, Result};
use fixwatch_gateway::AgentGateway;
use fixwatch_runtime::{Runtime, RuntimeConfig};
use fixwatch_types::RunSession;
use std::sync::Arc;
use std::time::Duration;

/// Attach to a run the gateway already knows about. One status fetch
/// recovers the session metadata before polling begins.
pub async fn handle(
    gateway: Arc<dyn AgentGateway>,
    run_id: &str,
    poll_period: Duration,
) -> Result<()> {
    let status = gateway
        .fetch_status(run_id)
        .await
        .with_context(|| format!("run {} not found on the gateway", run_id))?;

    let session = RunSession {
        run_id: status.run_id,
        repo_url: status.repo_url,
        team_name: status.team_name,
        team_leader: status.team_leader,
        branch_name: status.branch_name,
    };

    let mut config = RuntimeConfig::new(gateway);
    config.poll_period = poll_period;

    let runtime = Runtime::attach(config, session);
    live::drive(runtime).await
}
