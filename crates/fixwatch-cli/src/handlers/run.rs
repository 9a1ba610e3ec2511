use crate::handlers::live;
use anyhow::Result;
use fixwatch_gateway::AgentGateway;
use fixwatch_runtime::{Runtime, RuntimeConfig};
use fixwatch_types::RunParams;
use std::sync::Arc;
use std::time::Duration;

/// Start a new agent run and watch it live. A start rejection surfaces
/// here and nothing begins polling.
pub async fn handle(
    gateway: Arc<dyn AgentGateway>,
    params: RunParams,
    poll_period: Duration,
) -> Result<()> {
    let mut config = RuntimeConfig::new(gateway);
    config.poll_period = poll_period;

    let runtime = Runtime::start(config, params).await?;
    live::drive(runtime).await
}
