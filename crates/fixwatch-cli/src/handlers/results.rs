use anyhow::{Context, Result};
use fixwatch_gateway::AgentGateway;
use fixwatch_runtime::ops::export;
use std::path::Path;

/// Download the gateway's complete results document for a run.
pub async fn handle(gateway: &dyn AgentGateway, run_id: &str, out_dir: &Path) -> Result<()> {
    let document = gateway
        .fetch_results(run_id)
        .await
        .with_context(|| format!("could not fetch results for run {}", run_id))?;

    let path = out_dir.join(export::results_file_name(run_id));
    export::write_results(&path, &document).await?;

    println!("Wrote {}", path.display());
    Ok(())
}
