use crate::args::ExportFormat;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use fixwatch_gateway::AgentGateway;
use fixwatch_runtime::ops::export;
use fixwatch_types::CategoryFilter;
use std::path::Path;

/// One-shot export: fetch the fix table once and write the artifact.
pub async fn handle(
    gateway: &dyn AgentGateway,
    run_id: &str,
    format: ExportFormat,
    filter: CategoryFilter,
    out_dir: &Path,
) -> Result<()> {
    let fixes = gateway
        .fetch_fixes(run_id)
        .await
        .with_context(|| format!("could not fetch fixes for run {}", run_id))?;

    if fixes.is_empty() {
        bail!("No fixes to export yet");
    }

    let now = Utc::now();
    let path = match format {
        ExportFormat::Csv => {
            let path = out_dir.join(export::csv_file_name(now));
            export::write_fixes_csv(&path, &fixes)?;
            path
        }
        ExportFormat::Report => {
            let path = out_dir.join(export::report_file_name(now));
            export::write_report(&path, &fixes, filter, now).await?;
            path
        }
    };

    println!("Exported {} fixes to {}", fixes.len(), path.display());
    Ok(())
}
