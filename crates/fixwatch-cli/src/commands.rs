use super::args::{Cli, Commands};
use super::handlers;
use anyhow::Result;
use fixwatch_gateway::GatewayClient;
use fixwatch_runtime::config::{resolve_gateway_url, Config};
use fixwatch_types::{CategoryFilter, RunParams};
use std::sync::Arc;

pub async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let gateway_url = resolve_gateway_url(cli.gateway_url.as_deref(), &config);
    let gateway = Arc::new(GatewayClient::new(&gateway_url)?);

    match cli.command {
        Commands::Run {
            repo_url,
            team,
            leader,
        } => {
            let params = RunParams {
                repo_url,
                team_name: team,
                team_leader: leader,
            };
            handlers::run::handle(gateway, params, config.poll_period()).await
        }

        Commands::Watch { run_id } => {
            handlers::watch::handle(gateway, &run_id, config.poll_period()).await
        }

        Commands::Export {
            run_id,
            format,
            category,
            out_dir,
        } => {
            let filter = match category {
                Some(category) => CategoryFilter::Category(category),
                None => CategoryFilter::All,
            };
            handlers::export::handle(gateway.as_ref(), &run_id, format, filter, &out_dir).await
        }

        Commands::Results { run_id, out_dir } => {
            handlers::results::handle(gateway.as_ref(), &run_id, &out_dir).await
        }

        Commands::Doctor => handlers::doctor::handle(gateway.as_ref(), &gateway_url).await,
    }
}
