use anyhow::Result;
use fixwatch_gateway::AgentGateway;
use fixwatch_runtime::Config;
use owo_colors::OwoColorize;

/// Check local configuration and gateway reachability.
pub async fn handle(gateway: &dyn AgentGateway, gateway_url: &str) -> Result<()> {
    println!("Gateway URL: {}", gateway_url);

    match Config::default_path() {
        Ok(path) => {
            let marker = if path.exists() { "found" } else { "not present (defaults in use)" };
            println!("Config file: {} ({})", path.display(), marker);
        }
        Err(err) => println!("Config file: unavailable ({})", err),
    }

    match gateway.health().await {
        Ok(status) => {
            println!("{} gateway is {}", "✓".green(), status);
            Ok(())
        }
        Err(err) => {
            println!("{} gateway unreachable: {}", "✗".red(), err);
            Err(err.into())
        }
    }
}
