// ABOUTME: Status command implementation.
// ABOUTME: Prints the container status snapshot with each container's classified state.

use dropdeploy::config::Config;
use dropdeploy::error::Result;
use dropdeploy::output::Output;
use dropdeploy::stack::{StackManager, SystemRunner};

pub async fn status(config: &Config, output: Output) -> Result<()> {
    let stack = StackManager::new(SystemRunner, config.stack_settings());
    let snapshot = stack.list_status().await?;

    if snapshot.is_empty() {
        output.result("No containers listed");
        return Ok(());
    }

    let width = snapshot.iter().map(|e| e.name.as_str().len()).max().unwrap_or(0);
    for entry in &snapshot {
        output.result(&format!(
            "{:<width$}  {:<12}  {}",
            entry.name.as_str(),
            entry.state().to_string(),
            entry.status
        ));
    }

    Ok(())
}
